use pupil_detector::image::io::{
    load_grayscale_image, load_region_mask, save_grayscale_u8, write_json_file,
};
use pupil_detector::{PupilDetector, PupilParams};
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        eprintln!("USAGE: pupil-demo <eye-image> [roi-mask] [debug-dir]");
        std::process::exit(2);
    };
    let mask_path: Option<PathBuf> = args.next().map(PathBuf::from);
    let debug_dir: Option<PathBuf> = args.next().map(PathBuf::from);

    if let Err(e) = run(Path::new(&image_path), mask_path.as_deref(), debug_dir.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(image_path: &Path, mask_path: Option<&Path>, debug_dir: Option<&Path>) -> Result<(), String> {
    let frame = load_grayscale_image(image_path)?;

    let params = PupilParams {
        debug_capture: debug_dir.is_some(),
        ..Default::default()
    };
    let mut detector = PupilDetector::new(params);
    if let Some(path) = mask_path {
        detector.set_region_mask(load_region_mask(path)?);
    }

    let report = detector.process(frame.as_view());
    match &report.pupil.ellipse {
        Some(e) => println!(
            "found pupil at ({:.1}, {:.1}) axes {:.1}x{:.1} angle {:.1} deg ({:.3} ms)",
            e.center.0,
            e.center.1,
            e.major_axis,
            e.minor_axis,
            e.angle_deg,
            report.pupil.latency_ms
        ),
        None => println!("no pupil found ({:.3} ms)", report.pupil.latency_ms),
    }

    if let (Some(dir), Some(trace)) = (debug_dir, &report.trace) {
        for (i, stage) in trace.stages.iter().enumerate() {
            let file = dir.join(format!("{:02}_{}.png", i, stage.kind.label()));
            save_grayscale_u8(&stage.image, &file)?;
        }
        write_json_file(&dir.join("result.json"), &report.pupil)?;
    }
    Ok(())
}

mod common;

use common::synthetic_image::{pupil_frame_u8, pupil_frame_with_glint_u8, uniform_frame_u8};
use pupil_detector::contours::{extract_contours, select_and_merge};
use pupil_detector::edges::{box_blur, canny_edges};
use pupil_detector::image::{GrayImageU8, ImageU8};
use pupil_detector::preprocess::build_working_image;
use pupil_detector::{PupilDetector, PupilParams, StageKind};

fn view(buf: &[u8], w: usize, h: usize) -> ImageU8<'_> {
    ImageU8 {
        w,
        h,
        stride: w,
        data: buf,
    }
}

#[test]
fn dark_disc_on_bright_background_is_found() {
    let (w, h) = (640usize, 360usize);
    let buffer = pupil_frame_u8(w, h, 320.0, 180.0, 40.0, 5.0);

    let detector = PupilDetector::new(PupilParams::default());
    let report = detector.process(view(&buffer, w, h));

    assert!(report.pupil.found, "expected the pupil disc to be detected");
    let e = report.pupil.ellipse.expect("found implies an ellipse");
    assert!(
        (e.center.0 - 320.0).abs() <= 3.0 && (e.center.1 - 180.0).abs() <= 3.0,
        "center off: ({:.1}, {:.1})",
        e.center.0,
        e.center.1
    );
    assert!(
        (70.0..=90.0).contains(&e.major_axis) && (70.0..=90.0).contains(&e.minor_axis),
        "axes off: {:.1} x {:.1}",
        e.major_axis,
        e.minor_axis
    );
}

#[test]
fn closed_pupil_boundary_passes_the_size_filter_without_relaxation() {
    let (w, h) = (640usize, 360usize);
    let buffer = pupil_frame_u8(w, h, 320.0, 180.0, 40.0, 5.0);
    let p = PupilParams::default();

    let work = build_working_image(&view(&buffer, w, h), None);
    let blurred = box_blur(&work, p.blur_kernel_size);
    let edges = canny_edges(
        &blurred,
        p.edge_threshold,
        p.edge_threshold_ratio,
        p.edge_aperture,
    );

    // the disc boundary must come out as one connected border, not arcs
    let contours = extract_contours(&edges);
    let longest = contours.iter().map(|c| c.len()).max().unwrap_or(0);
    assert!(
        longest >= p.min_contour_size,
        "boundary fragmented: longest contour has {longest} points"
    );

    let sel = select_and_merge(&contours, p.min_contour_size).unwrap();
    assert_eq!(
        sel.effective_min, p.min_contour_size,
        "size filter should pass on the first round"
    );
}

#[test]
fn uniform_frame_reports_no_pupil() {
    let (w, h) = (320usize, 240usize);
    let buffer = uniform_frame_u8(w, h, 128);

    let detector = PupilDetector::new(PupilParams::default());
    let report = detector.process(view(&buffer, w, h));

    assert!(!report.pupil.found);
    assert!(report.pupil.ellipse.is_none(), "failure carries no ellipse");
}

#[test]
fn glint_inside_the_pupil_does_not_break_detection() {
    let (w, h) = (640usize, 360usize);
    let buffer = pupil_frame_with_glint_u8(w, h, 320.0, 180.0, 40.0, 5.0, 5.0);

    let detector = PupilDetector::new(PupilParams::default());
    let report = detector.process(view(&buffer, w, h));

    assert!(report.pupil.found, "glint should be masked out, not fatal");
    let e = report.pupil.ellipse.unwrap();
    assert!(
        (e.center.0 - 320.0).abs() <= 4.0 && (e.center.1 - 180.0).abs() <= 4.0,
        "center off: ({:.1}, {:.1})",
        e.center.0,
        e.center.1
    );
    assert!(
        (68.0..=92.0).contains(&e.major_axis) && (68.0..=92.0).contains(&e.minor_axis),
        "axes off: {:.1} x {:.1}",
        e.major_axis,
        e.minor_axis
    );
}

#[test]
fn small_pupil_is_recovered_by_relaxation() {
    let (w, h) = (320usize, 240usize);
    let buffer = pupil_frame_u8(w, h, 160.0, 120.0, 12.0, 5.0);

    let detector = PupilDetector::new(PupilParams::default());
    let report = detector.process(view(&buffer, w, h));

    assert!(report.pupil.found, "small pupils should still be detected");
    let e = report.pupil.ellipse.unwrap();
    assert!(
        (e.center.0 - 160.0).abs() <= 3.0 && (e.center.1 - 120.0).abs() <= 3.0,
        "center off: ({:.1}, {:.1})",
        e.center.0,
        e.center.1
    );
    assert!(
        (16.0..=32.0).contains(&e.major_axis),
        "major axis off: {:.1}",
        e.major_axis
    );
}

#[test]
fn region_mask_excludes_a_competing_dark_region() {
    let (w, h) = (360usize, 200usize);
    let mut buffer = pupil_frame_u8(w, h, 100.0, 100.0, 30.0, 5.0);
    // second dark disc that would pull the fit to the right
    common::synthetic_image::draw_soft_disc(&mut buffer, w, 260.0, 100.0, 30.0, 5.0, 20);

    // unmasked: both discs merge and the fit lands between them
    let detector = PupilDetector::new(PupilParams::default());
    let unmasked = detector.process(view(&buffer, w, h));
    assert!(unmasked.pupil.found);
    assert!(
        unmasked.pupil.ellipse.unwrap().center.0 > 120.0,
        "expected the unmasked fit to be pulled right"
    );

    // mask off the right half: only the left disc remains eligible
    let mut mask = GrayImageU8::new(w, h);
    for y in 0..h {
        for x in 0..180 {
            mask.set(x, y, 255);
        }
    }
    let mut detector = PupilDetector::new(PupilParams::default());
    detector.set_region_mask(mask);
    let masked = detector.process(view(&buffer, w, h));

    assert!(masked.pupil.found);
    let e = masked.pupil.ellipse.unwrap();
    assert!(
        (e.center.0 - 100.0).abs() <= 5.0,
        "masked fit should stay on the left disc, got cx={:.1}",
        e.center.0
    );
}

#[test]
fn detection_is_deterministic() {
    let (w, h) = (640usize, 360usize);
    let buffer = pupil_frame_u8(w, h, 300.0, 190.0, 35.0, 5.0);

    let params = PupilParams {
        debug_capture: true,
        ..Default::default()
    };
    let detector = PupilDetector::new(params);
    let a = detector.process(view(&buffer, w, h));
    let b = detector.process(view(&buffer, w, h));

    assert_eq!(a.pupil.ellipse, b.pupil.ellipse);

    let ta = a.trace.expect("debug_capture produces a trace");
    let tb = b.trace.unwrap();
    assert_eq!(ta.stages.len(), tb.stages.len());
    for (sa, sb) in ta.stages.iter().zip(tb.stages.iter()) {
        assert_eq!(sa.kind, sb.kind);
        assert_eq!(sa.image, sb.image, "stage {:?} differs", sa.kind);
    }
}

#[test]
fn debug_capture_exposes_every_stage_in_order() {
    let (w, h) = (320usize, 240usize);
    let buffer = pupil_frame_u8(w, h, 160.0, 120.0, 30.0, 5.0);

    let params = PupilParams {
        debug_capture: true,
        ..Default::default()
    };
    let detector = PupilDetector::new(params);
    let report = detector.process(view(&buffer, w, h));

    let trace = report.trace.expect("trace requested");
    let kinds: Vec<StageKind> = trace.stages.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StageKind::NormalizedGray,
            StageKind::DarkMask,
            StageKind::GlintMask,
            StageKind::Blurred,
            StageKind::RawEdges,
            StageKind::PrunedEdges,
            StageKind::AllContours,
            StageKind::FilteredContours,
        ]
    );
    for stage in &trace.stages {
        assert_eq!((stage.image.w, stage.image.h), (w, h));
    }

    // capture must not alter the detection outcome
    let plain = PupilDetector::new(PupilParams::default());
    let baseline = plain.process(view(&buffer, w, h));
    assert_eq!(baseline.pupil.ellipse, report.pupil.ellipse);
    assert!(baseline.trace.is_none());
}

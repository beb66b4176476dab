/// Generates a bright frame with a soft-edged dark disc, approximating a
/// defocused pupil on sclera/skin background. `edge` is the half-width of
/// the intensity ramp at the disc boundary, in pixels.
pub fn pupil_frame_u8(
    width: usize,
    height: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    edge: f64,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![200u8; width * height];
    draw_soft_disc(&mut img, width, cx, cy, radius, edge, 20);
    img
}

/// Same frame with a small bright glint disc inside the pupil.
pub fn pupil_frame_with_glint_u8(
    width: usize,
    height: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    edge: f64,
    glint_radius: f64,
) -> Vec<u8> {
    let mut img = pupil_frame_u8(width, height, cx, cy, radius, edge);
    // glint offset from center, fully inside the pupil
    draw_soft_disc(
        &mut img,
        width,
        cx - radius * 0.3,
        cy - radius * 0.3,
        glint_radius,
        1.0,
        255,
    );
    img
}

/// Uniform gray frame with no intensity variation at all.
pub fn uniform_frame_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Blend a disc of `value` into the frame, ramping linearly to the existing
/// background over `radius ± edge`.
pub fn draw_soft_disc(
    img: &mut [u8],
    width: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    edge: f64,
    value: u8,
) {
    let height = img.len() / width;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let i = y * width + x;
            if d <= radius - edge {
                img[i] = value;
            } else if d < radius + edge {
                // linear blend from disc value to current background
                let t = (d - (radius - edge)) / (2.0 * edge);
                let bg = img[i] as f64;
                img[i] = (value as f64 * (1.0 - t) + bg * t).round() as u8;
            }
        }
    }
}

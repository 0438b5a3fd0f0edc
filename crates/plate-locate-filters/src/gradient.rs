use plate_locate_core::{GrayImage, GrayImageView};

/// Horizontal Sobel kernel: responds to left/right intensity transitions.
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Absolute horizontal Sobel response, saturated to `[0, 255]`.
///
/// Only the horizontal component is computed; vertical edges are what plate
/// character strokes produce. The 1-pixel border frame stays 0.
pub fn sobel_horizontal(src: &GrayImageView<'_>) -> GrayImage {
    let mut out = GrayImage::zeros(src.width, src.height);

    let y_end = src.height.saturating_sub(1);
    let x_end = src.width.saturating_sub(1);
    for y in 1..y_end {
        for x in 1..x_end {
            let mut gx = 0i32;
            for (ky, row) in SOBEL_X.iter().enumerate() {
                for (kx, &w) in row.iter().enumerate() {
                    gx += src.data[(y + ky - 1) * src.width + (x + kx - 1)] as i32 * w;
                }
            }
            out.data[y * src.width + x] = gx.unsigned_abs().min(255) as u8;
        }
    }
    out
}

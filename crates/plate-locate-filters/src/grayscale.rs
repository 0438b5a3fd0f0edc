use plate_locate_core::{BgrImageView, GrayImage};

/// Collapse a BGR image to single-channel luma.
///
/// Rec. 601 weights `0.299 R + 0.587 G + 0.114 B`, truncating (not rounding)
/// the weighted sum to `u8`. Channel 0 of the input is blue.
pub fn grayscale_bgr(src: &BgrImageView<'_>) -> GrayImage {
    let mut out = GrayImage::zeros(src.width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            let [b, g, r] = src.pixel(x, y);
            let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            out.data[y * src.width + x] = luma as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_locate_core::BgrImage;

    #[test]
    fn luma_weights_truncate() {
        let mut img = BgrImage::zeros(1, 1);
        img.data.copy_from_slice(&[10, 20, 30]); // b=10 g=20 r=30
        let gray = grayscale_bgr(&img.as_view());
        // 0.299*30 + 0.587*20 + 0.114*10 = 21.85 -> 21
        assert_eq!(gray.data[0], 21);
    }

    #[test]
    fn pure_channels() {
        let mut img = BgrImage::zeros(3, 1);
        img.data[0..3].copy_from_slice(&[255, 0, 0]); // blue
        img.data[3..6].copy_from_slice(&[0, 255, 0]); // green
        img.data[6..9].copy_from_slice(&[0, 0, 255]); // red
        let gray = grayscale_bgr(&img.as_view());
        assert_eq!(gray.data[0], 29); // 0.114 * 255 = 29.07
        assert_eq!(gray.data[1], 149); // 0.587 * 255 = 149.685
        assert_eq!(gray.data[2], 76); // 0.299 * 255 = 76.245
    }

    #[test]
    fn preserves_dimensions() {
        let img = BgrImage::zeros(7, 4);
        let gray = grayscale_bgr(&img.as_view());
        assert_eq!((gray.width, gray.height), (7, 4));
        assert!(gray.data.iter().all(|&v| v == 0));
    }
}

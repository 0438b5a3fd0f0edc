//! Adapters between `image`-crate buffers and the detector's BGR/gray
//! types, plus small visualization helpers.

use plate_locate_core::{crop_bgr, BgrImage, GrayImage, Rect};

use crate::{LowerBandParams, PlateDetector};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the raw-buffer adapters.
#[derive(thiserror::Error, Debug)]
pub enum AdaptError {
    #[error("invalid BGR image buffer length (expected {expected} bytes, got {got})")]
    InvalidBgrBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Reorder an `image::RgbImage` into the BGR layout the detector expects.
pub fn bgr_image_from_rgb(img: &::image::RgbImage) -> BgrImage {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut out = BgrImage::zeros(width, height);
    for (i, px) in img.pixels().enumerate() {
        let [r, g, b] = px.0;
        out.data[3 * i] = b;
        out.data[3 * i + 1] = g;
        out.data[3 * i + 2] = r;
    }
    out
}

/// Build a BGR image from a raw interleaved `[b, g, r]` buffer.
pub fn bgr_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<BgrImage, AdaptError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(AdaptError::InvalidDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(AdaptError::InvalidDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(AdaptError::InvalidBgrBuffer {
            expected,
            got: pixels.len(),
        });
    }
    Ok(BgrImage {
        width: w,
        height: h,
        data: pixels.to_vec(),
    })
}

/// Convert an owned grayscale buffer into an `image::GrayImage` for saving.
pub fn gray_to_luma8(img: &GrayImage) -> Option<::image::GrayImage> {
    ::image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

/// Draw a rectangle outline of the given thickness, clipped to the image.
pub fn draw_rect(img: &mut ::image::RgbImage, rect: &Rect, color: [u8; 3], thickness: u32) {
    let (w, h) = img.dimensions();
    let px = ::image::Rgb(color);
    let [x0, y0, x1, y1] = rect.corner_box();
    let t = thickness as i32;

    let mut put = |x: i32, y: i32| {
        if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
            img.put_pixel(x as u32, y as u32, px);
        }
    };

    for d in 0..t {
        for x in x0..=x1 {
            put(x, y0 + d);
            put(x, y1 - d);
        }
        for y in y0..=y1 {
            put(x0 + d, y);
            put(x1 - d, y);
        }
    }
}

/// Detect a plate directly on an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, detector), fields(width = img.width(), height = img.height()))
)]
pub fn detect_plate_image(img: &::image::RgbImage, detector: &PlateDetector) -> Rect {
    let bgr = bgr_image_from_rgb(img);
    detector.detect(&bgr.as_view())
}

/// Detect a plate with the lower-band heuristic on an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, detector, band), fields(width = img.width(), height = img.height()))
)]
pub fn detect_plate_image_lower_band(
    img: &::image::RgbImage,
    detector: &PlateDetector,
    band: &LowerBandParams,
) -> Rect {
    let bgr = bgr_image_from_rgb(img);
    detector.detect_lower_band(&bgr.as_view(), band)
}

/// Crop the detected plate out of the source and binarize it for display.
///
/// Returns `None` when `rect` is empty.
pub fn preprocess_plate_image(
    img: &::image::RgbImage,
    rect: &Rect,
    detector: &PlateDetector,
) -> Option<GrayImage> {
    if rect.is_empty() {
        return None;
    }
    let bgr = bgr_image_from_rgb(img);
    let plate = crop_bgr(&bgr.as_view(), rect);
    Some(detector.preprocess_plate(&plate.as_view()))
}

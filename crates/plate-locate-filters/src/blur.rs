use std::f64::consts::PI;

use plate_locate_core::{GrayImage, GrayImageView};

/// Smoothing width used by [`gaussian_blur`].
const SIGMA: f64 = 1.0;

/// Build a `size`x`size` Gaussian kernel, row-major, normalized to sum 1.
///
/// `size` must be odd; weights come from
/// `exp(-(i^2 + j^2) / (2 sigma^2)) / (2 pi sigma^2)` for offsets in
/// `[-size/2, size/2]` before normalization.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Vec<f64> {
    let half = (size / 2) as i32;
    let mut kernel = Vec::with_capacity(size * size);
    let mut sum = 0.0;
    for i in -half..=half {
        for j in -half..=half {
            let w = (-((i * i + j * j) as f64) / (2.0 * sigma * sigma)).exp()
                / (2.0 * PI * sigma * sigma);
            kernel.push(w);
            sum += w;
        }
    }
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Smooth with a normalized Gaussian kernel of odd `kernel_size`, sigma 1.0.
///
/// Only pixels a full half-kernel away from every edge are computed; the
/// border frame stays 0. The convolution sum is rounded and saturated to
/// `[0, 255]`.
pub fn gaussian_blur(src: &GrayImageView<'_>, kernel_size: usize) -> GrayImage {
    let half = kernel_size / 2;
    let kernel = gaussian_kernel(kernel_size, SIGMA);
    let mut out = GrayImage::zeros(src.width, src.height);

    let y_end = src.height.saturating_sub(half);
    let x_end = src.width.saturating_sub(half);
    for y in half..y_end {
        for x in half..x_end {
            let mut sum = 0.0;
            for ky in 0..kernel_size {
                for kx in 0..kernel_size {
                    let sy = y + ky - half;
                    let sx = x + kx - half;
                    sum += src.data[sy * src.width + sx] as f64 * kernel[ky * kernel_size + kx];
                }
            }
            out.data[y * src.width + x] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

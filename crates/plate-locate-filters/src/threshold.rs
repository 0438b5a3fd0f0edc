use log::debug;
use plate_locate_core::{GrayImage, GrayImageView};

/// Threshold argument that makes [`binarize`] compute the cutoff with
/// [`otsu_threshold`].
///
/// 0 is reserved for this; a genuine fixed threshold of 0 cannot be
/// requested.
pub const AUTO_THRESHOLD: u8 = 0;

/// Otsu's method: the cutoff maximizing between-class variance.
///
/// Builds a 256-bin histogram, then sweeps candidate thresholds tracking
/// background/foreground weight and mean incrementally. Candidates with an
/// empty class are skipped, so no division by zero is reachable. Only a
/// strict improvement replaces the best candidate, which keeps the lowest
/// cutoff on ties. A flat histogram yields 0.
pub fn otsu_threshold(src: &GrayImageView<'_>) -> u8 {
    let mut histogram = [0u32; 256];
    for &v in src.data {
        histogram[v as usize] += 1;
    }

    let total = src.data.len() as f64;
    let mut sum = 0.0;
    for (i, &h) in histogram.iter().enumerate() {
        sum += i as f64 * h as f64;
    }

    let mut sum_b = 0.0;
    let mut w_b = 0.0;
    let mut max_variance = 0.0;
    let mut threshold = 0u8;

    for (i, &h) in histogram.iter().enumerate() {
        w_b += h as f64;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }

        sum_b += i as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum - sum_b) / w_f;

        let variance = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if variance > max_variance {
            max_variance = variance;
            threshold = i as u8;
        }
    }

    debug!("otsu threshold = {threshold}");
    threshold
}

/// Global binarization: 255 where `value > threshold` (strict), else 0.
///
/// Passing [`AUTO_THRESHOLD`] computes the cutoff from the input's histogram
/// first; any other value is applied as-is. Every pixel is thresholded; this
/// stage has no border frame.
pub fn binarize(src: &GrayImageView<'_>, threshold: u8) -> GrayImage {
    let t = if threshold == AUTO_THRESHOLD {
        otsu_threshold(src)
    } else {
        threshold
    };

    let mut out = GrayImage::zeros(src.width, src.height);
    for (o, &v) in out.data.iter_mut().zip(src.data) {
        *o = if v > t { 255 } else { 0 };
    }
    out
}

/// Local mean threshold for dark text on a lighter background.
///
/// For every pixel whose `block_size` window fits entirely inside the image,
/// the output is 255 where `pixel < mean - c` (window mean with integer
/// division), else 0. The rule is inverted relative to [`binarize`]: ink
/// comes out as foreground. The border frame stays 0.
pub fn adaptive_mean_threshold(src: &GrayImageView<'_>, block_size: usize, c: i32) -> GrayImage {
    let half = block_size / 2;
    let mut out = GrayImage::zeros(src.width, src.height);

    let y_end = src.height.saturating_sub(half);
    let x_end = src.width.saturating_sub(half);
    for y in half..y_end {
        for x in half..x_end {
            let mut sum = 0i64;
            let mut count = 0i64;
            for sy in (y - half)..=(y + half) {
                for sx in (x - half)..=(x + half) {
                    sum += src.data[sy * src.width + sx] as i64;
                    count += 1;
                }
            }
            let mean = (sum / count) as i32;

            let v = src.data[y * src.width + x] as i32;
            out.data[y * src.width + x] = if v < mean - c { 255 } else { 0 };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: usize, height: usize, data: Vec<u8>) -> GrayImage {
        assert_eq!(data.len(), width * height);
        GrayImage {
            width,
            height,
            data,
        }
    }

    #[test]
    fn otsu_separates_two_clusters() {
        // 1000 pixels at 50, 1000 at 200: every cutoff in [50, 199]
        // separates the clusters equally well, and the strict-improvement
        // rule keeps the lowest one
        let mut data = vec![50u8; 1000];
        data.extend(std::iter::repeat(200u8).take(1000));
        let img = gray(50, 40, data);
        let t = otsu_threshold(&img.as_view());
        assert_eq!(t, 50);
    }

    #[test]
    fn otsu_favors_the_larger_gap() {
        // unbalanced clusters still split between them
        let mut data = vec![10u8; 1500];
        data.extend(std::iter::repeat(180u8).take(400));
        data.extend(std::iter::repeat(190u8).take(100));
        let img = gray(50, 40, data);
        let t = otsu_threshold(&img.as_view());
        assert!((10..180).contains(&t), "t = {t}");
    }

    #[test]
    fn otsu_on_flat_image_is_zero() {
        let img = gray(10, 10, vec![42u8; 100]);
        assert_eq!(otsu_threshold(&img.as_view()), 0);
    }

    #[test]
    fn binarize_uses_strict_inequality() {
        let img = gray(3, 1, vec![99, 100, 101]);
        let bin = binarize(&img.as_view(), 100);
        assert_eq!(bin.data, vec![0, 0, 255]);
    }

    #[test]
    fn binarize_zero_selects_otsu() {
        let mut data = vec![50u8; 1000];
        data.extend(std::iter::repeat(200u8).take(1000));
        let img = gray(50, 40, data);
        let bin = binarize(&img.as_view(), AUTO_THRESHOLD);
        // the 200-cluster lands above the cutoff, the 50-cluster below
        assert_eq!(bin.data[0], 0);
        assert_eq!(bin.data[1999], 255);
    }

    #[test]
    fn adaptive_marks_dark_pixel_on_light_background() {
        // one dark pixel centered in a light 11x11 patch
        let mut data = vec![200u8; 121];
        data[5 * 11 + 5] = 100;
        let img = gray(11, 11, data);
        let bin = adaptive_mean_threshold(&img.as_view(), 11, 2);
        // mean = (120*200 + 100)/121 = 199 (integer division); 100 < 197
        assert_eq!(bin.data[5 * 11 + 5], 255);
    }

    #[test]
    fn adaptive_leaves_flat_region_background() {
        let img = gray(15, 15, vec![180u8; 225]);
        let bin = adaptive_mean_threshold(&img.as_view(), 11, 2);
        assert!(bin.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn adaptive_border_frame_stays_zero() {
        let mut data = vec![200u8; 144];
        data[0] = 0; // dark pixel inside the border frame
        let img = gray(12, 12, data);
        let bin = adaptive_mean_threshold(&img.as_view(), 11, 2);
        assert_eq!(bin.data[0], 0);
    }
}

use plate_locate_core::{GrayImage, GrayImageView};

/// Rectangular grid of boolean "on" cells.
///
/// The same element drives both dilation and erosion. Plate consolidation
/// uses a wide, short all-on rectangle so that horizontally adjacent
/// character strokes merge while vertically separated clutter does not.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl StructuringElement {
    /// All-on rectangle of the given size.
    pub fn rect(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn half_width(&self) -> usize {
        self.width / 2
    }

    #[inline]
    pub fn half_height(&self) -> usize {
        self.height / 2
    }

    #[inline]
    pub fn is_on(&self, kx: usize, ky: usize) -> bool {
        self.cells[ky * self.width + kx]
    }
}

/// Dilation: a pixel becomes 255 when the element centered on it overlaps at
/// least one foreground pixel.
///
/// The half-width/half-height border frame stays 0.
pub fn dilate(src: &GrayImageView<'_>, element: &StructuringElement) -> GrayImage {
    let hw = element.half_width();
    let hh = element.half_height();
    let mut out = GrayImage::zeros(src.width, src.height);

    let y_end = src.height.saturating_sub(hh);
    let x_end = src.width.saturating_sub(hw);
    for y in hh..y_end {
        for x in hw..x_end {
            let mut hit = false;
            'probe: for ky in 0..element.height {
                for kx in 0..element.width {
                    if element.is_on(kx, ky)
                        && src.data[(y + ky - hh) * src.width + (x + kx - hw)] > 0
                    {
                        hit = true;
                        break 'probe;
                    }
                }
            }
            out.data[y * src.width + x] = if hit { 255 } else { 0 };
        }
    }
    out
}

/// Erosion: a pixel stays 255 only when every on-cell of the element aligns
/// with a foreground pixel.
///
/// The half-width/half-height border frame stays 0.
pub fn erode(src: &GrayImageView<'_>, element: &StructuringElement) -> GrayImage {
    let hw = element.half_width();
    let hh = element.half_height();
    let mut out = GrayImage::zeros(src.width, src.height);

    let y_end = src.height.saturating_sub(hh);
    let x_end = src.width.saturating_sub(hw);
    for y in hh..y_end {
        for x in hw..x_end {
            let mut fit = true;
            'probe: for ky in 0..element.height {
                for kx in 0..element.width {
                    if element.is_on(kx, ky)
                        && src.data[(y + ky - hh) * src.width + (x + kx - hw)] == 0
                    {
                        fit = false;
                        break 'probe;
                    }
                }
            }
            out.data[y * src.width + x] = if fit { 255 } else { 0 };
        }
    }
    out
}

/// Morphological closing: dilation followed by erosion with the same element.
///
/// Merges nearby bright regions into solid blobs and drops isolated
/// specks that the erosion pass cannot support.
pub fn close(src: &GrayImageView<'_>, element: &StructuringElement) -> GrayImage {
    let dilated = dilate(src, element);
    erode(&dilated.as_view(), element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(width: usize, height: usize, foreground: &[(usize, usize)]) -> GrayImage {
        let mut img = GrayImage::zeros(width, height);
        for &(x, y) in foreground {
            img.data[y * width + x] = 255;
        }
        img
    }

    fn row_run(img: &mut GrayImage, y: usize, x0: usize, x1: usize) {
        for x in x0..x1 {
            img.data[y * img.width + x] = 255;
        }
    }

    #[test]
    fn dilate_spreads_single_pixel_to_element_footprint() {
        let img = binary(41, 9, &[(20, 4)]);
        let element = StructuringElement::rect(17, 3);
        let dilated = dilate(&img.as_view(), &element);

        // within 8 columns and 1 row of the seed
        assert_eq!(dilated.data[4 * 41 + 12], 255);
        assert_eq!(dilated.data[4 * 41 + 28], 255);
        assert_eq!(dilated.data[3 * 41 + 20], 255);
        assert_eq!(dilated.data[5 * 41 + 20], 255);
        // beyond the footprint
        assert_eq!(dilated.data[4 * 41 + 11], 0);
        assert_eq!(dilated.data[4 * 41 + 29], 0);
        assert_eq!(dilated.data[2 * 41 + 20], 0);
    }

    #[test]
    fn closing_bridges_a_gap_narrower_than_the_element() {
        // two horizontal runs separated by a 10-pixel gap on one row
        let mut img = GrayImage::zeros(80, 9);
        row_run(&mut img, 4, 10, 30);
        row_run(&mut img, 4, 40, 60);

        let element = StructuringElement::rect(17, 3);
        let closed = close(&img.as_view(), &element);

        // dilation fills [8, 67] on rows 3..=5; erosion keeps the columns
        // whose full 17x3 window stays inside that span, one solid run
        for x in 16..60 {
            assert_eq!(closed.data[4 * 80 + x], 255, "column {x}");
        }
        assert_eq!(closed.data[4 * 80 + 15], 0);
        assert_eq!(closed.data[4 * 80 + 60], 0);
    }

    #[test]
    fn closing_keeps_an_interior_isolated_pixel() {
        // the dilated footprint fully supports one erosion window, so the
        // pixel comes back as itself
        let img = binary(41, 11, &[(20, 5)]);
        let element = StructuringElement::rect(17, 3);
        let closed = close(&img.as_view(), &element);
        let survivors: Vec<usize> = (0..closed.data.len())
            .filter(|&i| closed.data[i] != 0)
            .collect();
        assert_eq!(survivors, vec![5 * 41 + 20]);
    }

    #[test]
    fn closing_drops_a_pixel_whose_footprint_is_clipped() {
        // too close to the left edge: the uncomputed frame truncates the
        // dilated footprint and no erosion window finds full support
        let img = binary(30, 11, &[(10, 5)]);
        let element = StructuringElement::rect(17, 3);
        let closed = close(&img.as_view(), &element);
        assert!(closed.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn erode_requires_full_support() {
        // a solid 19x5 block survives erosion by 17x3 only at its center
        let mut img = GrayImage::zeros(41, 11);
        for y in 3..8 {
            row_run(&mut img, y, 11, 30);
        }
        let element = StructuringElement::rect(17, 3);
        let eroded = erode(&img.as_view(), &element);

        assert_eq!(eroded.data[5 * 41 + 19], 255);
        assert_eq!(eroded.data[5 * 41 + 20], 255);
        assert_eq!(eroded.data[5 * 41 + 21], 255);
        // columns whose 17-wide window leaves the block
        assert_eq!(eroded.data[5 * 41 + 18], 0);
        assert_eq!(eroded.data[5 * 41 + 22], 0);
    }

    #[test]
    fn border_frame_stays_zero() {
        let mut img = GrayImage::zeros(40, 8);
        for y in 0..8 {
            row_run(&mut img, y, 0, 40);
        }
        let element = StructuringElement::rect(17, 3);
        let dilated = dilate(&img.as_view(), &element);
        // top row and left 8 columns are uncomputed
        assert_eq!(dilated.data[0], 0);
        assert_eq!(dilated.data[3 * 40 + 7], 0);
        assert_eq!(dilated.data[3 * 40 + 8], 255);
    }
}

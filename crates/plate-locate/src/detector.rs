use log::info;

use plate_locate_core::{BgrImageView, GrayImage, Rect};
use plate_locate_filters::{
    adaptive_mean_threshold, binarize, close, extract_regions, gaussian_blur, grayscale_bgr,
    sobel_horizontal, StructuringElement, AUTO_THRESHOLD,
};

use crate::params::{LowerBandParams, PlateDetectorParams};
use crate::select::{AreaAspectSelector, LowerBandSelector, SelectCandidate, SelectionContext};

/// Window side for the plate presentation threshold.
const PLATE_BLOCK_SIZE: usize = 11;
/// Sensitivity offset subtracted from the local mean.
const PLATE_MEAN_OFFSET: i32 = 2;

/// License plate detector over a fixed filter pipeline.
///
/// One instance holds an immutable parameter set and can be reused across
/// sequential detections; there is no state beyond the params, so sharing
/// across threads only needs external synchronization of the calls
/// themselves.
pub struct PlateDetector {
    params: PlateDetectorParams,
}

impl PlateDetector {
    pub fn new(params: PlateDetectorParams) -> Self {
        Self { params }
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &PlateDetectorParams {
        &self.params
    }

    /// Find the best plate rectangle by area/aspect candidate selection.
    ///
    /// Returns [`Rect::ZERO`] when no blob bounding box passes the bounds;
    /// that is a defined "not found" result, not an error.
    pub fn detect(&self, image: &BgrImageView<'_>) -> Rect {
        let selector = AreaAspectSelector::from_params(&self.params);
        self.detect_with(image, &selector)
    }

    /// Find the plate with the lower-band heuristic instead.
    ///
    /// Ignores the area/aspect bounds and takes the largest strongly
    /// elongated box in the lower part of the frame, confirmed by the
    /// region count inside the candidate.
    pub fn detect_lower_band(&self, image: &BgrImageView<'_>, band: &LowerBandParams) -> Rect {
        let selector = LowerBandSelector::new(band.clone(), self.params.min_blob_size);
        self.detect_with(image, &selector)
    }

    /// Run the filter pipeline and hand the extracted blobs to `selector`.
    pub fn detect_with(&self, image: &BgrImageView<'_>, selector: &dyn SelectCandidate) -> Rect {
        let (edges, closed) = self.consolidated_maps(image);
        let blobs = extract_regions(&closed.as_view(), self.params.min_blob_size);
        info!("{} candidate regions", blobs.len());

        let ctx = SelectionContext {
            edges: edges.as_view(),
            closed: closed.as_view(),
        };
        let rect = selector.select(&blobs, &ctx);
        if rect.is_empty() {
            info!("no plate found");
        } else {
            info!(
                "plate at ({}, {}) size {}x{}",
                rect.x, rect.y, rect.width, rect.height
            );
        }
        rect
    }

    /// Binarize an already-cropped plate for display or downstream
    /// character segmentation.
    ///
    /// Grayscale, light smoothing, then the inverted local-mean threshold:
    /// character ink comes out as foreground on a background of 0.
    pub fn preprocess_plate(&self, plate: &BgrImageView<'_>) -> GrayImage {
        let gray = grayscale_bgr(plate);
        let blurred = gaussian_blur(&gray.as_view(), self.params.blur_kernel_size);
        adaptive_mean_threshold(&blurred.as_view(), PLATE_BLOCK_SIZE, PLATE_MEAN_OFFSET)
    }

    /// Edge-consolidation front of the pipeline.
    ///
    /// Returns the Otsu-binarized gradient map and its morphological
    /// closing; selection strategies need both.
    fn consolidated_maps(&self, image: &BgrImageView<'_>) -> (GrayImage, GrayImage) {
        let gray = grayscale_bgr(image);
        let blurred = gaussian_blur(&gray.as_view(), self.params.blur_kernel_size);
        let gradient = sobel_horizontal(&blurred.as_view());
        let edges = binarize(&gradient.as_view(), AUTO_THRESHOLD);

        let element =
            StructuringElement::rect(self.params.element_width, self.params.element_height);
        let closed = close(&edges.as_view(), &element);
        (edges, closed)
    }
}

impl Default for PlateDetector {
    fn default() -> Self {
        Self::new(PlateDetectorParams::default())
    }
}

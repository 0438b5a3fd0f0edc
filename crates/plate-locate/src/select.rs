use log::{debug, info};

use plate_locate_core::{crop_gray, Blob, GrayImageView, Rect};
use plate_locate_filters::extract_regions;

use crate::params::{LowerBandParams, PlateDetectorParams};

/// Binary maps a selection strategy may consult.
///
/// `edges` is the Otsu-binarized gradient map before closing, where
/// character strokes are still separate components; `closed` is the
/// consolidated map the blobs were extracted from.
#[derive(Clone, Copy, Debug)]
pub struct SelectionContext<'a> {
    pub edges: GrayImageView<'a>,
    pub closed: GrayImageView<'a>,
}

/// Candidate selection policy applied to the extracted blobs.
pub trait SelectCandidate {
    /// Pick the plate rectangle, or [`Rect::ZERO`] when nothing qualifies.
    fn select(&self, blobs: &[Blob], ctx: &SelectionContext<'_>) -> Rect;
}

/// Area- and aspect-bounded selection.
///
/// Every blob bounding box within the area and aspect-ratio bounds is a
/// candidate; the largest-area candidate wins, first encountered on ties.
#[derive(Clone, Debug)]
pub struct AreaAspectSelector {
    pub aspect_ratio_min: f64,
    pub aspect_ratio_max: f64,
    pub min_plate_area: f64,
    pub max_plate_area: f64,
}

impl AreaAspectSelector {
    pub fn from_params(params: &PlateDetectorParams) -> Self {
        Self {
            aspect_ratio_min: params.aspect_ratio_min,
            aspect_ratio_max: params.aspect_ratio_max,
            min_plate_area: params.min_plate_area,
            max_plate_area: params.max_plate_area,
        }
    }

    fn accepts(&self, rect: &Rect) -> bool {
        let area = rect.area() as f64;
        let aspect = rect.aspect_ratio();
        area >= self.min_plate_area
            && area <= self.max_plate_area
            && aspect >= self.aspect_ratio_min
            && aspect <= self.aspect_ratio_max
    }
}

impl SelectCandidate for AreaAspectSelector {
    fn select(&self, blobs: &[Blob], _ctx: &SelectionContext<'_>) -> Rect {
        let candidates: Vec<Rect> = blobs
            .iter()
            .map(Blob::bounding_box)
            .filter(|r| self.accepts(r))
            .collect();
        debug!(
            "{} of {} boxes within area/aspect bounds",
            candidates.len(),
            blobs.len()
        );

        let Some(&first) = candidates.first() else {
            return Rect::ZERO;
        };

        let mut best = first;
        let mut max_area = best.area();
        for rect in &candidates[1..] {
            if rect.area() > max_area {
                max_area = rect.area();
                best = *rect;
            }
        }
        best
    }
}

/// Elongation/position heuristic with a character-count confirmation.
///
/// Takes the largest box that is wide relative to its height and whose top
/// edge sits in the lower band of the frame, then confirms it by
/// re-extracting regions from the box cropped out of the pre-closing binary:
/// a real plate yields several character-sized components there.
#[derive(Clone, Debug)]
pub struct LowerBandSelector {
    pub params: LowerBandParams,
    /// Noise floor for the confirmation re-extraction.
    pub min_blob_size: usize,
}

impl LowerBandSelector {
    pub fn new(params: LowerBandParams, min_blob_size: usize) -> Self {
        Self {
            params,
            min_blob_size,
        }
    }

    fn confirm(&self, rect: &Rect, edges: &GrayImageView<'_>) -> bool {
        let crop = crop_gray(edges, rect);
        let regions = extract_regions(&crop.as_view(), self.min_blob_size);
        debug!("{} regions inside the candidate crop", regions.len());
        regions.len() >= self.params.min_char_regions
    }
}

impl SelectCandidate for LowerBandSelector {
    fn select(&self, blobs: &[Blob], ctx: &SelectionContext<'_>) -> Rect {
        let band_top = ctx.closed.height as f64 * self.params.min_top_fraction;

        let mut best = Rect::ZERO;
        let mut max_area = 0i64;
        for blob in blobs {
            let rect = blob.bounding_box();
            if rect.area() > max_area
                && rect.width as f64 > rect.height as f64 * self.params.min_elongation
                && rect.y as f64 > band_top
            {
                max_area = rect.area();
                best = rect;
            }
        }

        if best.is_empty() {
            return Rect::ZERO;
        }
        if !self.confirm(&best, &ctx.edges) {
            info!("lower-band candidate rejected by region-count confirmation");
            return Rect::ZERO;
        }
        best
    }
}

use serde::{Deserialize, Serialize};

/// Parameters for the plate detection pipeline.
///
/// Immutable once handed to a [`crate::PlateDetector`]; a detection call
/// only reads them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlateDetectorParams {
    /// Minimal width/height ratio a candidate box may have.
    pub aspect_ratio_min: f64,

    /// Maximal width/height ratio a candidate box may have.
    pub aspect_ratio_max: f64,

    /// Minimal candidate box area in pixels.
    pub min_plate_area: f64,

    /// Maximal candidate box area in pixels.
    pub max_plate_area: f64,

    /// Odd side length of the Gaussian smoothing kernel.
    pub blur_kernel_size: usize,

    /// Structuring element width for the consolidation closing. Wide and
    /// short merges horizontally adjacent character strokes.
    pub element_width: usize,

    /// Structuring element height for the consolidation closing.
    pub element_height: usize,

    /// Region extraction keeps components strictly larger than this.
    pub min_blob_size: usize,
}

impl Default for PlateDetectorParams {
    fn default() -> Self {
        Self {
            aspect_ratio_min: 2.0,
            aspect_ratio_max: 6.0,
            min_plate_area: 1000.0,
            max_plate_area: 30000.0,
            blur_kernel_size: 5,
            element_width: 17,
            element_height: 3,
            min_blob_size: 50,
        }
    }
}

/// Parameters for the lower-band selection heuristic.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LowerBandParams {
    /// A candidate box must be wider than its height times this.
    pub min_elongation: f64,

    /// A candidate's top edge must lie strictly below this fraction of the
    /// image height.
    pub min_top_fraction: f64,

    /// Minimal number of regions the cropped candidate must contain to be
    /// confirmed (a plate carries several characters).
    pub min_char_regions: usize,
}

impl Default for LowerBandParams {
    fn default() -> Self {
        Self {
            min_elongation: 2.5,
            min_top_fraction: 0.4,
            min_char_regions: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_round_trip_through_json() {
        let params = PlateDetectorParams {
            aspect_ratio_max: 5.0,
            element_width: 21,
            ..PlateDetectorParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: PlateDetectorParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.aspect_ratio_max, 5.0);
        assert_eq!(back.element_width, 21);
        assert_eq!(back.min_blob_size, 50);
    }

    #[test]
    fn lower_band_defaults() {
        let band = LowerBandParams::default();
        assert_eq!(band.min_elongation, 2.5);
        assert_eq!(band.min_top_fraction, 0.4);
        assert_eq!(band.min_char_regions, 3);
    }
}

//! Ground-truth and evaluation-report JSON helpers.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use plate_locate_core::Rect;

#[derive(thiserror::Error, Debug)]
pub enum PlateIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Ground-truth plate boxes keyed by image name.
///
/// Boxes are corner form `[x1, y1, x2, y2]` with exclusive far corners.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundTruth(pub BTreeMap<String, [i32; 4]>);

impl GroundTruth {
    /// Load ground truth from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PlateIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this ground truth to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PlateIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Ground-truth rect for one image, if annotated.
    pub fn rect(&self, image: &str) -> Option<Rect> {
        self.0.get(image).map(|&b| Rect::from_corner_box(b))
    }
}

/// Outcome of one image in an evaluation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvalRecord {
    pub image: String,
    pub ground_truth: [i32; 4],
    /// Corner box of the prediction, `None` when the detector came back
    /// empty-handed.
    pub predicted: Option<[i32; 4]>,
    pub iou: f32,
}

/// Aggregate over an evaluation run.
///
/// `mean_iou` averages only the images with a prediction; images without
/// one count toward `records` but not toward the mean.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvalReport {
    pub records: Vec<EvalRecord>,
    pub detected: usize,
    pub mean_iou: f32,
}

impl EvalReport {
    /// Append one detection outcome and refresh the aggregate fields.
    pub fn push(&mut self, image: impl Into<String>, ground_truth: Rect, predicted: Rect) {
        let detected = !predicted.is_empty();
        self.records.push(EvalRecord {
            image: image.into(),
            ground_truth: ground_truth.corner_box(),
            predicted: detected.then(|| predicted.corner_box()),
            iou: predicted.iou(&ground_truth),
        });

        if detected {
            self.detected += 1;
        }
        let sum: f32 = self
            .records
            .iter()
            .filter(|r| r.predicted.is_some())
            .map(|r| r.iou)
            .sum();
        self.mean_iou = if self.detected > 0 {
            sum / self.detected as f32
        } else {
            0.0
        };
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PlateIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PlateIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ground_truth_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotations.json");

        let mut gt = GroundTruth::default();
        gt.0.insert("car1.png".into(), [40, 70, 160, 100]);
        gt.write_json(&path).unwrap();

        let back = GroundTruth::load_json(&path).unwrap();
        assert_eq!(back.rect("car1.png"), Some(Rect::new(40, 70, 120, 30)));
        assert_eq!(back.rect("missing.png"), None);
    }

    #[test]
    fn ground_truth_parses_plain_json_map() {
        let gt: GroundTruth =
            serde_json::from_str(r#"{"tester1.png": [10, 20, 110, 60]}"#).unwrap();
        assert_eq!(gt.rect("tester1.png"), Some(Rect::new(10, 20, 100, 40)));
    }

    #[test]
    fn report_mean_skips_missed_images() {
        let gt = Rect::new(0, 0, 10, 10);
        let mut report = EvalReport::default();
        report.push("hit.png", gt, gt); // IoU 1.0
        report.push("miss.png", gt, Rect::ZERO);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.detected, 1);
        assert_relative_eq!(report.mean_iou, 1.0);
        assert_eq!(report.records[1].predicted, None);
        assert_eq!(report.records[1].iou, 0.0);
    }

    #[test]
    fn report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = EvalReport::default();
        report.push(
            "car1.png",
            Rect::new(0, 0, 10, 10),
            Rect::new(0, 5, 10, 10),
        );
        report.write_json(&path).unwrap();

        let back = EvalReport::load_json(&path).unwrap();
        assert_eq!(back.records.len(), 1);
        assert_eq!(back.detected, 1);
        assert_relative_eq!(back.mean_iou, 50.0 / 150.0);
    }
}

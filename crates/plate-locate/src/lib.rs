//! License plate localization built from self-implemented image operators.
//!
//! The pipeline: grayscale -> Gaussian blur -> horizontal Sobel -> Otsu
//! binarization -> morphological closing -> 8-connected region extraction ->
//! candidate selection. Every stage is a plain function over owned pixel
//! buffers (see `plate-locate-filters`); this crate wires them together and
//! adds the candidate selection strategies and evaluation I/O.
//!
//! ## Quickstart
//!
//! ```no_run
//! use image::ImageReader;
//! use plate_locate::detect::detect_plate_image;
//! use plate_locate::{PlateDetector, PlateDetectorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("car.png")?.decode()?.to_rgb8();
//! let detector = PlateDetector::new(PlateDetectorParams::default());
//! let rect = detect_plate_image(&img, &detector);
//! println!("found: {}", !rect.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `plate_locate::core`: buffer, rect and blob types.
//! - `plate_locate::filters`: the individually invocable filter stages.
//! - [`PlateDetector`]: the end-to-end pipeline with two selection
//!   strategies ([`AreaAspectSelector`], [`LowerBandSelector`]).
//! - `plate_locate::detect` (feature `image`): adapters from `image` crate
//!   buffers plus drawing/cropping helpers.
//! - [`GroundTruth`] / [`EvalReport`]: JSON ground truth and IoU evaluation.

pub use plate_locate_core as core;
pub use plate_locate_filters as filters;

mod detector;
mod io;
mod params;
mod select;

pub use detector::PlateDetector;
pub use io::{EvalRecord, EvalReport, GroundTruth, PlateIoError};
pub use params::{LowerBandParams, PlateDetectorParams};
pub use select::{AreaAspectSelector, LowerBandSelector, SelectCandidate, SelectionContext};

pub use plate_locate_core::{Blob, Rect};

#[cfg(feature = "image")]
pub mod detect;

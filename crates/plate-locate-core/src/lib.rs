//! Core types and utilities for license plate localization.
//!
//! This crate is intentionally small: pixel buffers, rectangles and blobs.
//! It does *not* depend on any concrete image codec or detector.

mod blob;
mod image;
mod logger;
mod rect;

pub use blob::Blob;
pub use image::{
    crop_bgr, crop_gray, get_bgr, get_gray, BgrImage, BgrImageView, GrayImage, GrayImageView,
};
pub use rect::Rect;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

//! Image resources
//!
//! Provides the keyed image store the navigation mask is sampled from.

mod images;

pub use images::{AssetError, ImageStore};

//! Keyed image storage
//!
//! Decodes images with the `image` crate and keeps them in memory as RGBA,
//! addressed by string key. Implements [`PixelSource`] so a mask can be
//! sampled straight out of the store.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};
use rustc_hash::FxHashMap;

use crate::nav::PixelSource;

/// In-memory images addressed by key
#[derive(Debug, Default)]
pub struct ImageStore {
    images: FxHashMap<String, RgbaImage>,
}

impl ImageStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image file under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn load(&mut self, key: impl Into<String>, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| AssetError::IoError(e.to_string()))?;
        self.load_bytes(key, &bytes)
    }

    /// Decode image bytes (PNG, JPEG) under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded as an image
    pub fn load_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) -> Result<(), AssetError> {
        let img =
            image::load_from_memory(bytes).map_err(|e| AssetError::DecodeError(e.to_string()))?;
        self.insert(key, &img);
        Ok(())
    }

    /// Store an already decoded image, replacing any previous one under `key`
    pub fn insert(&mut self, key: impl Into<String>, img: &DynamicImage) {
        let key = key.into();
        let (width, height) = img.dimensions();
        log::debug!("Stored image '{key}' ({width}x{height})");
        self.images.insert(key, img.to_rgba8());
    }

    /// Get an image by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RgbaImage> {
        self.images.get(key)
    }

    /// Remove an image, returning true if it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.images.remove(key).is_some()
    }

    /// Number of stored images
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl PixelSource for ImageStore {
    fn exists(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    fn dimensions(&self, key: &str) -> Option<(u32, u32)> {
        self.get(key).map(RgbaImage::dimensions)
    }

    fn pixel(&self, key: &str, x: u32, y: u32) -> Option<[u8; 4]> {
        self.get(key)?.get_pixel_checked(x, y).map(|p| p.0)
    }
}

/// Errors that can occur during image loading
#[derive(Debug, Clone)]
pub enum AssetError {
    /// IO error reading file
    IoError(String),
    /// Error decoding image data
    DecodeError(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
        }
    }
}

impl std::error::Error for AssetError {}

//! Image store.
//!
//! Holds uploaded photos as opaque byte blobs with their content type.
//! Only JPEG and PNG uploads are accepted.

use std::sync::Arc;

use dashmap::DashMap;

use pantry_core::error::{ImageError, Result};
use pantry_core::ImageId;

/// Content types accepted for upload.
const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// A stored image blob.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Raw image bytes.
    pub bytes: Vec<u8>,

    /// MIME content type.
    pub content_type: String,
}

/// Trait for image storage.
pub trait ImageStore: Send + Sync {
    /// Store an image and return its id.
    ///
    /// # Returns
    ///
    /// * `Ok(ImageId)` - The id of the stored image.
    /// * `Err` - If the content type is not an accepted image type.
    fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<ImageId>;

    /// Fetch an image by id.
    fn get(&self, id: &ImageId) -> Result<StoredImage>;

    /// Delete an image by id.
    fn delete(&self, id: &ImageId) -> Result<()>;
}

/// An in-memory image store.
#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    images: Arc<DashMap<ImageId, StoredImage>>,
}

impl InMemoryImageStore {
    /// Create a new in-memory image store.
    pub fn new() -> Self {
        Self {
            images: Arc::new(DashMap::new()),
        }
    }
}

impl ImageStore for InMemoryImageStore {
    fn put(&self, bytes: Vec<u8>, content_type: &str) -> Result<ImageId> {
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
            return Err(ImageError::UnsupportedContentType(content_type.to_string()).into());
        }
        let id = ImageId::new();
        self.images.insert(
            id,
            StoredImage {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(id)
    }

    fn get(&self, id: &ImageId) -> Result<StoredImage> {
        self.images
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ImageError::NotFound(*id).into())
    }

    fn delete(&self, id: &ImageId) -> Result<()> {
        if self.images.remove(id).is_none() {
            return Err(ImageError::NotFound(*id).into());
        }
        Ok(())
    }
}

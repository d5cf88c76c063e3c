//! Per-row image slots with stale-result rejection.
//!
//! A slot remembers which identifier it last requested. A completion for any other
//! identifier arrived late and is dropped, so a slow load can never overwrite newer content.

use super::{DecodedImage, ImageCompletion, ImageLoader, ImageTarget};
use crate::model::{ResourceId, RowId};
use crate::view_state::row::ReviewRow;
use std::collections::HashMap;
use std::sync::Arc;

/// What a slot currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotImage {
    /// Nothing loaded yet.
    #[default]
    Placeholder,
    /// Loaded image.
    Ready(Arc<DecodedImage>),
    /// Load failed; drawn like the placeholder.
    Failed,
}

/// One image position in a row.
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    requested: Option<ResourceId>,
    image: SlotImage,
}

impl ImageSlot {
    /// Point the slot at `id`.
    ///
    /// Returns `true` when this is a new identifier and a load should be started. The slot
    /// shows the placeholder until the matching completion arrives.
    pub fn request(&mut self, id: &ResourceId) -> bool {
        if self.requested.as_ref() == Some(id) {
            return false;
        }
        self.requested = Some(id.clone());
        self.image = SlotImage::Placeholder;
        true
    }

    /// Apply a load result. Returns `false` when `id` is not the current request.
    pub fn resolve(&mut self, id: &ResourceId, image: Option<Arc<DecodedImage>>) -> bool {
        if self.requested.as_ref() != Some(id) {
            return false;
        }
        self.image = image.map_or(SlotImage::Failed, SlotImage::Ready);
        true
    }

    /// Identifier currently requested.
    pub fn requested(&self) -> Option<&ResourceId> {
        self.requested.as_ref()
    }

    /// Current content.
    pub fn image(&self) -> &SlotImage {
        &self.image
    }

    /// Loaded image, if any.
    pub fn ready(&self) -> Option<&Arc<DecodedImage>> {
        match &self.image {
            SlotImage::Ready(image) => Some(image),
            SlotImage::Placeholder | SlotImage::Failed => None,
        }
    }
}

/// Avatar and photo slots of one row.
#[derive(Debug, Clone, Default)]
pub struct RowImages {
    /// Avatar slot.
    pub avatar: ImageSlot,
    /// Photo slots in display order.
    pub photos: Vec<ImageSlot>,
}

impl RowImages {
    fn slot_mut(&mut self, target: ImageTarget) -> Option<&mut ImageSlot> {
        match target {
            ImageTarget::Avatar(_) => Some(&mut self.avatar),
            ImageTarget::Photo(_, index) => self.photos.get_mut(index),
        }
    }
}

/// Image slots of every row the renderer has shown.
#[derive(Debug, Default)]
pub struct ImageBoard {
    rows: HashMap<RowId, RowImages>,
}

impl ImageBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request any images of `row` that are not already requested.
    pub fn ensure(&mut self, row: &ReviewRow, loader: &ImageLoader) {
        let images = self.rows.entry(row.id()).or_default();

        if let Some(avatar) = row.avatar() {
            if images.avatar.request(avatar) {
                loader.load(ImageTarget::Avatar(row.id()), avatar.clone());
            }
        }

        images
            .photos
            .resize_with(row.photos().len(), ImageSlot::default);
        for (index, (slot, id)) in images.photos.iter_mut().zip(row.photos()).enumerate() {
            if slot.request(id) {
                loader.load(ImageTarget::Photo(row.id(), index), id.clone());
            }
        }
    }

    /// Apply a completion. Returns `true` when a slot changed.
    pub fn apply(&mut self, completion: ImageCompletion) -> bool {
        self.rows
            .get_mut(&completion.target.row())
            .and_then(|images| images.slot_mut(completion.target))
            .is_some_and(|slot| slot.resolve(&completion.id, completion.image))
    }

    /// Slots of `row`, if it has been shown.
    pub fn row(&self, row: RowId) -> Option<&RowImages> {
        self.rows.get(&row)
    }

    /// Forget every slot.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

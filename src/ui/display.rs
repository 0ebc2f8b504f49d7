//! Display-only items. None of these raise interactions.

use super::item::{check_len, mismatch};
use super::ViewItem;
use crate::error::ComponentError;
use crate::types::component::{self, MediaGalleryItem};
use crate::types::{Component, ComponentType, SeparatorSpacing, UnfurledMediaItem};

const MAX_TEXT: usize = 4000;
const MAX_MEDIA_DESCRIPTION: usize = 1024;
const MAX_GALLERY_ITEMS: usize = 10;

// ---------------------------------------------------------------------------
// TextDisplay
// ---------------------------------------------------------------------------

/// A block of markdown text.
#[derive(Clone, Debug)]
pub struct TextDisplay {
    inner: component::TextDisplay,
}

impl TextDisplay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            inner: component::TextDisplay {
                id: None,
                content: content.into(),
            },
        }
    }

    pub fn from_component(inner: component::TextDisplay) -> Self {
        Self { inner }
    }

    pub fn content(&self) -> &str {
        &self.inner.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.inner.content = content.into();
    }
}

impl ViewItem for TextDisplay {
    fn component_type(&self) -> ComponentType {
        ComponentType::TextDisplay
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len("text content", Some(&self.inner.content), MAX_TEXT)
    }

    fn to_component(&self) -> Component {
        Component::TextDisplay(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::TextDisplay(inner) => self.inner = inner,
            other => mismatch(ComponentType::TextDisplay, &other),
        }
    }
}

// ---------------------------------------------------------------------------
// Thumbnail
// ---------------------------------------------------------------------------

/// Small image, only valid as a section accessory.
#[derive(Clone, Debug)]
pub struct Thumbnail {
    inner: component::Thumbnail,
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: component::Thumbnail {
                id: None,
                media: UnfurledMediaItem::new(url),
                description: None,
                spoiler: false,
            },
        }
    }

    pub fn from_component(inner: component::Thumbnail) -> Self {
        Self { inner }
    }

    /// Alt text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.inner.spoiler = spoiler;
        self
    }

    pub fn url(&self) -> &str {
        &self.inner.media.url
    }
}

impl ViewItem for Thumbnail {
    fn component_type(&self) -> ComponentType {
        ComponentType::Thumbnail
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len(
            "thumbnail description",
            self.inner.description.as_deref(),
            MAX_MEDIA_DESCRIPTION,
        )
    }

    fn to_component(&self) -> Component {
        Component::Thumbnail(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Thumbnail(inner) => self.inner = inner,
            other => mismatch(ComponentType::Thumbnail, &other),
        }
    }
}

// ---------------------------------------------------------------------------
// MediaGallery
// ---------------------------------------------------------------------------

/// Grid of up to ten images or videos.
#[derive(Clone, Debug)]
pub struct MediaGallery {
    inner: component::MediaGallery,
}

impl MediaGallery {
    pub fn new() -> Self {
        Self {
            inner: component::MediaGallery {
                id: None,
                items: Vec::new(),
            },
        }
    }

    pub fn from_component(inner: component::MediaGallery) -> Self {
        Self { inner }
    }

    pub fn append_item(&mut self, item: MediaGalleryItem) -> Result<&mut Self, ComponentError> {
        if self.inner.items.len() >= MAX_GALLERY_ITEMS {
            return Err(ComponentError::CapacityExceeded {
                container: "MediaGallery",
                max: MAX_GALLERY_ITEMS,
            });
        }
        check_len(
            "gallery item description",
            item.description.as_deref(),
            MAX_MEDIA_DESCRIPTION,
        )?;
        self.inner.items.push(item);
        Ok(self)
    }

    pub fn add_item(
        &mut self,
        url: impl Into<String>,
        description: Option<String>,
        spoiler: bool,
    ) -> Result<&mut Self, ComponentError> {
        self.append_item(MediaGalleryItem {
            media: UnfurledMediaItem::new(url),
            description,
            spoiler,
        })
    }

    pub fn items(&self) -> &[MediaGalleryItem] {
        &self.inner.items
    }
}

impl Default for MediaGallery {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewItem for MediaGallery {
    fn component_type(&self) -> ComponentType {
        ComponentType::MediaGallery
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn validate(&self) -> Result<(), ComponentError> {
        if self.inner.items.is_empty() {
            return Err(ComponentError::invalid(
                "media gallery",
                "needs at least one item",
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::MediaGallery(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::MediaGallery(inner) => self.inner = inner,
            other => mismatch(ComponentType::MediaGallery, &other),
        }
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// An uploaded attachment shown inline. The url must use the
/// `attachment://<filename>` scheme.
#[derive(Clone, Debug)]
pub struct File {
    inner: component::FileDisplay,
}

impl File {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: component::FileDisplay {
                id: None,
                file: UnfurledMediaItem::new(url),
                spoiler: false,
                name: None,
                size: None,
            },
        }
    }

    pub fn from_component(inner: component::FileDisplay) -> Self {
        Self { inner }
    }

    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.inner.spoiler = spoiler;
        self
    }

    pub fn url(&self) -> &str {
        &self.inner.file.url
    }

    /// File name, filled in by the server.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Size in bytes, filled in by the server.
    pub fn size(&self) -> Option<u64> {
        self.inner.size
    }
}

impl ViewItem for File {
    fn component_type(&self) -> ComponentType {
        ComponentType::File
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn validate(&self) -> Result<(), ComponentError> {
        if !self.inner.file.url.starts_with("attachment://") {
            return Err(ComponentError::invalid(
                "file url",
                "must reference an attachment (attachment://<filename>)",
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::File(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::File(inner) => self.inner = inner,
            other => mismatch(ComponentType::File, &other),
        }
    }
}

// ---------------------------------------------------------------------------
// Separator
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Separator {
    inner: component::Separator,
}

impl Separator {
    /// Visible divider with small spacing.
    pub fn new() -> Self {
        Self {
            inner: component::Separator {
                id: None,
                divider: true,
                spacing: None,
            },
        }
    }

    pub fn from_component(inner: component::Separator) -> Self {
        Self { inner }
    }

    pub fn divider(mut self, divider: bool) -> Self {
        self.inner.divider = divider;
        self
    }

    pub fn spacing(mut self, spacing: SeparatorSpacing) -> Self {
        self.inner.spacing = Some(spacing);
        self
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewItem for Separator {
    fn component_type(&self) -> ComponentType {
        ComponentType::Separator
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn to_component(&self) -> Component {
        Component::Separator(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Separator(inner) => self.inner = inner,
            other => mismatch(ComponentType::Separator, &other),
        }
    }
}

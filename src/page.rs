//! The logical-page seam between the platform and the application layer.

use std::sync::Arc;

use serde_json::Value;

use crate::geometry::Rectangle;

/// Shared handle to a logical page.
pub type PageRef = Arc<dyn Page>;

/// Stable identity of a page; all platform bookkeeping keys on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub uuid::Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a page relates to the host's top inset during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Laid out below the status-bar-equivalent inset.
    Standard,
    /// Fills the entire surface, ignoring the inset. Split/container pages
    /// that manage their own chrome opt into this.
    EdgeToEdge,
}

/// A logical UI page as seen by the platform.
///
/// Lifecycle hooks default to no-ops so simple pages only implement [`id`].
/// Pages hold no reference back to the platform; attachment is tracked on
/// the platform side, keyed by [`PageId`].
///
/// [`id`]: Page::id
pub trait Page: Send + Sync {
    fn id(&self) -> PageId;

    fn kind(&self) -> PageKind {
        PageKind::Standard
    }

    /// The page has become (or is about to become) the visible page.
    fn send_appearing(&self) {}

    /// The page is no longer the visible page.
    fn send_disappearing(&self) {}

    /// Offer the page the hardware back press. Returns whether it was
    /// consumed.
    fn send_back_button_pressed(&self) -> bool {
        false
    }

    /// Assign the page its frame, in density-independent units.
    fn layout(&self, bounds: Rectangle) {
        let _ = bounds;
    }

    /// The inherited binding context on the owning platform changed.
    fn binding_context_changed(&self, context: &Value) {
        let _ = context;
    }
}

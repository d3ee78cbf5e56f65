//! The rendering-backend seam and the explicit page-to-renderer map.

use std::collections::HashMap;

use log::debug;

use crate::geometry::{Rectangle, SizeRequest};
use crate::page::{PageId, PageRef};

/// Physical representation bound to a logical page for its attached
/// lifetime.
///
/// At most one live handle exists per page at any time; handles are never
/// shared between pages and never reused after disposal.
pub trait RendererBinding: Send {
    /// Mount the native view into the host tree.
    fn attach(&mut self);

    /// Unmount from the host tree. The handle stays alive until disposed.
    fn detach(&mut self);

    /// Release native resources. The platform calls this at most once.
    fn dispose(&mut self);

    /// Measure the desired size under the given pixel constraints.
    /// `f64::INFINITY` means unbounded in that dimension.
    fn measure_desired(&mut self, width_px: f64, height_px: f64) -> SizeRequest;

    /// Flush any pending layout state to the native side.
    fn update_layout(&mut self);

    /// Vertical offset in pixels, driven by present/dismiss transitions.
    fn set_translation_y(&mut self, px: f64);
}

/// Background fill mounted beneath a modal page's renderer.
pub trait ScrimBinding: Send {
    fn set_frame(&mut self, frame: Rectangle);

    fn set_translation_y(&mut self, px: f64);

    fn dispose(&mut self);
}

/// Rendering backend: turns logical pages into physical representations.
///
/// `create_scrim` mounts the returned scrim into the host tree immediately,
/// beneath whatever view is attached next.
pub trait RendererFactory: Send {
    fn create_renderer(&mut self, page: &PageRef) -> Box<dyn RendererBinding>;

    fn create_scrim(&mut self) -> Box<dyn ScrimBinding>;
}

/// Explicit page-to-renderer map for root pages, owned by the platform.
///
/// Membership in this map (or in a live modal container) *is* the
/// page-to-platform attachment relation; there is no ambient per-page
/// registry.
#[derive(Default)]
pub struct RendererRegistry {
    handles: HashMap<PageId, Box<dyn RendererBinding>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.handles.contains_key(&page)
    }

    pub fn bind(&mut self, page: PageId, handle: Box<dyn RendererBinding>) {
        debug_assert!(
            !self.handles.contains_key(&page),
            "page already has a live renderer handle"
        );
        debug!("renderer bound for page {:?}", page);
        self.handles.insert(page, handle);
    }

    pub fn get_mut(&mut self, page: PageId) -> Option<&mut Box<dyn RendererBinding>> {
        self.handles.get_mut(&page)
    }

    /// Remove every handle, in no particular order. Used by teardown.
    pub fn drain(&mut self) -> Vec<(PageId, Box<dyn RendererBinding>)> {
        self.handles.drain().collect()
    }
}

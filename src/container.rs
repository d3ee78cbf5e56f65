//! Isolated overlay surface for exactly one modal page.

use log::debug;

use crate::geometry::{Rectangle, SizeRequest};
use crate::host::HostWindow;
use crate::page::{PageKind, PageRef};
use crate::renderer::{RendererBinding, RendererFactory, ScrimBinding};

/// Owns one modal page's renderer handle and one background scrim, from
/// creation by a present until the matching dismiss (or teardown) disposes
/// it.
pub struct ModalContainer {
    page: PageRef,
    renderer: Option<Box<dyn RendererBinding>>,
    scrim: Option<Box<dyn ScrimBinding>>,
    frame: Option<Rectangle>,
    disposed: bool,
}

impl ModalContainer {
    /// Create the overlay and mount it into the host tree: scrim first, the
    /// modal's renderer above it.
    pub fn new(factory: &mut dyn RendererFactory, page: PageRef) -> Self {
        let scrim = factory.create_scrim();
        let mut renderer = factory.create_renderer(&page);
        renderer.attach();
        debug!("modal container created for page {:?}", page.id());
        Self {
            page,
            renderer: Some(renderer),
            scrim: Some(scrim),
            frame: None,
            disposed: false,
        }
    }

    pub fn page(&self) -> &PageRef {
        &self.page
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Vertical offset of the whole overlay; scrim and page move together.
    pub fn set_translation_y(&mut self, px: f64) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_translation_y(px);
        }
        if let Some(scrim) = self.scrim.as_mut() {
            scrim.set_translation_y(px);
        }
    }

    /// Lay the overlay out inside `bounds` (pixels). The modal page sits
    /// below the top inset, except edge-to-edge pages which take the full
    /// bounds; the scrim always starts at the inset.
    pub fn layout(&mut self, bounds: Rectangle, inset_px: f64, host: &dyn HostWindow) {
        if self.disposed {
            return;
        }
        if self.frame != Some(bounds) {
            match self.page.kind() {
                PageKind::EdgeToEdge => self.page.layout(Rectangle::new(
                    0.0,
                    0.0,
                    host.from_pixels(bounds.width),
                    host.from_pixels(bounds.height),
                )),
                PageKind::Standard => self.page.layout(Rectangle::new(
                    0.0,
                    host.from_pixels(inset_px),
                    host.from_pixels(bounds.width),
                    host.from_pixels(bounds.height - inset_px),
                )),
            }
            if let Some(scrim) = self.scrim.as_mut() {
                scrim.set_frame(Rectangle::new(
                    0.0,
                    inset_px,
                    bounds.width,
                    bounds.height - inset_px,
                ));
            }
            self.frame = Some(bounds);
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.update_layout();
        }
    }

    /// Measurement pass-through to the owned renderer handle.
    pub fn measure(&mut self, width_px: f64, height_px: f64) -> Option<SizeRequest> {
        self.renderer
            .as_mut()
            .map(|renderer| renderer.measure_desired(width_px, height_px))
    }

    /// Detach and release everything owned by the overlay. Only the first
    /// call has effect.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(mut renderer) = self.renderer.take() {
            renderer.detach();
            renderer.dispose();
        }
        if let Some(mut scrim) = self.scrim.take() {
            scrim.dispose();
        }
        debug!("modal container disposed for page {:?}", self.page.id());
    }
}

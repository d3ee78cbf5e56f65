//! The top-level coordinator: owns the navigation model, the renderer
//! registry, and the live modal overlays, and runs transitions against the
//! host frame clock.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::PlatformConfig;
use crate::container::ModalContainer;
use crate::error::NavError;
use crate::geometry::{Rectangle, Size, SizeRequest};
use crate::host::HostWindow;
use crate::model::NavigationModel;
use crate::page::{PageId, PageKind, PageRef};
use crate::renderer::{RendererFactory, RendererRegistry};
use crate::signal::{SignalBus, CLOSE_CONTEXT_ACTIONS};
use crate::transition::{TransitionDirection, TransitionOutcome, TransitionRunner};

/// Payload broadcast on [`CLOSE_CONTEXT_ACTIONS`] when a transition starts.
#[derive(Debug, Clone, Copy, Serialize)]
struct TransitionSignal {
    direction: &'static str,
    animated: bool,
}

/// Navigation capability surface exposed to the application layer.
///
/// The window-level platform implements only the modal half; the
/// page-stack half exists for interface parity and fails fast with
/// [`NavError::Unsupported`].
#[async_trait]
pub trait Navigation: Send + Sync {
    async fn push_modal(&self, page: PageRef, animated: bool) -> Result<(), NavError>;

    async fn pop_modal(&self, animated: bool) -> Result<PageRef, NavError>;

    async fn push_page(&self, page: PageRef, animated: bool) -> Result<(), NavError>;

    async fn pop_page(&self, animated: bool) -> Result<PageRef, NavError>;

    async fn pop_to_root(&self, animated: bool) -> Result<(), NavError>;

    fn insert_page_before(&self, page: PageRef, before: &PageRef) -> Result<(), NavError>;

    fn remove_page(&self, page: &PageRef) -> Result<(), NavError>;

    fn modal_stack(&self) -> Vec<PageRef>;

    fn navigation_stack(&self) -> Vec<PageRef>;
}

/// Window-level navigation surface: one root stack, one modal stack, one
/// transition in flight at a time.
///
/// Cloning yields another handle to the same platform. All state lives
/// behind a single mutex; async waits never hold it. Page lifecycle hooks
/// are invoked with the platform lock held, so pages must not call back
/// into navigation from inside a hook.
#[derive(Clone)]
pub struct Platform {
    inner: Arc<Mutex<PlatformInner>>,
}

struct PlatformInner {
    nav_model: NavigationModel,
    root_page: Option<PageRef>,
    factory: Box<dyn RendererFactory>,
    host: Box<dyn HostWindow>,
    config: PlatformConfig,
    registry: RendererRegistry,
    containers: Vec<ModalContainer>,
    transition: Option<TransitionRunner>,
    nav_animation_in_progress: bool,
    signals: SignalBus,
    binding_context: Value,
    last_bounds: Option<Rectangle>,
    disposed: bool,
}

impl Platform {
    pub fn new(factory: Box<dyn RendererFactory>, host: Box<dyn HostWindow>) -> Self {
        Self::with_config(factory, host, PlatformConfig::default())
    }

    pub fn with_config(
        factory: Box<dyn RendererFactory>,
        host: Box<dyn HostWindow>,
        config: PlatformConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PlatformInner {
                nav_model: NavigationModel::new(),
                root_page: None,
                factory,
                host,
                config,
                registry: RendererRegistry::new(),
                containers: Vec::new(),
                transition: None,
                nav_animation_in_progress: false,
                signals: SignalBus::new(),
                binding_context: Value::Null,
                last_bounds: None,
                disposed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlatformInner> {
        self.inner.lock().unwrap()
    }

    /// Replace the root page wholesale.
    ///
    /// Any current roots and modals are detached and disposed first, with
    /// an in-flight transition settled so no pending promise is left
    /// hanging. `None` stops after the teardown and is idempotent.
    pub fn set_root_page(&self, new_root: Option<PageRef>) {
        let mut inner = self.lock();
        if inner.disposed {
            return;
        }
        if inner.root_page.is_some() {
            inner.teardown();
        }
        let Some(root) = new_root else {
            return;
        };
        inner
            .nav_model
            .push(root.clone(), None)
            .expect("fresh root push has no insertion point");
        inner.root_page = Some(root.clone());
        inner.add_root_child(&root);
        if !inner.binding_context.is_null() {
            root.binding_context_changed(&inner.binding_context);
        }
    }

    /// Present a modal above the current page.
    ///
    /// The logical push, the disappearing signal to the prior current page,
    /// and the physical attach all happen synchronously at call time; the
    /// returned future resolves once the present transition settles.
    /// Appearing is sent to the modal only if it is still the current page
    /// by then — a pop racing the present wins.
    pub fn push_modal(
        &self,
        page: PageRef,
        animated: bool,
    ) -> impl Future<Output = Result<(), NavError>> + Send + 'static {
        let receiver = {
            let mut inner = self.lock();
            if inner.disposed {
                Err(NavError::Disposed)
            } else {
                Ok(inner.begin_present(page, animated))
            }
        };
        async move {
            let receiver = receiver?;
            let _ = receiver.await;
            Ok(())
        }
    }

    /// Dismiss the top modal.
    ///
    /// The logical pop and the disappearing signal happen synchronously at
    /// call time; the returned future resolves with the removed page once
    /// its overlay has been detached and disposed.
    ///
    /// # Panics
    ///
    /// Popping with no modal present is a caller bug and is fatal.
    pub fn pop_modal(
        &self,
        animated: bool,
    ) -> impl Future<Output = Result<PageRef, NavError>> + Send + 'static {
        let begun = {
            let mut inner = self.lock();
            if inner.disposed {
                Err(NavError::Disposed)
            } else {
                Ok(inner.begin_dismiss(animated))
            }
        };
        async move {
            let (page, receiver) = begun?;
            let _ = receiver.await;
            Ok(page)
        }
    }

    pub fn push_page(&self, _page: PageRef, _animated: bool) -> Result<(), NavError> {
        Err(NavError::unsupported("push_page"))
    }

    pub fn pop_page(&self, _animated: bool) -> Result<PageRef, NavError> {
        Err(NavError::unsupported("pop_page"))
    }

    pub fn pop_to_root(&self, _animated: bool) -> Result<(), NavError> {
        Err(NavError::unsupported("pop_to_root"))
    }

    pub fn insert_page_before(&self, _page: PageRef, _before: &PageRef) -> Result<(), NavError> {
        Err(NavError::unsupported("insert_page_before"))
    }

    pub fn remove_page(&self, _page: &PageRef) -> Result<(), NavError> {
        Err(NavError::unsupported("remove_page"))
    }

    /// Offer the hardware back press to the navigation surface.
    ///
    /// Consumed unconditionally while a transition is in flight; otherwise
    /// delegated to the last root page's own back handling. The platform is
    /// a dispatcher here, not a consumer of the semantic action.
    pub fn handle_back_pressed(&self) -> bool {
        let root = {
            let inner = self.lock();
            if inner.nav_animation_in_progress {
                return true;
            }
            inner.nav_model.roots().last().cloned()
        };
        match root {
            Some(root) => root.send_back_button_pressed(),
            None => false,
        }
    }

    /// Host frame-clock entry point: advance the in-flight transition by
    /// `delta` and run its completion work once the duration elapses.
    pub fn advance_animations(&self, delta: Duration) {
        self.lock().advance(delta);
    }

    /// Lay out the root page and every live modal overlay for the given
    /// surface bounds (pixels).
    pub fn perform_layout_pass(&self, bounds: Rectangle) {
        self.lock().layout_pass(bounds);
    }

    /// Measure a page through its renderer handle.
    ///
    /// Constraints are density-independent; values at or below −1 mean
    /// unbounded. The result is converted back to density-independent
    /// units, with a zero minimum replaced by the request.
    pub fn native_size(
        &self,
        page: &PageRef,
        width_constraint: f64,
        height_constraint: f64,
    ) -> SizeRequest {
        self.lock()
            .native_size(page, width_constraint, height_constraint)
    }

    /// Store the inherited binding context and propagate it to the root.
    pub fn set_binding_context(&self, context: Value) {
        let root = {
            let mut inner = self.lock();
            inner.binding_context = context.clone();
            inner.root_page.clone()
        };
        if let Some(root) = root {
            root.binding_context_changed(&context);
        }
    }

    /// Subscribe to a platform signal topic such as
    /// [`CLOSE_CONTEXT_ACTIONS`].
    pub fn subscribe_signal<F>(&self, topic: impl Into<String>, handler: F)
    where
        F: Fn(&Value) + Send + 'static,
    {
        self.lock().signals.subscribe(topic, handler);
    }

    /// Tear the platform down. Idempotent; any in-flight transition
    /// settles, every overlay and renderer is disposed, and later
    /// navigation operations fail with [`NavError::Disposed`].
    pub fn dispose(&self) {
        let mut inner = self.lock();
        if inner.disposed {
            return;
        }
        inner.teardown();
        inner.disposed = true;
    }

    pub fn current_page(&self) -> Option<PageRef> {
        self.lock().nav_model.current_page().cloned()
    }

    pub fn current_root_page(&self) -> Option<PageRef> {
        self.lock().root_page.clone()
    }

    pub fn modal_stack(&self) -> Vec<PageRef> {
        self.lock().nav_model.modals().to_vec()
    }

    pub fn nav_animation_in_progress(&self) -> bool {
        self.lock().nav_animation_in_progress
    }

    /// Number of live modal overlays, including one still animating out.
    pub fn modal_container_count(&self) -> usize {
        self.lock().containers.len()
    }
}

#[async_trait]
impl Navigation for Platform {
    async fn push_modal(&self, page: PageRef, animated: bool) -> Result<(), NavError> {
        Platform::push_modal(self, page, animated).await
    }

    async fn pop_modal(&self, animated: bool) -> Result<PageRef, NavError> {
        Platform::pop_modal(self, animated).await
    }

    async fn push_page(&self, page: PageRef, animated: bool) -> Result<(), NavError> {
        Platform::push_page(self, page, animated)
    }

    async fn pop_page(&self, animated: bool) -> Result<PageRef, NavError> {
        Platform::pop_page(self, animated)
    }

    async fn pop_to_root(&self, animated: bool) -> Result<(), NavError> {
        Platform::pop_to_root(self, animated)
    }

    fn insert_page_before(&self, page: PageRef, before: &PageRef) -> Result<(), NavError> {
        Platform::insert_page_before(self, page, before)
    }

    fn remove_page(&self, page: &PageRef) -> Result<(), NavError> {
        Platform::remove_page(self, page)
    }

    fn modal_stack(&self) -> Vec<PageRef> {
        Platform::modal_stack(self)
    }

    fn navigation_stack(&self) -> Vec<PageRef> {
        Vec::new()
    }
}

impl PlatformInner {
    fn begin_present(
        &mut self,
        page: PageRef,
        animated: bool,
    ) -> oneshot::Receiver<TransitionOutcome> {
        if let Some(current) = self.nav_model.current_page() {
            current.send_disappearing();
        }
        self.nav_model.push_modal(page.clone());

        // An interrupted transition is settled only after the model
        // reflects the new intent, so its appearing guard sees the final
        // state.
        self.cancel_in_flight();

        let mut container = ModalContainer::new(self.factory.as_mut(), page.clone());
        if let Some(bounds) = self.last_bounds {
            let inset = self.top_inset();
            container.layout(bounds, inset, self.host.as_ref());
        }

        self.broadcast_transition(TransitionDirection::Present, animated);
        debug!("presenting modal {:?} (animated: {})", page.id(), animated);

        let (mut runner, receiver) =
            TransitionRunner::new(TransitionDirection::Present, page.clone(), animated);
        if animated {
            container.set_translation_y(self.travel_px());
            self.containers.push(container);
            self.nav_animation_in_progress = true;
            self.transition = Some(runner);
        } else {
            self.containers.push(container);
            runner.resolve(TransitionOutcome::Completed);
            self.finish_present(&page);
        }
        receiver
    }

    fn begin_dismiss(
        &mut self,
        animated: bool,
    ) -> (PageRef, oneshot::Receiver<TransitionOutcome>) {
        // The logical pop happens before any animation; current_page
        // reflects the intent immediately.
        let page = self.nav_model.pop_modal();
        page.send_disappearing();

        self.cancel_in_flight();

        self.broadcast_transition(TransitionDirection::Dismiss, animated);
        debug!("dismissing modal {:?} (animated: {})", page.id(), animated);

        let (mut runner, receiver) =
            TransitionRunner::new(TransitionDirection::Dismiss, page.clone(), animated);
        if animated {
            self.nav_animation_in_progress = true;
            self.transition = Some(runner);
        } else {
            self.remove_container(page.id());
            runner.resolve(TransitionOutcome::Completed);
            if let Some(current) = self.nav_model.current_page() {
                current.send_appearing();
            }
        }
        (page, receiver)
    }

    fn advance(&mut self, delta: Duration) {
        let Some(mut runner) = self.transition.take() else {
            return;
        };
        let finished = runner.advance(delta);
        let travel = self.travel_px();
        let translation = runner.translation(travel);
        if let Some(container) = self.container_mut(runner.page().id()) {
            container.set_translation_y(translation);
        }
        if !finished {
            self.transition = Some(runner);
            return;
        }

        self.nav_animation_in_progress = false;
        let page = runner.page().clone();
        match runner.direction() {
            TransitionDirection::Present => {
                runner.resolve(TransitionOutcome::Completed);
                self.finish_present(&page);
            }
            TransitionDirection::Dismiss => {
                self.remove_container(page.id());
                runner.resolve(TransitionOutcome::Completed);
                if let Some(current) = self.nav_model.current_page() {
                    current.send_appearing();
                }
            }
        }
    }

    /// Settle the in-flight transition, if any, so its promise resolves.
    ///
    /// A cancelled present leaves its overlay attached for whoever
    /// interrupted it to manage; a cancelled dismiss finalizes the removal
    /// immediately and skips the appearing handoff.
    fn cancel_in_flight(&mut self) {
        let Some(mut runner) = self.transition.take() else {
            return;
        };
        self.nav_animation_in_progress = false;
        let page = runner.page().clone();
        match runner.direction() {
            TransitionDirection::Present => {
                runner.resolve(TransitionOutcome::Cancelled);
                self.finish_present(&page);
            }
            TransitionDirection::Dismiss => {
                self.remove_container(page.id());
                runner.resolve(TransitionOutcome::Cancelled);
            }
        }
    }

    /// Appearing fires only if the presented page is still current.
    fn finish_present(&mut self, page: &PageRef) {
        if self.nav_model.is_current(page.id()) {
            page.send_appearing();
        }
    }

    fn remove_container(&mut self, page_id: PageId) {
        if let Some(pos) = self
            .containers
            .iter()
            .position(|container| container.page().id() == page_id)
        {
            let mut container = self.containers.remove(pos);
            container.dispose();
        } else {
            debug!("no live overlay for dismissed modal {:?}", page_id);
        }
    }

    fn container_mut(&mut self, page_id: PageId) -> Option<&mut ModalContainer> {
        self.containers
            .iter_mut()
            .find(|container| container.page().id() == page_id)
    }

    /// Create, lay out, and attach the renderer for a new root page.
    fn add_root_child(&mut self, page: &PageRef) {
        if self.registry.contains(page.id()) {
            return;
        }
        let mut handle = self.factory.create_renderer(page);
        if let Some(bounds) = self.last_bounds {
            self.layout_root_page(page, bounds.width, bounds.height);
        }
        handle.attach();
        self.registry.bind(page.id(), handle);
    }

    /// Detach and dispose everything; settles any in-flight transition.
    /// The model is reset first so cancellation guards see the post-reset
    /// state and send no lifecycle signals.
    fn teardown(&mut self) {
        self.nav_model = NavigationModel::new();
        self.cancel_in_flight();
        for mut container in self.containers.drain(..) {
            container.dispose();
        }
        for (_, mut handle) in self.registry.drain() {
            handle.detach();
            handle.dispose();
        }
        self.root_page = None;
    }

    fn layout_pass(&mut self, bounds: Rectangle) {
        let changed = self.last_bounds != Some(bounds);
        self.last_bounds = Some(bounds);

        if let Some(root) = self.root_page.clone() {
            if changed {
                self.layout_root_page(&root, bounds.width, bounds.height);
            }
            if let Some(handle) = self.registry.get_mut(root.id()) {
                handle.update_layout();
            }
        }

        // Modal overlays always fill the surface.
        let inset = self.top_inset();
        let host = self.host.as_ref();
        for container in &mut self.containers {
            container.layout(bounds, inset, host);
        }
    }

    fn layout_root_page(&self, page: &PageRef, width_px: f64, height_px: f64) {
        let host = self.host.as_ref();
        match page.kind() {
            PageKind::EdgeToEdge => page.layout(Rectangle::new(
                0.0,
                0.0,
                host.from_pixels(width_px),
                host.from_pixels(height_px),
            )),
            PageKind::Standard => {
                let inset = self.top_inset();
                page.layout(Rectangle::new(
                    0.0,
                    host.from_pixels(inset),
                    host.from_pixels(width_px),
                    host.from_pixels(height_px - inset),
                ));
            }
        }
    }

    fn native_size(
        &mut self,
        page: &PageRef,
        width_constraint: f64,
        height_constraint: f64,
    ) -> SizeRequest {
        // Negative constraints mean unbounded at this boundary.
        let width_px = if width_constraint <= -1.0 {
            f64::INFINITY
        } else {
            self.host.to_pixels(width_constraint)
        };
        let height_px = if height_constraint <= -1.0 {
            f64::INFINITY
        } else {
            self.host.to_pixels(height_constraint)
        };

        let raw = if self.registry.contains(page.id()) {
            self.registry
                .get_mut(page.id())
                .map(|handle| handle.measure_desired(width_px, height_px))
        } else {
            self.container_mut(page.id())
                .and_then(|container| container.measure(width_px, height_px))
        };
        let Some(raw) = raw else {
            warn!("measured page {:?} without a live renderer", page.id());
            return SizeRequest::default();
        };

        let minimum = if raw.minimum.is_zero() {
            raw.request
        } else {
            raw.minimum
        };
        let host = self.host.as_ref();
        SizeRequest::new(
            Size::new(
                host.from_pixels(raw.request.width),
                host.from_pixels(raw.request.height),
            ),
            Size::new(
                host.from_pixels(minimum.width),
                host.from_pixels(minimum.height),
            ),
        )
    }

    fn top_inset(&self) -> f64 {
        if self.config.inset_aware {
            self.host.status_bar_inset()
        } else {
            0.0
        }
    }

    fn travel_px(&self) -> f64 {
        self.last_bounds
            .map(|bounds| bounds.height)
            .unwrap_or_else(|| self.host.surface_size().height)
    }

    fn broadcast_transition(&self, direction: TransitionDirection, animated: bool) {
        let direction = match direction {
            TransitionDirection::Present => "present",
            TransitionDirection::Dismiss => "dismiss",
        };
        self.signals.publish(
            CLOSE_CONTEXT_ACTIONS,
            TransitionSignal {
                direction,
                animated,
            },
        );
    }
}

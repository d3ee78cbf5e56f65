//! Shared fakes for exercising the platform against recording
//! collaborators.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use navshell::{
    HostWindow, Page, PageId, PageKind, PageRef, Platform, Rectangle, RendererBinding,
    RendererFactory, ScrimBinding, Size, SizeRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Appearing,
    Disappearing,
    BackPressed,
}

/// A page that records every lifecycle signal and layout frame it sees.
pub struct TestPage {
    id: PageId,
    kind: PageKind,
    consumes_back: bool,
    events: Mutex<Vec<PageEvent>>,
    frames: Mutex<Vec<Rectangle>>,
    contexts: Mutex<Vec<Value>>,
}

impl TestPage {
    pub fn new() -> Arc<Self> {
        Self::build(PageKind::Standard, false)
    }

    pub fn edge_to_edge() -> Arc<Self> {
        Self::build(PageKind::EdgeToEdge, false)
    }

    pub fn consuming_back() -> Arc<Self> {
        Self::build(PageKind::Standard, true)
    }

    fn build(kind: PageKind, consumes_back: bool) -> Arc<Self> {
        Arc::new(Self {
            id: PageId::new(),
            kind,
            consumes_back,
            events: Mutex::new(Vec::new()),
            frames: Mutex::new(Vec::new()),
            contexts: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn appear_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == PageEvent::Appearing)
            .count()
    }

    pub fn last_frame(&self) -> Option<Rectangle> {
        self.frames.lock().unwrap().last().copied()
    }

    pub fn contexts(&self) -> Vec<Value> {
        self.contexts.lock().unwrap().clone()
    }
}

impl Page for TestPage {
    fn id(&self) -> PageId {
        self.id
    }

    fn kind(&self) -> PageKind {
        self.kind
    }

    fn send_appearing(&self) {
        self.events.lock().unwrap().push(PageEvent::Appearing);
    }

    fn send_disappearing(&self) {
        self.events.lock().unwrap().push(PageEvent::Disappearing);
    }

    fn send_back_button_pressed(&self) -> bool {
        self.events.lock().unwrap().push(PageEvent::BackPressed);
        self.consumes_back
    }

    fn layout(&self, bounds: Rectangle) {
        self.frames.lock().unwrap().push(bounds);
    }

    fn binding_context_changed(&self, context: &Value) {
        self.contexts.lock().unwrap().push(context.clone());
    }
}

/// Everything the recording backend observed, shared across all handles.
#[derive(Default)]
pub struct RenderLog {
    /// Pages whose renderer is currently mounted, in attach order.
    pub attached: Vec<PageId>,
    pub renderers_created: usize,
    pub renderers_disposed: usize,
    pub scrims_created: usize,
    pub scrims_disposed: usize,
    pub translations: HashMap<PageId, f64>,
    pub scrim_frames: Vec<Rectangle>,
    pub measures: Vec<(PageId, f64, f64)>,
    pub layout_updates: usize,
}

pub type SharedLog = Arc<Mutex<RenderLog>>;

pub struct RecordingFactory {
    log: SharedLog,
    desired: SizeRequest,
}

impl RecordingFactory {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            desired: SizeRequest::new(Size::new(200.0, 100.0), Size::default()),
        }
    }
}

impl RendererFactory for RecordingFactory {
    fn create_renderer(&mut self, page: &PageRef) -> Box<dyn RendererBinding> {
        self.log.lock().unwrap().renderers_created += 1;
        Box::new(RecordingRenderer {
            page: page.id(),
            log: self.log.clone(),
            desired: self.desired,
        })
    }

    fn create_scrim(&mut self) -> Box<dyn ScrimBinding> {
        self.log.lock().unwrap().scrims_created += 1;
        Box::new(RecordingScrim {
            log: self.log.clone(),
        })
    }
}

struct RecordingRenderer {
    page: PageId,
    log: SharedLog,
    desired: SizeRequest,
}

impl RendererBinding for RecordingRenderer {
    fn attach(&mut self) {
        self.log.lock().unwrap().attached.push(self.page);
    }

    fn detach(&mut self) {
        self.log
            .lock()
            .unwrap()
            .attached
            .retain(|page| *page != self.page);
    }

    fn dispose(&mut self) {
        self.log.lock().unwrap().renderers_disposed += 1;
    }

    fn measure_desired(&mut self, width_px: f64, height_px: f64) -> SizeRequest {
        self.log
            .lock()
            .unwrap()
            .measures
            .push((self.page, width_px, height_px));
        self.desired
    }

    fn update_layout(&mut self) {
        self.log.lock().unwrap().layout_updates += 1;
    }

    fn set_translation_y(&mut self, px: f64) {
        self.log.lock().unwrap().translations.insert(self.page, px);
    }
}

struct RecordingScrim {
    log: SharedLog,
}

impl ScrimBinding for RecordingScrim {
    fn set_frame(&mut self, frame: Rectangle) {
        self.log.lock().unwrap().scrim_frames.push(frame);
    }

    fn set_translation_y(&mut self, _px: f64) {}

    fn dispose(&mut self) {
        self.log.lock().unwrap().scrims_disposed += 1;
    }
}

/// Host with a 2.0 density, a 48 px status-bar inset, and a 1080×1920 px
/// surface.
pub struct FakeHost {
    pub inset_px: f64,
    pub density: f64,
    pub size: Size,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            inset_px: 48.0,
            density: 2.0,
            size: Size::new(1080.0, 1920.0),
        }
    }
}

impl HostWindow for FakeHost {
    fn status_bar_inset(&self) -> f64 {
        self.inset_px
    }

    fn to_pixels(&self, dip: f64) -> f64 {
        dip * self.density
    }

    fn from_pixels(&self, px: f64) -> f64 {
        px / self.density
    }

    fn surface_size(&self) -> Size {
        self.size
    }
}

pub fn new_platform() -> (Platform, SharedLog) {
    let log: SharedLog = Arc::new(Mutex::new(RenderLog::default()));
    let platform = Platform::new(
        Box::new(RecordingFactory::new(log.clone())),
        Box::new(FakeHost::default()),
    );
    (platform, log)
}

/// The full surface bounds matching [`FakeHost`], in pixels.
pub fn surface_bounds() -> Rectangle {
    Rectangle::new(0.0, 0.0, 1080.0, 1920.0)
}

/// Coerce a concrete test page into the platform's page handle type.
pub fn page_ref(page: &Arc<TestPage>) -> PageRef {
    page.clone()
}

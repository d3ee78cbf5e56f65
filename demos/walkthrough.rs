//! Walkthrough of the platform's navigation surface against a logging
//! rendering backend.
//!
//! Runs the full modal lifecycle by hand: root attach, an instant present,
//! an animated present driven frame by frame, back-press dispatch, and an
//! animated dismiss.

use std::sync::Arc;
use std::time::Duration;

use navshell::{
    HostWindow, Page, PageId, PageRef, Platform, Rectangle, RendererBinding, RendererFactory,
    ScrimBinding, Size, SizeRequest, CLOSE_CONTEXT_ACTIONS,
};

struct DemoPage {
    id: PageId,
    name: &'static str,
}

impl DemoPage {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id: PageId::new(),
            name,
        })
    }
}

impl Page for DemoPage {
    fn id(&self) -> PageId {
        self.id
    }

    fn send_appearing(&self) {
        println!("  [page] {} appearing", self.name);
    }

    fn send_disappearing(&self) {
        println!("  [page] {} disappearing", self.name);
    }

    fn send_back_button_pressed(&self) -> bool {
        println!("  [page] {} consumed the back press", self.name);
        true
    }

    fn layout(&self, bounds: Rectangle) {
        println!(
            "  [page] {} laid out at ({}, {}) {}x{} dip",
            self.name, bounds.x, bounds.y, bounds.width, bounds.height
        );
    }
}

struct ConsoleRenderer {
    name: String,
}

impl RendererBinding for ConsoleRenderer {
    fn attach(&mut self) {
        println!("  [renderer] {} attached", self.name);
    }

    fn detach(&mut self) {
        println!("  [renderer] {} detached", self.name);
    }

    fn dispose(&mut self) {
        println!("  [renderer] {} disposed", self.name);
    }

    fn measure_desired(&mut self, _width_px: f64, _height_px: f64) -> SizeRequest {
        SizeRequest::exact(Size::new(600.0, 400.0))
    }

    fn update_layout(&mut self) {}

    fn set_translation_y(&mut self, px: f64) {
        println!("  [renderer] {} translation {:.0} px", self.name, px);
    }
}

struct ConsoleScrim;

impl ScrimBinding for ConsoleScrim {
    fn set_frame(&mut self, _frame: Rectangle) {}

    fn set_translation_y(&mut self, _px: f64) {}

    fn dispose(&mut self) {
        println!("  [renderer] scrim disposed");
    }
}

struct ConsoleFactory;

impl RendererFactory for ConsoleFactory {
    fn create_renderer(&mut self, page: &PageRef) -> Box<dyn RendererBinding> {
        let id = page.id().0.to_string();
        Box::new(ConsoleRenderer {
            name: format!("renderer-{}", &id[..8]),
        })
    }

    fn create_scrim(&mut self) -> Box<dyn ScrimBinding> {
        Box::new(ConsoleScrim)
    }
}

struct DemoHost;

impl HostWindow for DemoHost {
    fn status_bar_inset(&self) -> f64 {
        48.0
    }

    fn to_pixels(&self, dip: f64) -> f64 {
        dip * 2.0
    }

    fn from_pixels(&self, px: f64) -> f64 {
        px / 2.0
    }

    fn surface_size(&self) -> Size {
        Size::new(1080.0, 1920.0)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let platform = Platform::new(Box::new(ConsoleFactory), Box::new(DemoHost));
    platform.subscribe_signal(CLOSE_CONTEXT_ACTIONS, |payload| {
        println!("  [signal] close context actions: {payload}");
    });

    println!("=== Root attach and layout pass ===");
    let home = DemoPage::new("home");
    platform.set_root_page(Some(home.clone()));
    platform.perform_layout_pass(Rectangle::new(0.0, 0.0, 1080.0, 1920.0));

    println!("\n=== Instant modal present ===");
    let settings = DemoPage::new("settings");
    platform.push_modal(settings.clone(), false).await?;

    println!("\n=== Animated modal present, driven at 60 fps ===");
    let login = DemoPage::new("login");
    let push = platform.push_modal(login.clone(), true);
    for _ in 0..20 {
        platform.advance_animations(Duration::from_millis(16));
    }
    push.await?;

    println!("\n=== Back press while idle goes to the root ===");
    let consumed = platform.handle_back_pressed();
    println!("  consumed: {consumed}");

    println!("\n=== Animated dismiss ===");
    let pop = platform.pop_modal(true);
    for _ in 0..20 {
        platform.advance_animations(Duration::from_millis(16));
    }
    let popped = pop.await?;
    println!("  dismissed page id {:?}", popped.id());

    println!("\n=== Teardown ===");
    platform.dispose();
    Ok(())
}

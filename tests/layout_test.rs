//! Layout-pass and measurement behavior: inset handling, the edge-to-edge
//! exception, overlay sizing, and native-size constraint conversion.

mod common;

use std::sync::{Arc, Mutex};

use anyhow::Result;

use common::{
    new_platform, page_ref, surface_bounds, FakeHost, RecordingFactory, RenderLog, SharedLog,
    TestPage,
};
use navshell::{Page, Platform, PlatformConfig, Rectangle};

#[test]
fn standard_root_is_laid_out_below_the_inset_in_dips() {
    let (platform, log) = new_platform();
    let root = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));
    assert!(root.last_frame().is_none());

    platform.perform_layout_pass(surface_bounds());

    // 48 px inset at density 2.0 over a 1080x1920 surface
    assert_eq!(root.last_frame(), Some(Rectangle::new(0.0, 24.0, 540.0, 936.0)));
    assert_eq!(log.lock().unwrap().layout_updates, 1);
}

#[test]
fn edge_to_edge_root_ignores_the_inset() {
    let (platform, _log) = new_platform();
    let root = TestPage::edge_to_edge();
    platform.set_root_page(Some(page_ref(&root)));

    platform.perform_layout_pass(surface_bounds());

    assert_eq!(root.last_frame(), Some(Rectangle::new(0.0, 0.0, 540.0, 960.0)));
}

#[test]
fn inset_unaware_hosts_lay_out_from_the_top_edge() {
    let log: SharedLog = Arc::new(Mutex::new(RenderLog::default()));
    let platform = Platform::with_config(
        Box::new(RecordingFactory::new(log.clone())),
        Box::new(FakeHost::default()),
        PlatformConfig::without_insets(),
    );
    let root = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));

    platform.perform_layout_pass(surface_bounds());

    assert_eq!(root.last_frame(), Some(Rectangle::new(0.0, 0.0, 540.0, 960.0)));
}

#[tokio::test]
async fn modal_overlays_fill_the_surface_below_the_inset() -> Result<()> {
    let (platform, log) = new_platform();
    let root = TestPage::new();
    let modal = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));
    platform.push_modal(page_ref(&modal), false).await?;

    platform.perform_layout_pass(surface_bounds());

    assert_eq!(
        modal.last_frame(),
        Some(Rectangle::new(0.0, 24.0, 540.0, 936.0))
    );
    // scrim frames stay in pixels
    assert_eq!(
        log.lock().unwrap().scrim_frames,
        vec![Rectangle::new(0.0, 48.0, 1080.0, 1872.0)]
    );
    Ok(())
}

#[tokio::test]
async fn unchanged_bounds_skip_page_layout_but_refresh_renderers() -> Result<()> {
    let (platform, log) = new_platform();
    let root = TestPage::new();
    let modal = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));
    platform.push_modal(page_ref(&modal), false).await?;

    platform.perform_layout_pass(surface_bounds());
    let frames_after_first = root.last_frame();
    let updates_after_first = log.lock().unwrap().layout_updates;

    platform.perform_layout_pass(surface_bounds());

    assert_eq!(root.last_frame(), frames_after_first);
    assert_eq!(
        log.lock().unwrap().scrim_frames.len(),
        1,
        "scrim frame should not be re-set for identical bounds"
    );
    assert!(log.lock().unwrap().layout_updates > updates_after_first);
    Ok(())
}

#[test]
fn native_size_converts_constraints_and_results() {
    let (platform, log) = new_platform();
    let root = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));

    let size = platform.native_size(&page_ref(&root), 400.0, -1.0);

    // constraint: 400 dip -> 800 px, -1 -> unbounded
    let measures = log.lock().unwrap().measures.clone();
    assert_eq!(measures, vec![(root.id(), 800.0, f64::INFINITY)]);

    // renderer requested 200x100 px with a zero minimum: the minimum falls
    // back to the request, and both come back in dips
    assert_eq!(size.request.width, 100.0);
    assert_eq!(size.request.height, 50.0);
    assert_eq!(size.minimum, size.request);
}

#[tokio::test]
async fn native_size_reaches_modal_renderers_through_their_overlay() -> Result<()> {
    let (platform, log) = new_platform();
    let root = TestPage::new();
    let modal = TestPage::new();
    platform.set_root_page(Some(page_ref(&root)));
    platform.push_modal(page_ref(&modal), false).await?;

    platform.native_size(&page_ref(&modal), 100.0, 100.0);

    let measures = log.lock().unwrap().measures.clone();
    assert_eq!(measures, vec![(modal.id(), 200.0, 200.0)]);
    Ok(())
}

#[test]
fn native_size_without_a_renderer_measures_zero() {
    let (platform, log) = new_platform();
    let detached = TestPage::new();

    let size = platform.native_size(&page_ref(&detached), 100.0, 100.0);

    assert!(size.request.is_zero());
    assert!(size.minimum.is_zero());
    assert!(log.lock().unwrap().measures.is_empty());
}

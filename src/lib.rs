//! Window-level navigation and modal presentation for host-rendered UI
//! platforms.
//!
//! The platform owns an ordered stack of root pages and an ordered stack
//! of modal overlays above the current root, mediates their attachment to
//! a host view tree it does not control, and runs present/dismiss
//! transitions as cancellable promises driven by the host's frame clock.
//! Rendering itself stays behind the [`RendererFactory`] and
//! [`HostWindow`] seams.

pub mod config;
pub mod container;
pub mod error;
pub mod geometry;
pub mod host;
pub mod model;
pub mod page;
pub mod platform;
pub mod renderer;
pub mod signal;
pub mod transition;

pub use config::PlatformConfig;
pub use container::ModalContainer;
pub use error::NavError;
pub use geometry::{Rectangle, Size, SizeRequest};
pub use host::HostWindow;
pub use model::NavigationModel;
pub use page::{Page, PageId, PageKind, PageRef};
pub use platform::{Navigation, Platform};
pub use renderer::{RendererBinding, RendererFactory, RendererRegistry, ScrimBinding};
pub use signal::{SignalBus, CLOSE_CONTEXT_ACTIONS};
pub use transition::{
    Easing, TransitionDirection, TransitionOutcome, TransitionRunner, TransitionStatus,
    TRANSITION_DURATION,
};

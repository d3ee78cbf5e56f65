//! Platform configuration.

/// Host-capability toggles that affect how pages are laid out.
///
/// Transition timing is a fixed contract (see [`crate::transition`]) and is
/// intentionally not configurable here.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Whether the host reports a real status-bar inset. Hosts predating
    /// inset reporting lay pages out from the very top edge.
    pub inset_aware: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self { inset_aware: true }
    }
}

impl PlatformConfig {
    pub fn new(inset_aware: bool) -> Self {
        Self { inset_aware }
    }

    /// Config for hosts that cannot report a top inset.
    pub fn without_insets() -> Self {
        Self { inset_aware: false }
    }
}

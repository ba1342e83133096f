//! Process-wide visibility flag shared by all polling loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the dashboard's visibility state.
///
/// Every polling loop consults the gate at the start of a tick and skips the
/// network call entirely while the dashboard is hidden. Flipping the gate back
/// to visible resumes polling on the next tick; no manual refresh is needed.
#[derive(Debug, Clone)]
pub struct VisibilityGate {
    visible: Arc<AtomicBool>,
}

impl VisibilityGate {
    /// New gate in the visible state.
    pub fn new() -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new()
    }
}

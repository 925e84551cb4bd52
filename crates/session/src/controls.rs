//! Action controls (submit, delete) with visible/enabled/busy flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Snapshot of a control for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub visible: bool,
    pub enabled: bool,
    pub busy: bool,
}

/// A user-facing action control.
///
/// A control that is busy is also disabled; acquiring it returns a
/// [`BusyGuard`] that restores it when dropped.
#[derive(Debug)]
pub struct Control {
    visible: AtomicBool,
    enabled: AtomicBool,
    busy: AtomicBool,
}

impl Control {
    pub fn new(visible: bool, enabled: bool) -> Self {
        Self {
            visible: AtomicBool::new(visible),
            enabled: AtomicBool::new(enabled),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Marks the control busy and disabled. Returns `None` if it is already
    /// busy or currently disabled.
    pub fn try_acquire(self: &Arc<Self>) -> Option<BusyGuard> {
        if !self.is_enabled() {
            return None;
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.set_enabled(false);
        Some(BusyGuard {
            control: Arc::clone(self),
        })
    }

    pub fn state(&self) -> ControlState {
        ControlState {
            visible: self.is_visible(),
            enabled: self.is_enabled(),
            busy: self.is_busy(),
        }
    }
}

/// Clears the busy indicator and re-enables the control on drop.
#[derive(Debug)]
pub struct BusyGuard {
    control: Arc<Control>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.control.busy.store(false, Ordering::Release);
        self.control.set_enabled(true);
    }
}

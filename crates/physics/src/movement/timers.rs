//! Coyote time and jump buffering.
//!
//! Two grace windows make jumping forgiving:
//!
//! - **Coyote time** keeps a jump available for a moment after walking off
//!   a ledge.
//! - **Jump buffering** remembers a jump press for a moment before landing.
//!
//! A jump fires on any tick where both windows are open, and firing closes
//! both so the press is consumed exactly once. Both counters run on
//! unscaled time so slow motion does not stretch the windows.

use serde::{Deserialize, Serialize};

/// Grace-window counters for jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingCounters {
    /// Time left in the coyote window (seconds). Open while > 0.
    coyote: f32,

    /// Time left in the jump buffer (seconds). Open while > 0.
    jump_buffer: f32,
}

impl TimingCounters {
    /// Create counters with both windows closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the jump buffer on a press, otherwise let it decay.
    pub fn update_jump_buffer(&mut self, jump_pressed: bool, buffer_time: f32, unscaled_dt: f32) {
        if jump_pressed {
            self.jump_buffer = buffer_time;
        } else {
            self.jump_buffer = (self.jump_buffer - unscaled_dt).max(0.0);
        }
    }

    /// Refresh the coyote window while grounded, otherwise let it decay.
    pub fn update_coyote(&mut self, grounded: bool, coyote_time: f32, unscaled_dt: f32) {
        if grounded {
            self.coyote = coyote_time;
        } else {
            self.coyote = (self.coyote - unscaled_dt).max(0.0);
        }
    }

    /// Whether a jump would fire right now.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.coyote > 0.0 && self.jump_buffer > 0.0
    }

    /// Fire the jump if both windows are open, closing them.
    ///
    /// Returns whether the jump fired.
    pub fn try_consume_jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.coyote = 0.0;
        self.jump_buffer = 0.0;
        true
    }

    /// Check if a jump press is still buffered.
    #[inline]
    pub fn jump_buffered(&self) -> bool {
        self.jump_buffer > 0.0
    }

    /// Check if the coyote window is open.
    #[inline]
    pub fn in_coyote_window(&self) -> bool {
        self.coyote > 0.0
    }

    /// Remaining coyote time (seconds).
    pub fn coyote_remaining(&self) -> f32 {
        self.coyote
    }

    /// Remaining buffer time (seconds).
    pub fn jump_buffer_remaining(&self) -> f32 {
        self.jump_buffer
    }

    /// Close both windows.
    pub fn clear(&mut self) {
        self.coyote = 0.0;
        self.jump_buffer = 0.0;
    }
}

// ============================================================================
// Tests
// ============================================================================

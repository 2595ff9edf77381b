//! Frame timing and global time scale.
//!
//! Gameplay time runs at `time_scale × real time`. Targeting slows the whole
//! game down by lowering the scale; timers that must stay responsive during
//! the slowdown (grace windows, the targeting countdown) read the unscaled
//! delta instead.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Neutral time scale.
pub const NORMAL_TIME_SCALE: f32 = 1.0;

/// Delta times for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Gameplay delta (seconds), already multiplied by the time scale.
    pub delta: f32,

    /// Real delta (seconds).
    pub unscaled_delta: f32,
}

impl FrameTime {
    /// Frame time at normal speed.
    pub fn fixed(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
        }
    }

    /// Frame time for a real delta under the given scale.
    pub fn scaled(unscaled_delta: f32, scale: f32) -> Self {
        Self {
            delta: unscaled_delta * scale,
            unscaled_delta,
        }
    }
}

/// Shared handle to the global time scale.
///
/// Clones share the same value. Readers call [`get`](Self::get) every tick;
/// the only writer should be whoever holds a [`TimeDilation`].
#[derive(Debug, Clone)]
pub struct TimeScale(Arc<AtomicU32>);

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeScale {
    /// Create a time scale at normal speed.
    pub fn new() -> Self {
        Self(Arc::new(AtomicU32::new(NORMAL_TIME_SCALE.to_bits())))
    }

    /// Current scale factor.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Whether the scale is at normal speed.
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.get() == NORMAL_TIME_SCALE
    }

    /// Frame time for a real delta under the current scale.
    pub fn frame(&self, unscaled_delta: f32) -> FrameTime {
        FrameTime::scaled(unscaled_delta, self.get())
    }

    /// Slow (or speed up) time until the returned guard is dropped.
    pub fn dilate(&self, factor: f32) -> TimeDilation {
        self.set(factor);
        TimeDilation { scale: self.clone() }
    }

    fn set(&self, factor: f32) {
        self.0.store(factor.to_bits(), Ordering::Relaxed);
    }
}

/// Scoped hold on the time scale.
///
/// Restores normal speed when dropped, so every path that discards the
/// guard (leaving a mode, timing out, tearing down the owner) releases it.
#[derive(Debug)]
#[must_use = "dropping the guard restores normal time immediately"]
pub struct TimeDilation {
    scale: TimeScale,
}

impl TimeDilation {
    /// The factor this guard is holding.
    pub fn factor(&self) -> f32 {
        self.scale.get()
    }
}

impl Drop for TimeDilation {
    fn drop(&mut self) {
        self.scale.set(NORMAL_TIME_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_is_normal() {
        let scale = TimeScale::new();
        assert_eq!(scale.get(), 1.0);
        assert!(scale.is_normal());
    }

    #[test]
    fn test_dilation_restores_on_drop() {
        let scale = TimeScale::new();
        {
            let guard = scale.dilate(0.1);
            assert_eq!(scale.get(), 0.1);
            assert_eq!(guard.factor(), 0.1);
        }
        assert!(scale.is_normal());
    }

    #[test]
    fn test_clones_share_value() {
        let scale = TimeScale::new();
        let reader = scale.clone();

        let guard = scale.dilate(0.25);
        assert_eq!(reader.get(), 0.25);
        drop(guard);
        assert_eq!(reader.get(), 1.0);
    }

    #[test]
    fn test_frame_time_scaling() {
        let scale = TimeScale::new();
        let _guard = scale.dilate(0.1);

        let frame = scale.frame(0.5);
        assert!((frame.delta - 0.05).abs() < 1e-6);
        assert_eq!(frame.unscaled_delta, 0.5);
    }
}

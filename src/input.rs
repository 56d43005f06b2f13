//! Pointer state for the animation core.
//!
//! The host normalizes raw pointer/touch events to [-1,1] per axis before
//! they reach the core; [`PointerState`] keeps that raw target alongside a
//! separately smoothed coordinate so the visual response lags the input.
//! The smoothed value maps into world units for the background field's
//! pointer force and the camera parallax.

use crate::smoothing::approach_vec2;
use glam::Vec2;

/// Raw and smoothed pointer coordinates.
#[derive(Debug, Clone)]
pub struct PointerState {
    target: Vec2,
    smoothed: Vec2,
    smoothing: f32,
    world_scale: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            target: Vec2::ZERO,
            smoothed: Vec2::ZERO,
            smoothing: 0.05,
            world_scale: 30.0,
        }
    }

    /// Set the raw pointer target in normalized [-1,1] coordinates.
    ///
    /// Out-of-range values are clamped, never rejected.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    /// Set raw and smoothed coordinates at once, skipping the lag.
    pub fn snap(&mut self, x: f32, y: f32) {
        self.set_target(x, y);
        self.smoothed = self.target;
    }

    /// Advance the smoothed coordinate one tick toward the raw target.
    pub fn tick(&mut self) {
        self.smoothed = approach_vec2(self.smoothed, self.target, self.smoothing);
    }

    /// Raw normalized pointer target.
    pub fn raw(&self) -> Vec2 {
        self.target
    }

    /// Smoothed normalized pointer coordinate.
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    /// Smoothed pointer mapped into world units.
    pub fn world(&self) -> Vec2 {
        self.smoothed * self.world_scale
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

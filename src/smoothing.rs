//! Exponential smoothing and damping.
//!
//! Two primitives drive every "soft" motion in the crate: [`approach`]
//! chases a target by a fixed fraction per tick, and [`decay`] multiplies a
//! value toward zero. Stacking them produces inertial motion that
//! accelerates toward input and coasts to rest when input stops.
//!
//! [`InertialRotation`] combines both for swipe-driven model rotation: a
//! swipe bumps a target increment, a velocity chases the target, rotation
//! accumulates the velocity, and both velocity and target decay each tick.

use glam::Vec2;

/// Exponentially approach `target` from `current`.
///
/// `factor` is the fraction of the remaining distance covered per call;
/// 0.05 gives a lazy trail, 0.5 snaps quickly.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Component-wise [`approach`] for 2D values.
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

/// Multiplicative damping toward zero.
#[inline]
pub fn decay(value: f32, factor: f32) -> f32 {
    value * factor
}

/// Swipe-driven rotation with inertia.
///
/// Call [`push`](Self::push) when the host reports a swipe delta and
/// [`advance`](Self::advance) once per frame; the returned increment is
/// added to a model's Euler rotation. Absent new input the rotation decays
/// to the constant auto-spin.
#[derive(Debug, Clone)]
pub struct InertialRotation {
    velocity: Vec2,
    target: Vec2,
    chase_factor: f32,
    decay_factor: f32,
    swipe_scale: f32,
    auto_spin: f32,
}

impl InertialRotation {
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            chase_factor: 0.1,
            decay_factor: 0.95,
            swipe_scale: 0.01,
            auto_spin: 0.001,
        }
    }

    /// Feed a swipe delta in host units (e.g. pixels).
    ///
    /// Horizontal swipe turns into yaw (Y rotation), vertical swipe into
    /// pitch (X rotation).
    pub fn push(&mut self, delta_x: f32, delta_y: f32) {
        self.target.x += delta_y * self.swipe_scale;
        self.target.y += delta_x * self.swipe_scale;
    }

    /// Advance one tick and return the `(pitch, yaw)` rotation increment.
    pub fn advance(&mut self) -> Vec2 {
        self.velocity = approach_vec2(self.velocity, self.target, self.chase_factor);
        let step = self.velocity + Vec2::new(0.0, self.auto_spin);

        self.velocity = Vec2::new(
            decay(self.velocity.x, self.decay_factor),
            decay(self.velocity.y, self.decay_factor),
        );
        self.target = Vec2::new(
            decay(self.target.x, self.decay_factor),
            decay(self.target.y, self.decay_factor),
        );

        step
    }

    /// Current chase velocity, `(pitch, yaw)`.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl Default for InertialRotation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_converges() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = approach(value, 10.0, 0.1);
        }
        assert!((value - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_approach_single_step_fraction() {
        assert!((approach(0.0, 1.0, 0.05) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_decay_shrinks() {
        let mut value = 1.0;
        for _ in 0..100 {
            value = decay(value, 0.95);
        }
        assert!(value < 0.01);
        assert!(value > 0.0);
    }

    #[test]
    fn test_idle_rotation_is_auto_spin_only() {
        let mut rotation = InertialRotation::new();
        let step = rotation.advance();
        assert_eq!(step.x, 0.0);
        assert!((step.y - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_swipe_produces_decaying_rotation() {
        let mut rotation = InertialRotation::new();
        rotation.push(100.0, 0.0);

        let first = rotation.advance();
        assert!(first.y > 0.001, "swipe should add yaw beyond auto-spin");

        // After many idle ticks the increment settles back to auto-spin.
        let mut last = first;
        for _ in 0..500 {
            last = rotation.advance();
        }
        assert!((last.y - 0.001).abs() < 1e-4);
        assert!(last.x.abs() < 1e-4);
    }

    #[test]
    fn test_vertical_swipe_maps_to_pitch() {
        let mut rotation = InertialRotation::new();
        rotation.push(0.0, 50.0);
        let step = rotation.advance();
        assert!(step.x > 0.0);
    }
}

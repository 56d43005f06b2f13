//! Scroll-progress state machine.
//!
//! A normalized scroll fraction in [0,1] drives a four-phase cross-fade
//! between the two foreground models. [`evaluate`] is a pure function of
//! progress: every component of both transforms is re-derived absolutely on
//! every call, never accumulated, so scrubbing backwards or repeating a
//! value is always safe.
//!
//! | Phase | Range      | Primary                           | Secondary                        |
//! |-------|------------|-----------------------------------|----------------------------------|
//! | 1     | [0, 0.4]   | at rest, fully visible            | tiny, edge-on, invisible         |
//! | 2     | (0.4, 0.6] | grows to 3x, moves forward, fades | tiny, edge-on, invisible         |
//! | 3     | (0.6, 0.8] | gone                              | grows to 1x, turns to face, fades in |
//! | 4     | (0.8, 1]   | gone                              | at rest, fully visible           |
//!
//! Boundary values (exactly 0.4, 0.6, 0.8) belong to the lower-numbered
//! phase; the interpolations meet at each boundary so the choice is not
//! visible.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// End of phase 1 / start of the primary model's departure.
pub const PRIMARY_HOLD_END: f32 = 0.4;
/// End of phase 2 / start of the secondary model's arrival.
pub const PRIMARY_EXIT_END: f32 = 0.6;
/// End of phase 3 / start of the secondary model's hold.
pub const SECONDARY_ENTRY_END: f32 = 0.8;

/// Forward depth the primary model travels while departing.
const EXIT_DEPTH: f32 = 50.0;
/// Scale the primary model reaches while departing.
const EXIT_SCALE: f32 = 3.0;
/// Scale the secondary model hides at.
const HIDDEN_SCALE: f32 = 0.1;

/// One of the four progress sub-ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PrimaryHold,
    PrimaryExit,
    SecondaryEntry,
    SecondaryHold,
}

impl Phase {
    /// Phase containing `progress` (clamped to [0,1]). Boundary values map
    /// to the lower-numbered phase.
    pub fn of(progress: f32) -> Phase {
        let p = progress.clamp(0.0, 1.0);
        if p <= PRIMARY_HOLD_END {
            Phase::PrimaryHold
        } else if p <= PRIMARY_EXIT_END {
            Phase::PrimaryExit
        } else if p <= SECONDARY_ENTRY_END {
            Phase::SecondaryEntry
        } else {
            Phase::SecondaryHold
        }
    }
}

/// Absolute transform state of one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Opacity in [0,1].
    pub opacity: f32,
}

impl Transform {
    /// At-rest transform: origin, unit scale, no rotation, fully opaque.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
        rotation: Vec3::ZERO,
        opacity: 1.0,
    };
}

/// Transform targets for both models at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTargets {
    pub primary: Transform,
    pub secondary: Transform,
}

/// Secondary model while hidden: tiny, rotated edge-on, invisible.
fn hidden_secondary() -> Transform {
    Transform {
        position: Vec3::ZERO,
        scale: Vec3::splat(HIDDEN_SCALE),
        rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
        opacity: 0.0,
    }
}

/// Primary model after departure: large, pushed forward, invisible.
fn departed_primary() -> Transform {
    Transform {
        position: Vec3::new(0.0, 0.0, EXIT_DEPTH),
        scale: Vec3::splat(EXIT_SCALE),
        rotation: Vec3::ZERO,
        opacity: 0.0,
    }
}

/// Compute both models' absolute transforms for a progress value.
///
/// Out-of-range progress is clamped. The result at progress 0 doubles as
/// the models' initial state.
pub fn evaluate(progress: f32) -> ScrollTargets {
    let p = progress.clamp(0.0, 1.0);

    if p <= PRIMARY_HOLD_END {
        ScrollTargets {
            primary: Transform::IDENTITY,
            secondary: hidden_secondary(),
        }
    } else if p <= PRIMARY_EXIT_END {
        let t = (p - PRIMARY_HOLD_END) / (PRIMARY_EXIT_END - PRIMARY_HOLD_END);
        ScrollTargets {
            primary: Transform {
                position: Vec3::new(0.0, 0.0, EXIT_DEPTH * t),
                scale: Vec3::splat(1.0 + (EXIT_SCALE - 1.0) * t),
                rotation: Vec3::ZERO,
                opacity: 1.0 - t,
            },
            secondary: hidden_secondary(),
        }
    } else if p <= SECONDARY_ENTRY_END {
        let t = (p - PRIMARY_EXIT_END) / (SECONDARY_ENTRY_END - PRIMARY_EXIT_END);
        ScrollTargets {
            primary: departed_primary(),
            secondary: Transform {
                position: Vec3::ZERO,
                scale: Vec3::splat(HIDDEN_SCALE + (1.0 - HIDDEN_SCALE) * t),
                rotation: Vec3::new(0.0, FRAC_PI_2 * (1.0 - t), 0.0),
                opacity: t,
            },
        }
    } else {
        ScrollTargets {
            primary: departed_primary(),
            secondary: Transform::IDENTITY,
        }
    }
}

/// Owned scroll timeline: clamping, evaluation, and progress observation.
///
/// Replaces a global scroll-trigger registry with an instance the caller
/// holds; the observer fires once per update with the clamped progress so
/// downstream consumers (progress indicators, UI) stay decoupled from
/// transform math.
pub struct ScrollTimeline {
    progress: f32,
    observer: Option<Box<dyn FnMut(f32)>>,
}

impl ScrollTimeline {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            observer: None,
        }
    }

    /// Register a callback fired once per update with the clamped progress.
    pub fn set_observer<F: FnMut(f32) + 'static>(&mut self, observer: F) {
        self.observer = Some(Box::new(observer));
    }

    /// Update to a new progress value and return both models' targets.
    ///
    /// Tolerates non-monotonic and repeated input; calling twice with the
    /// same value returns identical targets.
    pub fn update(&mut self, progress: f32) -> ScrollTargets {
        let p = progress.clamp(0.0, 1.0);
        self.progress = p;
        if let Some(observer) = &mut self.observer {
            observer(p);
        }
        evaluate(p)
    }

    /// Last clamped progress value seen.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Phase of the last progress value.
    pub fn phase(&self) -> Phase {
        Phase::of(self.progress)
    }
}

impl Default for ScrollTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTimeline")
            .field("progress", &self.progress)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::f32::consts::FRAC_PI_4;
    use std::rc::Rc;

    fn assert_transform_close(a: &Transform, b: &Transform, tolerance: f32) {
        assert!((a.position - b.position).length() < tolerance, "{:?} vs {:?}", a, b);
        assert!((a.scale - b.scale).length() < tolerance, "{:?} vs {:?}", a, b);
        assert!((a.rotation - b.rotation).length() < tolerance, "{:?} vs {:?}", a, b);
        assert!((a.opacity - b.opacity).abs() < tolerance, "{:?} vs {:?}", a, b);
    }

    #[test]
    fn test_phase_boundaries_belong_to_lower_phase() {
        assert_eq!(Phase::of(0.0), Phase::PrimaryHold);
        assert_eq!(Phase::of(0.4), Phase::PrimaryHold);
        assert_eq!(Phase::of(0.41), Phase::PrimaryExit);
        assert_eq!(Phase::of(0.6), Phase::PrimaryExit);
        assert_eq!(Phase::of(0.8), Phase::SecondaryEntry);
        assert_eq!(Phase::of(1.0), Phase::SecondaryHold);
    }

    #[test]
    fn test_initial_state_is_progress_zero() {
        let targets = evaluate(0.0);
        assert_eq!(targets.primary, Transform::IDENTITY);
        assert_eq!(targets.secondary.scale, Vec3::splat(0.1));
        assert_eq!(targets.secondary.rotation, Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_eq!(targets.secondary.opacity, 0.0);
    }

    #[test]
    fn test_idempotent_update() {
        let mut timeline = ScrollTimeline::new();
        let first = timeline.update(0.55);
        let second = timeline.update(0.55);
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundary_continuity() {
        for boundary in [0.4, 0.6, 0.8] {
            let epsilon = 1e-5;
            let below = evaluate(boundary - epsilon);
            let above = evaluate(boundary + epsilon);
            assert_transform_close(&below.primary, &above.primary, 1e-2);
            assert_transform_close(&below.secondary, &above.secondary, 1e-2);
        }
    }

    #[test]
    fn test_monotonic_scale_in_exit_phase() {
        let mut previous = evaluate(0.401).primary.scale.x;
        for i in 1..=20 {
            let p = 0.401 + (i as f32 / 20.0) * 0.198;
            let scale = evaluate(p).primary.scale.x;
            assert!(scale > previous, "scale not monotonic at p = {}", p);
            previous = scale;
        }
    }

    #[test]
    fn test_clamping() {
        assert_eq!(evaluate(-0.5), evaluate(0.0));
        assert_eq!(evaluate(1.5), evaluate(1.0));

        let mut timeline = ScrollTimeline::new();
        timeline.update(-0.5);
        assert_eq!(timeline.progress(), 0.0);
        timeline.update(1.5);
        assert_eq!(timeline.progress(), 1.0);
    }

    #[test]
    fn test_mid_entry_transforms() {
        let targets = evaluate(0.7);
        assert_eq!(targets.primary.scale, Vec3::splat(3.0));
        assert_eq!(targets.primary.opacity, 0.0);
        assert!((targets.secondary.scale.x - 0.55).abs() < 1e-3);
        assert!((targets.secondary.rotation.y - FRAC_PI_4).abs() < 1e-3);
        assert!((targets.secondary.opacity - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_exit_phase_interpolation() {
        let targets = evaluate(0.5);
        assert!((targets.primary.scale.x - 2.0).abs() < 1e-3);
        assert!((targets.primary.position.z - 25.0).abs() < 1e-3);
        assert!((targets.primary.opacity - 0.5).abs() < 1e-3);
        assert_eq!(targets.secondary.opacity, 0.0);
    }

    #[test]
    fn test_final_state() {
        let targets = evaluate(1.0);
        assert_eq!(targets.secondary, Transform::IDENTITY);
        assert_eq!(targets.primary.opacity, 0.0);
        assert_eq!(targets.primary.scale, Vec3::splat(3.0));
    }

    #[test]
    fn test_observer_fires_with_clamped_progress() {
        let seen = Rc::new(Cell::new(-1.0f32));
        let seen_clone = Rc::clone(&seen);

        let mut timeline = ScrollTimeline::new();
        timeline.set_observer(move |p| seen_clone.set(p));

        timeline.update(0.3);
        assert_eq!(seen.get(), 0.3);
        timeline.update(2.0);
        assert_eq!(seen.get(), 1.0);
    }

    #[test]
    fn test_scrubbing_backwards() {
        let mut timeline = ScrollTimeline::new();
        timeline.update(0.9);
        let rewound = timeline.update(0.1);
        assert_eq!(rewound, evaluate(0.1));
    }
}

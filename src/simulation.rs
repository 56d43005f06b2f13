//! Per-frame background field simulation.
//!
//! [`FieldSimulator::step`] mutates a field's positions in place, once per
//! render tick. Per particle, in order: vertical float (index-phased sine),
//! angular drift around the Y axis at constant radius, pointer attraction
//! inside a radius, and boundary respawn.
//!
//! Motion is scaled by the change in the `elapsed` argument between calls,
//! normalized so that a 60 Hz call cadence reproduces the reference
//! per-frame constants. Calling `step` repeatedly with the same elapsed
//! time leaves the position buffer bit-identical.

use crate::field::ParticleField;
use crate::input::PointerState;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Call cadence at which the per-frame constants apply unscaled.
const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Tuning constants for the background simulation.
#[derive(Debug, Clone)]
pub struct SimulatorParams {
    /// Vertical float amplitude per reference frame.
    pub float_amplitude: f32,
    /// Orbital drift angle in radians per reference frame.
    pub drift_step: f32,
    /// Pointer attraction radius in world units.
    pub attraction_radius: f32,
    /// Fraction of the pointer offset applied per reference frame.
    pub attraction_strength: f32,
    /// Axis bound beyond which a particle respawns.
    pub bound: f32,
    /// Full extent of the respawn span; respawned coordinates land in
    /// `[-respawn_span / 2, respawn_span / 2]`.
    pub respawn_span: f32,
}

impl Default for SimulatorParams {
    fn default() -> Self {
        Self {
            float_amplitude: 0.02,
            drift_step: 0.0003,
            attraction_radius: 20.0,
            attraction_strength: 0.1,
            bound: 60.0,
            respawn_span: 100.0,
        }
    }
}

/// Advances background field positions each render tick.
#[derive(Debug)]
pub struct FieldSimulator<R: Rng = SmallRng> {
    params: SimulatorParams,
    rng: R,
    last_elapsed: Option<f32>,
}

impl FieldSimulator<SmallRng> {
    /// Simulator with entropy-seeded respawn randomness.
    pub fn new(params: SimulatorParams) -> Self {
        Self::with_rng(params, SmallRng::from_entropy())
    }
}

impl<R: Rng> FieldSimulator<R> {
    /// Simulator with an injected RNG, for reproducible runs.
    pub fn with_rng(params: SimulatorParams, rng: R) -> Self {
        Self {
            params,
            rng,
            last_elapsed: None,
        }
    }

    pub fn params(&self) -> &SimulatorParams {
        &self.params
    }

    /// Advance the field by one tick at `elapsed` seconds of animation time.
    ///
    /// Only positions change; buffer length and particle identity are
    /// stable across calls. Never fails; a zero elapsed delta applies no
    /// motion, and the boundary check runs regardless.
    pub fn step(&mut self, field: &mut ParticleField, pointer: &PointerState, elapsed: f32) {
        let delta = match self.last_elapsed {
            Some(previous) => (elapsed - previous).max(0.0),
            None => 0.0,
        };
        self.last_elapsed = Some(elapsed);
        let frames = delta * REFERENCE_FRAME_RATE;

        let p = &self.params;
        let target = pointer.world();
        let half_span = p.respawn_span * 0.5;
        let positions = field.positions_mut();

        for i in 0..positions.len() / 3 {
            let i3 = i * 3;

            if frames > 0.0 {
                // Vertical float, phase-offset by index so the field never
                // bobs in unison.
                positions[i3 + 1] += (elapsed + i as f32).sin() * p.float_amplitude * frames;

                // Orbital drift: advance the polar angle in the XZ plane,
                // radius unchanged.
                let (x, z) = (positions[i3], positions[i3 + 2]);
                let angle = z.atan2(x) + p.drift_step * frames;
                let radius = (x * x + z * z).sqrt();
                positions[i3] = angle.cos() * radius;
                positions[i3 + 2] = angle.sin() * radius;

                // Pointer attraction with linear falloff inside the radius.
                let dx = target.x - positions[i3];
                let dy = target.y - positions[i3 + 1];
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < p.attraction_radius {
                    let force = (p.attraction_radius - dist) / p.attraction_radius;
                    positions[i3] += dx * force * p.attraction_strength * frames;
                    positions[i3 + 1] += dy * force * p.attraction_strength * frames;
                }
            }

            // Boundary respawn keeps drifted particles in frame.
            if positions[i3].abs() > p.bound {
                positions[i3] = self.rng.gen_range(-half_span..half_span);
            }
            if positions[i3 + 1].abs() > p.bound {
                positions[i3 + 1] = self.rng.gen_range(-half_span..half_span);
            }
        }
    }
}

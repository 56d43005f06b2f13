//! Particle field generation.
//!
//! Builds the parallel buffers of a [`ParticleField`] for a named
//! distribution. Randomness is injected: pass any [`rand::Rng`], a seeded
//! `SmallRng` for reproducible tests or an entropy-seeded one in
//! production.
//!
//! # Shapes
//!
//! - [`Shape::SphereShell`] - thin spherical shell with radial jitter,
//!   sampled with uniform spherical angles (`phi = acos(2u - 1)`) so the
//!   poles are not over-populated.
//! - [`Shape::Humanoid`] - a simplified human silhouette built from seven
//!   weighted body-region boxes.
//! - [`Shape::Cloud`] - uniform volumetric box fill with per-particle drift
//!   velocities and a blue-violet color ramp, used for the background
//!   starfield.
//!
//! ```ignore
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let field = spawn::generate(&Shape::SphereShell(SphereShellConfig::default()), 3000, &mut rng)?;
//! ```

use crate::error::SpawnError;
use crate::field::ParticleField;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Sphere-shell distribution parameters.
#[derive(Debug, Clone)]
pub struct SphereShellConfig {
    /// Inner shell radius.
    pub base_radius: f32,
    /// Maximum random radial jitter added to the base radius.
    pub jitter: f32,
    /// Per-particle point size range `(min, max)`.
    pub size_range: (f32, f32),
    /// Flat particle color.
    pub tint: Vec3,
}

impl Default for SphereShellConfig {
    fn default() -> Self {
        Self {
            base_radius: 15.0,
            jitter: 2.0,
            size_range: (0.3, 1.1),
            tint: Vec3::splat(0.1),
        }
    }
}

/// Humanoid silhouette parameters. The region layout itself is fixed; see
/// [`HUMANOID_REGIONS`].
#[derive(Debug, Clone)]
pub struct HumanoidConfig {
    /// Per-particle point size range `(min, max)`.
    pub size_range: (f32, f32),
    /// Flat particle color.
    pub tint: Vec3,
}

impl Default for HumanoidConfig {
    fn default() -> Self {
        Self {
            size_range: (0.3, 1.1),
            tint: Vec3::splat(0.1),
        }
    }
}

/// Volumetric cloud parameters.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Half-extent of the bounding box on each axis.
    pub extent: Vec3,
    /// Hue range `(min, max)` of the color ramp, in [0,1] hue space.
    pub hue_range: (f32, f32),
    /// HSL saturation of every particle.
    pub saturation: f32,
    /// HSL lightness of every particle.
    pub lightness: f32,
    /// Per-particle point size range `(min, max)`.
    pub size_range: (f32, f32),
    /// Half-extent of the random drift velocity on each axis.
    pub drift: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            extent: Vec3::new(50.0, 50.0, 25.0),
            hue_range: (0.55, 0.70),
            saturation: 0.3,
            lightness: 0.4,
            size_range: (0.5, 2.5),
            drift: 0.01,
        }
    }
}

/// A named particle distribution with its parameters.
#[derive(Debug, Clone)]
pub enum Shape {
    SphereShell(SphereShellConfig),
    Humanoid(HumanoidConfig),
    Cloud(CloudConfig),
}

/// One weighted body-region box of the humanoid silhouette.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// Selection probability. Weights across [`HUMANOID_REGIONS`] sum to 1.
    pub weight: f32,
    /// Box center.
    pub center: Vec3,
    /// Box half-extent on each axis.
    pub half_extent: Vec3,
}

/// The seven body regions of the humanoid silhouette, in selection order:
/// head, neck, torso, left arm, right arm, left leg, right leg.
pub const HUMANOID_REGIONS: [Region; 7] = [
    Region {
        weight: 0.15,
        center: Vec3::new(0.0, 8.0, 0.0),
        half_extent: Vec3::new(2.0, 1.0, 1.0),
    },
    Region {
        weight: 0.10,
        center: Vec3::new(0.0, 6.0, 0.0),
        half_extent: Vec3::new(0.5, 0.5, 0.5),
    },
    Region {
        weight: 0.20,
        center: Vec3::new(0.0, 0.0, 0.0),
        half_extent: Vec3::new(3.0, 2.0, 1.5),
    },
    Region {
        weight: 0.15,
        center: Vec3::new(-4.0, 2.0, 0.0),
        half_extent: Vec3::new(1.0, 1.5, 1.0),
    },
    Region {
        weight: 0.15,
        center: Vec3::new(4.0, 2.0, 0.0),
        half_extent: Vec3::new(1.0, 1.5, 1.0),
    },
    Region {
        weight: 0.10,
        center: Vec3::new(-2.0, -4.0, 0.0),
        half_extent: Vec3::new(0.5, 1.0, 0.5),
    },
    Region {
        weight: 0.15,
        center: Vec3::new(2.0, -4.0, 0.0),
        half_extent: Vec3::new(0.5, 1.0, 0.5),
    },
];

/// Generate a particle field for the given shape.
///
/// Fails with [`SpawnError::InvalidCount`] when `count` is zero. The result
/// owns fresh buffers; generation has no other side effects.
pub fn generate<R: Rng>(
    shape: &Shape,
    count: u32,
    rng: &mut R,
) -> Result<ParticleField, SpawnError> {
    if count == 0 {
        return Err(SpawnError::InvalidCount);
    }
    let n = count as usize;

    let mut positions = Vec::with_capacity(n * 3);
    let mut colors = Vec::with_capacity(n * 3);
    let mut sizes = Vec::with_capacity(n);
    let mut velocities = match shape {
        Shape::Cloud(_) => Some(Vec::with_capacity(n * 3)),
        _ => None,
    };

    for _ in 0..n {
        let (position, color) = match shape {
            Shape::SphereShell(cfg) => (sphere_shell_position(cfg, rng), cfg.tint),
            Shape::Humanoid(cfg) => (humanoid_position(rng), cfg.tint),
            Shape::Cloud(cfg) => {
                let hue = rng.gen_range(cfg.hue_range.0..cfg.hue_range.1);
                (
                    cloud_position(cfg, rng),
                    hsl_to_rgb(hue, cfg.saturation, cfg.lightness),
                )
            }
        };

        positions.extend_from_slice(&[position.x, position.y, position.z]);
        colors.extend_from_slice(&[color.x, color.y, color.z]);

        let (min, max) = size_range(shape);
        sizes.push(rng.gen_range(min..max));

        if let (Some(velocities), Shape::Cloud(cfg)) = (&mut velocities, shape) {
            velocities.extend_from_slice(&[
                rng.gen_range(-cfg.drift..cfg.drift),
                rng.gen_range(-cfg.drift..cfg.drift),
                rng.gen_range(-cfg.drift..cfg.drift),
            ]);
        }
    }

    Ok(ParticleField::new(n, positions, colors, sizes, velocities))
}

fn size_range(shape: &Shape) -> (f32, f32) {
    match shape {
        Shape::SphereShell(cfg) => cfg.size_range,
        Shape::Humanoid(cfg) => cfg.size_range,
        Shape::Cloud(cfg) => cfg.size_range,
    }
}

/// Point on a jittered sphere shell with uniform angular distribution.
///
/// `phi = acos(2u - 1)` rather than a uniform phi keeps density even over
/// the sphere instead of clustering at the poles.
fn sphere_shell_position<R: Rng>(cfg: &SphereShellConfig, rng: &mut R) -> Vec3 {
    let radius = cfg.base_radius + rng.gen::<f32>() * cfg.jitter;
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Index of a randomly selected humanoid region, weighted by region
/// probability.
pub(crate) fn sample_region<R: Rng>(rng: &mut R) -> usize {
    let roll: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (i, region) in HUMANOID_REGIONS.iter().enumerate() {
        cumulative += region.weight;
        if roll < cumulative {
            return i;
        }
    }
    HUMANOID_REGIONS.len() - 1
}

fn humanoid_position<R: Rng>(rng: &mut R) -> Vec3 {
    let region = &HUMANOID_REGIONS[sample_region(rng)];
    region.center
        + Vec3::new(
            rng.gen_range(-region.half_extent.x..region.half_extent.x),
            rng.gen_range(-region.half_extent.y..region.half_extent.y),
            rng.gen_range(-region.half_extent.z..region.half_extent.z),
        )
}

fn cloud_position<R: Rng>(cfg: &CloudConfig, rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-cfg.extent.x..cfg.extent.x),
        rng.gen_range(-cfg.extent.y..cfg.extent.y),
        rng.gen_range(-cfg.extent.z..cfg.extent.z),
    )
}

/// Convert HSL to RGB. Hue wraps in [0,1].
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

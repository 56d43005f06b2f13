//! # scrollfield - scroll-driven particle morph animation core
//!
//! A single-threaded, frame-driven animation core for a scroll-reactive
//! particle visualization: a faint background starfield plus two foreground
//! particle models (a sphere shell and a humanoid silhouette) that
//! cross-fade and transform as a normalized scroll progress moves through
//! [0,1].
//!
//! The crate is a pure in-memory runtime. Windowing, GPU work, and raw
//! event sourcing live in the host, which talks to the core through a
//! small surface:
//!
//! - feed it normalized scroll progress and pointer coordinates,
//! - tick it once per frame with the elapsed animation time,
//! - implement [`RenderBackend`] to actually draw the fields.
//!
//! ## Quick Start
//!
//! ```ignore
//! use scrollfield::prelude::*;
//!
//! let profile = DeviceProfile::detect().with_pixel_ratio(host_dpr);
//! let mut scene = Scene::new(backend, &profile, width, height)?;
//!
//! // Scroll handler: progress is recomputed absolutely every call, so
//! // scrubbing backwards or repeating a value is always safe.
//! scene.set_progress(progress);
//!
//! // Render loop, once per frame:
//! scene.set_pointer(ndc_x, ndc_y);
//! scene.advance(elapsed_seconds);
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle fields
//!
//! [`ParticleField`] holds parallel per-particle buffers (position, color,
//! size, optional velocity) generated by [`spawn::generate`] for a named
//! [`Shape`]. Randomness is injected, so tests can seed a `SmallRng` and
//! get reproducible fields.
//!
//! ### The scroll timeline
//!
//! [`scroll::evaluate`] maps progress into a four-phase piecewise
//! interpolation of both models' scale, position, rotation, and opacity.
//! It is a pure function: no accumulators, no edge triggers.
//!
//! ### The background simulator
//!
//! [`FieldSimulator`] advances the starfield each tick: index-phased
//! vertical float, slow orbital drift, pointer attraction, and boundary
//! respawn, all scaled by elapsed time so the motion speed is independent
//! of the host's frame rate.

pub mod device;
pub mod error;
pub mod field;
pub mod input;
pub mod model;
pub mod scene;
pub mod scroll;
pub mod simulation;
pub mod smoothing;
pub mod spawn;
pub mod sprite;

pub use bytemuck;
pub use device::{DeviceProfile, PerformanceTier};
pub use error::{RenderError, SceneError, SpawnError};
pub use field::ParticleField;
pub use glam::{Vec2, Vec3};
pub use input::PointerState;
pub use model::{BlendMode, Material, ParticleModel};
pub use scene::{Camera, FieldHandle, NullBackend, RenderBackend, Scene};
pub use scroll::{Phase, ScrollTargets, ScrollTimeline, Transform};
pub use simulation::{FieldSimulator, SimulatorParams};
pub use spawn::{CloudConfig, HumanoidConfig, Shape, SphereShellConfig};
pub use sprite::SpriteTexture;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use scrollfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::device::{DeviceProfile, PerformanceTier};
    pub use crate::error::{RenderError, SceneError, SpawnError};
    pub use crate::field::ParticleField;
    pub use crate::input::PointerState;
    pub use crate::model::{BlendMode, Material, ParticleModel};
    pub use crate::scene::{Camera, FieldHandle, NullBackend, RenderBackend, Scene};
    pub use crate::scroll::{Phase, ScrollTargets, ScrollTimeline, Transform};
    pub use crate::simulation::{FieldSimulator, SimulatorParams};
    pub use crate::spawn::{self, CloudConfig, HumanoidConfig, Shape, SphereShellConfig};
    pub use crate::sprite::SpriteTexture;
    pub use crate::{Vec2, Vec3};
}

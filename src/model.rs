//! Foreground particle models.
//!
//! A [`ParticleModel`] bundles one particle field with its live transform,
//! material, and swipe-rotation state. The scroll timeline writes absolute
//! transforms into it; [`animate`](ParticleModel::animate) layers the
//! inertial swipe rotation and auto-spin on top each frame.

use crate::field::ParticleField;
use crate::scroll::Transform;
use crate::smoothing::InertialRotation;
use crate::sprite::SpriteTexture;

/// How a field's point sprites are blended into the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending. Used by the dark foreground models.
    #[default]
    Normal,
    /// Additive blending for glowing accumulation. Used by the background
    /// starfield.
    Additive,
}

/// Render material for one particle field.
#[derive(Debug, Clone)]
pub struct Material {
    /// Base point size before per-particle size variation.
    pub base_size: f32,
    /// Base opacity; the live value lives on the model's [`Transform`].
    pub opacity: f32,
    /// Whether the material renders with transparency enabled.
    pub transparent: bool,
    pub blend: BlendMode,
    /// Point sprites never write depth; they sort by draw order.
    pub depth_write: bool,
    pub sprite: SpriteTexture,
}

impl Material {
    /// Material for the dark foreground models.
    pub fn foreground(sprite: SpriteTexture) -> Self {
        Self {
            base_size: 1.5,
            opacity: 0.9,
            transparent: true,
            blend: BlendMode::Normal,
            depth_write: false,
            sprite,
        }
    }

    /// Material for the faint additive background field.
    pub fn background(sprite: SpriteTexture) -> Self {
        Self {
            base_size: 2.0,
            opacity: 0.3,
            transparent: true,
            blend: BlendMode::Additive,
            depth_write: false,
            sprite,
        }
    }
}

/// One particle model: field, live transform, material, swipe rotation.
#[derive(Debug)]
pub struct ParticleModel {
    field: ParticleField,
    transform: Transform,
    material: Material,
    rotation: InertialRotation,
}

impl ParticleModel {
    /// Wrap a generated field. The live opacity starts at the material's
    /// base opacity.
    pub fn new(field: ParticleField, material: Material) -> Self {
        let transform = Transform {
            opacity: material.opacity,
            ..Transform::IDENTITY
        };
        Self {
            field,
            transform,
            material,
            rotation: InertialRotation::new(),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Overwrite the live transform with an absolute target.
    pub fn apply(&mut self, target: &Transform) {
        self.transform = *target;
    }

    /// Feed a swipe delta into the inertial rotation.
    pub fn swipe(&mut self, delta_x: f32, delta_y: f32) {
        self.rotation.push(delta_x, delta_y);
    }

    /// Advance one frame of inertial rotation and auto-spin.
    pub fn animate(&mut self) {
        let step = self.rotation.advance();
        self.transform.rotation.x += step.x;
        self.transform.rotation.y += step.y;
    }
}

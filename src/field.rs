//! Particle field buffers.
//!
//! A [`ParticleField`] owns the parallel per-particle buffers for one model:
//! positions (3 floats each), colors (3 floats), sizes (1 float), and an
//! optional velocity buffer (3 floats). Index `i` across all buffers forms
//! one logical particle. The buffers are created once at generation time;
//! only positions are mutated afterwards, in place, by the simulator.

/// Parallel per-particle buffers for one particle model.
///
/// All buffers are sized from the same particle count; the layout matches
/// what a point-sprite renderer uploads directly (interleaving is the
/// backend's business, not ours).
#[derive(Debug, Clone)]
pub struct ParticleField {
    count: usize,
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    velocities: Option<Vec<f32>>,
}

impl ParticleField {
    pub(crate) fn new(
        count: usize,
        positions: Vec<f32>,
        colors: Vec<f32>,
        sizes: Vec<f32>,
        velocities: Option<Vec<f32>>,
    ) -> Self {
        debug_assert_eq!(positions.len(), count * 3);
        debug_assert_eq!(colors.len(), count * 3);
        debug_assert_eq!(sizes.len(), count);
        if let Some(v) = &velocities {
            debug_assert_eq!(v.len(), count * 3);
        }
        Self {
            count,
            positions,
            colors,
            sizes,
            velocities,
        }
    }

    /// Number of particles in the field.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flat position buffer, `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Mutable position buffer for in-place simulation.
    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    /// Flat RGB color buffer.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Per-particle point sizes.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Optional flat velocity buffer (present for drifting cloud fields).
    pub fn velocities(&self) -> Option<&[f32]> {
        self.velocities.as_deref()
    }

    /// Position of particle `i` as `(x, y, z)`.
    pub fn position(&self, i: usize) -> (f32, f32, f32) {
        let i3 = i * 3;
        (
            self.positions[i3],
            self.positions[i3 + 1],
            self.positions[i3 + 2],
        )
    }

    /// Position buffer as raw bytes for upload to a render backend.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color buffer as raw bytes.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Size buffer as raw bytes.
    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> ParticleField {
        ParticleField::new(
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![0.1; 6],
            vec![1.0, 2.0],
            Some(vec![0.0; 6]),
        )
    }

    #[test]
    fn test_buffer_lengths() {
        let field = small_field();
        assert_eq!(field.count(), 2);
        assert_eq!(field.positions().len(), 6);
        assert_eq!(field.colors().len(), 6);
        assert_eq!(field.sizes().len(), 2);
        assert_eq!(field.velocities().unwrap().len(), 6);
    }

    #[test]
    fn test_position_accessor() {
        let field = small_field();
        assert_eq!(field.position(1), (4.0, 5.0, 6.0));
    }

    #[test]
    fn test_byte_views() {
        let field = small_field();
        assert_eq!(field.position_bytes().len(), 6 * 4);
        assert_eq!(field.size_bytes().len(), 2 * 4);
        // Byte view aliases the float buffer exactly.
        let floats: &[f32] = bytemuck::cast_slice(field.position_bytes());
        assert_eq!(floats, field.positions());
    }
}

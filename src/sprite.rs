//! Procedural point-sprite textures.
//!
//! Each particle renders as a soft dot: a white RGBA texture whose alpha
//! falls off radially from an opaque center to a transparent edge. The
//! falloff curve is a list of `(distance, alpha)` stops interpolated
//! linearly, mirroring a canvas radial gradient.

/// A generated RGBA sprite texture.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    data: Vec<u8>,
    size: u32,
}

/// Falloff stops for the primary (64 px) sprite.
const PRIMARY_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.2, 0.8), (0.5, 0.3), (1.0, 0.0)];

/// Falloff stops for the secondary (32 px) sprite.
const SECONDARY_STOPS: [(f32, f32); 3] = [(0.0, 1.0), (0.5, 0.5), (1.0, 0.0)];

impl SpriteTexture {
    /// Build a square sprite with a radial alpha falloff.
    ///
    /// `stops` are `(normalized_distance, alpha)` pairs in ascending
    /// distance order; alpha between stops is linearly interpolated and
    /// clamped to the end stops outside their range.
    pub fn radial_falloff(size: u32, stops: &[(f32, f32)]) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let center = (size as f32 - 1.0) / 2.0;
        let radius = size as f32 / 2.0;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
                let alpha = (falloff_alpha(stops, t) * 255.0).round() as u8;
                data.extend_from_slice(&[255, 255, 255, alpha]);
            }
        }

        Self { data, size }
    }

    /// 64 px sprite used by the primary/foreground models.
    pub fn primary() -> Self {
        Self::radial_falloff(64, &PRIMARY_STOPS)
    }

    /// 32 px sprite used by the secondary model.
    pub fn secondary() -> Self {
        Self::radial_falloff(32, &SECONDARY_STOPS)
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA pixel data, `size * size * 4` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Alpha of the pixel at `(x, y)`.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[((y * self.size + x) * 4 + 3) as usize]
    }
}

/// Piecewise-linear alpha at normalized distance `t`.
fn falloff_alpha(stops: &[(f32, f32)], t: f32) -> f32 {
    let Some(&(first_d, first_a)) = stops.first() else {
        return 0.0;
    };
    if t <= first_d {
        return first_a;
    }
    for window in stops.windows(2) {
        let (d0, a0) = window[0];
        let (d1, a1) = window[1];
        if t <= d1 {
            let local = (t - d0) / (d1 - d0);
            return a0 + (a1 - a0) * local;
        }
    }
    stops.last().map(|&(_, a)| a).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let sprite = SpriteTexture::primary();
        assert_eq!(sprite.size(), 64);
        assert_eq!(sprite.data().len(), 64 * 64 * 4);

        let sprite = SpriteTexture::secondary();
        assert_eq!(sprite.size(), 32);
        assert_eq!(sprite.data().len(), 32 * 32 * 4);
    }

    #[test]
    fn test_opaque_center_transparent_corner() {
        let sprite = SpriteTexture::primary();
        assert!(sprite.alpha_at(32, 32) > 240);
        assert_eq!(sprite.alpha_at(0, 0), 0);
        assert_eq!(sprite.alpha_at(63, 63), 0);
    }

    #[test]
    fn test_alpha_decreases_from_center() {
        let sprite = SpriteTexture::secondary();
        let center = sprite.size() / 2;
        let mut previous = sprite.alpha_at(center, center);
        for x in (center + 1)..sprite.size() {
            let alpha = sprite.alpha_at(x, center);
            assert!(alpha <= previous, "alpha rose at x = {}", x);
            previous = alpha;
        }
    }

    #[test]
    fn test_falloff_interpolation() {
        let stops = [(0.0, 1.0), (0.5, 0.5), (1.0, 0.0)];
        assert_eq!(falloff_alpha(&stops, 0.0), 1.0);
        assert!((falloff_alpha(&stops, 0.25) - 0.75).abs() < 1e-6);
        assert!((falloff_alpha(&stops, 0.75) - 0.25).abs() < 1e-6);
        assert_eq!(falloff_alpha(&stops, 1.0), 0.0);
    }
}

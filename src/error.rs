//! Error types for scrollfield.
//!
//! Generation-time failures are surfaced synchronously through these types.
//! Per-frame and scroll paths never return errors: out-of-range or missing
//! inputs are clamped or ignored so a host render loop cannot be broken by
//! a throwing callback.

use std::fmt;

/// Errors that can occur while generating a particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// The requested particle count was zero.
    InvalidCount,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::InvalidCount => {
                write!(f, "Particle count must be greater than zero")
            }
        }
    }
}

impl std::error::Error for SpawnError {}

/// Errors that can occur while rendering a frame.
#[derive(Debug)]
pub enum RenderError {
    /// The render target is unavailable. Callers degrade to a no-op frame.
    MissingSurface,
    /// Backend-specific failure, reported as text.
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingSurface => write!(f, "Render surface is unavailable"),
            RenderError::Backend(msg) => write!(f, "Render backend error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors that can occur when constructing a scene.
#[derive(Debug)]
pub enum SceneError {
    /// The device reports no support for the required graphics API.
    /// Initialization must be skipped entirely.
    UnsupportedDevice,
    /// A particle field failed to generate.
    Spawn(SpawnError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnsupportedDevice => {
                write!(f, "Device does not support the required graphics API")
            }
            SceneError::Spawn(e) => write!(f, "Failed to generate particle field: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Spawn(e) => Some(e),
            SceneError::UnsupportedDevice => None,
        }
    }
}

impl From<SpawnError> for SceneError {
    fn from(e: SpawnError) -> Self {
        SceneError::Spawn(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_display() {
        let msg = SpawnError::InvalidCount.to_string();
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_scene_error_source() {
        use std::error::Error;
        let err = SceneError::from(SpawnError::InvalidCount);
        assert!(err.source().is_some());
        assert!(SceneError::UnsupportedDevice.source().is_none());
    }
}

//! Device capability detection.
//!
//! The animation core never touches the platform directly; the host fills a
//! [`DeviceProfile`] from whatever it knows about the machine (user agent,
//! display, GPU probe) and the profile answers sizing questions: pixel
//! ratio, performance tier, and particle budgets.
//!
//! ```ignore
//! let profile = DeviceProfile::detect()
//!     .with_mobile(true)
//!     .with_pixel_ratio(3.0); // reported as 2.0, the clamp ceiling
//!
//! assert_eq!(profile.background_budget(), 100);
//! ```

/// Coarse performance classification of the host device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
}

/// Static capability record for the host device.
///
/// Construct with [`DeviceProfile::detect`] for sensible local defaults,
/// then override fields the host knows better via the `with_*` builders.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    mobile: bool,
    pixel_ratio: f32,
    cpu_cores: u32,
    memory_gb: f32,
    graphics_supported: bool,
}

/// Background starfield size. Fixed in the current configuration,
/// independent of tier.
const BACKGROUND_BUDGET: u32 = 100;

/// Foreground model size (each of the two morph targets).
const MODEL_BUDGET: u32 = 3000;

impl DeviceProfile {
    /// Build a profile from what the local process can observe.
    ///
    /// Core count comes from the OS; mobile flag, pixel ratio, and memory
    /// fall back to desktop-ish defaults until the host overrides them.
    pub fn detect() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(2);
        Self {
            mobile: false,
            pixel_ratio: 1.0,
            cpu_cores: cores,
            memory_gb: 4.0,
            graphics_supported: true,
        }
    }

    /// Mark the device as mobile or not.
    pub fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    /// Set the raw display pixel ratio. Reads clamp to 2.0.
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    /// Set the logical CPU core count.
    pub fn with_cpu_cores(mut self, cores: u32) -> Self {
        self.cpu_cores = cores;
        self
    }

    /// Set the approximate device memory in gigabytes.
    pub fn with_memory_gb(mut self, memory: f32) -> Self {
        self.memory_gb = memory;
        self
    }

    /// Set whether the required graphics API is available.
    pub fn with_graphics_supported(mut self, supported: bool) -> Self {
        self.graphics_supported = supported;
        self
    }

    /// Whether the device is a mobile device.
    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// Display pixel ratio, clamped to at most 2.0.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio.min(2.0).max(1.0)
    }

    /// Whether the required graphics API is available.
    ///
    /// When this is false, scene construction refuses to run at all rather
    /// than building a field nothing can draw.
    pub fn supports_required_graphics_api(&self) -> bool {
        self.graphics_supported
    }

    /// Classify the device into a coarse performance tier.
    pub fn tier(&self) -> PerformanceTier {
        if self.mobile {
            if self.cpu_cores <= 4 || self.memory_gb <= 2.0 {
                PerformanceTier::Low
            } else if self.cpu_cores <= 6 || self.memory_gb <= 4.0 {
                PerformanceTier::Medium
            } else {
                PerformanceTier::High
            }
        } else if self.cpu_cores <= 2 || self.memory_gb <= 4.0 {
            PerformanceTier::Medium
        } else {
            PerformanceTier::High
        }
    }

    /// Particle budget for the background starfield.
    pub fn background_budget(&self) -> u32 {
        BACKGROUND_BUDGET
    }

    /// Particle budget for each foreground model.
    pub fn model_budget(&self) -> u32 {
        MODEL_BUDGET
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::detect()
    }
}

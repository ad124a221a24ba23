// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Viewer Configuration Module
//!
//! The [`ViewerConfig`] is the single configuration surface consumed by the
//! population subsystem. Every field is mutable at runtime through the agent's
//! setters, which re-derive placement and motion state instead of caching it.

mod kinds;

pub use kinds::{DistributionKind, MotionKind};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::scene::MaterialPreset;

/// The largest population a single session may request.
pub const MAX_TARGET_COUNT: usize = 500;

/// The largest number of entries an override list may hold.
pub const MAX_OVERRIDE_ENTRIES: usize = 100;

/// The largest multiplier accepted for per-model spin speeds.
pub const MAX_ROTATION_SPEED_SCALE: f32 = 10.0;

/// Configuration of the population subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Number of models a session tries to load, in `1..=500`.
    pub target_count: usize,
    /// Active spatial layout.
    pub distribution: DistributionKind,
    /// Active per-frame animation.
    pub motion: MotionKind,
    /// Base distance between models, shared by every layout.
    pub spacing: f32,
    /// Uniform scale applied to every model.
    pub scale: f32,
    /// Material preset applied to every model.
    pub material: MaterialPreset,
    /// Whether bounding-box helpers are visible.
    pub show_bounds: bool,

    /// Angular speed of the `wave` animation.
    pub wave_speed: f32,
    /// Amplitude of the `wave` animation.
    pub wave_height: f32,
    /// Angular speed of the `spiral` animation.
    pub spiral_speed: f32,
    /// Angular speed of the `orbit` animation.
    pub orbit_speed: f32,
    /// Multiplier on every model's spin speed, in `0..=10`. Zero stops spinning.
    pub rotation_speed_scale: f32,

    /// Selects the override list instead of the manifest.
    pub use_override: bool,
    /// Raw override tokens, normalized when the catalog is built.
    pub override_tokens: Vec<String>,

    /// Extra candidates drawn per backfill round beyond the shortfall, at most 500.
    pub backfill_overshoot: usize,
    /// How many times one identifier may be attempted within a session.
    pub max_attempts_per_asset: u32,
    /// Upper bound on a single load, in milliseconds.
    pub load_timeout_ms: u64,
    /// Seed for shuffling, random placement and spin axes. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Zero-based manifest column holding the identifier.
    pub manifest_column: usize,
    /// Suffix every identifier must carry.
    pub asset_suffix: String,
    /// Prefix given to override tokens that lack the suffix.
    pub override_prefix: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_count: 20,
            distribution: DistributionKind::Random,
            motion: MotionKind::Wave,
            spacing: 6.0,
            scale: 100.0,
            material: MaterialPreset::Plastic,
            show_bounds: false,
            wave_speed: 1.0,
            wave_height: 2.0,
            spiral_speed: 0.5,
            orbit_speed: 0.5,
            rotation_speed_scale: 1.0,
            use_override: false,
            override_tokens: Vec::new(),
            backfill_overshoot: 5,
            max_attempts_per_asset: 2,
            load_timeout_ms: 10_000,
            seed: None,
            manifest_column: 1,
            asset_suffix: ".glb".to_string(),
            override_prefix: "emoji_".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Checks every bounded field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_target(self.target_count)?;
        validate_spacing(self.spacing)?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidTuning("scale must be finite and positive"));
        }
        for speed in [
            self.wave_speed,
            self.wave_height,
            self.spiral_speed,
            self.orbit_speed,
        ] {
            if !speed.is_finite() {
                return Err(ConfigError::InvalidTuning("animation parameters must be finite"));
            }
        }
        validate_rotation_speed_scale(self.rotation_speed_scale)?;
        if self.backfill_overshoot > MAX_TARGET_COUNT {
            return Err(ConfigError::InvalidTuning(
                "backfill_overshoot must be at most 500",
            ));
        }
        if self.max_attempts_per_asset == 0 {
            return Err(ConfigError::InvalidTuning(
                "max_attempts_per_asset must be at least 1",
            ));
        }
        if self.load_timeout_ms == 0 {
            return Err(ConfigError::InvalidTuning("load_timeout_ms must be non-zero"));
        }
        if self.asset_suffix.is_empty() {
            return Err(ConfigError::InvalidTuning("asset_suffix must not be empty"));
        }
        Ok(())
    }

    /// The load timeout as a [`Duration`].
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

/// Checks that a target population count is in `1..=500`.
pub fn validate_target(target_count: usize) -> Result<(), ConfigError> {
    if (1..=MAX_TARGET_COUNT).contains(&target_count) {
        Ok(())
    } else {
        Err(ConfigError::TargetOutOfRange(target_count))
    }
}

/// Checks that a spacing scalar is finite and strictly positive.
pub fn validate_spacing(spacing: f32) -> Result<(), ConfigError> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpacing(spacing))
    }
}

/// Checks that a spin multiplier is finite and in `0..=10`.
pub fn validate_rotation_speed_scale(scale: f32) -> Result<(), ConfigError> {
    if (0.0..=MAX_ROTATION_SPEED_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning(
            "rotation_speed_scale must be between 0 and 10",
        ))
    }
}

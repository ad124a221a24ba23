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

//! The closed sets of strategy names accepted by the configuration surface.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// The spatial layouts a population can be arranged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Uniformly random inside a cube.
    #[default]
    Random,
    /// A centered cubic grid.
    Grid3d,
    /// An equal-area spiral over a sphere.
    Sphere,
    /// A single turn around a vertical cylinder.
    Cylinder,
    /// A widening helix.
    Spiral,
    /// A sine wave along X, alternating in Z.
    Wave,
}

impl DistributionKind {
    /// Every layout, in menu order.
    pub const ALL: [DistributionKind; 6] = [
        DistributionKind::Random,
        DistributionKind::Grid3d,
        DistributionKind::Sphere,
        DistributionKind::Cylinder,
        DistributionKind::Spiral,
        DistributionKind::Wave,
    ];

    /// Returns the configuration name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            DistributionKind::Random => "random",
            DistributionKind::Grid3d => "grid3d",
            DistributionKind::Sphere => "sphere",
            DistributionKind::Cylinder => "cylinder",
            DistributionKind::Spiral => "spiral",
            DistributionKind::Wave => "wave",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownDistribution(s.to_string()))
    }
}

/// The per-frame animations a population can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Vertical bobbing around the rest position.
    #[default]
    Wave,
    /// Orbit in the XZ plane with vertical oscillation.
    Spiral,
    /// Orbit in the XZ plane at constant height.
    Orbit,
}

impl MotionKind {
    /// Every animation, in menu order.
    pub const ALL: [MotionKind; 3] = [MotionKind::Wave, MotionKind::Spiral, MotionKind::Orbit];

    /// Returns the configuration name of the animation.
    pub fn name(self) -> &'static str {
        match self {
            MotionKind::Wave => "wave",
            MotionKind::Spiral => "spiral",
            MotionKind::Orbit => "orbit",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MotionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownMotion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_names_parse() {
        assert_eq!("grid3d".parse(), Ok(DistributionKind::Grid3d));
        assert_eq!("sphere".parse(), Ok(DistributionKind::Sphere));
        assert_eq!(
            "Sphere".parse::<DistributionKind>(),
            Err(ConfigError::UnknownDistribution("Sphere".into()))
        );
    }

    #[test]
    fn test_motion_names_parse() {
        assert_eq!("orbit".parse(), Ok(MotionKind::Orbit));
        assert_eq!(
            "bounce".parse::<MotionKind>(),
            Err(ConfigError::UnknownMotion("bounce".into()))
        );
    }
}

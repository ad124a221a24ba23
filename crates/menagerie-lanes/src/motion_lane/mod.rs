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

//! Motion Lane
//!
//! Per-frame animation of a populated scene. A strategy maps a model's rest
//! position, its initial phase and the elapsed time to the position it is
//! displayed at; [`spin`] accumulates the self-rotation every frame.

use menagerie_core::config::{MotionKind, ViewerConfig};
use menagerie_core::math::{Quaternion, Vec3};

/// An animation strategy and its tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStrategy {
    /// Vertical bobbing around the rest position.
    Wave {
        /// Angular speed.
        speed: f32,
        /// Amplitude.
        height: f32,
    },
    /// Horizontal orbit around the Y axis with a vertical bob.
    Spiral {
        /// Angular speed.
        speed: f32,
    },
    /// Horizontal orbit around the Y axis at constant height.
    Orbit {
        /// Angular speed.
        speed: f32,
    },
}

impl MotionStrategy {
    /// Builds the strategy for `kind` from the tuning values in `config`.
    pub fn from_config(kind: MotionKind, config: &ViewerConfig) -> Self {
        match kind {
            MotionKind::Wave => Self::Wave {
                speed: config.wave_speed,
                height: config.wave_height,
            },
            MotionKind::Spiral => Self::Spiral {
                speed: config.spiral_speed,
            },
            MotionKind::Orbit => Self::Orbit {
                speed: config.orbit_speed,
            },
        }
    }

    /// The name this strategy is selected by.
    pub fn kind(&self) -> MotionKind {
        match self {
            Self::Wave { .. } => MotionKind::Wave,
            Self::Spiral { .. } => MotionKind::Spiral,
            Self::Orbit { .. } => MotionKind::Orbit,
        }
    }

    /// Computes the displayed position at `elapsed` seconds.
    ///
    /// Returns `None` when the record is not placed yet, or when an orbiting
    /// strategy has no phase to start from; the caller keeps the current position.
    /// `Wave` treats a missing phase as zero.
    pub fn step(&self, rest: Option<Vec3>, phase: Option<f32>, elapsed: f32) -> Option<Vec3> {
        let rest = rest?;
        match *self {
            Self::Wave { speed, height } => {
                let offset = phase.unwrap_or(0.0);
                let y = rest.y + (elapsed * speed + offset).sin() * height;
                Some(Vec3::new(rest.x, y, rest.z))
            }
            Self::Spiral { speed } => {
                let (x, z) = orbit_xz(rest, phase?, elapsed * speed);
                Some(Vec3::new(x, rest.y + (elapsed * speed).sin() * 2.0, z))
            }
            Self::Orbit { speed } => {
                let (x, z) = orbit_xz(rest, phase?, elapsed * speed);
                Some(Vec3::new(x, rest.y, z))
            }
        }
    }
}

/// Radius is the full distance to the origin, not the horizontal one.
fn orbit_xz(rest: Vec3, phase: f32, advance: f32) -> (f32, f32) {
    let radius = rest.length();
    let angle = phase + advance;
    (angle.cos() * radius, angle.sin() * radius)
}

/// Advances `rotation` by `speed` radians about `axis`.
pub fn spin(rotation: Quaternion, axis: Vec3, speed: f32) -> Quaternion {
    (rotation * Quaternion::from_axis_angle(axis, speed)).normalize()
}

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

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// The named material looks offered by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    /// Slightly glossy dielectric.
    #[default]
    Plastic,
    /// Polished metal.
    Metal,
    /// Clear, refractive glass.
    Glass,
    /// Rough, non-reflective surface.
    Matte,
}

impl MaterialPreset {
    /// Every preset, in menu order.
    pub const ALL: [MaterialPreset; 4] = [
        MaterialPreset::Plastic,
        MaterialPreset::Metal,
        MaterialPreset::Glass,
        MaterialPreset::Matte,
    ];

    /// Returns the lowercase name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            MaterialPreset::Plastic => "plastic",
            MaterialPreset::Metal => "metal",
            MaterialPreset::Glass => "glass",
            MaterialPreset::Matte => "matte",
        }
    }

    /// Returns the physically based parameters of the preset.
    pub fn spec(self) -> MaterialSpec {
        match self {
            MaterialPreset::Plastic => MaterialSpec {
                preset: self,
                metalness: 0.0,
                roughness: 0.3,
                clearcoat: 0.8,
                transmission: 0.0,
                double_sided: true,
            },
            MaterialPreset::Metal => MaterialSpec {
                preset: self,
                metalness: 1.0,
                roughness: 0.15,
                clearcoat: 0.0,
                transmission: 0.0,
                double_sided: true,
            },
            MaterialPreset::Glass => MaterialSpec {
                preset: self,
                metalness: 0.0,
                roughness: 0.05,
                clearcoat: 1.0,
                transmission: 0.9,
                double_sided: true,
            },
            MaterialPreset::Matte => MaterialSpec {
                preset: self,
                metalness: 0.0,
                roughness: 1.0,
                clearcoat: 0.0,
                transmission: 0.0,
                double_sided: true,
            },
        }
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigError::UnknownMaterial(s.to_string()))
    }
}

/// The material parameters handed to [`SceneHost::apply_material`](super::SceneHost::apply_material).
///
/// The engine keeps each mesh's original base color and combines it with these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// The preset these values came from.
    pub preset: MaterialPreset,
    /// 0 for dielectrics, 1 for metals.
    pub metalness: f32,
    /// Microfacet roughness in `[0, 1]`.
    pub roughness: f32,
    /// Strength of the clear-coat layer in `[0, 1]`.
    pub clearcoat: f32,
    /// Fraction of light transmitted through the surface in `[0, 1]`.
    pub transmission: f32,
    /// Whether back faces are rendered.
    pub double_sided: bool,
}

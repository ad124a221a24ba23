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

use std::collections::HashSet;

use menagerie_core::asset::{AssetId, BoundsHandle, ModelHandle};
use menagerie_core::math::{Aabb, Quaternion, Vec3, TAU};
use menagerie_core::scene::{ModelTransform, SceneHost};

/// A loaded, placed model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    /// The identifier it was loaded from.
    pub id: AssetId,
    /// The engine object.
    pub handle: ModelHandle,
    /// Local-space bounds reported by the loader.
    pub local_bounds: Aabb,
    /// Set by placement and left alone by animation.
    pub rest_position: Option<Vec3>,
    /// Where the model is displayed this frame.
    pub position: Vec3,
    /// Starting angle for the orbiting animations, in `[0, 2π)`.
    pub initial_phase: Option<f32>,
    /// Unit spin axis, drawn once at load time.
    pub rotation_axis: Vec3,
    /// Spin in radians per frame, drawn once at load time.
    pub rotation_speed: f32,
    /// Accumulated spin.
    pub rotation: Quaternion,
    /// The debug bounding-box helper, if the engine created one.
    pub bounds: Option<BoundsHandle>,
}

impl ModelRecord {
    /// Size of the model before scaling.
    pub fn extent(&self) -> Vec3 {
        self.local_bounds.size()
    }

    /// The transform to hand to the scene at `scale`.
    pub fn transform(&self, scale: f32) -> ModelTransform {
        ModelTransform {
            position: self.position,
            rotation: self.rotation,
            scale,
        }
    }

    /// World-space box around the displayed model at `scale`.
    pub fn world_bounds(&self, scale: f32) -> Aabb {
        self.local_bounds.placed(self.position, scale)
    }
}

/// The live set of loaded models, unique by identifier.
#[derive(Debug, Default)]
pub struct PopulationRegistry {
    records: Vec<ModelRecord>,
    ids: HashSet<AssetId>,
}

impl PopulationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. Returns `false`, leaving the registry unchanged, if the identifier is present.
    pub fn add(&mut self, record: ModelRecord) -> bool {
        if !self.ids.insert(record.id.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Releases every engine object and helper, then empties the registry.
    pub fn remove_all(&mut self, scene: &mut dyn SceneHost) -> usize {
        let count = self.records.len();
        for record in self.records.drain(..) {
            if let Some(bounds) = record.bounds {
                scene.remove_bounds(bounds);
            }
            scene.remove_object(record.handle);
        }
        self.ids.clear();
        count
    }

    /// Recomputes `initial_phase(i) = (i / len) * 2π` for every record.
    pub fn refresh_phases(&mut self) {
        let len = self.records.len() as f32;
        for (index, record) in self.records.iter_mut().enumerate() {
            record.initial_phase = Some(index as f32 / len * TAU);
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record for `id` exists.
    pub fn contains(&self, id: &AssetId) -> bool {
        self.ids.contains(id)
    }

    /// The record for `id`.
    pub fn get(&self, id: &AssetId) -> Option<&ModelRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Records in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelRecord> {
        self.records.iter()
    }

    /// Mutable records in load order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ModelRecord> {
        self.records.iter_mut()
    }

    /// Identifiers in load order.
    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.records.iter().map(|record| &record.id)
    }
}

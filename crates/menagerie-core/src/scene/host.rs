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

use crate::asset::{BoundsHandle, ModelHandle};
use crate::math::{Aabb, Quaternion, Vec3};

use super::MaterialSpec;

/// The placement of a model in the scene for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// World-space position.
    pub position: Vec3,
    /// Accumulated spin.
    pub rotation: Quaternion,
    /// Uniform scale multiplier.
    pub scale: f32,
}

/// The scene collaborator implemented by the external engine.
///
/// Every method is fire-and-forget from the caller's point of view: the engine is
/// expected to ignore handles it no longer knows about.
pub trait SceneHost: Send {
    /// Adds a loaded model to the scene.
    fn add_object(&mut self, handle: ModelHandle);

    /// Removes a model from the scene and releases its engine resources.
    fn remove_object(&mut self, handle: ModelHandle);

    /// Replaces every mesh material of the model with one built from `material`.
    fn apply_material(&mut self, handle: ModelHandle, material: &MaterialSpec);

    /// Moves, rotates and scales the model.
    fn set_transform(&mut self, handle: ModelHandle, transform: ModelTransform);

    /// Creates a debug bounding-box helper. Engines without debug drawing return `None`.
    fn add_bounds(&mut self, bounds: Aabb, visible: bool) -> Option<BoundsHandle>;

    /// Updates the box drawn by a helper.
    fn update_bounds(&mut self, handle: BoundsHandle, bounds: Aabb);

    /// Shows or hides a helper.
    fn set_bounds_visible(&mut self, handle: BoundsHandle, visible: bool);

    /// Removes a helper from the scene.
    fn remove_bounds(&mut self, handle: BoundsHandle);
}

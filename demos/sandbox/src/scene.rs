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

//! A scene host with no renderer: it tracks what would be drawn and logs changes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use menagerie_core::asset::{BoundsHandle, ModelHandle};
use menagerie_core::math::Aabb;
use menagerie_core::scene::{MaterialSpec, ModelTransform, SceneHost};

#[derive(Default)]
struct SceneState {
    objects: HashSet<ModelHandle>,
    transforms: HashMap<ModelHandle, ModelTransform>,
    helpers: HashMap<BoundsHandle, bool>,
    next_helper: u64,
}

/// What the scene holds at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStats {
    pub objects: usize,
    pub visible_helpers: usize,
    /// Distance from the origin of the farthest model.
    pub reach: f32,
}

/// Cloning yields another view of the same scene.
#[derive(Clone, Default)]
pub struct HeadlessScene {
    state: Arc<Mutex<SceneState>>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SceneStats {
        let state = self.state();
        SceneStats {
            objects: state.objects.len(),
            visible_helpers: state.helpers.values().filter(|visible| **visible).count(),
            reach: state
                .transforms
                .values()
                .map(|t| t.position.length())
                .fold(0.0, f32::max),
        }
    }

    fn state(&self) -> MutexGuard<'_, SceneState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SceneHost for HeadlessScene {
    fn add_object(&mut self, handle: ModelHandle) {
        let mut state = self.state();
        state.objects.insert(handle);
        log::trace!("Scene: +object {:?} ({} live)", handle, state.objects.len());
    }

    fn remove_object(&mut self, handle: ModelHandle) {
        let mut state = self.state();
        state.objects.remove(&handle);
        state.transforms.remove(&handle);
        log::trace!("Scene: -object {:?} ({} live)", handle, state.objects.len());
    }

    fn apply_material(&mut self, handle: ModelHandle, material: &MaterialSpec) {
        log::trace!("Scene: material {} on {:?}", material.preset, handle);
    }

    fn set_transform(&mut self, handle: ModelHandle, transform: ModelTransform) {
        self.state().transforms.insert(handle, transform);
    }

    fn add_bounds(&mut self, _bounds: Aabb, visible: bool) -> Option<BoundsHandle> {
        let mut state = self.state();
        state.next_helper += 1;
        let handle = BoundsHandle(state.next_helper);
        state.helpers.insert(handle, visible);
        Some(handle)
    }

    fn update_bounds(&mut self, _handle: BoundsHandle, _bounds: Aabb) {}

    fn set_bounds_visible(&mut self, handle: BoundsHandle, visible: bool) {
        if let Some(state) = self.state().helpers.get_mut(&handle) {
            *state = visible;
        }
    }

    fn remove_bounds(&mut self, handle: BoundsHandle) {
        self.state().helpers.remove(&handle);
    }
}

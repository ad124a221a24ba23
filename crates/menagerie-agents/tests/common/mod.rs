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

//! Shared fakes for the population agent tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use menagerie_agents::PopulationAgent;
use menagerie_core::asset::{AssetId, BoundsHandle, LoadedModel, ModelHandle, ModelLoader};
use menagerie_core::error::LoadError;
use menagerie_core::math::{Aabb, Vec3};
use menagerie_core::scene::{MaterialPreset, MaterialSpec, ModelTransform, SceneHost};
use menagerie_core::ViewerConfig;

// --- Loader ---

/// A loader whose failures are scripted by identifier.
#[derive(Default)]
pub struct ScriptedLoader {
    fail_once: HashSet<String>,
    fail_matching: Vec<String>,
    hang_matching: Vec<String>,
    delay_matching: Vec<(String, Duration)>,
    calls: Mutex<HashMap<String, u32>>,
    next_handle: AtomicU64,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first attempt at `name` fails with `NotFound`.
    pub fn fail_once(mut self, name: &str) -> Self {
        self.fail_once.insert(name.to_string());
        self
    }

    /// Every attempt at an identifier containing `pattern` fails.
    pub fn fail_matching(mut self, pattern: &str) -> Self {
        self.fail_matching.push(pattern.to_string());
        self
    }

    /// Loads of identifiers containing `pattern` never resolve.
    pub fn hang_matching(mut self, pattern: &str) -> Self {
        self.hang_matching.push(pattern.to_string());
        self
    }

    /// Loads of identifiers containing `pattern` resolve after `delay`.
    pub fn delay_matching(mut self, pattern: &str, delay: Duration) -> Self {
        self.delay_matching.push((pattern.to_string(), delay));
        self
    }

    pub fn calls(&self, name: &str) -> u32 {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ModelLoader for ScriptedLoader {
    async fn load(&self, id: &AssetId) -> Result<LoadedModel, LoadError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(id.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        tokio::task::yield_now().await;

        let name = id.as_str();
        if self.hang_matching.iter().any(|p| name.contains(p.as_str())) {
            std::future::pending::<()>().await;
        }
        for (pattern, delay) in &self.delay_matching {
            if name.contains(pattern.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }
        if self.fail_matching.iter().any(|p| name.contains(p.as_str())) {
            return Err(LoadError::Transport {
                id: id.clone(),
                reason: "scripted failure".into(),
            });
        }
        if attempt == 1 && self.fail_once.contains(name) {
            return Err(LoadError::NotFound(id.clone()));
        }

        let handle = ModelHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        Ok(LoadedModel {
            handle,
            bounds: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.01)),
        })
    }
}

// --- Scene ---

/// Everything the agent asked the scene to do.
#[derive(Debug, Default)]
pub struct SceneLog {
    pub live: HashSet<ModelHandle>,
    pub removed: Vec<ModelHandle>,
    pub materials: HashMap<ModelHandle, MaterialPreset>,
    pub transforms: HashMap<ModelHandle, ModelTransform>,
    pub bounds: HashMap<BoundsHandle, bool>,
    next_bounds: u64,
}

/// A scene host that records calls into a shared [`SceneLog`].
#[derive(Clone, Default)]
pub struct RecordingScene {
    pub log: Arc<Mutex<SceneLog>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneHost for RecordingScene {
    fn add_object(&mut self, handle: ModelHandle) {
        self.log.lock().unwrap().live.insert(handle);
    }

    fn remove_object(&mut self, handle: ModelHandle) {
        let mut log = self.log.lock().unwrap();
        log.live.remove(&handle);
        log.removed.push(handle);
    }

    fn apply_material(&mut self, handle: ModelHandle, material: &MaterialSpec) {
        self.log
            .lock()
            .unwrap()
            .materials
            .insert(handle, material.preset);
    }

    fn set_transform(&mut self, handle: ModelHandle, transform: ModelTransform) {
        self.log
            .lock()
            .unwrap()
            .transforms
            .insert(handle, transform);
    }

    fn add_bounds(&mut self, _bounds: Aabb, visible: bool) -> Option<BoundsHandle> {
        let mut log = self.log.lock().unwrap();
        log.next_bounds += 1;
        let handle = BoundsHandle(log.next_bounds);
        log.bounds.insert(handle, visible);
        Some(handle)
    }

    fn update_bounds(&mut self, _handle: BoundsHandle, _bounds: Aabb) {}

    fn set_bounds_visible(&mut self, handle: BoundsHandle, visible: bool) {
        if let Some(state) = self.log.lock().unwrap().bounds.get_mut(&handle) {
            *state = visible;
        }
    }

    fn remove_bounds(&mut self, handle: BoundsHandle) {
        self.log.lock().unwrap().bounds.remove(&handle);
    }
}

// --- Builders ---

pub fn names(prefix: &str, count: usize) -> Vec<AssetId> {
    (0..count)
        .map(|i| AssetId::new(format!("{prefix}{i}.glb")))
        .collect()
}

pub fn ids(list: &[&str]) -> Vec<AssetId> {
    list.iter().map(|name| AssetId::from(*name)).collect()
}

pub fn config(target_count: usize) -> ViewerConfig {
    ViewerConfig {
        target_count,
        seed: Some(1234),
        ..Default::default()
    }
}

pub fn agent(
    config: ViewerConfig,
    manifest: Vec<AssetId>,
    loader: Arc<ScriptedLoader>,
) -> (PopulationAgent, Arc<Mutex<SceneLog>>) {
    let scene = RecordingScene::new();
    let log = Arc::clone(&scene.log);
    let agent = PopulationAgent::new(config, manifest, loader, Box::new(scene))
        .expect("test configuration is valid");
    (agent, log)
}

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

//! A loader that reads model files from a directory.
//!
//! Files are not decoded: a successful read yields a fresh handle and a box sized
//! from the file length, which is enough to exercise placement and bounds.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use menagerie_core::asset::{AssetId, LoadedModel, ModelHandle, ModelLoader};
use menagerie_core::error::LoadError;
use menagerie_core::math::{Aabb, Vec3};

pub struct DirectoryLoader {
    root: PathBuf,
    next_handle: AtomicU64,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_handle: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ModelLoader for DirectoryLoader {
    async fn load(&self, id: &AssetId) -> Result<LoadedModel, LoadError> {
        let path = self.root.join(id.as_str());
        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(id.clone())
            } else {
                LoadError::Transport {
                    id: id.clone(),
                    reason: err.to_string(),
                }
            }
        })?;
        if bytes.is_empty() {
            return Err(LoadError::Transport {
                id: id.clone(),
                reason: "file is empty".into(),
            });
        }

        let half = (bytes.len() as f32).cbrt() * 0.0005;
        Ok(LoadedModel {
            handle: ModelHandle(self.next_handle.fetch_add(1, Ordering::Relaxed)),
            bounds: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(half)),
        })
    }
}

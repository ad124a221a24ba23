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

use async_trait::async_trait;

use super::{AssetId, ModelHandle};
use crate::error::LoadError;
use crate::math::Aabb;

/// The result of a successful load: the engine handle plus its size metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedModel {
    /// The engine-owned renderable object.
    pub handle: ModelHandle,
    /// The model's local-space bounds, as measured by the loader.
    pub bounds: Aabb,
}

/// The asynchronous loader collaborator.
///
/// One call is made per identifier and no batching contract is assumed. Each call
/// independently resolves to a [`LoadedModel`] or a [`LoadError`]. Implementations
/// must be shareable across tasks, as every load runs as its own task.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use menagerie_core::asset::{AssetId, LoadedModel, ModelLoader};
/// use menagerie_core::error::LoadError;
///
/// struct AlwaysMissing;
///
/// #[async_trait]
/// impl ModelLoader for AlwaysMissing {
///     async fn load(&self, id: &AssetId) -> Result<LoadedModel, LoadError> {
///         Err(LoadError::NotFound(id.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Loads the model named by `id`.
    async fn load(&self, id: &AssetId) -> Result<LoadedModel, LoadError>;
}

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

//! Provides the foundational contracts and primitive types for loading models.
//!
//! This module defines the "common language" between the population subsystem
//! and the external engine. It contains no loading logic itself.
//!
//! The key components are:
//! - [`AssetId`]: the filename-like key naming a loadable model.
//! - [`ModelHandle`] and [`BoundsHandle`]: opaque engine-owned references.
//! - The [`ModelLoader`] trait: the asynchronous loader collaborator.

mod handle;
mod id;
mod loader;

pub use handle::*;
pub use id::*;
pub use loader::*;

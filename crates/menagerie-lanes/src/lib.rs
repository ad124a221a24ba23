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

//! # Menagerie Lanes
//!
//! Hot-path, stateless work of the population subsystem. Each lane is a small set
//! of pure functions over core types, wrapped in a closed strategy enum:
//!
//! - [`distribution_lane`]: maps `(index, total)` to a rest position.
//! - [`motion_lane`]: maps `(rest, phase, elapsed)` to a displayed position, plus spin.
//! - [`catalog_lane`]: parses the manifest table and the user override list.

#![warn(missing_docs)]

pub mod catalog_lane;
pub mod distribution_lane;
pub mod motion_lane;

pub use catalog_lane::{AssetCatalog, CatalogSource, OverrideList};
pub use distribution_lane::{DistributionLane, DistributionStrategy};
pub use motion_lane::MotionStrategy;

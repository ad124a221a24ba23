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

//! The PopulationAgent loads, places and animates a population of models.
//!
//! A population is built by a load session: a random subset of the active catalog
//! is loaded concurrently, failures are backfilled from unused identifiers, and
//! the session settles once the target is reached or the catalog is exhausted.
//! Each successful load is placed by the distribution lane and animated every
//! frame by the motion lane.

mod agent;
mod error;
mod events;
mod orchestrator;
mod registry;
mod session;

pub use agent::*;
pub use error::*;
pub use events::*;
pub use orchestrator::*;
pub use registry::*;
pub use session::*;

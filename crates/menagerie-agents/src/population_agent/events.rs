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

use menagerie_core::asset::AssetId;
use menagerie_core::error::LoadError;

use super::{SessionReport, SessionToken};

/// Progress notifications published on the agent's event bus.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationEvent {
    /// A new session started, tearing down the previous population.
    SessionStarted {
        /// The new session.
        token: SessionToken,
        /// Requested population size.
        target: usize,
    },
    /// A model was loaded, placed and added to the scene.
    ModelLoaded {
        /// The loaded identifier.
        id: AssetId,
        /// Models loaded so far in this session.
        loaded: usize,
        /// Requested population size.
        target: usize,
    },
    /// A single load failed. The session carries on.
    LoadFailed {
        /// The identifier that failed.
        id: AssetId,
        /// Why it failed.
        reason: LoadError,
    },
    /// A backfill batch was issued to replace failed loads.
    BackfillIssued {
        /// One-based batch number within the session; the initial batch is round 1.
        round: usize,
        /// Number of loads in the batch.
        count: usize,
    },
    /// The session reached a terminal state.
    Settled(SessionReport),
    /// The override list was capped.
    OverrideTruncated {
        /// Entries kept.
        kept: usize,
        /// Entries dropped.
        dropped: usize,
    },
}

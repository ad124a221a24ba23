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

//! Bookkeeping for one load-and-backfill cycle.

use std::collections::{HashMap, HashSet};
use std::fmt;

use menagerie_core::asset::AssetId;

/// Identifies one load session. Completions carrying another token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(pub u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, nothing selected yet.
    Idle,
    /// Drawing the initial batch from the catalog.
    Selecting,
    /// A batch is in flight.
    Loading,
    /// Picking replacements for failed loads.
    Backfilling,
    /// Terminal.
    Settled,
}

/// How a settled session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The target was reached.
    Full,
    /// The catalog ran out of candidates first.
    Short {
        /// `target - loaded` at settle time.
        shortfall: usize,
    },
}

/// A snapshot of a session's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// The session described.
    pub token: SessionToken,
    /// Requested population size.
    pub target: usize,
    /// Successful loads admitted to the registry.
    pub loaded: usize,
    /// Failed loads.
    pub failed: usize,
    /// Load attempts issued, across every batch.
    pub issued: usize,
    /// Number of batches issued, the initial one included.
    pub rounds: usize,
    /// Completions ignored because they were stale or surplus.
    pub discarded: usize,
    /// `None` while the session is still running.
    pub settlement: Option<Settlement>,
}

/// State of one population-build attempt.
#[derive(Debug)]
pub struct LoadSession {
    token: SessionToken,
    target: usize,
    state: SessionState,
    loaded: usize,
    failed: usize,
    issued: usize,
    rounds: usize,
    discarded: usize,
    in_flight: HashSet<AssetId>,
    attempts: HashMap<AssetId, u32>,
    settlement: Option<Settlement>,
}

impl LoadSession {
    /// Starts an idle session aiming for `target` models.
    pub fn new(token: SessionToken, target: usize) -> Self {
        Self {
            token,
            target,
            state: SessionState::Idle,
            loaded: 0,
            failed: 0,
            issued: 0,
            rounds: 0,
            discarded: 0,
            in_flight: HashSet::new(),
            attempts: HashMap::new(),
            settlement: None,
        }
    }

    /// This session's token.
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Requested population size.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Moves to `state`. Settled sessions stay settled.
    pub fn set_state(&mut self, state: SessionState) {
        if self.state != SessionState::Settled {
            self.state = state;
        }
    }

    /// Whether the session is terminal.
    pub fn is_settled(&self) -> bool {
        self.state == SessionState::Settled
    }

    /// Successful loads so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Failed loads so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Loads not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether `id` has a load outstanding.
    pub fn is_in_flight(&self, id: &AssetId) -> bool {
        self.in_flight.contains(id)
    }

    /// How many times `id` has been issued in this session.
    pub fn attempts(&self, id: &AssetId) -> u32 {
        self.attempts.get(id).copied().unwrap_or(0)
    }

    /// `target - loaded`.
    pub fn remaining(&self) -> usize {
        self.target.saturating_sub(self.loaded)
    }

    /// Records a new batch going out.
    pub fn record_batch(&mut self, ids: &[AssetId]) {
        self.rounds += 1;
        self.issued += ids.len();
        for id in ids {
            *self.attempts.entry(id.clone()).or_insert(0) += 1;
            self.in_flight.insert(id.clone());
        }
        self.set_state(SessionState::Loading);
    }

    /// Records a successful load of `id`.
    pub fn record_success(&mut self, id: &AssetId) {
        self.in_flight.remove(id);
        self.loaded += 1;
    }

    /// Records a failed load of `id`.
    pub fn record_failure(&mut self, id: &AssetId) {
        self.in_flight.remove(id);
        self.failed += 1;
    }

    /// Records a completion that was ignored.
    pub fn record_discard(&mut self) {
        self.discarded += 1;
    }

    /// Records a load of `id` that succeeded for an identifier already present.
    ///
    /// The slot is freed but nothing is counted as loaded.
    pub fn record_duplicate(&mut self, id: &AssetId) {
        self.in_flight.remove(id);
        self.discarded += 1;
    }

    /// Makes the session terminal.
    pub fn settle(&mut self, settlement: Settlement) {
        self.state = SessionState::Settled;
        self.settlement = Some(settlement);
        self.in_flight.clear();
    }

    /// How the session ended, if it has.
    pub fn settlement(&self) -> Option<Settlement> {
        self.settlement
    }

    /// A snapshot of the counters.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            token: self.token,
            target: self.target,
            loaded: self.loaded,
            failed: self.failed,
            issued: self.issued,
            rounds: self.rounds,
            discarded: self.discarded,
            settlement: self.settlement,
        }
    }
}

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

//! Concurrent load issuing for a [`LoadSession`].
//!
//! Every load runs as its own task in a [`JoinSet`] and reports back over an
//! unbounded channel tagged with the session token. The receiving end is owned
//! here, so only the agent ever mutates counters or the registry.

use std::sync::Arc;
use std::time::Duration;

use menagerie_core::asset::{AssetId, LoadedModel, ModelLoader};
use menagerie_core::error::LoadError;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

use super::{LoadSession, PopulationError, PopulationRegistry, SessionState, SessionToken};

/// The outcome of one load task.
#[derive(Debug)]
pub struct LoadCompletion {
    /// Session the load was issued by.
    pub token: SessionToken,
    /// The identifier loaded.
    pub id: AssetId,
    /// What the loader returned.
    pub result: Result<LoadedModel, LoadError>,
}

/// Guarantees a load task reports exactly once.
///
/// If the task is aborted or panics before [`CompletionGuard::complete`] runs, the
/// guard reports [`LoadError::Aborted`] from `Drop`.
pub struct CompletionGuard {
    token: SessionToken,
    id: AssetId,
    sender: Option<UnboundedSender<LoadCompletion>>,
}

impl CompletionGuard {
    fn new(token: SessionToken, id: AssetId, sender: UnboundedSender<LoadCompletion>) -> Self {
        Self {
            token,
            id,
            sender: Some(sender),
        }
    }

    /// Reports `result` for this task.
    pub fn complete(mut self, result: Result<LoadedModel, LoadError>) {
        self.send(result);
    }

    fn send(&mut self, result: Result<LoadedModel, LoadError>) {
        if let Some(sender) = self.sender.take() {
            let completion = LoadCompletion {
                token: self.token,
                id: self.id.clone(),
                result,
            };
            // The receiver only goes away with the agent.
            let _ = sender.send(completion);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.sender.is_some() {
            let id = self.id.clone();
            self.send(Err(LoadError::Aborted(id)));
        }
    }
}

/// Issues loads and collects their completions.
pub struct LoadOrchestrator {
    loader: Arc<dyn ModelLoader>,
    timeout: Duration,
    runtime: Handle,
    tasks: JoinSet<()>,
    sender: UnboundedSender<LoadCompletion>,
    receiver: UnboundedReceiver<LoadCompletion>,
    next_token: u64,
    session: Option<LoadSession>,
}

impl LoadOrchestrator {
    /// Creates an orchestrator bound to the current tokio runtime.
    pub fn new(loader: Arc<dyn ModelLoader>, timeout: Duration) -> Result<Self, PopulationError> {
        let runtime = Handle::try_current().map_err(|_| PopulationError::NoRuntime)?;
        let (sender, receiver) = mpsc::unbounded_channel();
        Ok(Self {
            loader,
            timeout,
            runtime,
            tasks: JoinSet::new(),
            sender,
            receiver,
            next_token: 0,
            session: None,
        })
    }

    /// Aborts outstanding loads and starts a fresh session.
    pub fn begin(&mut self, target: usize) -> SessionToken {
        self.abort_all();
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        let mut session = LoadSession::new(token, target);
        session.set_state(SessionState::Selecting);
        self.session = Some(session);
        token
    }

    /// Spawns one load task per identifier for the current session.
    pub fn issue(&mut self, ids: Vec<AssetId>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.record_batch(&ids);
        let token = session.token();

        for id in ids {
            let guard = CompletionGuard::new(token, id.clone(), self.sender.clone());
            let loader = Arc::clone(&self.loader);
            let timeout = self.timeout;
            self.tasks.spawn_on(
                async move {
                    let outcome = tokio::time::timeout(timeout, loader.load(&id)).await;
                    let result = match outcome {
                        Ok(result) => result,
                        Err(_) => Err(LoadError::TimedOut { id, after: timeout }),
                    };
                    guard.complete(result);
                },
                &self.runtime,
            );
        }
    }

    /// Aborts every outstanding load. Their guards report `Aborted`.
    pub fn abort_all(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("Aborting {} outstanding load tasks", self.tasks.len());
        }
        self.tasks.abort_all();
    }

    /// Drops finished tasks from the join set, logging panics.
    pub fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(err) = joined {
                if err.is_panic() {
                    log::error!("A load task panicked: {}", err);
                }
            }
        }
    }

    /// The next completion, if one is ready.
    pub fn try_next(&mut self) -> Result<Option<LoadCompletion>, PopulationError> {
        match self.receiver.try_recv() {
            Ok(completion) => Ok(Some(completion)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(PopulationError::ChannelClosed),
        }
    }

    /// Waits for the next completion.
    pub async fn next(&mut self) -> Result<LoadCompletion, PopulationError> {
        self.receiver
            .recv()
            .await
            .ok_or(PopulationError::ChannelClosed)
    }

    /// The current session.
    pub fn session(&self) -> Option<&LoadSession> {
        self.session.as_ref()
    }

    /// The current session, mutably.
    pub fn session_mut(&mut self) -> Option<&mut LoadSession> {
        self.session.as_mut()
    }

    /// The per-load timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Draws the initial batch: an unbiased shuffle of `catalog`, cut to `target`.
pub fn select_initial<R: Rng + ?Sized>(catalog: &[AssetId], target: usize, rng: &mut R) -> Vec<AssetId> {
    let mut selected = catalog.to_vec();
    selected.shuffle(rng);
    selected.truncate(target);
    selected
}

/// Draws a backfill batch of at most `limit` identifiers.
///
/// Candidates are catalog entries that are not registered, not in flight and
/// have been attempted fewer than `max_attempts` times in `session`.
pub fn backfill_candidates<R: Rng + ?Sized>(
    catalog: &[AssetId],
    registry: &PopulationRegistry,
    session: &LoadSession,
    max_attempts: u32,
    limit: usize,
    rng: &mut R,
) -> Vec<AssetId> {
    let mut candidates: Vec<AssetId> = catalog
        .iter()
        .filter(|id| {
            !registry.contains(id) && !session.is_in_flight(id) && session.attempts(id) < max_attempts
        })
        .cloned()
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(limit);
    candidates
}

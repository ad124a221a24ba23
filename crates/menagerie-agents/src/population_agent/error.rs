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

use menagerie_core::ConfigError;
use thiserror::Error;

/// An error returned by a [`PopulationAgent`](super::PopulationAgent) operation.
#[derive(Debug, Error)]
pub enum PopulationError {
    /// The operation was rejected by configuration validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The completion channel closed while a session was still waiting for loads.
    #[error("load completion channel closed")]
    ChannelClosed,
    /// There is no load session to wait for.
    #[error("no load session has been started")]
    NoSession,
    /// The agent was created outside a tokio runtime.
    #[error("the population agent must be created inside a tokio runtime")]
    NoRuntime,
}

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

//! Defines the error taxonomy of the population subsystem.
//!
//! - [`ConfigError`]: fatal to the requested operation, surfaced immediately and
//!   never retried.
//! - [`LoadError`]: a single model failed to load. Recoverable; it is counted,
//!   logged and feeds backfill accounting, but never aborts a session.

use std::time::Duration;

use thiserror::Error;

use crate::asset::AssetId;

/// A configuration problem that rejects the requested operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The manifest catalog is active but contains no usable identifiers.
    #[error("no loadable assets found in the catalog manifest")]
    EmptyCatalog,
    /// The override list is selected but empty.
    #[error("override list is selected but contains no asset names")]
    EmptyOverrideList,
    /// The requested distribution strategy does not exist.
    #[error("unknown distribution strategy '{0}'")]
    UnknownDistribution(String),
    /// The requested motion strategy does not exist.
    #[error("unknown motion strategy '{0}'")]
    UnknownMotion(String),
    /// The requested material preset does not exist.
    #[error("unknown material preset '{0}'")]
    UnknownMaterial(String),
    /// The target population count is outside `1..=500`.
    #[error("target count {0} is outside the supported range 1..=500")]
    TargetOutOfRange(usize),
    /// The spacing scalar is not a finite, strictly positive number.
    #[error("spacing must be finite and greater than zero, got {0}")]
    InvalidSpacing(f32),
    /// A tuning parameter has an unusable value.
    #[error("invalid tuning parameter: {0}")]
    InvalidTuning(&'static str),
}

/// A single model failed to load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The resource behind the identifier does not exist.
    #[error("asset '{0}' not found")]
    NotFound(AssetId),
    /// The resource exists but could not be fetched or decoded.
    #[error("failed to load '{id}': {reason}")]
    Transport {
        /// The identifier that failed.
        id: AssetId,
        /// A human-readable description of the failure.
        reason: String,
    },
    /// The load did not resolve within the configured timeout.
    #[error("loading '{id}' timed out after {after:?}")]
    TimedOut {
        /// The identifier that timed out.
        id: AssetId,
        /// The timeout that elapsed.
        after: Duration,
    },
    /// The load task ended without producing a result (aborted or panicked).
    #[error("loading '{0}' was aborted before it produced a result")]
    Aborted(AssetId),
}

impl LoadError {
    /// Returns the identifier the error refers to.
    pub fn id(&self) -> &AssetId {
        match self {
            LoadError::NotFound(id) | LoadError::Aborted(id) => id,
            LoadError::Transport { id, .. } | LoadError::TimedOut { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_reports_its_identifier() {
        let id = AssetId::from("b.glb");
        let errors = [
            LoadError::NotFound(id.clone()),
            LoadError::Transport {
                id: id.clone(),
                reason: "connection reset".into(),
            },
            LoadError::TimedOut {
                id: id.clone(),
                after: Duration::from_millis(50),
            },
            LoadError::Aborted(id.clone()),
        ];
        for error in &errors {
            assert_eq!(error.id(), &id);
            assert!(error.to_string().contains("b.glb"));
        }
    }

    #[test]
    fn test_config_error_messages_name_the_offender() {
        let err = ConfigError::UnknownDistribution("torus".into());
        assert_eq!(err.to_string(), "unknown distribution strategy 'torus'");
    }
}

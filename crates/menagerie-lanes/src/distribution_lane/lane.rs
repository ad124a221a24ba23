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

use menagerie_core::config::{validate_spacing, DistributionKind};
use menagerie_core::math::Vec3;
use menagerie_core::ConfigError;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::DistributionStrategy;

/// The active layout plus the random source used by the `random` layout.
#[derive(Debug, Clone)]
pub struct DistributionLane {
    strategy: DistributionStrategy,
    spacing: f32,
    rng: StdRng,
}

impl DistributionLane {
    /// Creates a lane for `kind` at `spacing`. `seed` makes `random` layouts reproducible.
    pub fn new(kind: DistributionKind, spacing: f32, seed: Option<u64>) -> Result<Self, ConfigError> {
        validate_spacing(spacing)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            strategy: DistributionStrategy::from_kind(kind, spacing),
            spacing,
            rng,
        })
    }

    /// The active strategy.
    pub fn strategy(&self) -> DistributionStrategy {
        self.strategy
    }

    /// The spacing scalar the strategy was derived from.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Switches to another layout, keeping the spacing.
    pub fn set_kind(&mut self, kind: DistributionKind) {
        self.strategy = DistributionStrategy::from_kind(kind, self.spacing);
    }

    /// Rescales the active layout.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), ConfigError> {
        validate_spacing(spacing)?;
        self.spacing = spacing;
        self.strategy = DistributionStrategy::from_kind(self.strategy.kind(), spacing);
        Ok(())
    }

    /// Rest position of model `index` out of `total`.
    pub fn place(&mut self, index: usize, total: usize) -> Vec3 {
        self.strategy.place(index, total, &mut self.rng)
    }

    /// Rest positions for every index of a population of `total`.
    pub fn layout(&mut self, total: usize) -> Vec<Vec3> {
        (0..total).map(|index| self.place(index, total)).collect()
    }
}

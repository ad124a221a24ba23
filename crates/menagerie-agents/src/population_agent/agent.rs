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

use std::sync::Arc;

use menagerie_core::asset::{AssetId, LoadedModel, ModelLoader};
use menagerie_core::config::{
    validate_rotation_speed_scale, validate_target, DistributionKind, MotionKind, ViewerConfig,
};
use menagerie_core::event::EventBus;
use menagerie_core::math::{Quaternion, Vec3, EPSILON};
use menagerie_core::scene::{MaterialPreset, SceneHost};
use menagerie_core::ConfigError;
use menagerie_lanes::catalog_lane::{AssetCatalog, CatalogSource, OverrideList};
use menagerie_lanes::distribution_lane::{DistributionLane, DistributionStrategy};
use menagerie_lanes::motion_lane::{self, MotionStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    backfill_candidates, select_initial, LoadCompletion, LoadOrchestrator, ModelRecord,
    PopulationError, PopulationEvent, PopulationRegistry, SessionReport, SessionState,
    SessionToken, Settlement,
};

const ROTATION_SPEED_MIN: f32 = 0.002;
const ROTATION_SPEED_MAX: f32 = 0.012;

/// Owns the population: catalog, registry, load sessions and the lanes.
///
/// Drive it either frame by frame with [`PopulationAgent::update`], or build a
/// population to completion with [`PopulationAgent::populate`]. Both paths run
/// completions through the same handler, so counters and the registry are only
/// ever touched from the task that owns the agent.
pub struct PopulationAgent {
    config: ViewerConfig,
    catalog: AssetCatalog,
    // The active catalog as it stood when the current session started.
    candidates: Vec<AssetId>,
    registry: PopulationRegistry,
    orchestrator: LoadOrchestrator,
    distribution: DistributionLane,
    motion: MotionStrategy,
    scene: Box<dyn SceneHost>,
    events: EventBus<PopulationEvent>,
    rng: StdRng,
}

impl PopulationAgent {
    /// Creates an agent with no population. Must be called inside a tokio runtime.
    pub fn new(
        config: ViewerConfig,
        manifest: Vec<AssetId>,
        loader: Arc<dyn ModelLoader>,
        scene: Box<dyn SceneHost>,
    ) -> Result<Self, PopulationError> {
        config.validate()?;

        let distribution = DistributionLane::new(
            config.distribution,
            config.spacing,
            config.seed.map(|seed| seed.wrapping_add(1)),
        )?;
        let motion = MotionStrategy::from_config(config.motion, &config);
        let orchestrator = LoadOrchestrator::new(loader, config.load_timeout())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut agent = Self {
            catalog: AssetCatalog::new(manifest),
            candidates: Vec::new(),
            registry: PopulationRegistry::new(),
            orchestrator,
            distribution,
            motion,
            scene,
            events: EventBus::new(),
            rng,
            config,
        };
        let overrides = agent.parse_overrides(agent.config.override_tokens.clone());
        agent.catalog.set_overrides(overrides);
        agent.catalog.set_source(source_for(agent.config.use_override));

        log::info!(
            "PopulationAgent ready: {} manifest entries, {} override entries",
            agent.catalog.manifest().len(),
            agent.catalog.overrides().len()
        );
        Ok(agent)
    }

    // --- Loading ---

    /// Tears down the population and starts a new load session.
    ///
    /// Fails with a [`ConfigError`] before anything is torn down or loaded when
    /// the active catalog is empty.
    pub fn reload(&mut self) -> Result<SessionToken, PopulationError> {
        let active = self.catalog.active()?.to_vec();
        let target = self.config.target_count;

        let token = self.orchestrator.begin(target);
        let removed = self.registry.remove_all(&mut *self.scene);
        log::info!(
            "Session {} started: target {}, {} candidates, {} models torn down",
            token,
            target,
            active.len(),
            removed
        );
        self.events
            .publish(PopulationEvent::SessionStarted { token, target });

        let batch = select_initial(&active, target, &mut self.rng);
        self.candidates = active;
        self.orchestrator.issue(batch);
        Ok(token)
    }

    /// Reloads and waits until the new session settles.
    pub async fn populate(&mut self) -> Result<SessionReport, PopulationError> {
        self.reload()?;
        self.wait_until_settled().await
    }

    /// Processes completions until the current session settles.
    pub async fn wait_until_settled(&mut self) -> Result<SessionReport, PopulationError> {
        loop {
            let session = self
                .orchestrator
                .session()
                .ok_or(PopulationError::NoSession)?;
            if session.is_settled() {
                let report = session.report();
                self.orchestrator.reap();
                return Ok(report);
            }
            let completion = self.orchestrator.next().await?;
            self.handle_completion(completion);
        }
    }

    /// Per-frame tick: drains ready completions, then animates every record.
    ///
    /// `elapsed` is the time in seconds since the viewer started.
    pub fn update(&mut self, elapsed: f32) -> Result<(), PopulationError> {
        while let Some(completion) = self.orchestrator.try_next()? {
            self.handle_completion(completion);
        }
        self.orchestrator.reap();
        self.animate(elapsed);
        Ok(())
    }

    fn handle_completion(&mut self, completion: LoadCompletion) {
        let LoadCompletion { token, id, result } = completion;

        let duplicate = result.is_ok() && self.registry.contains(&id);
        let mut freed_slot = false;
        let accepted = match self.orchestrator.session_mut() {
            Some(session)
                if session.token() == token
                    && !session.is_settled()
                    && session.is_in_flight(&id) =>
            {
                match &result {
                    Ok(_) if duplicate => {
                        log::warn!("'{}' is already in the population; releasing the copy", id);
                        session.record_duplicate(&id);
                        freed_slot = true;
                    }
                    Ok(_) => session.record_success(&id),
                    Err(_) => session.record_failure(&id),
                }
                !freed_slot
            }
            Some(session) => {
                session.record_discard();
                false
            }
            None => false,
        };

        if !accepted {
            log::debug!("Discarding completion for '{}' from session {}", id, token);
            if let Ok(model) = result {
                self.scene.remove_object(model.handle);
            }
            if freed_slot {
                self.advance();
            }
            return;
        }

        match result {
            Ok(model) => self.admit(id, model),
            Err(err) => {
                log::warn!("Failed to load '{}': {}", id, err);
                self.events
                    .publish(PopulationEvent::LoadFailed { id, reason: err });
            }
        }
        self.advance();
    }

    /// Places a freshly loaded model and hands it to the scene.
    fn admit(&mut self, id: AssetId, model: LoadedModel) {
        let Some(session) = self.orchestrator.session() else {
            return;
        };
        let (loaded, target) = (session.loaded(), session.target());

        let rest = self.distribution.place(self.registry.len(), target);
        let mut record = ModelRecord {
            id: id.clone(),
            handle: model.handle,
            local_bounds: model.bounds,
            rest_position: Some(rest),
            position: rest,
            initial_phase: None,
            rotation_axis: random_axis(&mut self.rng),
            rotation_speed: self.rng.gen_range(ROTATION_SPEED_MIN..ROTATION_SPEED_MAX),
            rotation: Quaternion::IDENTITY,
            bounds: None,
        };

        let scale = self.config.scale;
        self.scene
            .apply_material(model.handle, &self.config.material.spec());
        self.scene.add_object(model.handle);
        self.scene.set_transform(model.handle, record.transform(scale));
        record.bounds = self
            .scene
            .add_bounds(record.world_bounds(scale), self.config.show_bounds);

        let extent = record.extent();
        self.registry.add(record);
        self.registry.refresh_phases();

        log::info!("Loaded '{}' ({}/{})", id, loaded, target);
        log::debug!(
            "'{}' extent {:.2} x {:.2} x {:.2}",
            id,
            extent.x,
            extent.y,
            extent.z
        );
        self.events.publish(PopulationEvent::ModelLoaded {
            id,
            loaded,
            target,
        });
    }

    /// Settles the session or issues a backfill batch once nothing is in flight.
    fn advance(&mut self) {
        let Some(session) = self.orchestrator.session_mut() else {
            return;
        };
        if session.is_settled() {
            return;
        }
        if session.loaded() >= session.target() {
            self.settle(Settlement::Full);
            return;
        }
        if session.in_flight() > 0 {
            return;
        }

        session.set_state(SessionState::Backfilling);
        let remaining = session.remaining();
        let batch = backfill_candidates(
            &self.candidates,
            &self.registry,
            session,
            self.config.max_attempts_per_asset,
            remaining.saturating_add(self.config.backfill_overshoot),
            &mut self.rng,
        );
        if batch.is_empty() {
            self.settle(Settlement::Short {
                shortfall: remaining,
            });
            return;
        }

        let round = session.report().rounds + 1;
        log::info!(
            "Backfill round {}: {} loads to replace {} missing models",
            round,
            batch.len(),
            remaining
        );
        self.events.publish(PopulationEvent::BackfillIssued {
            round,
            count: batch.len(),
        });
        self.orchestrator.issue(batch);
    }

    fn settle(&mut self, settlement: Settlement) {
        let Some(session) = self.orchestrator.session_mut() else {
            return;
        };
        session.settle(settlement);
        let report = session.report();
        self.orchestrator.abort_all();

        match settlement {
            Settlement::Full => log::info!(
                "Session {} settled: {} models loaded, {} failed, {} rounds",
                report.token,
                report.loaded,
                report.failed,
                report.rounds
            ),
            Settlement::Short { shortfall } => {
                log::warn!(
                    "Only able to load {} of {} requested models ({} missing)",
                    report.loaded,
                    report.target,
                    shortfall
                );
                self.relayout();
            }
        }
        self.events.publish(PopulationEvent::Settled(report));
    }

    // --- Placement and animation ---

    /// Re-runs placement over the whole registry.
    ///
    /// While a session is still loading, models keep the slots of a layout sized
    /// for the target so later admissions fill the rest. Otherwise the layout
    /// closes up around the models actually loaded.
    fn relayout(&mut self) {
        let total = match self.orchestrator.session() {
            Some(session) if !session.is_settled() => session.target().max(self.registry.len()),
            _ => self.registry.len(),
        };
        for (index, record) in self.registry.iter_mut().enumerate() {
            let rest = self.distribution.place(index, total);
            record.rest_position = Some(rest);
            record.position = rest;
        }
        self.registry.refresh_phases();
        self.push_transforms();
    }

    fn push_transforms(&mut self) {
        let scale = self.config.scale;
        for record in self.registry.iter() {
            self.scene.set_transform(record.handle, record.transform(scale));
            if let Some(bounds) = record.bounds {
                self.scene.update_bounds(bounds, record.world_bounds(scale));
            }
        }
    }

    fn animate(&mut self, elapsed: f32) {
        let scale = self.config.scale;
        let spin_scale = self.config.rotation_speed_scale;
        for record in self.registry.iter_mut() {
            if let Some(position) =
                self.motion
                    .step(record.rest_position, record.initial_phase, elapsed)
            {
                record.position = position;
            }
            record.rotation = motion_lane::spin(
                record.rotation,
                record.rotation_axis,
                record.rotation_speed * spin_scale,
            );

            self.scene.set_transform(record.handle, record.transform(scale));
            if let Some(bounds) = record.bounds {
                self.scene.update_bounds(bounds, record.world_bounds(scale));
            }
        }
    }

    // --- Live configuration ---

    /// Switches the layout and re-places every model.
    pub fn set_distribution(&mut self, name: &str) -> Result<(), PopulationError> {
        let kind: DistributionKind = name.parse()?;
        self.config.distribution = kind;
        self.distribution.set_kind(kind);
        log::info!("Distribution set to '{}'", kind);
        self.relayout();
        Ok(())
    }

    /// Switches the animation. Every model snaps back to rest before the next step.
    pub fn set_motion(&mut self, name: &str) -> Result<(), PopulationError> {
        let kind: MotionKind = name.parse()?;
        self.config.motion = kind;
        self.motion = MotionStrategy::from_config(kind, &self.config);
        for record in self.registry.iter_mut() {
            if let Some(rest) = record.rest_position {
                record.position = rest;
            }
        }
        self.registry.refresh_phases();
        self.push_transforms();
        log::info!("Motion set to '{}'", kind);
        Ok(())
    }

    /// Rescales the active layout and re-places every model.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), PopulationError> {
        self.distribution.set_spacing(spacing)?;
        self.config.spacing = spacing;
        self.relayout();
        Ok(())
    }

    /// Applies a material preset to every model, current and future.
    pub fn set_material(&mut self, name: &str) -> Result<(), PopulationError> {
        let preset: MaterialPreset = name.parse()?;
        self.config.material = preset;
        let spec = preset.spec();
        for record in self.registry.iter() {
            self.scene.apply_material(record.handle, &spec);
        }
        Ok(())
    }

    /// Changes the uniform scale of every model.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), PopulationError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidTuning("scale must be finite and positive").into());
        }
        self.config.scale = scale;
        self.push_transforms();
        Ok(())
    }

    /// Scales how fast every model spins. Zero freezes the current orientations.
    pub fn set_rotation_speed_scale(&mut self, scale: f32) -> Result<(), PopulationError> {
        validate_rotation_speed_scale(scale)?;
        self.config.rotation_speed_scale = scale;
        Ok(())
    }

    /// Shows or hides every bounding-box helper.
    pub fn set_show_bounds(&mut self, visible: bool) {
        self.config.show_bounds = visible;
        for bounds in self.registry.iter().filter_map(|record| record.bounds) {
            self.scene.set_bounds_visible(bounds, visible);
        }
    }

    /// Changes the population size and reloads.
    pub fn set_target_count(&mut self, target: usize) -> Result<SessionToken, PopulationError> {
        validate_target(target)?;
        self.config.target_count = target;
        self.reload()
    }

    /// Replaces the override list from comma-separated input.
    ///
    /// Reloads when the override list is the active source.
    pub fn set_override_tokens(
        &mut self,
        input: &str,
    ) -> Result<Option<SessionToken>, PopulationError> {
        let list = self.parse_overrides(input.split(','));
        if self.config.use_override && list.is_empty() {
            return Err(ConfigError::EmptyOverrideList.into());
        }
        self.config.override_tokens = list
            .ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        self.catalog.set_overrides(list);
        if self.config.use_override {
            self.reload().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Selects the override list or the manifest, then reloads.
    ///
    /// Turning the override list off also clears it. Selecting an empty list
    /// fails without touching the running session.
    pub fn set_use_override(&mut self, enabled: bool) -> Result<SessionToken, PopulationError> {
        self.catalog.list(source_for(enabled))?;
        self.config.use_override = enabled;
        if !enabled {
            self.config.override_tokens.clear();
            self.catalog.set_overrides(OverrideList::default());
        }
        self.catalog.set_source(source_for(enabled));
        self.reload()
    }

    fn parse_overrides<I, S>(&self, tokens: I) -> OverrideList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = OverrideList::from_tokens(
            tokens,
            &self.config.override_prefix,
            &self.config.asset_suffix,
        );
        if list.truncated() > 0 {
            self.events.publish(PopulationEvent::OverrideTruncated {
                kept: list.len(),
                dropped: list.truncated(),
            });
        }
        list
    }

    // --- Accessors ---

    /// The live configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The asset catalog.
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// The loaded population.
    pub fn registry(&self) -> &PopulationRegistry {
        &self.registry
    }

    /// Progress notifications. Drain once per frame.
    pub fn events(&self) -> &EventBus<PopulationEvent> {
        &self.events
    }

    /// Counters of the current session, if one has started.
    pub fn session_report(&self) -> Option<SessionReport> {
        self.orchestrator.session().map(|session| session.report())
    }

    /// The active layout.
    pub fn distribution(&self) -> DistributionStrategy {
        self.distribution.strategy()
    }

    /// The active animation.
    pub fn motion(&self) -> MotionStrategy {
        self.motion
    }
}

fn source_for(use_override: bool) -> CatalogSource {
    if use_override {
        CatalogSource::Override
    } else {
        CatalogSource::Manifest
    }
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let axis = Vec3::new(
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
    );
    if axis.length_squared() > EPSILON {
        axis.normalize()
    } else {
        Vec3::Y
    }
}

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

mod common;

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use common::{agent, config, ids, names, ScriptedLoader};
use menagerie_agents::population_agent::Settlement;
use menagerie_agents::PopulationError;
use menagerie_core::config::{DistributionKind, MotionKind};
use menagerie_core::math::{Quaternion, Vec3, TAU};
use menagerie_core::ConfigError;
use menagerie_lanes::distribution_lane::DistributionStrategy;
use menagerie_lanes::motion_lane::MotionStrategy;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::test]
async fn test_switching_motion_resets_positions_to_rest() {
    // --- ARRANGE ---
    let (mut agent, scene) = agent(config(6), names("m", 6), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();
    agent.update(1.3).unwrap();
    let moved = agent
        .registry()
        .iter()
        .filter(|r| Some(r.position) != r.rest_position)
        .count();
    assert!(moved > 0, "wave motion should displace models");

    // --- ACT ---
    agent.set_motion("orbit").unwrap();

    // --- ASSERT ---
    assert_eq!(agent.motion().kind(), MotionKind::Orbit);
    let scene = scene.lock().unwrap();
    for (index, record) in agent.registry().iter().enumerate() {
        assert_eq!(Some(record.position), record.rest_position);
        assert_eq!(scene.transforms[&record.handle].position, record.position);
        assert_relative_eq!(
            record.initial_phase.unwrap(),
            index as f32 / 6.0 * TAU,
            epsilon = 1e-5
        );
    }
}

#[tokio::test]
async fn test_orbit_keeps_rest_height_every_frame() {
    let mut cfg = config(5);
    cfg.motion = MotionKind::Orbit;
    cfg.distribution = DistributionKind::Spiral;
    let (mut agent, _) = agent(cfg, names("m", 5), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();

    for frame in 1..=30 {
        agent.update(frame as f32 / 30.0).unwrap();
        for record in agent.registry().iter() {
            let rest = record.rest_position.unwrap();
            assert_relative_eq!(record.position.y, rest.y);
            assert_relative_eq!(
                (record.position.x.powi(2) + record.position.z.powi(2)).sqrt(),
                rest.length(),
                epsilon = 1e-3
            );
        }
    }
}

#[tokio::test]
async fn test_spin_keeps_unit_rotations() {
    let (mut agent, _) = agent(config(3), names("m", 3), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();

    for frame in 0..120 {
        agent.update(frame as f32 / 60.0).unwrap();
    }
    for record in agent.registry().iter() {
        assert_relative_eq!(record.rotation.magnitude(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(record.rotation_axis.length(), 1.0, epsilon = 1e-4);
        assert!((0.002..0.012).contains(&record.rotation_speed));
    }
}

#[tokio::test]
async fn test_switching_distribution_replaces_every_rest_position() {
    // --- ARRANGE ---
    let (mut agent, _) = agent(config(8), names("m", 8), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();

    // --- ACT ---
    agent.set_distribution("cylinder").unwrap();

    // --- ASSERT ---
    assert_eq!(
        agent.distribution(),
        DistributionStrategy::Cylinder {
            radius: 12.0,
            height: 24.0
        }
    );
    for record in agent.registry().iter() {
        let rest = record.rest_position.unwrap();
        assert_relative_eq!((rest.x.powi(2) + rest.z.powi(2)).sqrt(), 12.0, epsilon = 1e-3);
    }

    assert!(matches!(
        agent.set_distribution("torus"),
        Err(PopulationError::Config(ConfigError::UnknownDistribution(_)))
    ));
    assert_eq!(agent.config().distribution, DistributionKind::Cylinder);
}

#[tokio::test]
async fn test_spacing_rescales_the_layout() {
    let mut cfg = config(4);
    cfg.distribution = DistributionKind::Sphere;
    let (mut agent, _) = agent(cfg, names("m", 4), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();

    agent.set_spacing(1.5).unwrap();

    for record in agent.registry().iter() {
        assert_relative_eq!(record.rest_position.unwrap().length(), 3.0, epsilon = 1e-4);
    }
    assert!(matches!(
        agent.set_spacing(-1.0),
        Err(PopulationError::Config(ConfigError::InvalidSpacing(_)))
    ));
}

#[tokio::test]
async fn test_unknown_motion_keeps_the_current_one() {
    let (mut agent, _) = agent(config(2), names("m", 2), Arc::new(ScriptedLoader::new()));
    let before = agent.motion();
    assert!(matches!(
        agent.set_motion("bounce"),
        Err(PopulationError::Config(ConfigError::UnknownMotion(_)))
    ));
    assert_eq!(agent.motion(), before);
    assert!(matches!(before, MotionStrategy::Wave { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_layout_change_while_loading_keeps_every_slot_distinct() {
    // --- ARRANGE ---
    let mut cfg = config(4);
    cfg.distribution = DistributionKind::Wave;
    let loader = ScriptedLoader::new().delay_matching("late", Duration::from_secs(5));
    let manifest = ids(&["e0.glb", "e1.glb", "late0.glb", "late1.glb"]);
    let (mut agent, _) = agent(cfg, manifest, Arc::new(loader));
    agent.reload().unwrap();
    for _ in 0..50 {
        if agent.registry().len() == 2 {
            break;
        }
        tokio::task::yield_now().await;
        agent.update(0.0).unwrap();
    }
    assert_eq!(agent.registry().len(), 2);

    // --- ACT ---
    agent.set_distribution("cylinder").unwrap();
    let report = agent.wait_until_settled().await.unwrap();

    // --- ASSERT ---
    assert_eq!(report.settlement, Some(Settlement::Full));
    let cylinder = DistributionStrategy::from_kind(DistributionKind::Cylinder, agent.config().spacing);
    let mut rng = StdRng::seed_from_u64(0);
    let rests: Vec<Vec3> = agent
        .registry()
        .iter()
        .map(|record| record.rest_position.unwrap())
        .collect();
    assert_eq!(rests.len(), 4);
    for (index, rest) in rests.iter().enumerate() {
        assert_eq!(*rest, cylinder.place(index, 4, &mut rng));
    }
    for (i, a) in rests.iter().enumerate() {
        for b in &rests[i + 1..] {
            assert!(a.distance(*b) > 1e-3, "{a:?} and {b:?} share a slot");
        }
    }
}

#[tokio::test]
async fn test_rotation_speed_scale_controls_spin() {
    // --- ARRANGE ---
    let (mut agent, _) = agent(config(3), names("m", 3), Arc::new(ScriptedLoader::new()));
    agent.populate().await.unwrap();
    let rotations = |agent: &menagerie_agents::PopulationAgent| -> Vec<Quaternion> {
        agent.registry().iter().map(|record| record.rotation).collect()
    };

    // --- ACT ---
    agent.set_rotation_speed_scale(0.0).unwrap();
    let frozen = rotations(&agent);
    for frame in 0..30 {
        agent.update(frame as f32 / 60.0).unwrap();
    }

    // --- ASSERT ---
    for (before, after) in frozen.iter().zip(rotations(&agent)) {
        assert_relative_eq!(before.x, after.x, epsilon = 1e-5);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-5);
        assert_relative_eq!(before.z, after.z, epsilon = 1e-5);
        assert_relative_eq!(before.w, after.w, epsilon = 1e-5);
    }

    agent.set_rotation_speed_scale(10.0).unwrap();
    agent.update(1.0).unwrap();
    for (before, after) in frozen.iter().zip(rotations(&agent)) {
        let moved = (before.x - after.x).abs()
            + (before.y - after.y).abs()
            + (before.z - after.z).abs()
            + (before.w - after.w).abs();
        assert!(moved > 1e-4, "spin should resume once the scale is raised");
    }

    assert!(matches!(
        agent.set_rotation_speed_scale(11.0),
        Err(PopulationError::Config(ConfigError::InvalidTuning(_)))
    ));
    assert_eq!(agent.config().rotation_speed_scale, 10.0);
}

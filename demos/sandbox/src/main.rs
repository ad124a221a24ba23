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

// Menagerie Sandbox
// Headless viewer: loads a population from disk, animates it, then reports.

mod loader;
mod scene;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use menagerie_agents::{PopulationAgent, PopulationEvent};

use loader::DirectoryLoader;
use scene::HeadlessScene;

#[derive(Parser, Debug)]
#[command(version, about = "Headless Menagerie viewer")]
struct Args {
    /// Viewer configuration (TOML).
    #[arg(long, default_value = "Viewer.toml")]
    config: PathBuf,
    /// Manifest table listing the loadable models.
    #[arg(long, default_value = "data/models.csv")]
    manifest: PathBuf,
    /// Directory the model files are read from.
    #[arg(long, default_value = "models")]
    models: PathBuf,
    /// Number of frames to animate.
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Comma-separated override list; enables the override source when given.
    #[arg(long)]
    only: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = settings::load_config(&args.config)?;
    if let Some(only) = &args.only {
        config.use_override = true;
        config.override_tokens = only.split(',').map(str::to_string).collect();
    }
    let manifest = settings::load_manifest(&args.manifest, &config).await?;

    let scene = HeadlessScene::new();
    let loader = Arc::new(DirectoryLoader::new(&args.models));
    let mut agent = PopulationAgent::new(config, manifest, loader, Box::new(scene.clone()))
        .context("Failed to create the population agent")?;

    agent.reload().context("Failed to start loading")?;

    let frame = Duration::from_millis(16);
    let mut ticker = tokio::time::interval(frame);
    for index in 0..args.frames {
        ticker.tick().await;
        agent.update(index as f32 * frame.as_secs_f32())?;
        for event in agent.events().drain() {
            report_event(&event);
        }
    }

    let stats = scene.stats();
    match agent.session_report() {
        Some(report) => log::info!(
            "Summary: {}/{} loaded, {} failed, {} rounds, {} discarded, {:?}",
            report.loaded,
            report.target,
            report.failed,
            report.rounds,
            report.discarded,
            report.settlement
        ),
        None => log::warn!("Summary: no session was started"),
    }
    log::info!(
        "Scene: {} objects, {} visible helpers, reach {:.2}",
        stats.objects,
        stats.visible_helpers,
        stats.reach
    );
    Ok(())
}

fn report_event(event: &PopulationEvent) {
    match event {
        PopulationEvent::BackfillIssued { round, count } => {
            log::info!("Backfill round {}: {} more loads", round, count)
        }
        PopulationEvent::Settled(report) => {
            log::info!("Population settled after {} rounds", report.rounds)
        }
        PopulationEvent::OverrideTruncated { kept, dropped } => {
            log::warn!("Override list capped at {} ({} dropped)", kept, dropped)
        }
        other => log::debug!("{:?}", other),
    }
}

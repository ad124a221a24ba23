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

//! Loading the viewer configuration and the manifest from disk.

use std::path::Path;

use anyhow::{Context, Result};
use menagerie_core::asset::AssetId;
use menagerie_core::ViewerConfig;
use menagerie_lanes::catalog_lane::parse_manifest;

/// Reads a TOML viewer configuration. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    if !path.exists() {
        log::info!(
            "No configuration at {}, using defaults",
            path.display()
        );
        return Ok(ViewerConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ViewerConfig =
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

/// Reads the manifest table. A missing file is an empty manifest.
pub async fn load_manifest(path: &Path, config: &ViewerConfig) -> Result<Vec<AssetId>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(parse_manifest(
            &text,
            config.manifest_column,
            &config.asset_suffix,
        )),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Manifest {} not found", path.display());
            Ok(Vec::new())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

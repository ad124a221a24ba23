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

use serde::Deserialize;
use std::path::PathBuf;

/// Represents the structure of the `Catalog.toml` file.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directories scanned recursively for model files.
    pub source_directories: Vec<PathBuf>,
    /// Only files whose name ends with this suffix are listed.
    pub suffix: String,
    /// Where the manifest table is written.
    pub output: PathBuf,
}

impl Default for CatalogConfig {
    /// Scans `models/` for `.glb` files and writes `data/models.csv`.
    fn default() -> Self {
        Self {
            source_directories: vec![PathBuf::from("models")],
            suffix: ".glb".to_string(),
            output: PathBuf::from("data/models.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CatalogConfig = toml::from_str("suffix = \".gltf\"").unwrap();
        assert_eq!(config.suffix, ".gltf");
        assert_eq!(config.source_directories, vec![PathBuf::from("models")]);
        assert_eq!(config.output, PathBuf::from("data/models.csv"));
    }
}

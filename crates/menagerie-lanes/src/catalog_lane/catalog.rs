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

use menagerie_core::asset::AssetId;
use menagerie_core::ConfigError;

use super::OverrideList;

/// Which identifier list a catalog serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// The bulk manifest read at startup.
    #[default]
    Manifest,
    /// The user-supplied override list.
    Override,
}

/// The enumerable set of loadable identifiers.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    manifest: Vec<AssetId>,
    overrides: OverrideList,
    source: CatalogSource,
}

impl AssetCatalog {
    /// Creates a catalog serving `manifest`.
    pub fn new(manifest: Vec<AssetId>) -> Self {
        Self {
            manifest,
            ..Default::default()
        }
    }

    /// Replaces the override list.
    pub fn set_overrides(&mut self, overrides: OverrideList) {
        self.overrides = overrides;
    }

    /// Selects which list [`AssetCatalog::active`] returns.
    pub fn set_source(&mut self, source: CatalogSource) {
        self.source = source;
    }

    /// The selected list.
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// The manifest list.
    pub fn manifest(&self) -> &[AssetId] {
        &self.manifest
    }

    /// The override list.
    pub fn overrides(&self) -> &OverrideList {
        &self.overrides
    }

    /// The active list, or an error if it is empty.
    pub fn active(&self) -> Result<&[AssetId], ConfigError> {
        self.list(self.source)
    }

    /// The list `source` would serve, or an error if it is empty.
    pub fn list(&self, source: CatalogSource) -> Result<&[AssetId], ConfigError> {
        match source {
            CatalogSource::Manifest if self.manifest.is_empty() => Err(ConfigError::EmptyCatalog),
            CatalogSource::Manifest => Ok(&self.manifest),
            CatalogSource::Override if self.overrides.is_empty() => {
                Err(ConfigError::EmptyOverrideList)
            }
            CatalogSource::Override => Ok(self.overrides.ids()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Vec<AssetId> {
        vec!["a.glb".into(), "b.glb".into()]
    }

    #[test]
    fn test_manifest_is_active_by_default() {
        let catalog = AssetCatalog::new(manifest());
        assert_eq!(catalog.source(), CatalogSource::Manifest);
        assert_eq!(catalog.active().unwrap(), manifest().as_slice());
    }

    #[test]
    fn test_empty_sources_are_config_errors() {
        let mut catalog = AssetCatalog::new(Vec::new());
        assert_eq!(catalog.active(), Err(ConfigError::EmptyCatalog));

        catalog.set_source(CatalogSource::Override);
        assert_eq!(catalog.active(), Err(ConfigError::EmptyOverrideList));
    }

    #[test]
    fn test_override_list_replaces_manifest_when_selected() {
        let mut catalog = AssetCatalog::new(manifest());
        catalog.set_overrides(OverrideList::parse("smile", "emoji_", ".glb"));
        catalog.set_source(CatalogSource::Override);
        assert_eq!(catalog.active().unwrap(), &[AssetId::from("emoji_smile.glb")]);
    }

    #[test]
    fn test_list_checks_a_source_without_selecting_it() {
        let catalog = AssetCatalog::new(manifest());
        assert_eq!(
            catalog.list(CatalogSource::Override),
            Err(ConfigError::EmptyOverrideList)
        );
        assert_eq!(catalog.source(), CatalogSource::Manifest);
        assert_eq!(catalog.list(CatalogSource::Manifest).unwrap(), manifest().as_slice());
    }
}

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

use std::collections::HashSet;

use menagerie_core::asset::AssetId;
use menagerie_core::config::MAX_OVERRIDE_ENTRIES;

/// A normalised, capped user override list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideList {
    ids: Vec<AssetId>,
    truncated: usize,
}

impl OverrideList {
    /// Parses a comma-separated string of tokens.
    pub fn parse(input: &str, prefix: &str, suffix: &str) -> Self {
        Self::from_tokens(input.split(','), prefix, suffix)
    }

    /// Builds the list from individual tokens.
    ///
    /// Tokens are trimmed and empty ones dropped. A token without `suffix` becomes
    /// `{prefix}{token}{suffix}`. Duplicates keep their first occurrence, and
    /// anything past the first 100 entries is dropped with a warning.
    pub fn from_tokens<I, S>(tokens: I, prefix: &str, suffix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            let name = if token.ends_with(suffix) {
                token.to_string()
            } else {
                format!("{prefix}{token}{suffix}")
            };
            if seen.insert(name.clone()) {
                ids.push(AssetId::new(name));
            }
        }

        let truncated = ids.len().saturating_sub(MAX_OVERRIDE_ENTRIES);
        if truncated > 0 {
            log::warn!(
                "Override list holds {} entries; only the first {} are kept",
                ids.len(),
                MAX_OVERRIDE_ENTRIES
            );
            ids.truncate(MAX_OVERRIDE_ENTRIES);
        }
        Self { ids, truncated }
    }

    /// The kept identifiers, in input order.
    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    /// How many entries were dropped by the cap.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Number of kept identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no identifier was kept.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_trimmed_and_normalised() {
        let list = OverrideList::parse(" smile , heart.glb,, ,cat ", "emoji_", ".glb");
        let names: Vec<&str> = list.ids().iter().map(AssetId::as_str).collect();
        assert_eq!(names, ["emoji_smile.glb", "heart.glb", "emoji_cat.glb"]);
        assert_eq!(list.truncated(), 0);
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let list = OverrideList::parse("smile,emoji_smile.glb,smile", "emoji_", ".glb");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_list_is_capped() {
        let tokens: Vec<String> = (0..130).map(|i| format!("e{i}")).collect();
        let list = OverrideList::from_tokens(&tokens, "emoji_", ".glb");
        assert_eq!(list.len(), MAX_OVERRIDE_ENTRIES);
        assert_eq!(list.truncated(), 30);
        assert_eq!(list.ids()[99].as_str(), "emoji_e99.glb");
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(OverrideList::parse(" , ,", "emoji_", ".glb").is_empty());
    }
}

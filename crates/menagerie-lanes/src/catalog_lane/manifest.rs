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

/// Parses a manifest table into an ordered, duplicate-free identifier list.
///
/// The first line is a header and is skipped. The identifier is read from the
/// zero-based `column`; fields may be double-quoted. Rows that are blank, too
/// short, or whose value lacks `suffix` are skipped.
pub fn parse_manifest(text: &str, column: usize, suffix: &str) -> Vec<AssetId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut skipped = 0usize;

    for row in text.lines().skip(1) {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }
        let fields = split_fields(row);
        let Some(value) = fields.get(column).map(|f| f.trim()) else {
            skipped += 1;
            continue;
        };
        if value.is_empty() || !value.ends_with(suffix) {
            skipped += 1;
            continue;
        }
        if seen.insert(value.to_string()) {
            ids.push(AssetId::new(value));
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} manifest rows without a usable identifier", skipped);
    }
    log::info!("Parsed {} asset identifiers from manifest", ids.len());
    ids
}

/// Splits one row on commas, honouring double quotes. `""` inside quotes is a literal quote.
pub fn split_fields(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
path,filename,size
glb_flat/a.glb,a.glb,120
glb_flat/b.glb,\"b.glb\",300

broken-row
glb_flat/readme.txt,readme.txt,10
\"glb_flat/c, copy.glb\",\"c, copy.glb\",42
glb_flat/a.glb,a.glb,120
";

    #[test]
    fn test_manifest_keeps_suffixed_unique_values_in_order() {
        let ids = parse_manifest(MANIFEST, 1, ".glb");
        let names: Vec<&str> = ids.iter().map(AssetId::as_str).collect();
        assert_eq!(names, ["a.glb", "b.glb", "c, copy.glb"]);
    }

    #[test]
    fn test_manifest_header_only_is_empty() {
        assert!(parse_manifest("path,filename\n", 1, ".glb").is_empty());
        assert!(parse_manifest("", 1, ".glb").is_empty());
    }

    #[test]
    fn test_manifest_column_is_configurable() {
        let ids = parse_manifest("name\nx.glb\ny.glb\n", 0, ".glb");
        assert_eq!(ids, vec![AssetId::from("x.glb"), AssetId::from("y.glb")]);
    }

    #[test]
    fn test_split_fields_handles_quotes() {
        assert_eq!(split_fields("a,\"b,c\",d"), ["a", "b,c", "d"]);
        assert_eq!(split_fields("\"say \"\"hi\"\"\",x"), ["say \"hi\"", "x"]);
        assert_eq!(split_fields("a,,b"), ["a", "", "b"]);
    }
}

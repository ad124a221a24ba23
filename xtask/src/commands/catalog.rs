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

//! Builds the model manifest table read by the viewer.
//!
//! The table has a header row followed by one `path,filename,size_bytes` row per
//! model. The viewer reads identifiers from the `filename` column.

use crate::commands::catalog_config::CatalogConfig;
use crate::helpers::*;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HEADER: &str = "path,filename,size_bytes";

/// One row of the manifest table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
}

pub fn generate() -> Result<()> {
    print_task_start("Generating Model Catalog", LEDGER, CYAN);

    let config = load_config(Path::new("Catalog.toml"))?;
    let entries = scan(&config)?;
    if entries.is_empty() {
        print_error("No model files found. The manifest was not written.");
        return Ok(());
    }

    println!(
        "{}🔎 Found:{} {} model files ending in '{}'.",
        BOLD,
        RESET,
        entries.len(),
        config.suffix
    );
    write_table(&entries, &config.output)?;

    print_success(&format!(
        "Wrote {} entries to '{}'",
        entries.len(),
        config.output.display()
    ));
    Ok(())
}

/// Loads `Catalog.toml`, or the default configuration when it does not exist.
fn load_config(path: &Path) -> Result<CatalogConfig> {
    if !path.exists() {
        print_info(&format!(
            "No '{}' found. Using default configuration.",
            path.display()
        ));
        return Ok(CatalogConfig::default());
    }

    print_info(&format!("Found '{}'. Loading configuration.", path.display()));
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog config at '{}'", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
}

/// Recursively lists model files, sorted and unique by file name.
///
/// Missing source directories are skipped. When two directories hold the same
/// file name, the first path in sort order wins.
fn scan(config: &CatalogConfig) -> Result<Vec<CatalogEntry>> {
    let mut by_name: BTreeMap<String, CatalogEntry> = BTreeMap::new();

    for dir in &config.source_directories {
        if !dir.exists() {
            print_info(&format!("Skipping missing directory '{}'.", dir.display()));
            continue;
        }
        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        for path in paths {
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !filename.ends_with(&config.suffix) {
                continue;
            }
            if let Some(kept) = by_name.get(filename) {
                println!(
                    "{}{}⚠ Duplicate:{} '{}' shadowed by '{}'",
                    BOLD,
                    YELLOW,
                    RESET,
                    path.display(),
                    kept.path.display()
                );
                continue;
            }
            let size_bytes = fs::metadata(&path)
                .with_context(|| format!("Failed to stat '{}'", path.display()))?
                .len();
            by_name.insert(
                filename.to_string(),
                CatalogEntry {
                    filename: filename.to_string(),
                    path,
                    size_bytes,
                },
            );
        }
    }

    Ok(by_name.into_values().collect())
}

/// Writes the manifest table, creating the parent directory if needed.
fn write_table(entries: &[CatalogEntry], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(output, render_table(entries))
        .with_context(|| format!("Failed to write manifest to '{}'", output.display()))
}

fn render_table(entries: &[CatalogEntry]) -> String {
    let mut table = String::from(HEADER);
    table.push('\n');
    for entry in entries {
        let path = entry.path.to_string_lossy().replace('\\', "/");
        table.push_str(&format!(
            "{},{},{}\n",
            quote(&path),
            quote(&entry.filename),
            entry.size_bytes
        ));
    }
    table
}

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

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

// Build automation and scripting tasks for the Menagerie workspace
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{catalog, ci};

#[derive(Parser)]
#[command(name = "xtask", version, about = "Menagerie build automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build all crates in the workspace.
    Build,
    /// Run all tests in the workspace.
    Test,
    /// Run `cargo check` on all crates.
    Check,
    /// Format all code in the workspace.
    Format,
    /// Run clippy on all crates with warnings as errors.
    Clippy,
    /// Run every CI task in sequence.
    All,
    /// Scan model directories and write the manifest table.
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Build) => ci::build(),
        Some(Command::Test) => ci::test(),
        Some(Command::Check) => ci::check(),
        Some(Command::Format) => ci::format(),
        Some(Command::Clippy) => ci::clippy(),
        Some(Command::All) => ci::all(),
        Some(Command::Catalog) => catalog::generate(),
        None => {
            helpers::print_custom_help();
            Ok(())
        }
    }
}

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

use crate::helpers::*;
use anyhow::Result;
use std::time::Instant;

/// One cargo invocation of the CI pipeline.
struct CiTask {
    title: &'static str,
    label: &'static str,
    emoji: &'static str,
    color: &'static str,
    info: &'static str,
    args: &'static [&'static str],
}

const BUILD: CiTask = CiTask {
    title: "Building All Crates",
    label: "Build",
    emoji: HAMMER,
    color: BLUE,
    info: "Compiling all workspace crates in debug mode",
    args: &["build", "--workspace", "--exclude", "xtask"],
};

const TEST: CiTask = CiTask {
    title: "Running All Tests",
    label: "Tests",
    emoji: TEST_TUBE,
    color: GREEN,
    info: "Running unit tests, integration tests and doc tests",
    args: &["test", "--workspace"],
};

const CHECK_TASK: CiTask = CiTask {
    title: "Checking All Crates",
    label: "Check",
    emoji: MAGNIFIER,
    color: CYAN,
    info: "Checking code for errors without building executables",
    args: &["check", "--workspace"],
};

// `fmt` takes `--all`, not `--workspace`.
const FORMAT: CiTask = CiTask {
    title: "Formatting Code",
    label: "Format",
    emoji: BRUSH,
    color: MAGENTA,
    info: "Formatting code using rustfmt with default settings",
    args: &["fmt", "--all"],
};

const CLIPPY_TASK: CiTask = CiTask {
    title: "Running Clippy",
    label: "Clippy",
    emoji: CLIPPY,
    color: YELLOW,
    info: "Running Clippy linter with warnings as errors",
    args: &["clippy", "--workspace", "--", "-D", "warnings"],
};

const PIPELINE: [&CiTask; 5] = [&BUILD, &TEST, &CHECK_TASK, &FORMAT, &CLIPPY_TASK];

fn run(task: &CiTask) -> Result<()> {
    print_task_start(task.title, task.emoji, task.color);
    print_info(task.info);
    execute_command("cargo", task.args, task.label)
}

pub fn build() -> Result<()> {
    run(&BUILD)
}

pub fn test() -> Result<()> {
    run(&TEST)
}

pub fn check() -> Result<()> {
    run(&CHECK_TASK)
}

pub fn format() -> Result<()> {
    run(&FORMAT)
}

pub fn clippy() -> Result<()> {
    run(&CLIPPY_TASK)
}

pub fn all() -> Result<()> {
    println!("{}", BANNER);
    println!("{}{}Starting full build pipeline...{}", BOLD, CYAN, RESET);

    let start_time = Instant::now();
    let total = PIPELINE.len();
    let passed = PIPELINE
        .iter()
        .enumerate()
        .filter(|(i, task)| {
            println!("\n{}{}[{}/{}] {}{}", BOLD, BLUE, i + 1, total, task.label, RESET);
            run(task).is_ok()
        })
        .count();

    println!(
        "\n{}{}━━━ PIPELINE SUMMARY ━━━{}",
        BOLD, CYAN, RESET
    );
    if passed == total {
        print_success(&format!("All {} tasks completed successfully! {}", total, ROCKET));
    } else {
        print_error(&format!("{}/{} tasks completed", passed, total));
    }
    println!(
        "{}{}Total time: {:.2}s{}",
        BOLD,
        BLUE,
        start_time.elapsed().as_secs_f64(),
        RESET
    );

    if passed != total {
        anyhow::bail!("Pipeline failed with {}/{} successful tasks.", passed, total);
    }
    Ok(())
}

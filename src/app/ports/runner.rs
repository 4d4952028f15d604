// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::errors::Result;

/// Captured outcome of one child process: exit code plus both output
/// streams as ordered line sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// True when stdout carries no content at all (no lines, or only
    /// blank ones).
    pub fn stdout_is_blank(&self) -> bool {
        self.stdout.iter().all(|line| line.trim().is_empty())
    }

    pub fn stderr_text(&self) -> String {
        self.stderr.join("\n")
    }
}

/// The sole I/O boundary of the core: run an argument vector as a child
/// process, shell-free, and wait for it. No retry, no timeout; a hung
/// tool blocks the calling request, by design of the synchronous facade.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> Result<CommandResult>;
}

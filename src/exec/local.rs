// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::process::Command;

use tracing::{debug, warn};

use crate::app::errors::{Error, Result};
use crate::app::ports::{CommandResult, CommandRunner};

/// Runs argument vectors as local child processes, no shell involved.
/// Blocks until the child exits; bounded latency is the caller's concern.
#[derive(Debug, Default)]
pub struct LocalRunner;

impl LocalRunner {
    pub fn new() -> Self {
        LocalRunner
    }
}

impl CommandRunner for LocalRunner {
    fn run(&self, argv: &[String]) -> Result<CommandResult> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::configuration("empty argument vector"))?;
        debug!(command = %argv.join(" "), "spawning backend tool");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::Launch {
                command: argv.join(" "),
                source,
            })?;
        // A killed child has no code; report the conventional -1 so the
        // caller still sees a nonzero result.
        let exit_code = output.status.code().unwrap_or(-1);
        let result = CommandResult {
            exit_code,
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
        };
        if result.succeeded() && !result.stderr.is_empty() {
            warn!(
                command = %argv.join(" "),
                stderr = %result.stderr_text(),
                "backend tool wrote warnings to stderr"
            );
        }
        Ok(result)
    }
}

/// Split captured bytes into lines without dropping a trailing partial
/// line. Only the empty remainder after a final newline is discarded.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

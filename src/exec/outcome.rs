// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::errors::{Error, Result};
use crate::app::ports::CommandResult;

/// What a finished command means for the calling capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// stdout carries records to parse.
    Records,
    /// The backend reported "nothing matched", either through empty
    /// stdout on success or through a recognized stderr marker.
    Empty,
}

/// Shared validation applied to every `CommandResult` before parsing.
///
/// A nonzero exit code whose stderr matches one of the backend's known
/// empty-result markers resolves to [`Outcome::Empty`]; any other nonzero
/// exit is an execution failure carrying both streams. Whether `Empty`
/// then becomes an empty list or a `NotFound` error is per-operation
/// policy at the call site.
pub fn classify(
    command: &str,
    result: &CommandResult,
    empty_markers: &[&str],
) -> Result<Outcome> {
    if !result.succeeded() {
        let stderr = result.stderr_text();
        if empty_markers.iter().any(|marker| stderr.contains(marker)) {
            return Ok(Outcome::Empty);
        }
        return Err(Error::ExecutionFailure {
            command: command.to_string(),
            exit_code: result.exit_code,
            stdout: result.stdout.clone(),
            stderr: result.stderr.clone(),
        });
    }
    if result.stdout_is_blank() {
        return Ok(Outcome::Empty);
    }
    Ok(Outcome::Records)
}

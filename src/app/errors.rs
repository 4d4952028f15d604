// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::io;

use thiserror::Error;

/// Classified failure raised anywhere in the normalization pipeline.
///
/// Every variant carries enough context (source command, cause) for an
/// outer layer to decide severity without re-parsing the message.
#[derive(Debug, Error)]
pub enum Error {
    /// Deployment/config defect, e.g. an unknown command template. Fatal,
    /// never retried.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The child process could not be started at all (binary missing,
    /// permission denied). Distinct from a nonzero exit code.
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran and reported failure with no recognized empty-result
    /// marker on stderr.
    #[error("'{command}' exited with code {exit_code}")]
    ExecutionFailure {
        command: String,
        exit_code: i32,
        stdout: Vec<String>,
        stderr: Vec<String>,
    },

    /// The tool succeeded but produced no matching records where the
    /// operation requires at least one.
    #[error("'{command}' returned no matching records")]
    NotFound { command: String },

    /// Output did not match the expected shape: wrong field count,
    /// unparseable literal, unknown symbolic token, malformed markup.
    #[error("cannot parse output of '{command}': {reason}")]
    Parse { command: String, reason: String },

    /// The capability does not exist on the active backend.
    #[error("{operation} is not supported on {engine}")]
    Unsupported {
        operation: &'static str,
        engine: &'static str,
    },
}

/// Severity class an outer layer (HTTP, CLI) maps to its own codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Launch,
    ExecutionFailure,
    NotFound,
    Parse,
    Unsupported,
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(command: impl Into<String>) -> Self {
        Error::NotFound {
            command: command.into(),
        }
    }

    pub fn parse(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(operation: &'static str, engine: &'static str) -> Self {
        Error::Unsupported { operation, engine }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Launch { .. } => ErrorKind::Launch,
            Error::ExecutionFailure { .. } => ErrorKind::ExecutionFailure,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Command template resolution and rendering.
//!
//! Templates are keyed by `(engine, command)` and hold a single
//! command line. The line is split into tokens on whitespace outside
//! `{{ ... }}`/`{% ... %}` delimiters, and each token is rendered
//! independently, so a substituted value is always exactly one argv
//! element (even when it contains spaces, like a timestamp) and
//! execution never relies on shell re-splitting.

mod embedded;

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::info;

use crate::app::errors::{Error, Result};
use crate::app::model::EngineType;

enum Source {
    /// Template files under `<dir>/<engine>/<command>`.
    Directory(PathBuf),
    /// The compiled-in template set.
    Embedded,
}

/// Resolves and renders command templates. The directory-vs-embedded
/// choice is made once, when the store is built, not per call.
pub struct TemplateStore {
    source: Source,
}

impl TemplateStore {
    pub fn new(template_dir: Option<&Path>) -> Self {
        let source = match template_dir {
            Some(dir) if dir.is_dir() => {
                info!(dir = %dir.display(), "loading command templates from directory");
                Source::Directory(dir.to_path_buf())
            }
            Some(dir) => {
                info!(
                    dir = %dir.display(),
                    "template path is not a directory, using embedded templates"
                );
                Source::Embedded
            }
            None => Source::Embedded,
        };
        TemplateStore { source }
    }

    pub fn embedded() -> Self {
        TemplateStore {
            source: Source::Embedded,
        }
    }

    /// Render the `(engine, command)` template into the argv to execute.
    /// Every context variable a template references must be present;
    /// rendering is deterministic and performs no I/O beyond the one-time
    /// template read.
    pub fn compile(
        &self,
        engine: EngineType,
        command: &str,
        context: &Context,
    ) -> Result<Vec<String>> {
        let line = self.raw(engine, command)?;
        render_line(&line, context, engine, command)
    }

    fn raw(&self, engine: EngineType, command: &str) -> Result<String> {
        match &self.source {
            Source::Directory(dir) => {
                let path = dir.join(engine.as_str()).join(command);
                fs::read_to_string(&path).map_err(|err| {
                    Error::configuration(format!(
                        "no command template for {engine}/{command} at {}: {err}",
                        path.display()
                    ))
                })
            }
            Source::Embedded => embedded::EMBEDDED
                .iter()
                .find(|(e, name, _)| *e == engine && *name == command)
                .map(|(_, _, body)| body.to_string())
                .ok_or_else(|| {
                    Error::configuration(format!("no command template for {engine}/{command}"))
                }),
        }
    }
}

fn render_line(
    line: &str,
    context: &Context,
    engine: EngineType,
    command: &str,
) -> Result<Vec<String>> {
    let mut argv = Vec::new();
    for token in template_tokens(line) {
        let rendered = Tera::one_off(token, context, false).map_err(|err| {
            Error::configuration(format!(
                "template {engine}/{command}: cannot render token '{token}': {err}"
            ))
        })?;
        // Optional parameters render to nothing and vanish from the argv.
        if !rendered.is_empty() {
            argv.push(rendered);
        }
    }
    if argv.is_empty() {
        return Err(Error::configuration(format!(
            "template {engine}/{command} rendered an empty command line"
        )));
    }
    Ok(argv)
}

/// Split a template line on whitespace, except inside `{{ ... }}` and
/// `{% ... %}` delimiters. Each returned token is rendered on its own,
/// so whitespace inside a substituted value cannot split an argument.
fn template_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    let mut chars = line.char_indices().peekable();
    while let Some((index, current)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        match (current, next) {
            ('{', Some('{')) | ('{', Some('%')) => {
                if start.is_none() {
                    start = Some(index);
                }
                depth += 1;
                chars.next();
            }
            ('}', Some('}')) | ('%', Some('}')) if depth > 0 => {
                depth -= 1;
                chars.next();
            }
            _ if current.is_whitespace() && depth == 0 => {
                if let Some(begin) = start.take() {
                    tokens.push(&line[begin..index]);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(index);
                }
            }
        }
    }
    if let Some(begin) = start {
        tokens.push(&line[begin..]);
    }
    tokens
}

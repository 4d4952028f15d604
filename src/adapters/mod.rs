// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Engine-specific adapters. Everything below this module speaks one
//! backend's dialect; everything above it sees canonical entities only.

pub mod gridengine;
pub mod slurm;
mod status;
mod unsupported;

pub(crate) use status::{check_time_now, status_from_lines};
pub use unsupported::UnsupportedCapability;

use std::sync::Arc;

use tera::Context;

use crate::app::errors::Result;
use crate::app::model::EngineType;
use crate::app::ports::{CommandResult, CommandRunner};
use crate::template::TemplateStore;

/// Compile-then-run helper shared by all capability providers: resolves
/// the command template, renders it against the context, executes the
/// argv, and returns the human-readable command string for error
/// reporting alongside the captured result.
#[derive(Clone)]
pub(crate) struct Invoker {
    engine: EngineType,
    store: Arc<TemplateStore>,
    runner: Arc<dyn CommandRunner>,
}

impl Invoker {
    pub(crate) fn new(
        engine: EngineType,
        store: Arc<TemplateStore>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Invoker {
            engine,
            store,
            runner,
        }
    }

    pub(crate) fn invoke(
        &self,
        command: &str,
        context: &Context,
    ) -> Result<(String, CommandResult)> {
        let argv = self.store.compile(self.engine, command, context)?;
        let display = argv.join(" ");
        let result = self.runner.run(&argv)?;
        Ok((display, result))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::Invoker;
    use crate::app::errors::Result;
    use crate::app::model::EngineType;
    use crate::app::ports::{CommandResult, CommandRunner};
    use crate::template::TemplateStore;

    /// Replays canned results in order and records every argv it was
    /// asked to run.
    pub(crate) struct ScriptedRunner {
        responses: Mutex<VecDeque<CommandResult>>,
        pub(crate) calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        pub(crate) fn new(responses: Vec<CommandResult>) -> Arc<Self> {
            Arc::new(ScriptedRunner {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn argv(&self, index: usize) -> Vec<String> {
            self.calls.lock().unwrap()[index].clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, argv: &[String]) -> Result<CommandResult> {
            self.calls.lock().unwrap().push(argv.to_vec());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default())
        }
    }

    pub(crate) fn output(stdout: &str) -> CommandResult {
        CommandResult {
            exit_code: 0,
            stdout: stdout.lines().map(str::to_string).collect(),
            stderr: Vec::new(),
        }
    }

    pub(crate) fn failure(exit_code: i32, stderr: &str) -> CommandResult {
        CommandResult {
            exit_code,
            stdout: Vec::new(),
            stderr: stderr.lines().map(str::to_string).collect(),
        }
    }

    pub(crate) fn invoker(engine: EngineType, runner: Arc<ScriptedRunner>) -> Invoker {
        Invoker::new(engine, Arc::new(TemplateStore::embedded()), runner)
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{Job, JobFilter, JobState};
use crate::app::ports::JobCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_datetime, parse_f64, parse_i64};

use super::{delimited, is_not_applicable, state, ISO_TIME_PATTERN};

/// Field count of the squeue listing format compiled into the template:
/// id, priority, name, user, state name, state code, submit time,
/// partition, cpus.
const JOB_FIELDS: usize = 9;

/// scancel reports an already-gone job with this stderr marker.
const CANCEL_MARKER: &str = "Invalid job id";

pub struct Jobs {
    invoker: Invoker,
}

impl Jobs {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Jobs { invoker }
    }
}

impl JobCapability for Jobs {
    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let ids: Vec<String> = filter.ids.iter().map(i64::to_string).collect();
        let mut context = Context::new();
        context.insert("jobs", &ids.join(","));
        context.insert("users", &filter.owners.join(","));
        context.insert("states", &filter.states.join(","));
        context.insert("names", &filter.names.join(","));
        let (command, result) = self.invoker.invoke("job_list", &context)?;
        match classify(&command, &result, &[CANCEL_MARKER])? {
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Records => result
                .stdout
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| map_job(&command, line))
                .collect(),
        }
    }

    fn delete_jobs(&self, filter: &JobFilter) -> Result<()> {
        if filter.ids.is_empty() {
            return Err(Error::configuration(
                "job deletion requires explicit job ids",
            ));
        }
        let ids: Vec<String> = filter.ids.iter().map(i64::to_string).collect();
        let mut context = Context::new();
        context.insert("jobs", &ids.join(","));
        let (command, result) = self.invoker.invoke("job_delete", &context)?;
        match classify(&command, &result, &[CANCEL_MARKER])? {
            Outcome::Empty if !result.succeeded() => Err(Error::not_found(command)),
            _ => Ok(()),
        }
    }
}

fn map_job(command: &str, line: &str) -> Result<Job> {
    let wrap = |err: crate::parse::ScalarError| {
        Error::parse(command, format!("cannot map command result to Job: {err}"))
    };
    let fields = delimited::split_exact(command, line, JOB_FIELDS)?;
    let required = |index: usize, name: &str| -> Result<i64> {
        parse_i64(&fields[index]).map_err(wrap)?.ok_or_else(|| {
            Error::parse(command, format!("job record is missing '{name}'"))
        })
    };
    let state_name = fields[4].clone();
    let submit_time = if is_not_applicable(&fields[6]) {
        None
    } else {
        Some(parse_datetime(&fields[6], ISO_TIME_PATTERN).map_err(wrap)?)
    };
    Ok(Job {
        id: required(0, "job id")?,
        priority: parse_f64(&fields[1])
            .map_err(wrap)?
            .ok_or_else(|| Error::parse(command, "job record is missing 'priority'"))?,
        name: fields[2].clone(),
        owner: fields[3].clone(),
        state: JobState {
            category: state::classify(&state_name),
            state: state_name,
            code: fields[5].clone(),
        },
        submit_time,
        queue: (!fields[7].trim().is_empty()).then(|| fields[7].clone()),
        slots: required(8, "cpu count")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{failure, invoker, output, ScriptedRunner};
    use crate::app::errors::ErrorKind;
    use crate::app::model::{EngineType, JobCategory};

    const LISTING: &str = "\
42|4294901759|train.sh|alice|RUNNING|R|2024-09-17T08:00:05|debug|4
43|4294901758|wait.sh|bob|PENDING|PD|2024-09-17T09:30:00|debug|1";

    #[test]
    fn listing_maps_each_delimited_record() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let jobs = Jobs::new(invoker(EngineType::Slurm, runner.clone()));
        let listed = jobs.list_jobs(&JobFilter::default()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 42);
        assert_eq!(listed[0].state.category, JobCategory::Running);
        assert_eq!(listed[0].state.state, "RUNNING");
        assert_eq!(listed[0].state.code, "R");
        assert_eq!(listed[0].queue.as_deref(), Some("debug"));
        assert_eq!(listed[0].slots, 4);
        assert_eq!(listed[1].state.category, JobCategory::Pending);
        assert_eq!(
            runner.argv(0),
            vec![
                "squeue",
                "--noheader",
                "-o",
                "%i|%Q|%j|%u|%T|%t|%V|%P|%C"
            ]
        );
    }

    #[test]
    fn filters_compile_into_the_argv() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let jobs = Jobs::new(invoker(EngineType::Slurm, runner.clone()));
        let filter = JobFilter {
            ids: vec![42],
            owners: vec!["alice".to_string()],
            states: vec!["RUNNING".to_string()],
            ..JobFilter::default()
        };
        jobs.list_jobs(&filter).unwrap();
        assert_eq!(
            runner.argv(0),
            vec![
                "squeue",
                "--noheader",
                "-o",
                "%i|%Q|%j|%u|%T|%t|%V|%P|%C",
                "-j",
                "42",
                "-u",
                "alice",
                "-t",
                "RUNNING"
            ]
        );
    }

    #[test]
    fn short_record_is_a_hard_parse_failure() {
        let runner = ScriptedRunner::new(vec![output("42|alice|RUNNING")]);
        let jobs = Jobs::new(invoker(EngineType::Slurm, runner));
        let err = jobs.list_jobs(&JobFilter::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn unset_submit_time_stays_absent() {
        let job = map_job("squeue", "1|0|a|u|PENDING|PD|N/A||1").unwrap();
        assert!(job.submit_time.is_none());
        assert!(job.queue.is_none());
    }

    #[test]
    fn cancelling_a_vanished_job_resolves_to_not_found() {
        let runner = ScriptedRunner::new(vec![failure(
            1,
            "scancel: error: Kill job error on job id 99: Invalid job id specified",
        )]);
        let jobs = Jobs::new(invoker(EngineType::Slurm, runner.clone()));
        let filter = JobFilter {
            ids: vec![99],
            ..JobFilter::default()
        };
        let err = jobs.delete_jobs(&filter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(runner.argv(0), vec!["scancel", "99"]);
    }
}

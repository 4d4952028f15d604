// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{Job, JobFilter, JobState};
use crate::app::ports::JobCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_datetime, parse_f64, parse_i64};

use super::state;
use super::xml::{self, JobRecord};
use super::{MISSING_MARKER, XML_TIME_PATTERN};

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
        // qstat only filters by user; ids, names, and states are applied
        // to the parsed listing below.
        let users = if filter.owners.is_empty() {
            "*".to_string()
        } else {
            filter.owners.join(",")
        };
        let mut context = Context::new();
        context.insert("users", &users);
        let (command, result) = self.invoker.invoke("job_list", &context)?;
        match classify(&command, &result, &[])? {
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Records => {
                let records = xml::parse_job_document(&command, &result.stdout)?;
                let jobs = records
                    .iter()
                    .map(|record| map_job(&command, record))
                    .collect::<Result<Vec<_>>>()?;
                Ok(jobs.into_iter().filter(|job| matches(filter, job)).collect())
            }
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
        // A job that vanished before the delete is a client-visible
        // not-found, not a server failure.
        match classify(&command, &result, &[MISSING_MARKER])? {
            Outcome::Empty if !result.succeeded() => Err(Error::not_found(command)),
            _ => Ok(()),
        }
    }
}

fn matches(filter: &JobFilter, job: &Job) -> bool {
    (filter.ids.is_empty() || filter.ids.contains(&job.id))
        && (filter.names.is_empty() || filter.names.iter().any(|name| name == &job.name))
        && (filter.states.is_empty()
            || filter
                .states
                .iter()
                .any(|state| state.eq_ignore_ascii_case(job.state.category.as_str())))
}

fn map_job(command: &str, record: &JobRecord) -> Result<Job> {
    let wrap = |err: crate::parse::ScalarError| {
        Error::parse(command, format!("cannot map command result to Job: {err}"))
    };
    let field = |key: &str| {
        record
            .values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::parse(command, format!("job is missing field '{key}'")))
    };
    let id = parse_i64(field("JB_job_number")?)
        .map_err(wrap)?
        .ok_or_else(|| Error::parse(command, "job is missing field 'JB_job_number'"))?;
    let priority = parse_f64(field("JAT_prio")?)
        .map_err(wrap)?
        .ok_or_else(|| Error::parse(command, "job is missing field 'JAT_prio'"))?;
    let code = field("state")?.to_string();
    // Running jobs report their start, pending ones their submission.
    let submit_time = record
        .values
        .get("JB_submission_time")
        .or_else(|| record.values.get("JAT_start_time"))
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_datetime(raw, XML_TIME_PATTERN).map_err(wrap))
        .transpose()?;
    let slots = parse_i64(field("slots")?)
        .map_err(wrap)?
        .ok_or_else(|| Error::parse(command, "job is missing field 'slots'"))?;
    Ok(Job {
        id,
        priority,
        name: field("JB_name")?.to_string(),
        owner: field("JB_owner")?.to_string(),
        state: JobState {
            category: state::classify(&code),
            state: record.state_name.clone(),
            code,
        },
        submit_time,
        queue: record
            .values
            .get("queue_name")
            .filter(|queue| !queue.trim().is_empty())
            .cloned(),
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{failure, invoker, output, ScriptedRunner};
    use crate::app::errors::ErrorKind;
    use crate::app::model::{EngineType, JobCategory};

    const LISTING: &str = r#"<?xml version='1.0'?>
<job_info>
  <queue_info>
    <job_list state="running">
      <JB_job_number>7</JB_job_number>
      <JAT_prio>0.55500</JAT_prio>
      <JB_name>train.sh</JB_name>
      <JB_owner>alice</JB_owner>
      <state>r</state>
      <JAT_start_time>2024-09-17T08:00:05</JAT_start_time>
      <queue_name>all.q@node01</queue_name>
      <slots>4</slots>
    </job_list>
  </queue_info>
  <job_info>
    <job_list state="pending">
      <JB_job_number>9</JB_job_number>
      <JAT_prio>0.00000</JAT_prio>
      <JB_name>wait.sh</JB_name>
      <JB_owner>bob</JB_owner>
      <state>Eqw</state>
      <JB_submission_time>2024-09-17T09:30:00</JB_submission_time>
      <slots>1</slots>
    </job_list>
  </job_info>
</job_info>"#;

    #[test]
    fn listing_classifies_and_keeps_raw_state_tokens() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner.clone()));
        let listed = jobs.list_jobs(&JobFilter::default()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 7);
        assert_eq!(listed[0].state.category, JobCategory::Running);
        assert_eq!(listed[0].state.code, "r");
        assert_eq!(listed[0].state.state, "running");
        assert_eq!(listed[0].queue.as_deref(), Some("all.q@node01"));
        assert_eq!(listed[1].state.category, JobCategory::Error);
        assert!(listed[1].queue.is_none());
        assert_eq!(runner.argv(0), vec!["qstat", "-xml", "-u", "*"]);
    }

    #[test]
    fn id_and_state_filters_are_applied_to_the_listing() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner));
        let filter = JobFilter {
            states: vec!["error".to_string()],
            ..JobFilter::default()
        };
        let listed = jobs.list_jobs(&filter).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 9);
    }

    #[test]
    fn owner_filter_goes_into_the_argv() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner.clone()));
        let filter = JobFilter {
            owners: vec!["alice".to_string()],
            ..JobFilter::default()
        };
        jobs.list_jobs(&filter).unwrap();
        assert_eq!(runner.argv(0), vec!["qstat", "-xml", "-u", "alice"]);
    }

    #[test]
    fn delete_without_ids_is_a_configuration_error() {
        let runner = ScriptedRunner::new(vec![]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner));
        let err = jobs.delete_jobs(&JobFilter::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn deleting_a_vanished_job_resolves_to_not_found() {
        let runner = ScriptedRunner::new(vec![failure(
            1,
            "denied: job \"99\" does not exist",
        )]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner.clone()));
        let filter = JobFilter {
            ids: vec![99],
            ..JobFilter::default()
        };
        let err = jobs.delete_jobs(&filter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(runner.argv(0), vec!["qdel", "99"]);
    }

    #[test]
    fn successful_delete_is_ok() {
        let runner = ScriptedRunner::new(vec![output(
            "alice has registered the job 7 for deletion",
        )]);
        let jobs = Jobs::new(invoker(EngineType::GridEngine, runner));
        let filter = JobFilter {
            ids: vec![7],
            ..JobFilter::default()
        };
        assert!(jobs.delete_jobs(&filter).is_ok());
    }
}

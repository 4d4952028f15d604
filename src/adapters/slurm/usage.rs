// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! sacct accounting records. Every record is one pipe-delimited line with
//! the full 52-column format compiled into the command; job-step rows are
//! folded into their parent job by skipping them.

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{FilteredUsageReport, JobFilteredUsageReport, UsageFilter, UsageReport};
use crate::app::ports::UsageCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_human_size, parse_i64};

use super::{delimited, duration};

/// The accounting columns requested from sacct, in order. The parser
/// indexes into this exact layout; a row with any other field count is
/// rejected outright.
const SACCT_FIELDS: &[&str] = &[
    "Account",
    "AllocCPUS",
    "AllocNodes",
    "AllocTRES",
    "AssocID",
    "AveCPU",
    "AveCPUFreq",
    "AveDiskRead",
    "AveDiskWrite",
    "AvePages",
    "AveRSS",
    "AveVMSize",
    "Cluster",
    "Comment",
    "ConsumedEnergy",
    "CPUTime",
    "CPUTimeRAW",
    "DerivedExitCode",
    "Elapsed",
    "ElapsedRaw",
    "Eligible",
    "End",
    "ExitCode",
    "GID",
    "Group",
    "JobID",
    "JobIDRaw",
    "JobName",
    "Layout",
    "MaxDiskRead",
    "MaxDiskWrite",
    "MaxPages",
    "MaxRSS",
    "MaxVMSize",
    "MinCPU",
    "NCPUS",
    "NNodes",
    "NodeList",
    "NTasks",
    "Partition",
    "Priority",
    "QOS",
    "QOSRAW",
    "ReqCPUS",
    "ReqMem",
    "Start",
    "State",
    "Submit",
    "Suspended",
    "SystemCPU",
    "User",
    "UserCPU",
];

const CLUSTER: usize = 12;
const CPU_TIME_RAW: usize = 16;
const ELAPSED_RAW: usize = 19;
const JOB_ID_RAW: usize = 26;
const MAX_DISK_READ: usize = 29;
const MAX_DISK_WRITE: usize = 30;
const MAX_RSS: usize = 32;
const NODE_LIST: usize = 37;
const PARTITION: usize = 39;
const SYSTEM_CPU: usize = 49;
const USER: usize = 50;
const USER_CPU: usize = 51;

/// NodeList value for rows that never ran.
const NO_NODES: &str = "None assigned";

pub struct Usage {
    invoker: Invoker,
}

impl Usage {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Usage { invoker }
    }

    fn run_summary(&self, filter: &UsageFilter) -> Result<JobFilteredUsageReport> {
        // sacct's -S accepts relative specs, so the last-N-days shortcut
        // compiles to one; an explicit range wins.
        let begin = match (&filter.start_time, filter.days) {
            (Some(start), _) => start.clone(),
            (None, Some(days)) => format!("now-{days}days"),
            (None, None) => String::new(),
        };
        let mut context = Context::new();
        context.insert("format", &SACCT_FIELDS.join(","));
        context.insert("users", &filter.owners.join(","));
        context.insert("queues", &filter.queues.join(","));
        context.insert("begin", &begin);
        context.insert("end", filter.end_time.as_deref().unwrap_or(""));
        let (command, result) = self.invoker.invoke("usage_summary", &context)?;
        match classify(&command, &result, &[])? {
            Outcome::Empty => Err(Error::not_found(command)),
            Outcome::Records => aggregate_rows(&command, &result.stdout),
        }
    }
}

impl UsageCapability for Usage {
    fn usage(&self) -> Result<UsageReport> {
        self.run_summary(&UsageFilter::default())
            .map(|report| report.usage.usage)
    }

    fn usage_filtered(&self, filter: &UsageFilter) -> Result<FilteredUsageReport> {
        self.run_summary(filter).map(|report| report.usage)
    }

    fn usage_for_jobs(&self, filter: &UsageFilter) -> Result<JobFilteredUsageReport> {
        if filter.jobs.is_empty() {
            return Err(Error::configuration(
                "job usage reporting requires explicit job ids",
            ));
        }
        let mut context = Context::new();
        context.insert("format", &SACCT_FIELDS.join(","));
        context.insert("jobs", &filter.jobs.join(","));
        let (command, result) = self.invoker.invoke("usage_jobs", &context)?;
        match classify(&command, &result, &[])? {
            Outcome::Empty => Err(Error::not_found(command)),
            Outcome::Records => aggregate_rows(&command, &result.stdout),
        }
    }
}

fn aggregate_rows(command: &str, lines: &[String]) -> Result<JobFilteredUsageReport> {
    let mut report = JobFilteredUsageReport::default();
    let mut matched = false;
    for line in lines.iter().filter(|line| !line.trim().is_empty()) {
        let fields = delimited::split_exact(command, line, SACCT_FIELDS.len())?;
        // Step rows ("7.batch", "7.0") repeat their parent's elapsed
        // time; only whole-job rows are aggregated.
        if fields[JOB_ID_RAW].contains('.') {
            continue;
        }
        accumulate(command, &fields, &mut report)?;
        matched = true;
    }
    if !matched {
        return Err(Error::not_found(command));
    }
    Ok(report)
}

fn accumulate(
    command: &str,
    fields: &[String],
    report: &mut JobFilteredUsageReport,
) -> Result<()> {
    let bad = |index: usize, raw: &str| {
        Error::parse(
            command,
            format!("column {} value '{raw}' is not parseable", SACCT_FIELDS[index]),
        )
    };
    let seconds = |index: usize| -> Result<f64> {
        let raw = &fields[index];
        match parse_i64(raw) {
            Ok(value) => Ok(value.unwrap_or(0) as f64),
            Err(_) => Err(bad(index, raw)),
        }
    };
    let clock = |index: usize| -> Result<f64> {
        duration::parse_duration(&fields[index])
            .map(|value| value.unwrap_or(0.0))
            .map_err(|_| bad(index, &fields[index]))
    };
    let gbytes = |index: usize| -> Result<f64> {
        let raw = &fields[index];
        match parse_human_size(raw) {
            Ok(value) => Ok(value.unwrap_or(0) as f64 / 1e9),
            Err(_) => Err(bad(index, raw)),
        }
    };

    let job_id = parse_i64(&fields[JOB_ID_RAW])
        .ok()
        .flatten()
        .ok_or_else(|| bad(JOB_ID_RAW, &fields[JOB_ID_RAW]))?;
    let elapsed = seconds(ELAPSED_RAW)?;
    let row = UsageReport {
        wallclock_secs: elapsed,
        user_time_secs: clock(USER_CPU)?,
        system_time_secs: clock(SYSTEM_CPU)?,
        cpu_time_secs: seconds(CPU_TIME_RAW)?,
        // Resident-set integral: peak RSS held for the job's duration.
        memory_gbyte_secs: gbytes(MAX_RSS)? * elapsed,
        io_gbytes: gbytes(MAX_DISK_READ)? + gbytes(MAX_DISK_WRITE)?,
        // sacct does not report I/O wait.
        io_wait_secs: 0.0,
    };
    report.usage.usage.add(&row);
    report.job_ids.insert(job_id);
    let identity = |index: usize| {
        let raw = fields[index].trim();
        (!raw.is_empty() && raw != NO_NODES).then(|| raw.to_string())
    };
    if let Some(owner) = identity(USER) {
        report.usage.owners.insert(owner);
    }
    if let Some(queue) = identity(PARTITION) {
        report.usage.queues.insert(queue);
    }
    if let Some(nodes) = identity(NODE_LIST) {
        report.usage.hosts.insert(nodes);
    }
    if let Some(cluster) = identity(CLUSTER) {
        report.usage.clusters.insert(cluster);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{invoker, output, ScriptedRunner};
    use crate::app::errors::ErrorKind;
    use crate::app::model::EngineType;

    #[test]
    fn the_accounting_record_has_exactly_52_columns() {
        assert_eq!(SACCT_FIELDS.len(), 52);
        assert_eq!(SACCT_FIELDS[CLUSTER], "Cluster");
        assert_eq!(SACCT_FIELDS[CPU_TIME_RAW], "CPUTimeRAW");
        assert_eq!(SACCT_FIELDS[ELAPSED_RAW], "ElapsedRaw");
        assert_eq!(SACCT_FIELDS[JOB_ID_RAW], "JobIDRaw");
        assert_eq!(SACCT_FIELDS[MAX_RSS], "MaxRSS");
        assert_eq!(SACCT_FIELDS[NODE_LIST], "NodeList");
        assert_eq!(SACCT_FIELDS[PARTITION], "Partition");
        assert_eq!(SACCT_FIELDS[SYSTEM_CPU], "SystemCPU");
        assert_eq!(SACCT_FIELDS[USER], "User");
        assert_eq!(SACCT_FIELDS[USER_CPU], "UserCPU");
    }

    /// Build one full-width record with the named columns set.
    fn row(pairs: &[(usize, &str)]) -> String {
        let mut fields = vec![String::new(); SACCT_FIELDS.len()];
        for (index, value) in pairs {
            fields[*index] = value.to_string();
        }
        fields.join("|")
    }

    fn job_row(id: &str) -> String {
        row(&[
            (JOB_ID_RAW, id),
            (ELAPSED_RAW, "120"),
            (CPU_TIME_RAW, "480"),
            (USER_CPU, "00:01:30"),
            (SYSTEM_CPU, "00:00:30"),
            (MAX_RSS, "500M"),
            (MAX_DISK_READ, "2G"),
            (MAX_DISK_WRITE, "1G"),
            (USER, "alice"),
            (PARTITION, "debug"),
            (NODE_LIST, "node01"),
            (CLUSTER, "main"),
        ])
    }

    #[test]
    fn rows_aggregate_and_steps_are_skipped() {
        let listing = format!("{}\n{}\n{}", job_row("7"), row(&[(JOB_ID_RAW, "7.batch"), (ELAPSED_RAW, "120")]), job_row("8"));
        let report = aggregate_rows("sacct", &listing.lines().map(str::to_string).collect::<Vec<_>>()).unwrap();
        assert_eq!(report.job_ids.iter().copied().collect::<Vec<_>>(), vec![7, 8]);
        assert_eq!(report.usage.usage.wallclock_secs, 240.0);
        assert_eq!(report.usage.usage.cpu_time_secs, 960.0);
        assert_eq!(report.usage.usage.user_time_secs, 180.0);
        assert_eq!(report.usage.usage.system_time_secs, 60.0);
        // 0.5 GB held for 120 s, twice.
        assert_eq!(report.usage.usage.memory_gbyte_secs, 120.0);
        assert_eq!(report.usage.usage.io_gbytes, 6.0);
        assert!(report.usage.owners.contains("alice"));
        assert!(report.usage.queues.contains("debug"));
        assert!(report.usage.clusters.contains("main"));
    }

    #[test]
    fn wrong_field_count_is_a_hard_parse_failure() {
        let err = aggregate_rows("sacct", &["a|b|c".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn garbled_elapsed_value_is_a_parse_error() {
        let line = row(&[(JOB_ID_RAW, "7"), (ELAPSED_RAW, "soon")]);
        let err = aggregate_rows("sacct", &[line]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("ElapsedRaw"));
    }

    #[test]
    fn empty_output_maps_to_not_found() {
        let runner = ScriptedRunner::new(vec![output("")]);
        let usage = Usage::new(invoker(EngineType::Slurm, runner));
        let err = usage.usage().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn day_shortcut_compiles_to_a_relative_begin() {
        let runner = ScriptedRunner::new(vec![output(&job_row("7"))]);
        let usage = Usage::new(invoker(EngineType::Slurm, runner.clone()));
        let filter = UsageFilter {
            owners: vec!["alice".to_string()],
            days: Some(7),
            ..UsageFilter::default()
        };
        usage.usage_filtered(&filter).unwrap();
        let argv = runner.argv(0);
        assert_eq!(argv[0], "sacct");
        assert!(argv.contains(&"-u".to_string()));
        assert!(argv.contains(&"alice".to_string()));
        assert!(argv.contains(&"-S".to_string()));
        assert!(argv.contains(&"now-7days".to_string()));
        assert!(argv
            .iter()
            .any(|arg| arg.starts_with("--format=Account,AllocCPUS,")));
    }

    #[test]
    fn job_report_requires_ids() {
        let runner = ScriptedRunner::new(vec![]);
        let usage = Usage::new(invoker(EngineType::Slurm, runner));
        let err = usage.usage_for_jobs(&UsageFilter::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

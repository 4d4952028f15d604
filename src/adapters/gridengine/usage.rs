// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! `qacct` accounting: the column-oriented summary listing and the
//! per-job record blocks.

use std::collections::BTreeMap;

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{FilteredUsageReport, JobFilteredUsageReport, UsageFilter, UsageReport};
use crate::app::ports::UsageCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_f64, parse_i64};

use super::detail;

/// Numeric summary columns, in the order qacct prints them.
const NUMERIC_COLUMNS: &[&str] = &["WALLCLOCK", "UTIME", "STIME", "CPU", "MEMORY", "IO", "IOW"];

/// qacct reports a missing accounting match on stdout/stderr with this.
const NO_MATCH_MARKER: &str = "not found";

pub struct Usage {
    invoker: Invoker,
}

impl Usage {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Usage { invoker }
    }

    fn run_summary(&self, filter: &UsageFilter) -> Result<FilteredUsageReport> {
        let mut context = Context::new();
        context.insert("owners", &filter.owners.join(","));
        context.insert("queues", &filter.queues.join(","));
        context.insert("parallel_envs", &filter.parallel_envs.join(","));
        context.insert(
            "days",
            &filter.days.map(|d| d.to_string()).unwrap_or_default(),
        );
        context.insert("begin", filter.start_time.as_deref().unwrap_or(""));
        context.insert("end", filter.end_time.as_deref().unwrap_or(""));
        let (command, result) = self.invoker.invoke("usage_summary", &context)?;
        match classify(&command, &result, &[NO_MATCH_MARKER])? {
            Outcome::Empty => Err(Error::not_found(command)),
            Outcome::Records => parse_summary(&command, &result.stdout)?
                .ok_or_else(|| Error::not_found(command)),
        }
    }
}

impl UsageCapability for Usage {
    fn usage(&self) -> Result<UsageReport> {
        self.run_summary(&UsageFilter::default())
            .map(|report| report.usage)
    }

    fn usage_filtered(&self, filter: &UsageFilter) -> Result<FilteredUsageReport> {
        self.run_summary(filter)
    }

    fn usage_for_jobs(&self, filter: &UsageFilter) -> Result<JobFilteredUsageReport> {
        let mut context = Context::new();
        context.insert("jobs", &filter.jobs.join(","));
        let (command, result) = self.invoker.invoke("usage_jobs", &context)?;
        match classify(&command, &result, &[NO_MATCH_MARKER])? {
            Outcome::Empty => Err(Error::not_found(command)),
            Outcome::Records => parse_job_blocks(&command, &result.stdout),
        }
    }
}

/// Parse the summary table: a header naming the columns, a `===`
/// separator, then one totals row per group. Returns `None` when the
/// table carries no data rows at all.
fn parse_summary(command: &str, lines: &[String]) -> Result<Option<FilteredUsageReport>> {
    let header_index = lines
        .iter()
        .position(|line| line.split_whitespace().any(|token| token == "WALLCLOCK"))
        .ok_or_else(|| Error::parse(command, "no summary header line in output"))?;
    // "CLUSTER QUEUE" is one column printed as two words.
    let header: Vec<String> = lines[header_index]
        .replace("CLUSTER QUEUE", "QUEUE")
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut report = FilteredUsageReport::default();
    let mut rows = 0usize;
    for line in &lines[header_index + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.chars().all(|c| c == '=') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != header.len() {
            return Err(Error::parse(
                command,
                format!(
                    "summary row has {} fields, header has {}: '{trimmed}'",
                    fields.len(),
                    header.len()
                ),
            ));
        }
        let mut row = UsageReport::default();
        for (column, field) in header.iter().zip(fields) {
            if NUMERIC_COLUMNS.contains(&column.as_str()) {
                let value = parse_f64(field)
                    .ok()
                    .flatten()
                    .ok_or_else(|| {
                        Error::parse(command, format!("column {column} value '{field}' is not numeric"))
                    })?;
                match column.as_str() {
                    "WALLCLOCK" => row.wallclock_secs = value,
                    "UTIME" => row.user_time_secs = value,
                    "STIME" => row.system_time_secs = value,
                    "CPU" => row.cpu_time_secs = value,
                    "MEMORY" => row.memory_gbyte_secs = value,
                    "IO" => row.io_gbytes = value,
                    _ => row.io_wait_secs = value,
                }
            } else {
                match column.as_str() {
                    "OWNER" => {
                        report.owners.insert(field.to_string());
                    }
                    "QUEUE" => {
                        report.queues.insert(field.to_string());
                    }
                    "HOST" => {
                        report.hosts.insert(field.to_string());
                    }
                    "CLUSTER" => {
                        report.clusters.insert(field.to_string());
                    }
                    "PE" => {
                        report.parallel_envs.insert(field.to_string());
                    }
                    other => {
                        return Err(Error::parse(
                            command,
                            format!("unexpected summary column '{other}'"),
                        ))
                    }
                }
            }
        }
        report.usage.add(&row);
        rows += 1;
    }
    Ok((rows > 0).then_some(report))
}

/// Parse `qacct -j` output: job records separated by `===` rules, one
/// `key value` pair per line.
fn parse_job_blocks(command: &str, lines: &[String]) -> Result<JobFilteredUsageReport> {
    let mut report = JobFilteredUsageReport::default();
    let mut block: Vec<String> = Vec::new();
    let mut blocks: Vec<Vec<String>> = Vec::new();
    for line in lines {
        if line.trim_start().starts_with("====") {
            if !block.is_empty() {
                blocks.push(std::mem::take(&mut block));
            }
        } else {
            block.push(line.clone());
        }
    }
    if !block.is_empty() {
        blocks.push(block);
    }

    let mut matched = false;
    for block in blocks {
        let record = detail::parse_record(&block);
        if record.is_empty() {
            continue;
        }
        accumulate_job(command, &record, &mut report)?;
        matched = true;
    }
    if !matched {
        return Err(Error::not_found(command));
    }
    Ok(report)
}

fn accumulate_job(
    command: &str,
    record: &BTreeMap<String, String>,
    report: &mut JobFilteredUsageReport,
) -> Result<()> {
    let number = |key: &str| -> Result<f64> {
        let raw = record
            .get(key)
            .ok_or_else(|| Error::parse(command, format!("job record is missing '{key}'")))?;
        parse_f64(raw).ok().flatten().ok_or_else(|| {
            Error::parse(command, format!("job record field {key} value '{raw}' is not numeric"))
        })
    };
    let job_id = record
        .get("jobnumber")
        .and_then(|raw| parse_i64(raw).ok().flatten())
        .ok_or_else(|| Error::parse(command, "job record is missing 'jobnumber'"))?;

    let row = UsageReport {
        wallclock_secs: number("ru_wallclock")?,
        user_time_secs: number("ru_utime")?,
        system_time_secs: number("ru_stime")?,
        cpu_time_secs: number("cpu")?,
        memory_gbyte_secs: number("mem")?,
        io_gbytes: number("io")?,
        io_wait_secs: number("iow")?,
    };
    report.usage.usage.add(&row);
    report.job_ids.insert(job_id);
    if let Some(owner) = record.get("owner") {
        report.usage.owners.insert(owner.clone());
    }
    if let Some(queue) = record.get("qname") {
        report.usage.queues.insert(queue.clone());
    }
    if let Some(host) = record.get("hostname") {
        report.usage.hosts.insert(host.clone());
    }
    if let Some(pe) = record
        .get("granted_pe")
        .map(String::as_str)
        .filter(|pe| *pe != super::NONE_TOKEN)
    {
        report.usage.parallel_envs.insert(pe.to_string());
    }
    Ok(())
}

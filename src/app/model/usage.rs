// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeSet;

use serde::Serialize;

/// Cluster-wide accounting totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UsageReport {
    pub wallclock_secs: f64,
    pub user_time_secs: f64,
    pub system_time_secs: f64,
    pub cpu_time_secs: f64,
    /// Memory integral in GB·s.
    pub memory_gbyte_secs: f64,
    /// Transferred I/O volume in GB.
    pub io_gbytes: f64,
    pub io_wait_secs: f64,
}

/// Accounting totals restricted by a filter, together with the identity
/// sets the matched records came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilteredUsageReport {
    pub usage: UsageReport,
    pub owners: BTreeSet<String>,
    pub queues: BTreeSet<String>,
    pub hosts: BTreeSet<String>,
    pub clusters: BTreeSet<String>,
    pub parallel_envs: BTreeSet<String>,
}

/// Per-job accounting aggregation; additionally records which job ids
/// matched the filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JobFilteredUsageReport {
    pub usage: FilteredUsageReport,
    pub job_ids: BTreeSet<i64>,
}

impl UsageReport {
    /// Accumulate another record into this one, column by column.
    pub fn add(&mut self, other: &UsageReport) {
        self.wallclock_secs += other.wallclock_secs;
        self.user_time_secs += other.user_time_secs;
        self.system_time_secs += other.system_time_secs;
        self.cpu_time_secs += other.cpu_time_secs;
        self.memory_gbyte_secs += other.memory_gbyte_secs;
        self.io_gbytes += other.io_gbytes;
        self.io_wait_secs += other.io_wait_secs;
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;

use serde::Serialize;

/// Slot capacity of a queue: a total plus the per-host breakdown it was
/// computed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SlotAllocation {
    pub total: i64,
    pub per_host: BTreeMap<String, i64>,
}

/// One cluster queue (grid engine) or partition (SLURM).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Queue {
    /// Unique key.
    pub name: String,
    pub hostlist: Vec<String>,
    pub seq_no: Option<i64>,
    /// Named load thresholds, e.g. `np_load_avg -> 1.75`. Memory-valued
    /// thresholds are carried as bytes.
    pub load_thresholds: BTreeMap<String, f64>,
    pub suspend_thresholds: BTreeMap<String, f64>,
    pub slots: SlotAllocation,
    pub owner_list: Vec<String>,
    pub user_lists: Vec<String>,
    pub pe_list: Vec<String>,
    pub qtype: Option<String>,
    pub tmpdir: Option<String>,
}

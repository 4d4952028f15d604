// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Job-state classification for the grid-engine short state codes as
//! printed in the `state` element of `qstat -xml`.

use crate::app::model::JobCategory;

const FINISHED: &[&str] = &["z"];
const PENDING: &[&str] = &["qw", "hqw", "hRwq"];
const RUNNING: &[&str] = &["r", "hr", "t", "Rr", "Rt"];
const SUSPENDED: &[&str] = &[
    "s", "ts", "S", "tS", "T", "tT", "Rs", "Rts", "RS", "RtS", "RT", "RtT",
];
const DELETED: &[&str] = &[
    "dr", "dt", "ds", "dS", "dT", "dRr", "dRt", "dRs", "dRS", "dRT",
];
const ERROR: &[&str] = &["Eqw", "Ehqw", "EhRqw"];

/// Classify a short state code by exact membership, checked in a fixed
/// order. Total: anything outside all tables is `Unknown`, never a
/// panic.
pub(crate) fn classify(code: &str) -> JobCategory {
    let code = code.trim();
    let tables: &[(&[&str], JobCategory)] = &[
        (FINISHED, JobCategory::Finished),
        (PENDING, JobCategory::Pending),
        (RUNNING, JobCategory::Running),
        (SUSPENDED, JobCategory::Suspended),
        (DELETED, JobCategory::Deleted),
        (ERROR, JobCategory::Error),
    ];
    for (table, category) in tables {
        if table.contains(&code) {
            return *category;
        }
    }
    JobCategory::Unknown
}

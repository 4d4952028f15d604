// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde::Serialize;
use time::PrimitiveDateTime;

/// Cross-engine job lifecycle category.
///
/// Derived by the backend state tables, never supplied directly by a
/// scheduler. Classification is total: any code outside the tables is
/// [`JobCategory::Unknown`], and no input panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobCategory {
    Pending,
    Running,
    Suspended,
    Deleted,
    Finished,
    Error,
    Unknown,
}

impl JobCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            JobCategory::Pending => "PENDING",
            JobCategory::Running => "RUNNING",
            JobCategory::Suspended => "SUSPENDED",
            JobCategory::Deleted => "DELETED",
            JobCategory::Finished => "FINISHED",
            JobCategory::Error => "ERROR",
            JobCategory::Unknown => "UNKNOWN",
        }
    }
}

/// Classified job state plus the raw tokens it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobState {
    pub category: JobCategory,
    /// Long-form state as printed by the backend (e.g. "running").
    pub state: String,
    /// Short state code as printed by the backend (e.g. "qw", "R").
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: i64,
    pub priority: f64,
    pub name: String,
    pub owner: String,
    pub state: JobState,
    pub submit_time: Option<PrimitiveDateTime>,
    pub queue: Option<String>,
    pub slots: i64,
}

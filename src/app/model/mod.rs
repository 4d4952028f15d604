// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Canonical, engine-agnostic entities. Instances are built fresh on every
//! request by the active backend's mappers and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod filters;
pub mod health;
pub mod host;
pub mod job;
pub mod parallel_env;
pub mod queue;
pub mod usage;

pub use filters::{
    HostFilter, HostGroupFilter, JobFilter, ParallelEnvFilter, QueueFilter, UsageFilter,
};
pub use health::{HealthCheckInfo, SchedulerStatus, StatusInfo};
pub use host::{Host, HostGroup};
pub use job::{Job, JobCategory, JobState};
pub use parallel_env::{
    AllocationRule, AllocationRuleKind, ParallelEnv, UrgencyKind, UrgencySlots,
};
pub use queue::{Queue, SlotAllocation};
pub use usage::{FilteredUsageReport, JobFilteredUsageReport, UsageReport};

/// The batch-scheduler product being fronted. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    GridEngine,
    Slurm,
}

impl EngineType {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineType::GridEngine => "gridengine",
            EngineType::Slurm => "slurm",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEngineTypeError(pub String);

impl fmt::Display for ParseEngineTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown engine type '{}'", self.0)
    }
}

impl std::error::Error for ParseEngineTypeError {}

impl FromStr for EngineType {
    type Err = ParseEngineTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gridengine" | "sge" | "uge" => Ok(EngineType::GridEngine),
            "slurm" => Ok(EngineType::Slurm),
            other => Err(ParseEngineTypeError(other.to_string())),
        }
    }
}

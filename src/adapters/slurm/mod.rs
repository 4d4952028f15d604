// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! SLURM adapter: `scontrol`, `squeue`, `sacct`, `scancel` parsers,
//! mappers, and capability providers.

mod delimited;
mod descriptor;
mod duration;
mod health;
mod hosts;
mod jobs;
mod queues;
mod state;
mod usage;

pub use health::Health;
pub use hosts::Hosts;
pub use jobs::Jobs;
pub use queues::Queues;
pub use usage::Usage;

/// Timestamp shape used by `squeue %V` and `scontrol` output.
const ISO_TIME_PATTERN: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";

/// Placeholder values scontrol prints for fields a node or partition
/// does not report.
const NOT_APPLICABLE: &[&str] = &["N/A", "(null)", "None", "NONE"];

fn is_not_applicable(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.is_empty() || NOT_APPLICABLE.contains(&trimmed)
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Grid-engine (SGE/UGE lineage) adapter: `qhost`, `qstat`, `qconf`,
//! `qacct`, `qping` parsers, mappers, and capability providers.

mod detail;
mod health;
mod host_groups;
mod hosts;
mod jobs;
mod parallel_envs;
mod queues;
mod state;
mod usage;
mod xml;

pub use health::Health;
pub use host_groups::HostGroups;
pub use hosts::Hosts;
pub use jobs::Jobs;
pub use parallel_envs::ParallelEnvs;
pub use queues::Queues;
pub use usage::Usage;

use std::collections::BTreeMap;

use crate::app::errors::{Error, Result};

/// Timestamp shape used by `qstat -xml`.
const XML_TIME_PATTERN: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";

/// The engine's "nothing configured" placeholder in `qconf` output.
const NONE_TOKEN: &str = "NONE";

/// stderr marker `qconf`/`qdel`/`qacct` print for a missing object.
const MISSING_MARKER: &str = "does not exist";

fn required<'a>(
    command: &str,
    record: &'a BTreeMap<String, String>,
    key: &str,
) -> Result<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::parse(command, format!("missing field '{key}'")))
}

/// Split a `qconf` list attribute into entries; `NONE` means empty.
fn list_field(value: Option<&str>) -> Vec<String> {
    match value.map(str::trim) {
        None | Some("") | Some(NONE_TOKEN) => Vec::new(),
        Some(raw) => raw
            .split([' ', ',', '\t'])
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde::Serialize;

/// One execution host as reported by the active backend.
///
/// Every numeric field is optional: absence means the backend did not
/// report the value, which is distinct from a reported zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Host {
    /// Unique key.
    pub hostname: String,
    pub arch: Option<String>,
    pub num_processors: Option<i64>,
    pub num_sockets: Option<i64>,
    pub num_cores: Option<i64>,
    pub num_threads: Option<i64>,
    pub load_avg: Option<f64>,
    /// Bytes.
    pub mem_total: Option<u64>,
    pub mem_used: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_used: Option<u64>,
}

/// Marker character every host-group name starts with.
pub const HOST_GROUP_MARKER: char = '@';

/// A named group of execution hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostGroup {
    /// Group name, always prefixed with [`HOST_GROUP_MARKER`].
    pub name: String,
    /// Member host names. A group with no members is an empty list,
    /// never an absent one.
    pub hosts: Vec<String>,
}

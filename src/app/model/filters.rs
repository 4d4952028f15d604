// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Opaque filter inputs accepted from collaborators. The core only reads
//! their field values to populate template context; business validation
//! stays with the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostFilter {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostGroupFilter {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueueFilter {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobFilter {
    pub ids: Vec<i64>,
    /// Canonical category names ("RUNNING", "pending", ...).
    pub states: Vec<String>,
    pub names: Vec<String>,
    pub owners: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParallelEnvFilter {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UsageFilter {
    pub owners: Vec<String>,
    pub queues: Vec<String>,
    pub parallel_envs: Vec<String>,
    /// Job ids or job-name patterns, backend-interpreted.
    pub jobs: Vec<String>,
    /// Inclusive range bounds in the backend's accounting time syntax.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Last-N-days shortcut; mutually exclusive with the explicit range
    /// as far as the backends are concerned, caller's pick wins.
    pub days: Option<u32>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.states.is_empty()
            && self.names.is_empty()
            && self.owners.is_empty()
    }
}

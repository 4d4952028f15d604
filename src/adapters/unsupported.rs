// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::errors::{Error, Result};
use crate::app::model::{HostGroup, HostGroupFilter, ParallelEnv, ParallelEnvFilter};
use crate::app::ports::{HostGroupCapability, ParallelEnvCapability};

/// Fail-fast stand-in for capabilities a backend genuinely lacks. Wired
/// by the facade instead of attempting the operation and silently
/// no-op-ing.
pub struct UnsupportedCapability {
    engine: &'static str,
}

impl UnsupportedCapability {
    pub fn new(engine: &'static str) -> Self {
        UnsupportedCapability { engine }
    }
}

impl HostGroupCapability for UnsupportedCapability {
    fn list_host_groups(&self, _filter: &HostGroupFilter) -> Result<Vec<HostGroup>> {
        Err(Error::unsupported("host group listing", self.engine))
    }
}

impl ParallelEnvCapability for UnsupportedCapability {
    fn list_parallel_envs(&self, _filter: &ParallelEnvFilter) -> Result<Vec<ParallelEnv>> {
        Err(Error::unsupported("parallel environment listing", self.engine))
    }
}

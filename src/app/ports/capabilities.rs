// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Capability boundaries, one per entity kind. Each backend implements the
//! subset it genuinely supports; the rest is wired to a fail-fast
//! unsupported stub by the facade.

use crate::app::errors::Result;
use crate::app::model::{
    FilteredUsageReport, HealthCheckInfo, Host, HostFilter, HostGroup, HostGroupFilter, Job,
    JobFilter, JobFilteredUsageReport, ParallelEnv, ParallelEnvFilter, Queue, QueueFilter,
    UsageFilter, UsageReport,
};

pub trait HostCapability: Send + Sync {
    fn list_hosts(&self, filter: &HostFilter) -> Result<Vec<Host>>;
}

pub trait JobCapability: Send + Sync {
    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>>;

    /// Remove the jobs selected by `filter.ids`. Already-gone jobs
    /// surface as `NotFound`, not as an execution failure.
    fn delete_jobs(&self, filter: &JobFilter) -> Result<()>;
}

pub trait QueueCapability: Send + Sync {
    fn list_queues(&self, filter: &QueueFilter) -> Result<Vec<Queue>>;
}

pub trait ParallelEnvCapability: Send + Sync {
    fn list_parallel_envs(&self, filter: &ParallelEnvFilter) -> Result<Vec<ParallelEnv>>;
}

pub trait HostGroupCapability: Send + Sync {
    fn list_host_groups(&self, filter: &HostGroupFilter) -> Result<Vec<HostGroup>>;
}

pub trait UsageCapability: Send + Sync {
    fn usage(&self) -> Result<UsageReport>;
    fn usage_filtered(&self, filter: &UsageFilter) -> Result<FilteredUsageReport>;
    fn usage_for_jobs(&self, filter: &UsageFilter) -> Result<JobFilteredUsageReport>;
}

pub trait HealthCapability: Send + Sync {
    fn health_check(&self) -> Result<HealthCheckInfo>;
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::sync::Arc;

use crate::adapters::{gridengine, slurm, Invoker, UnsupportedCapability};
use crate::app::errors::Result;
use crate::app::model::{
    EngineType, FilteredUsageReport, HealthCheckInfo, Host, HostFilter, HostGroup,
    HostGroupFilter, Job, JobFilter, JobFilteredUsageReport, ParallelEnv, ParallelEnvFilter,
    Queue, QueueFilter, UsageFilter, UsageReport,
};
use crate::app::ports::{
    CommandRunner, HealthCapability, HostCapability, HostGroupCapability, JobCapability,
    ParallelEnvCapability, QueueCapability, UsageCapability,
};
use crate::template::TemplateStore;

/// Where the cluster's master daemon answers health probes.
#[derive(Debug, Clone)]
pub struct MasterAddress {
    pub host: String,
    pub port: u16,
}

/// One provider per entity kind, selected for the configured engine when
/// the facade is built. No per-call dispatch decisions happen after
/// construction.
pub struct Facade {
    engine: EngineType,
    hosts: Arc<dyn HostCapability>,
    jobs: Arc<dyn JobCapability>,
    queues: Arc<dyn QueueCapability>,
    parallel_envs: Arc<dyn ParallelEnvCapability>,
    host_groups: Arc<dyn HostGroupCapability>,
    usage: Arc<dyn UsageCapability>,
    health: Arc<dyn HealthCapability>,
}

impl Facade {
    pub fn new(
        engine: EngineType,
        store: Arc<TemplateStore>,
        runner: Arc<dyn CommandRunner>,
        master: MasterAddress,
    ) -> Self {
        let invoker = Invoker::new(engine, store, runner);
        match engine {
            EngineType::GridEngine => Facade {
                engine,
                hosts: Arc::new(gridengine::Hosts::new(invoker.clone())),
                jobs: Arc::new(gridengine::Jobs::new(invoker.clone())),
                queues: Arc::new(gridengine::Queues::new(invoker.clone())),
                parallel_envs: Arc::new(gridengine::ParallelEnvs::new(invoker.clone())),
                host_groups: Arc::new(gridengine::HostGroups::new(invoker.clone())),
                usage: Arc::new(gridengine::Usage::new(invoker.clone())),
                health: Arc::new(gridengine::Health::new(
                    invoker,
                    master.host,
                    master.port,
                )),
            },
            EngineType::Slurm => Facade {
                engine,
                hosts: Arc::new(slurm::Hosts::new(invoker.clone())),
                jobs: Arc::new(slurm::Jobs::new(invoker.clone())),
                queues: Arc::new(slurm::Queues::new(invoker.clone())),
                // SLURM has no host groups or parallel environments;
                // these fail fast instead of silently no-op-ing.
                parallel_envs: Arc::new(UnsupportedCapability::new(engine.as_str())),
                host_groups: Arc::new(UnsupportedCapability::new(engine.as_str())),
                usage: Arc::new(slurm::Usage::new(invoker.clone())),
                health: Arc::new(slurm::Health::new(invoker)),
            },
        }
    }

    pub fn engine(&self) -> EngineType {
        self.engine
    }

    pub fn list_hosts(&self, filter: &HostFilter) -> Result<Vec<Host>> {
        self.hosts.list_hosts(filter)
    }

    pub fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        self.jobs.list_jobs(filter)
    }

    pub fn delete_jobs(&self, filter: &JobFilter) -> Result<()> {
        self.jobs.delete_jobs(filter)
    }

    pub fn list_queues(&self, filter: &QueueFilter) -> Result<Vec<Queue>> {
        self.queues.list_queues(filter)
    }

    pub fn list_parallel_envs(&self, filter: &ParallelEnvFilter) -> Result<Vec<ParallelEnv>> {
        self.parallel_envs.list_parallel_envs(filter)
    }

    pub fn list_host_groups(&self, filter: &HostGroupFilter) -> Result<Vec<HostGroup>> {
        self.host_groups.list_host_groups(filter)
    }

    pub fn usage(&self) -> Result<UsageReport> {
        self.usage.usage()
    }

    pub fn usage_filtered(&self, filter: &UsageFilter) -> Result<FilteredUsageReport> {
        self.usage.usage_filtered(filter)
    }

    pub fn usage_for_jobs(&self, filter: &UsageFilter) -> Result<JobFilteredUsageReport> {
        self.usage.usage_for_jobs(filter)
    }

    pub fn health_check(&self) -> Result<HealthCheckInfo> {
        self.health.health_check()
    }
}

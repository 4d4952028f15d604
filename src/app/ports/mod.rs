// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod capabilities;
pub mod runner;

pub use capabilities::{
    HealthCapability, HostCapability, HostGroupCapability, JobCapability, ParallelEnvCapability,
    QueueCapability, UsageCapability,
};
pub use runner::{CommandResult, CommandRunner};

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::model::EngineType;

/// Bundled command templates, one entry per `(engine, command)`. Used
/// whenever no template directory is configured on disk.
pub const EMBEDDED: &[(EngineType, &str, &str)] = &[
    (
        EngineType::GridEngine,
        "host_list",
        include_str!("../../templates/gridengine/host_list"),
    ),
    (
        EngineType::GridEngine,
        "job_list",
        include_str!("../../templates/gridengine/job_list"),
    ),
    (
        EngineType::GridEngine,
        "job_delete",
        include_str!("../../templates/gridengine/job_delete"),
    ),
    (
        EngineType::GridEngine,
        "queue_list",
        include_str!("../../templates/gridengine/queue_list"),
    ),
    (
        EngineType::GridEngine,
        "queue_show",
        include_str!("../../templates/gridengine/queue_show"),
    ),
    (
        EngineType::GridEngine,
        "pe_list",
        include_str!("../../templates/gridengine/pe_list"),
    ),
    (
        EngineType::GridEngine,
        "pe_show",
        include_str!("../../templates/gridengine/pe_show"),
    ),
    (
        EngineType::GridEngine,
        "hostgroup_list",
        include_str!("../../templates/gridengine/hostgroup_list"),
    ),
    (
        EngineType::GridEngine,
        "hostgroup_show",
        include_str!("../../templates/gridengine/hostgroup_show"),
    ),
    (
        EngineType::GridEngine,
        "usage_summary",
        include_str!("../../templates/gridengine/usage_summary"),
    ),
    (
        EngineType::GridEngine,
        "usage_jobs",
        include_str!("../../templates/gridengine/usage_jobs"),
    ),
    (
        EngineType::GridEngine,
        "health_check",
        include_str!("../../templates/gridengine/health_check"),
    ),
    (
        EngineType::Slurm,
        "host_list",
        include_str!("../../templates/slurm/host_list"),
    ),
    (
        EngineType::Slurm,
        "job_list",
        include_str!("../../templates/slurm/job_list"),
    ),
    (
        EngineType::Slurm,
        "job_delete",
        include_str!("../../templates/slurm/job_delete"),
    ),
    (
        EngineType::Slurm,
        "queue_list",
        include_str!("../../templates/slurm/queue_list"),
    ),
    (
        EngineType::Slurm,
        "queue_hosts",
        include_str!("../../templates/slurm/queue_hosts"),
    ),
    (
        EngineType::Slurm,
        "usage_summary",
        include_str!("../../templates/slurm/usage_summary"),
    ),
    (
        EngineType::Slurm,
        "usage_jobs",
        include_str!("../../templates/slurm/usage_jobs"),
    ),
    (
        EngineType::Slurm,
        "health_check",
        include_str!("../../templates/slurm/health_check"),
    ),
];

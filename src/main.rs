// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use gridgate::app::model::{
    HostFilter, HostGroupFilter, JobFilter, ParallelEnvFilter, QueueFilter, UsageFilter,
};
use gridgate::{config, logging, EngineType, Facade, LocalRunner, MasterAddress, TemplateStore};

#[derive(Parser)]
#[command(
    name = "gridgate",
    version,
    about,
    long_about = None,
    after_help = "Configuration precedence: defaults < config file < command-line flags.\n\
Config path precedence: defaults < GRIDGATE_CONFIG_PATH < --config."
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Path to a TOML config file. When omitted, gridgate uses GRIDGATE_CONFIG_PATH if set, otherwise the default config file location if available."
    )]
    config: Option<PathBuf>,
    #[arg(long, value_name = "ENGINE", help = "Backend to talk to: gridengine or slurm.")]
    engine: Option<EngineType>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory to load command templates from; falls back to the embedded set when it does not exist."
    )]
    template_dir: Option<PathBuf>,
    #[arg(long, value_name = "HOST", help = "Master daemon host for health checks.")]
    master_host: Option<String>,
    #[arg(long, value_name = "PORT", help = "Master daemon port for health checks.")]
    master_port: Option<u16>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Enable debug logging.")]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List execution hosts.
    Hosts {
        /// Restrict the listing to these host names.
        names: Vec<String>,
    },
    /// List or delete jobs.
    Jobs(JobArgs),
    /// List queues (grid engine) or partitions (SLURM).
    Queues {
        names: Vec<String>,
    },
    /// List parallel environments.
    Pes {
        names: Vec<String>,
    },
    /// List host groups.
    Hostgroups {
        names: Vec<String>,
    },
    /// Report accounting usage.
    Usage(UsageArgs),
    /// Probe the master daemon.
    Health,
}

#[derive(Args)]
struct JobArgs {
    #[command(subcommand)]
    cmd: JobCmd,
}

#[derive(Subcommand)]
enum JobCmd {
    /// List jobs.
    List {
        #[arg(long = "id")]
        ids: Vec<i64>,
        #[arg(long = "owner")]
        owners: Vec<String>,
        #[arg(long = "state", help = "Canonical state category, e.g. RUNNING.")]
        states: Vec<String>,
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Delete jobs by id.
    Delete {
        #[arg(long = "id", required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Args)]
struct UsageArgs {
    #[arg(long = "owner")]
    owners: Vec<String>,
    #[arg(long = "queue")]
    queues: Vec<String>,
    #[arg(long = "pe")]
    parallel_envs: Vec<String>,
    /// Job ids or name patterns; switches to the per-job report.
    #[arg(long = "job")]
    jobs: Vec<String>,
    #[arg(long, value_name = "TIME")]
    begin: Option<String>,
    #[arg(long, value_name = "TIME")]
    end: Option<String>,
    #[arg(long, value_name = "N", help = "Shortcut for the last N days.")]
    days: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Mirror of what an HTTP layer would do with status codes: missing or
/// unsupported resources are client-visible (2), deployment defects get
/// the conventional configuration code (78), everything else is a
/// server-side failure (1).
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<gridgate::Error>().map(gridgate::Error::kind) {
        Some(gridgate::ErrorKind::NotFound) | Some(gridgate::ErrorKind::Unsupported) => 2,
        Some(gridgate::ErrorKind::Configuration) => 78,
        Some(_) => 1,
        None => 78,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config::LoadResult { config, report } = config::load_with_report(
        cli.config,
        config::Overrides {
            engine: cli.engine,
            template_dir: cli.template_dir,
            master_host: cli.master_host,
            master_port: cli.master_port,
            verbose: cli.verbose.then_some(true),
        },
    )?;
    logging::init(config.verbose);
    info!(
        engine = %config.engine,
        engine_source = report.engine.source.as_str(),
        config_source = report
            .config_path_source
            .map(config::ConfigSource::as_str)
            .unwrap_or("none"),
        config_present = report.config_file_present,
        "configuration loaded"
    );

    let store = Arc::new(TemplateStore::new(config.template_dir.as_deref()));
    let facade = Facade::new(
        config.engine,
        store,
        Arc::new(LocalRunner::new()),
        MasterAddress {
            host: config.master_host.clone(),
            port: config.master_port,
        },
    );

    match cli.cmd {
        Cmd::Hosts { names } => print_json(&facade.list_hosts(&HostFilter { names })?),
        Cmd::Jobs(args) => match args.cmd {
            JobCmd::List {
                ids,
                owners,
                states,
                names,
            } => print_json(&facade.list_jobs(&JobFilter {
                ids,
                states,
                names,
                owners,
            })?),
            JobCmd::Delete { ids } => {
                facade.delete_jobs(&JobFilter {
                    ids,
                    ..JobFilter::default()
                })?;
                Ok(())
            }
        },
        Cmd::Queues { names } => print_json(&facade.list_queues(&QueueFilter { names })?),
        Cmd::Pes { names } => {
            print_json(&facade.list_parallel_envs(&ParallelEnvFilter { names })?)
        }
        Cmd::Hostgroups { names } => {
            print_json(&facade.list_host_groups(&HostGroupFilter { names })?)
        }
        Cmd::Usage(args) => {
            let filter = UsageFilter {
                owners: args.owners,
                queues: args.queues,
                parallel_envs: args.parallel_envs,
                jobs: args.jobs,
                start_time: args.begin,
                end_time: args.end,
                days: args.days,
            };
            if !filter.jobs.is_empty() {
                print_json(&facade.usage_for_jobs(&filter)?)
            } else if filter == UsageFilter::default() {
                print_json(&facade.usage()?)
            } else {
                print_json(&facade.usage_filtered(&filter)?)
            }
        }
        Cmd::Health => print_json(&facade.health_check()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

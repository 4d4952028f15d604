// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{Host, HostFilter};
use crate::app::ports::HostCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_f64, parse_i64};

use super::{descriptor, is_not_applicable};

/// stderr markers scontrol prints when a named node is unknown.
pub(super) const NODE_MARKERS: &[&str] = &["not found", "Invalid node name"];

/// scontrol memory figures are megabytes.
const MEGABYTE: u64 = 1_000_000;

pub struct Hosts {
    invoker: Invoker,
}

impl Hosts {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Hosts { invoker }
    }
}

impl HostCapability for Hosts {
    fn list_hosts(&self, filter: &HostFilter) -> Result<Vec<Host>> {
        let mut context = Context::new();
        context.insert("hosts", &filter.names.join(","));
        let (command, result) = self.invoker.invoke("host_list", &context)?;
        match classify(&command, &result, NODE_MARKERS)? {
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Records => result
                .stdout
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| map_host(&command, &descriptor::parse_descriptor(line)))
                .collect(),
        }
    }
}

/// Map one node descriptor. Core and thread totals are derived from the
/// per-socket figures; a node that reports none of them stays absent.
pub(super) fn map_host(command: &str, record: &BTreeMap<String, String>) -> Result<Host> {
    let wrap = |err: crate::parse::ScalarError| {
        Error::parse(command, format!("cannot map command result to Host: {err}"))
    };
    let field = |key: &str| {
        record
            .get(key)
            .map(String::as_str)
            .filter(|value| !is_not_applicable(value))
    };
    let int = |key: &str| -> Result<Option<i64>> {
        field(key).map(|raw| {
            parse_i64(raw).map_err(wrap).and_then(|value| {
                value.ok_or_else(|| {
                    Error::parse(command, format!("node field {key} has no value"))
                })
            })
        })
        .transpose()
    };
    let hostname = field("NodeName")
        .ok_or_else(|| Error::parse(command, "node descriptor has no NodeName"))?
        .to_string();
    let num_sockets = int("Sockets")?;
    let cores_per_socket = int("CoresPerSocket")?;
    let threads_per_core = int("ThreadsPerCore")?;
    let num_cores = match (num_sockets, cores_per_socket) {
        (Some(sockets), Some(cores)) => Some(sockets * cores),
        _ => None,
    };
    let num_threads = match (num_cores, threads_per_core) {
        (Some(cores), Some(threads)) => Some(cores * threads),
        _ => None,
    };
    let mem = |key: &str| -> Result<Option<u64>> {
        Ok(int(key)?.map(|mb| mb as u64 * MEGABYTE))
    };
    Ok(Host {
        hostname,
        arch: field("Arch").map(str::to_string),
        num_processors: int("CPUTot")?,
        num_sockets,
        num_cores,
        num_threads,
        load_avg: field("CPULoad")
            .map(|raw| {
                parse_f64(raw).map_err(wrap).and_then(|value| {
                    value.ok_or_else(|| Error::parse(command, "CPULoad has no value"))
                })
            })
            .transpose()?,
        mem_total: mem("RealMemory")?,
        mem_used: mem("AllocMem")?,
        swap_total: None,
        swap_used: None,
    })
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;

use tera::Context;
use tracing::debug;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{Queue, QueueFilter, SlotAllocation};
use crate::app::ports::QueueCapability;
use crate::exec::{classify, Outcome};
use crate::parse::parse_i64;

use super::hosts::NODE_MARKERS;
use super::{descriptor, is_not_applicable};

/// stderr marker scontrol prints for an unknown partition.
const PARTITION_MARKER: &str = "not found";

pub struct Queues {
    invoker: Invoker,
}

impl Queues {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Queues { invoker }
    }

    /// A partition record carries no per-host slot data, only a node
    /// list expression. The slot description is derived from a second
    /// lookup: one CPU total per member node, summed for the partition
    /// total. A node removed between the two commands is skipped.
    fn derive_slots(&self, nodes_expr: &str) -> Result<(Vec<String>, SlotAllocation)> {
        let mut context = Context::new();
        context.insert("hosts", nodes_expr);
        let (command, result) = self.invoker.invoke("queue_hosts", &context)?;
        let mut allocation = SlotAllocation::default();
        let mut hostlist = Vec::new();
        match classify(&command, &result, NODE_MARKERS)? {
            Outcome::Empty => {
                debug!(nodes = nodes_expr, "partition nodes vanished between lookups");
            }
            Outcome::Records => {
                for line in result.stdout.iter().filter(|l| !l.trim().is_empty()) {
                    let record = descriptor::parse_descriptor(line);
                    let name = record.get("NodeName").cloned().ok_or_else(|| {
                        Error::parse(&command, "node descriptor has no NodeName")
                    })?;
                    let cpus = record
                        .get("CPUTot")
                        .and_then(|raw| parse_i64(raw).ok().flatten())
                        .ok_or_else(|| {
                            Error::parse(
                                &command,
                                format!("node '{name}' reports no numeric CPUTot"),
                            )
                        })?;
                    allocation.total += cpus;
                    allocation.per_host.insert(name.clone(), cpus);
                    hostlist.push(name);
                }
            }
        }
        Ok((hostlist, allocation))
    }
}

impl QueueCapability for Queues {
    fn list_queues(&self, filter: &QueueFilter) -> Result<Vec<Queue>> {
        let mut context = Context::new();
        context.insert("queues", &filter.names.join(","));
        let (command, result) = self.invoker.invoke("queue_list", &context)?;
        match classify(&command, &result, &[PARTITION_MARKER])? {
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Records => {
                let mut queues = Vec::new();
                for line in result.stdout.iter().filter(|l| !l.trim().is_empty()) {
                    let record = descriptor::parse_descriptor(line);
                    queues.push(self.map_queue(&command, &record)?);
                }
                Ok(queues)
            }
        }
    }
}

impl Queues {
    fn map_queue(&self, command: &str, record: &BTreeMap<String, String>) -> Result<Queue> {
        let name = record
            .get("PartitionName")
            .filter(|value| !is_not_applicable(value))
            .cloned()
            .ok_or_else(|| Error::parse(command, "partition descriptor has no PartitionName"))?;
        let (hostlist, slots) = match record
            .get("Nodes")
            .map(String::as_str)
            .filter(|nodes| !is_not_applicable(nodes))
        {
            Some(nodes) => self.derive_slots(nodes)?,
            None => (Vec::new(), SlotAllocation::default()),
        };
        let seq_no = record
            .get("PriorityTier")
            .filter(|value| !is_not_applicable(value))
            .map(|raw| {
                parse_i64(raw).ok().flatten().ok_or_else(|| {
                    Error::parse(command, format!("PriorityTier '{raw}' is not numeric"))
                })
            })
            .transpose()?;
        Ok(Queue {
            name,
            hostlist,
            seq_no,
            load_thresholds: BTreeMap::new(),
            suspend_thresholds: BTreeMap::new(),
            slots,
            owner_list: access_list(record.get("AllowAccounts")),
            user_lists: access_list(record.get("AllowGroups")),
            pe_list: Vec::new(),
            qtype: None,
            tmpdir: None,
        })
    }
}

/// `ALL` means unrestricted access, which the canonical model expresses
/// as an empty list.
fn access_list(value: Option<&String>) -> Vec<String> {
    match value.map(|v| v.trim()) {
        None | Some("") | Some("ALL") => Vec::new(),
        Some(raw) => raw.split(',').map(str::to_string).collect(),
    }
}

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
use crate::parse::{parse_f64, parse_human_size, parse_i64};

use super::{detail, list_field, required, MISSING_MARKER};

pub struct Queues {
    invoker: Invoker,
}

impl Queues {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Queues { invoker }
    }

    fn show_queue(&self, name: &str) -> Result<Option<Queue>> {
        let mut context = Context::new();
        context.insert("queue", name);
        let (command, result) = self.invoker.invoke("queue_show", &context)?;
        match classify(&command, &result, &[MISSING_MARKER])? {
            // The queue disappeared between the listing and this lookup.
            Outcome::Empty => {
                debug!(queue = name, "queue vanished between listing and lookup");
                Ok(None)
            }
            Outcome::Records => {
                let record = detail::parse_record(&result.stdout);
                map_queue(&command, &record).map(Some)
            }
        }
    }
}

impl QueueCapability for Queues {
    fn list_queues(&self, filter: &QueueFilter) -> Result<Vec<Queue>> {
        let (command, result) = self.invoker.invoke("queue_list", &Context::new())?;
        let names = match classify(&command, &result, &[])? {
            Outcome::Empty => return Ok(Vec::new()),
            Outcome::Records => detail::name_lines(&result.stdout),
        };
        let mut queues = Vec::new();
        for name in names {
            if !filter.names.is_empty() && !filter.names.contains(&name) {
                continue;
            }
            if let Some(queue) = self.show_queue(&name)? {
                queues.push(queue);
            }
        }
        Ok(queues)
    }
}

fn map_queue(command: &str, record: &BTreeMap<String, String>) -> Result<Queue> {
    let wrap = |err: crate::parse::ScalarError| {
        Error::parse(command, format!("cannot map command result to Queue: {err}"))
    };
    Ok(Queue {
        name: required(command, record, "qname")?.to_string(),
        hostlist: list_field(record.get("hostlist").map(String::as_str)),
        seq_no: parse_i64(record.get("seq_no").map(String::as_str).unwrap_or("-"))
            .map_err(wrap)?,
        load_thresholds: thresholds(
            command,
            record.get("load_thresholds").map(String::as_str),
        )?,
        suspend_thresholds: thresholds(
            command,
            record.get("suspend_thresholds").map(String::as_str),
        )?,
        slots: parse_slots(command, required(command, record, "slots")?)?,
        owner_list: list_field(record.get("owner_list").map(String::as_str)),
        user_lists: list_field(record.get("user_lists").map(String::as_str)),
        pe_list: list_field(record.get("pe_list").map(String::as_str)),
        qtype: optional(record.get("qtype")),
        tmpdir: optional(record.get("tmpdir")),
    })
}

fn optional(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && *v != super::NONE_TOKEN)
        .map(str::to_string)
}

/// Parse `name=value` threshold pairs. Memory-valued thresholds keep the
/// engine's size suffixes and are carried as bytes.
fn thresholds(
    command: &str,
    value: Option<&str>,
) -> Result<BTreeMap<String, f64>> {
    let mut parsed = BTreeMap::new();
    let raw = match value.map(str::trim) {
        None | Some("") | Some(super::NONE_TOKEN) => return Ok(parsed),
        Some(raw) => raw,
    };
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, literal) = entry.split_once('=').ok_or_else(|| {
            Error::parse(command, format!("threshold entry '{entry}' is not name=value"))
        })?;
        let number = match parse_f64(literal) {
            Ok(Some(number)) => number,
            _ => parse_human_size(literal)
                .map_err(|err| {
                    Error::parse(
                        command,
                        format!("cannot parse threshold '{entry}': {err}"),
                    )
                })?
                .ok_or_else(|| {
                    Error::parse(command, format!("threshold entry '{entry}' has no value"))
                })? as f64,
        };
        parsed.insert(name.trim().to_string(), number);
    }
    Ok(parsed)
}

/// Parse the queue's `slots` attribute: a default count optionally
/// followed by `[host=n]` overrides. With overrides present the total is
/// their sum; without any the default is the total and no per-host
/// breakdown exists.
fn parse_slots(command: &str, raw: &str) -> Result<SlotAllocation> {
    let mut allocation = SlotAllocation::default();
    let mut default = 0i64;
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        if let Some(inner) = entry.strip_prefix('[').and_then(|e| e.strip_suffix(']')) {
            let (host, count) = inner.split_once('=').ok_or_else(|| {
                Error::parse(command, format!("slot override '{entry}' is not [host=n]"))
            })?;
            let count = parse_i64(count)
                .ok()
                .flatten()
                .ok_or_else(|| {
                    Error::parse(command, format!("slot override '{entry}' is not numeric"))
                })?;
            allocation.per_host.insert(host.trim().to_string(), count);
        } else {
            default = parse_i64(entry)
                .ok()
                .flatten()
                .ok_or_else(|| {
                    Error::parse(command, format!("slot count '{entry}' is not numeric"))
                })?;
        }
    }
    allocation.total = if allocation.per_host.is_empty() {
        default
    } else {
        allocation.per_host.values().sum()
    };
    Ok(allocation)
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tera::Context;

use crate::adapters::{check_time_now, Invoker};
use crate::app::errors::{Error, Result};
use crate::app::model::{HealthCheckInfo, SchedulerStatus, StatusInfo};
use crate::app::ports::HealthCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_datetime, parse_i64};

/// Timestamp shape printed by `qping -info` before the epoch value.
const QPING_TIME_PATTERN: &str = "[month]/[day]/[year] [hour]:[minute]:[second]";

pub struct Health {
    invoker: Invoker,
    master_host: String,
    master_port: u16,
}

impl Health {
    pub(crate) fn new(invoker: Invoker, master_host: String, master_port: u16) -> Self {
        Health {
            invoker,
            master_host,
            master_port,
        }
    }
}

impl HealthCapability for Health {
    fn health_check(&self) -> Result<HealthCheckInfo> {
        let mut context = Context::new();
        context.insert("master_host", &self.master_host);
        context.insert("master_port", &self.master_port.to_string());
        let (command, result) = self.invoker.invoke("health_check", &context)?;
        match classify(&command, &result, &[])? {
            Outcome::Empty => Err(Error::not_found(command)),
            Outcome::Records => map_health(&command, &result.stdout),
        }
    }
}

fn map_health(command: &str, lines: &[String]) -> Result<HealthCheckInfo> {
    let value_of = |prefix: &str| {
        lines
            .iter()
            .map(|line| line.trim())
            .find_map(|line| line.strip_prefix(prefix))
            .map(str::trim)
    };
    let raw_code = value_of("status:")
        .ok_or_else(|| Error::parse(command, "qping output has no status line"))?;
    let code = parse_i64(raw_code)
        .ok()
        .flatten()
        .ok_or_else(|| Error::parse(command, format!("status code '{raw_code}' is not numeric")))?;
    let info = value_of("info:").unwrap_or("").to_string();
    // "start time: 09/17/2024 06:00:01 (1726552801)" - the epoch in
    // parentheses is redundant with the literal.
    let cluster_start_time = value_of("start time:")
        .map(|raw| raw.split(" (").next().unwrap_or(raw).trim())
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            parse_datetime(raw, QPING_TIME_PATTERN)
                .map_err(|err| Error::parse(command, format!("cannot parse start time: {err}")))
        })
        .transpose()?;
    Ok(HealthCheckInfo {
        status: StatusInfo {
            code,
            status: status_from_code(code),
            info,
        },
        cluster_start_time,
        check_time: check_time_now(),
    })
}

fn status_from_code(code: i64) -> SchedulerStatus {
    match code {
        0 => SchedulerStatus::Ok,
        1 => SchedulerStatus::Warning,
        2 => SchedulerStatus::Error,
        3 => SchedulerStatus::NotInitialized,
        _ => SchedulerStatus::NotProvided,
    }
}

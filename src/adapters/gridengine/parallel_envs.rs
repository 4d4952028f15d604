// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;

use tera::Context;
use tracing::debug;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{
    AllocationRule, AllocationRuleKind, ParallelEnv, ParallelEnvFilter, UrgencyKind, UrgencySlots,
};
use crate::app::ports::ParallelEnvCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{is_number, parse_i64};

use super::{detail, list_field, required, MISSING_MARKER};

pub struct ParallelEnvs {
    invoker: Invoker,
}

impl ParallelEnvs {
    pub(crate) fn new(invoker: Invoker) -> Self {
        ParallelEnvs { invoker }
    }

    fn show_env(&self, name: &str) -> Result<Option<ParallelEnv>> {
        let mut context = Context::new();
        context.insert("pe", name);
        let (command, result) = self.invoker.invoke("pe_show", &context)?;
        match classify(&command, &result, &[MISSING_MARKER])? {
            Outcome::Empty => {
                debug!(pe = name, "parallel environment vanished between listing and lookup");
                Ok(None)
            }
            Outcome::Records => {
                let record = detail::parse_record(&result.stdout);
                map_parallel_env(&command, &record).map(Some)
            }
        }
    }
}

impl ParallelEnvCapability for ParallelEnvs {
    fn list_parallel_envs(&self, filter: &ParallelEnvFilter) -> Result<Vec<ParallelEnv>> {
        let (command, result) = self.invoker.invoke("pe_list", &Context::new())?;
        let names = match classify(&command, &result, &[])? {
            Outcome::Empty => return Ok(Vec::new()),
            Outcome::Records => detail::name_lines(&result.stdout),
        };
        let mut envs = Vec::new();
        for name in names {
            if !filter.names.is_empty() && !filter.names.contains(&name) {
                continue;
            }
            if let Some(env) = self.show_env(&name)? {
                envs.push(env);
            }
        }
        Ok(envs)
    }
}

fn map_parallel_env(command: &str, record: &BTreeMap<String, String>) -> Result<ParallelEnv> {
    Ok(ParallelEnv {
        name: required(command, record, "pe_name")?.to_string(),
        slots: parse_count(command, required(command, record, "slots")?)?,
        user_lists: list_field(record.get("user_lists").map(String::as_str)),
        xuser_lists: list_field(record.get("xuser_lists").map(String::as_str)),
        start_proc_args: list_field(record.get("start_proc_args").map(String::as_str)),
        stop_proc_args: list_field(record.get("stop_proc_args").map(String::as_str)),
        allocation_rule: allocation_rule(command, required(command, record, "allocation_rule")?)?,
        control_slaves: parse_flag(command, required(command, record, "control_slaves")?)?,
        job_is_first_task: parse_flag(command, required(command, record, "job_is_first_task")?)?,
        urgency_slots: urgency_slots(command, required(command, record, "urgency_slots")?)?,
        accounting_summary: parse_flag(command, required(command, record, "accounting_summary")?)?,
        qsort_args: list_field(record.get("qsort_args").map(String::as_str)),
    })
}

/// The allocation rule is numeric-or-symbolic: a literal count means a
/// fixed number of slots on each assigned host, otherwise the token must
/// be one of the engine's rule keywords.
fn allocation_rule(command: &str, token: &str) -> Result<AllocationRule> {
    let token = token.trim();
    if is_number(token) {
        let slots = parse_i64(token).ok().flatten().ok_or_else(|| {
            Error::parse(command, format!("allocation rule '{token}' is not an integer"))
        })?;
        return Ok(AllocationRule {
            kind: AllocationRuleKind::SlotsOnAssignedHost,
            slots: Some(slots),
        });
    }
    let kind = match token {
        "$pe_slots" => AllocationRuleKind::PeSlots,
        "$round_robin" => AllocationRuleKind::RoundRobin,
        "$fill_up" => AllocationRuleKind::FillUp,
        other => {
            return Err(Error::parse(
                command,
                format!("unrecognized state '{other}' for allocation rule"),
            ))
        }
    };
    Ok(AllocationRule { kind, slots: None })
}

fn urgency_slots(command: &str, token: &str) -> Result<UrgencySlots> {
    let token = token.trim();
    if is_number(token) {
        let value = parse_i64(token).ok().flatten().ok_or_else(|| {
            Error::parse(command, format!("urgency slots '{token}' is not an integer"))
        })?;
        return Ok(UrgencySlots {
            kind: UrgencyKind::Number,
            value: Some(value),
        });
    }
    let kind = match token.to_ascii_lowercase().as_str() {
        "min" => UrgencyKind::Min,
        "max" => UrgencyKind::Max,
        "avg" => UrgencyKind::Avg,
        other => {
            return Err(Error::parse(
                command,
                format!("unrecognized state '{other}' for urgency slots"),
            ))
        }
    };
    Ok(UrgencySlots { kind, value: None })
}

fn parse_count(command: &str, token: &str) -> Result<i64> {
    parse_i64(token)
        .ok()
        .flatten()
        .ok_or_else(|| Error::parse(command, format!("slot count '{token}' is not numeric")))
}

fn parse_flag(command: &str, token: &str) -> Result<bool> {
    match token.trim().to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        other => Err(Error::parse(
            command,
            format!("flag value '{other}' is not TRUE/FALSE"),
        )),
    }
}

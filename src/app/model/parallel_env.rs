// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde::Serialize;

/// How a parallel environment distributes slots over hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationRuleKind {
    PeSlots,
    RoundRobin,
    FillUp,
    /// The rule was a literal slot count; the count lives in
    /// [`AllocationRule::slots`].
    SlotsOnAssignedHost,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRule {
    pub kind: AllocationRuleKind,
    /// Only present for [`AllocationRuleKind::SlotsOnAssignedHost`].
    pub slots: Option<i64>,
}

/// How urgency slots are derived for pending jobs of this environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyKind {
    Min,
    Max,
    Avg,
    /// A fixed numeric override; the value lives in [`UrgencySlots::value`].
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencySlots {
    pub kind: UrgencyKind,
    /// Only present for [`UrgencyKind::Number`].
    pub value: Option<i64>,
}

/// One parallel environment definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelEnv {
    /// Unique key.
    pub name: String,
    pub slots: i64,
    pub user_lists: Vec<String>,
    pub xuser_lists: Vec<String>,
    pub start_proc_args: Vec<String>,
    pub stop_proc_args: Vec<String>,
    pub allocation_rule: AllocationRule,
    pub control_slaves: bool,
    pub job_is_first_task: bool,
    pub urgency_slots: UrgencySlots,
    pub accounting_summary: bool,
    pub qsort_args: Vec<String>,
}

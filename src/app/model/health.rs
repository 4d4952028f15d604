// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde::Serialize;
use time::PrimitiveDateTime;

/// Master-daemon health as understood across both backends.
///
/// `NotProvided` is the fallback for any status token outside the known
/// vocabulary; mapping into it must never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerStatus {
    Ok,
    Warning,
    Error,
    NotInitialized,
    NotProvided,
}

impl SchedulerStatus {
    pub fn code(self) -> i64 {
        match self {
            SchedulerStatus::Ok => 0,
            SchedulerStatus::Warning => 1,
            SchedulerStatus::Error => 2,
            SchedulerStatus::NotInitialized => 3,
            SchedulerStatus::NotProvided => 99_999,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub code: i64,
    pub status: SchedulerStatus,
    /// Free text taken from the backend's status line.
    pub info: String,
}

impl StatusInfo {
    pub fn new(status: SchedulerStatus, info: impl Into<String>) -> Self {
        StatusInfo {
            code: status.code(),
            status,
            info: info.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCheckInfo {
    pub status: StatusInfo,
    pub cluster_start_time: Option<PrimitiveDateTime>,
    pub check_time: PrimitiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(SchedulerStatus::Ok.code(), 0);
        assert_eq!(SchedulerStatus::Warning.code(), 1);
        assert_eq!(SchedulerStatus::Error.code(), 2);
        assert_eq!(SchedulerStatus::NotInitialized.code(), 3);
        assert_eq!(SchedulerStatus::NotProvided.code(), 99_999);
    }
}

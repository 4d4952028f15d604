// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Status-line helpers shared by both backends' health capabilities.

use time::{OffsetDateTime, PrimitiveDateTime};

use crate::app::model::{SchedulerStatus, StatusInfo};

/// Map the trailing token of the last non-blank output line over the
/// closed UP/DOWN vocabulary. Anything else resolves to `NotProvided`
/// (code 99999); this never fails.
pub(crate) fn status_from_lines(lines: &[String]) -> StatusInfo {
    let last = lines
        .iter()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim())
        .unwrap_or("");
    let status = match last.rsplit_once(char::is_whitespace) {
        Some((_, "UP")) => SchedulerStatus::Ok,
        Some((_, "DOWN")) => SchedulerStatus::Error,
        _ => SchedulerStatus::NotProvided,
    };
    StatusInfo::new(status, last)
}

/// Wall-clock instant a health check was answered at, in UTC.
pub(crate) fn check_time_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

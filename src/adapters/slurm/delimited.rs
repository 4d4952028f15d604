// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Pipe-delimited record splitting for `squeue`/`sacct --parsable2`
//! output. Every record has a fixed field count; anything else is a hard
//! parse failure, never a truncated or padded record.

use crate::app::errors::{Error, Result};

pub(crate) fn split_exact(command: &str, line: &str, expected: usize) -> Result<Vec<String>> {
    let fields: Vec<String> = line.split('|').map(str::to_string).collect();
    if fields.len() != expected {
        return Err(Error::parse(
            command,
            format!(
                "record has {} fields, expected {expected}: '{line}'",
                fields.len()
            ),
        ));
    }
    Ok(fields)
}

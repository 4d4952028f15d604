// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Single-line `key=value` descriptor parsing, the shape `scontrol -o`
//! prints for nodes and partitions.

use std::collections::BTreeMap;

/// Split one descriptor line into a key -> value map. Tokens without a
/// `=` continue the previous value (scontrol prints free-text fields
/// like `Reason=Not responding` unquoted).
pub(crate) fn parse_descriptor(line: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut last_key: Option<String> = None;
    for token in line.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                map.insert(key.to_string(), value.to_string());
                last_key = Some(key.to_string());
            }
            _ => {
                if let Some(entry) = last_key.as_ref().and_then(|key| map.get_mut(key)) {
                    entry.push(' ');
                    entry.push_str(token);
                }
            }
        }
    }
    map
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Line-oriented `qconf`/`qacct` record parsing: one `key value...` pair
//! per logical line, with backslash continuations joined first.

use std::collections::BTreeMap;

/// Parse one `qconf -sq/-sp/-shgrp` style record into a key -> raw value
/// map. Long values wrapped with a trailing `\` are joined before
/// splitting; a line without a value yields an empty string.
pub(crate) fn parse_record(lines: &[String]) -> BTreeMap<String, String> {
    let mut record = BTreeMap::new();
    for line in join_continuations(lines) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.split_once(char::is_whitespace) {
            Some((key, value)) => record.insert(key.to_string(), value.trim().to_string()),
            None => record.insert(trimmed.to_string(), String::new()),
        };
    }
    record
}

/// Names as printed by the `-sql`/`-spl`/`-shgrpl` listing commands: one
/// per line, blanks ignored.
pub(crate) fn name_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_continuations(lines: &[String]) -> Vec<String> {
    let mut joined: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;
    for line in lines {
        let mut current = match pending.take() {
            Some(prefix) => prefix + line.trim_start(),
            None => line.clone(),
        };
        if let Some(stripped) = current.trim_end().strip_suffix('\\') {
            current = stripped.to_string();
            pending = Some(current);
        } else {
            joined.push(current);
        }
    }
    if let Some(rest) = pending {
        joined.push(rest);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn record_splits_key_from_rest_of_line() {
        let record = parse_record(&lines(&[
            "qname                 all.q",
            "hostlist              @allhosts",
            "load_thresholds       np_load_avg=1.75",
            "",
        ]));
        assert_eq!(record["qname"], "all.q");
        assert_eq!(record["hostlist"], "@allhosts");
        assert_eq!(record["load_thresholds"], "np_load_avg=1.75");
    }

    #[test]
    fn wrapped_values_are_joined_before_splitting() {
        let record = parse_record(&lines(&[
            "hostlist              node01 node02 \\",
            "                      node03",
        ]));
        assert_eq!(record["hostlist"], "node01 node02 node03");
    }

    #[test]
    fn key_without_value_is_kept_with_an_empty_value() {
        let record = parse_record(&lines(&["tmpdir"]));
        assert_eq!(record["tmpdir"], "");
    }

    #[test]
    fn name_listing_skips_blanks() {
        assert_eq!(
            name_lines(&lines(&["all.q", "", "  gpu.q  "])),
            vec!["all.q".to_string(), "gpu.q".to_string()]
        );
    }
}

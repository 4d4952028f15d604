// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Job-state classification for SLURM's long-form state names as printed
//! by `squeue %T` and the sacct `State` column.

use crate::app::model::JobCategory;

const FINISHED: &[&str] = &["COMPLETED"];
const PENDING: &[&str] = &[
    "PENDING",
    "CONFIGURING",
    "REQUEUED",
    "REQUEUE_FED",
    "REQUEUE_HOLD",
    "RESV_DEL_HOLD",
];
const RUNNING: &[&str] = &["RUNNING", "COMPLETING", "SIGNALING", "STAGE_OUT"];
const SUSPENDED: &[&str] = &["SUSPENDED", "STOPPED"];
const DELETED: &[&str] = &["CANCELLED", "TIMEOUT", "DEADLINE", "PREEMPTED", "REVOKED"];
const ERROR: &[&str] = &[
    "FAILED",
    "BOOT_FAIL",
    "NODE_FAIL",
    "OUT_OF_MEMORY",
    "SPECIAL_EXIT",
];

/// Classify a long-form state name by exact membership, checked in a
/// fixed order. sacct decorates cancellations as `CANCELLED by <uid>`;
/// only the leading word is the state. Total: anything outside all
/// tables is `Unknown`.
pub(crate) fn classify(name: &str) -> JobCategory {
    let name = name
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    let tables: &[(&[&str], JobCategory)] = &[
        (FINISHED, JobCategory::Finished),
        (PENDING, JobCategory::Pending),
        (RUNNING, JobCategory::Running),
        (SUSPENDED, JobCategory::Suspended),
        (DELETED, JobCategory::Deleted),
        (ERROR, JobCategory::Error),
    ];
    for (table, category) in tables {
        if table.contains(&name.as_str()) {
            return *category;
        }
    }
    JobCategory::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_maps_to_its_category() {
        let expectations: &[(&[&str], JobCategory)] = &[
            (FINISHED, JobCategory::Finished),
            (PENDING, JobCategory::Pending),
            (RUNNING, JobCategory::Running),
            (SUSPENDED, JobCategory::Suspended),
            (DELETED, JobCategory::Deleted),
            (ERROR, JobCategory::Error),
        ];
        for (table, category) in expectations {
            for name in *table {
                assert_eq!(classify(name), *category, "state {name:?}");
            }
        }
    }

    #[test]
    fn decorated_cancellations_classify_on_the_leading_word() {
        assert_eq!(classify("CANCELLED by 1000"), JobCategory::Deleted);
    }

    #[test]
    fn classification_is_case_insensitive_on_input() {
        assert_eq!(classify("running"), JobCategory::Running);
    }

    #[test]
    fn unrecognized_names_default_to_unknown() {
        for name in ["", "RESIZING", "ZOMBIE", "qw"] {
            assert_eq!(classify(name), JobCategory::Unknown, "state {name:?}");
        }
    }

    #[test]
    fn state_name_tables_are_disjoint() {
        let tables = [FINISHED, PENDING, RUNNING, SUSPENDED, DELETED, ERROR];
        let mut seen = std::collections::BTreeSet::new();
        for table in tables {
            for name in table {
                assert!(seen.insert(*name), "state {name:?} appears in two tables");
            }
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tera::Context;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::{Host, HostFilter};
use crate::app::ports::HostCapability;
use crate::exec::{classify, Outcome};
use crate::parse::{parse_f64, parse_human_size, parse_i64};

use super::xml::{self, HostRecord};

/// Every listing carries the `global` pseudo-host; it is a summary row,
/// not an execution host.
const GLOBAL_HOST: &str = "global";

pub struct Hosts {
    invoker: Invoker,
}

impl Hosts {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Hosts { invoker }
    }
}

impl HostCapability for Hosts {
    fn list_hosts(&self, filter: &HostFilter) -> Result<Vec<Host>> {
        let mut context = Context::new();
        context.insert("hosts", &filter.names.join(","));
        let (command, result) = self.invoker.invoke("host_list", &context)?;
        match classify(&command, &result, &[])? {
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Records => {
                let records = xml::parse_host_document(&command, &result.stdout)?;
                records
                    .into_iter()
                    .filter(|record| record.hostname != GLOBAL_HOST)
                    .map(|record| map_host(&command, &record))
                    .collect()
            }
        }
    }
}

/// Map one `qhost` record. Sentinel attribute values mean the host did
/// not report that figure and stay absent in the canonical entity.
fn map_host(command: &str, record: &HostRecord) -> Result<Host> {
    let wrap = |err: crate::parse::ScalarError| {
        Error::parse(command, format!("cannot map command result to Host: {err}"))
    };
    let value = |key: &str| record.values.get(key).map(String::as_str).unwrap_or("-");
    Ok(Host {
        hostname: record.hostname.clone(),
        arch: match value("arch_string").trim() {
            "" | "-" => None,
            arch => Some(arch.to_string()),
        },
        num_processors: parse_i64(value("num_proc")).map_err(wrap)?,
        num_sockets: parse_i64(value("m_socket")).map_err(wrap)?,
        num_cores: parse_i64(value("m_core")).map_err(wrap)?,
        num_threads: parse_i64(value("m_thread")).map_err(wrap)?,
        load_avg: parse_f64(value("load_avg")).map_err(wrap)?,
        mem_total: parse_human_size(value("mem_total")).map_err(wrap)?,
        mem_used: parse_human_size(value("mem_used")).map_err(wrap)?,
        swap_total: parse_human_size(value("swap_total")).map_err(wrap)?,
        swap_used: parse_human_size(value("swap_used")).map_err(wrap)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{invoker, output, ScriptedRunner};
    use crate::app::errors::ErrorKind;
    use crate::app::model::EngineType;
    use std::collections::BTreeMap;

    fn record(hostname: &str, pairs: &[(&str, &str)]) -> HostRecord {
        HostRecord {
            hostname: hostname.to_string(),
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn all_sentinel_record_keeps_only_the_hostname() {
        let rec = record(
            "node01",
            &[
                ("arch_string", "-"),
                ("num_proc", "-"),
                ("m_socket", "-"),
                ("m_core", "-"),
                ("m_thread", "-"),
                ("load_avg", "-"),
                ("mem_total", "-"),
                ("mem_used", "-"),
                ("swap_total", "-"),
                ("swap_used", "-"),
            ],
        );
        let host = map_host("qhost -xml", &rec).unwrap();
        assert_eq!(host, Host {
            hostname: "node01".to_string(),
            ..Host::default()
        });
    }

    #[test]
    fn full_record_converts_units_exactly() {
        let rec = record(
            "node02",
            &[
                ("arch_string", "lx-amd64"),
                ("num_proc", "2"),
                ("m_socket", "1"),
                ("m_core", "2"),
                ("m_thread", "4"),
                ("load_avg", "0.45"),
                ("mem_total", "3.6G"),
                ("mem_used", "1.2M"),
                ("swap_total", "2.0G"),
                ("swap_used", "0"),
            ],
        );
        let host = map_host("qhost -xml", &rec).unwrap();
        assert_eq!(host.arch.as_deref(), Some("lx-amd64"));
        assert_eq!(host.num_processors, Some(2));
        assert_eq!(host.mem_total, Some(3_600_000_000));
        assert_eq!(host.mem_used, Some(1_200_000));
        assert_eq!(host.swap_used, Some(0));
        assert_eq!(host.load_avg, Some(0.45));
    }

    #[test]
    fn unparseable_attribute_is_a_parse_error() {
        let rec = record("node03", &[("num_proc", "two")]);
        let err = map_host("qhost -xml", &rec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("cannot map command result to Host"));
    }

    const LISTING: &str = r#"<?xml version='1.0'?>
<qhost>
 <host name='global'>
   <hostvalue name='num_proc'>-</hostvalue>
 </host>
 <host name='node01'>
   <hostvalue name='arch_string'>lx-amd64</hostvalue>
   <hostvalue name='num_proc'>8</hostvalue>
   <hostvalue name='mem_total'>3.6G</hostvalue>
 </host>
</qhost>"#;

    #[test]
    fn listing_skips_the_global_pseudo_host() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let hosts = Hosts::new(invoker(EngineType::GridEngine, runner.clone()));
        let listed = hosts.list_hosts(&HostFilter::default()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].hostname, "node01");
        assert_eq!(listed[0].mem_total, Some(3_600_000_000));
        assert_eq!(runner.argv(0), vec!["qhost", "-xml"]);
    }

    #[test]
    fn named_filter_lands_in_the_argv() {
        let runner = ScriptedRunner::new(vec![output(LISTING)]);
        let hosts = Hosts::new(invoker(EngineType::GridEngine, runner.clone()));
        let filter = HostFilter {
            names: vec!["node01".to_string(), "node02".to_string()],
        };
        hosts.list_hosts(&filter).unwrap();
        assert_eq!(
            runner.argv(0),
            vec!["qhost", "-xml", "-h", "node01,node02"]
        );
    }
}

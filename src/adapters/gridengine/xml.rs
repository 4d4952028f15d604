// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Explicit decode pass over the engine's XML listings. Produces the
//! property-name -> raw-string maps the mappers consume; no reflection,
//! no schema binding.

use std::collections::BTreeMap;

use roxmltree::Document;

use crate::app::errors::{Error, Result};

/// One `<host>` element of `qhost -xml`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HostRecord {
    pub hostname: String,
    /// `hostvalue` children keyed by their `name` attribute.
    pub values: BTreeMap<String, String>,
}

/// One `<job_list>` element of `qstat -xml`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JobRecord {
    /// Long-form state from the element's `state` attribute
    /// ("running", "pending").
    pub state_name: String,
    /// Child elements keyed by tag name (`JB_job_number`, `JAT_prio`, ...).
    pub values: BTreeMap<String, String>,
}

fn parse_document<'a>(command: &str, text: &'a str) -> Result<Document<'a>> {
    Document::parse(text)
        .map_err(|err| Error::parse(command, format!("malformed XML document: {err}")))
}

/// Decode a `qhost -xml` listing. The pseudo-host `global` is part of
/// every listing and is kept here; the caller decides whether to drop it.
pub(crate) fn parse_host_document(command: &str, lines: &[String]) -> Result<Vec<HostRecord>> {
    let text = lines.join("\n");
    let doc = parse_document(command, &text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "qhost" {
        return Err(Error::parse(
            command,
            format!("expected <qhost> root, found <{}>", root.tag_name().name()),
        ));
    }
    let mut records = Vec::new();
    for host in root.children().filter(|n| n.has_tag_name("host")) {
        let hostname = host
            .attribute("name")
            .ok_or_else(|| Error::parse(command, "<host> element without a name attribute"))?
            .to_string();
        let mut values = BTreeMap::new();
        for value in host.children().filter(|n| n.has_tag_name("hostvalue")) {
            let key = value.attribute("name").ok_or_else(|| {
                Error::parse(command, "<hostvalue> element without a name attribute")
            })?;
            values.insert(key.to_string(), value.text().unwrap_or("").trim().to_string());
        }
        records.push(HostRecord { hostname, values });
    }
    Ok(records)
}

/// Decode a `qstat -xml` listing. Running jobs live under `<queue_info>`,
/// pending ones under the inner `<job_info>`; both carry the same
/// `<job_list>` shape.
pub(crate) fn parse_job_document(command: &str, lines: &[String]) -> Result<Vec<JobRecord>> {
    let text = lines.join("\n");
    let doc = parse_document(command, &text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "job_info" {
        return Err(Error::parse(
            command,
            format!(
                "expected <job_info> root, found <{}>",
                root.tag_name().name()
            ),
        ));
    }
    let mut records = Vec::new();
    for section in root.children().filter(|n| n.is_element()) {
        for job in section.children().filter(|n| n.has_tag_name("job_list")) {
            let state_name = job.attribute("state").unwrap_or("").to_string();
            let mut values = BTreeMap::new();
            for child in job.children().filter(|n| n.is_element()) {
                values.insert(
                    child.tag_name().name().to_string(),
                    child.text().unwrap_or("").trim().to_string(),
                );
            }
            records.push(JobRecord { state_name, values });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::errors::ErrorKind;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const QHOST: &str = r#"<?xml version='1.0'?>
<qhost xmlns:xsd="http://www.w3.org/2001/XMLSchema">
 <host name='global'>
   <hostvalue name='arch_string'>-</hostvalue>
   <hostvalue name='num_proc'>-</hostvalue>
 </host>
 <host name='node01'>
   <hostvalue name='arch_string'>lx-amd64</hostvalue>
   <hostvalue name='num_proc'>2</hostvalue>
   <hostvalue name='mem_total'>3.6G</hostvalue>
 </host>
</qhost>"#;

    #[test]
    fn host_listing_decodes_into_property_maps() {
        let records = parse_host_document("qhost -xml", &lines(QHOST)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hostname, "global");
        assert_eq!(records[1].hostname, "node01");
        assert_eq!(records[1].values["arch_string"], "lx-amd64");
        assert_eq!(records[1].values["mem_total"], "3.6G");
    }

    const QSTAT: &str = r#"<?xml version='1.0'?>
<job_info>
  <queue_info>
    <job_list state="running">
      <JB_job_number>7</JB_job_number>
      <JAT_prio>0.55500</JAT_prio>
      <JB_name>train.sh</JB_name>
      <JB_owner>alice</JB_owner>
      <state>r</state>
      <JAT_start_time>2024-09-17T08:00:05</JAT_start_time>
      <queue_name>all.q@node01</queue_name>
      <slots>4</slots>
    </job_list>
  </queue_info>
  <job_info>
    <job_list state="pending">
      <JB_job_number>8</JB_job_number>
      <JAT_prio>0.00000</JAT_prio>
      <JB_name>wait.sh</JB_name>
      <JB_owner>bob</JB_owner>
      <state>qw</state>
      <JB_submission_time>2024-09-17T09:30:00</JB_submission_time>
      <slots>1</slots>
    </job_list>
  </job_info>
</job_info>"#;

    #[test]
    fn job_listing_collects_running_and_pending_sections() {
        let records = parse_job_document("qstat -xml", &lines(QSTAT)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state_name, "running");
        assert_eq!(records[0].values["state"], "r");
        assert_eq!(records[0].values["queue_name"], "all.q@node01");
        assert_eq!(records[1].state_name, "pending");
        assert_eq!(records[1].values["JB_submission_time"], "2024-09-17T09:30:00");
    }

    #[test]
    fn malformed_markup_is_a_parse_error_naming_the_command() {
        let err = parse_host_document("qhost -xml", &lines("<qhost><host")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("qhost -xml"));
    }

    #[test]
    fn wrong_root_element_is_rejected() {
        let err = parse_job_document("qstat -xml", &lines("<oops/>")).unwrap_err();
        assert!(err.to_string().contains("expected <job_info> root"));
    }
}

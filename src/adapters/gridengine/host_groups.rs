// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;

use tera::Context;
use tracing::debug;

use crate::adapters::Invoker;
use crate::app::errors::{Error, Result};
use crate::app::model::host::HOST_GROUP_MARKER;
use crate::app::model::{HostGroup, HostGroupFilter};
use crate::app::ports::HostGroupCapability;
use crate::exec::{classify, Outcome};

use super::{detail, list_field, required, MISSING_MARKER};

pub struct HostGroups {
    invoker: Invoker,
}

impl HostGroups {
    pub(crate) fn new(invoker: Invoker) -> Self {
        HostGroups { invoker }
    }

    fn show_group(&self, name: &str) -> Result<Option<HostGroup>> {
        let mut context = Context::new();
        context.insert("group", name);
        let (command, result) = self.invoker.invoke("hostgroup_show", &context)?;
        match classify(&command, &result, &[MISSING_MARKER])? {
            // Listing and lookup are not atomic against the cluster; a
            // group removed in between is simply skipped.
            Outcome::Empty => {
                debug!(group = name, "host group vanished between listing and lookup");
                Ok(None)
            }
            Outcome::Records => {
                let record = detail::parse_record(&result.stdout);
                map_host_group(&command, &record).map(Some)
            }
        }
    }
}

impl HostGroupCapability for HostGroups {
    fn list_host_groups(&self, filter: &HostGroupFilter) -> Result<Vec<HostGroup>> {
        let (command, result) = self.invoker.invoke("hostgroup_list", &Context::new())?;
        let names = match classify(&command, &result, &[])? {
            Outcome::Empty => return Ok(Vec::new()),
            Outcome::Records => detail::name_lines(&result.stdout),
        };
        let wanted: Vec<String> = filter.names.iter().map(|name| marked(name)).collect();
        let mut groups = Vec::new();
        for name in names {
            if !wanted.is_empty() && !wanted.contains(&name) {
                continue;
            }
            if let Some(group) = self.show_group(&name)? {
                groups.push(group);
            }
        }
        Ok(groups)
    }
}

/// Group names always carry the marker; accept filter entries written
/// without it.
fn marked(name: &str) -> String {
    if name.starts_with(HOST_GROUP_MARKER) {
        name.to_string()
    } else {
        format!("{HOST_GROUP_MARKER}{name}")
    }
}

fn map_host_group(command: &str, record: &BTreeMap<String, String>) -> Result<HostGroup> {
    let name = required(command, record, "group_name")?.to_string();
    if !name.starts_with(HOST_GROUP_MARKER) {
        return Err(Error::parse(
            command,
            format!("host group name '{name}' does not start with '{HOST_GROUP_MARKER}'"),
        ));
    }
    Ok(HostGroup {
        // An empty or NONE member field is an empty list, never absent.
        hosts: list_field(record.get("hostlist").map(String::as_str)),
        name,
    })
}

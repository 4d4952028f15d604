// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tera::Context;

use crate::adapters::{check_time_now, status_from_lines, Invoker};
use crate::app::errors::Result;
use crate::app::model::HealthCheckInfo;
use crate::app::ports::HealthCapability;

pub struct Health {
    invoker: Invoker,
}

impl Health {
    pub(crate) fn new(invoker: Invoker) -> Self {
        Health { invoker }
    }
}

impl HealthCapability for Health {
    /// `scontrol ping` reports reachability on stdout even when the
    /// controller is down, so the exit code is not inspected here; the
    /// trailing UP/DOWN token decides, with NOT_PROVIDED as the fallback.
    fn health_check(&self) -> Result<HealthCheckInfo> {
        let (_, result) = self.invoker.invoke("health_check", &Context::new())?;
        Ok(HealthCheckInfo {
            status: status_from_lines(&result.stdout),
            // The ping reply carries no controller start time.
            cluster_start_time: None,
            check_time: check_time_now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{failure, invoker, output, ScriptedRunner};
    use crate::app::model::{EngineType, SchedulerStatus};

    #[test]
    fn reachable_controller_reports_ok() {
        let runner = ScriptedRunner::new(vec![output("Slurmctld(primary) at master is UP")]);
        let health = Health::new(invoker(EngineType::Slurm, runner.clone()));
        let info = health.health_check().unwrap();
        assert_eq!(info.status.status, SchedulerStatus::Ok);
        assert_eq!(info.status.code, 0);
        assert!(info.cluster_start_time.is_none());
        assert_eq!(runner.argv(0), vec!["scontrol", "ping"]);
    }

    #[test]
    fn down_controller_reports_error_not_a_failure() {
        let mut down = output("Slurmctld(primary) at master is DOWN");
        down.exit_code = 1;
        let runner = ScriptedRunner::new(vec![down]);
        let health = Health::new(invoker(EngineType::Slurm, runner));
        let info = health.health_check().unwrap();
        assert_eq!(info.status.status, SchedulerStatus::Error);
    }

    #[test]
    fn unrecognized_reply_falls_back_to_not_provided() {
        let runner = ScriptedRunner::new(vec![failure(1, "cannot contact controller")]);
        let health = Health::new(invoker(EngineType::Slurm, runner));
        let info = health.health_check().unwrap();
        assert_eq!(info.status.status, SchedulerStatus::NotProvided);
        assert_eq!(info.status.code, 99_999);
    }
}

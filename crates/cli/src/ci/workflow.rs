// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow-style files: `on` triggers, `jobs` -> `steps` -> `run`.

use serde_yaml::{Mapping, Value};

use super::{CiConfig, CiJob, CiSource, Trigger, push_trigger, scalar_text, truthy, untag};
use crate::error::{Error, Result};

pub(super) fn parse(root: &Mapping, source: &CiSource) -> Result<CiConfig> {
    let triggers = root
        .get("on")
        .or_else(|| root.get(Value::Bool(true)))
        .map(triggers_from)
        .unwrap_or_default();

    let Some(jobs) = root.get("jobs") else {
        return Err(Error::Parse {
            path: source.path.clone(),
            message: "missing `jobs` key".to_string(),
        });
    };
    let Some(jobs) = untag(jobs).as_mapping() else {
        return Err(Error::Parse {
            path: source.path.clone(),
            message: "`jobs` is not a mapping".to_string(),
        });
    };

    let mut config = CiConfig::default();
    for (key, job) in jobs {
        let Some(id) = scalar_text(key) else {
            continue;
        };
        let Some(job) = untag(job).as_mapping() else {
            tracing::debug!("{}: job {} is not a mapping", source.path, id);
            continue;
        };

        config.jobs.push(CiJob {
            id,
            steps: steps_from(job),
            triggers: triggers.clone(),
            source: source.clone(),
            allow_failure: job.get("continue-on-error").is_some_and(truthy),
            stage: None,
        });
    }
    Ok(config)
}

fn steps_from(job: &Mapping) -> Vec<String> {
    let Some(steps) = job.get("steps").map(untag).and_then(Value::as_sequence) else {
        return Vec::new();
    };
    steps
        .iter()
        .filter_map(|step| untag(step).as_mapping())
        .filter_map(|step| step.get("run").and_then(scalar_text))
        .collect()
}

/// `on:` accepts an event name, a list of names, or a mapping keyed by name.
fn triggers_from(on: &Value) -> Vec<Trigger> {
    let names: Vec<String> = match untag(on) {
        Value::Mapping(map) => map.keys().filter_map(scalar_text).collect(),
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    };

    let mut triggers = Vec::new();
    for name in names {
        push_trigger(&mut triggers, trigger_for_event(&name));
    }
    triggers
}

fn trigger_for_event(name: &str) -> Trigger {
    match name {
        "push" => Trigger::Push,
        "pull_request" | "pull_request_target" | "merge_group" => Trigger::PullRequest,
        "schedule" => Trigger::Schedule,
        "workflow_dispatch" => Trigger::Manual,
        other => Trigger::Other(other.to_string()),
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

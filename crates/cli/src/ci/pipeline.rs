// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline-style files: top-level job keys with script lists.

use serde_yaml::{Mapping, Value};

use super::{
    CiConfig, CiJob, CiSource, Trigger, push_trigger, scalar_text, string_list, truthy, untag,
};

/// Top-level keywords that configure the pipeline rather than name a job.
pub const RESERVED_KEYS: &[&str] = &[
    "stages",
    "variables",
    "default",
    "include",
    "workflow",
    "image",
    "services",
    "before_script",
    "after_script",
    "cache",
    "artifacts",
    ".pre",
    ".post",
];

const SCRIPT_KEYS: [&str; 3] = ["before_script", "script", "after_script"];

pub(super) fn parse(root: &Mapping, source: &CiSource) -> CiConfig {
    let mut config = CiConfig::default();

    for (key, value) in root {
        let Some(id) = scalar_text(key) else {
            continue;
        };
        // Hidden keys are templates, not jobs.
        if id.starts_with('.') || RESERVED_KEYS.contains(&id.as_str()) {
            continue;
        }
        let Some(job) = untag(value).as_mapping() else {
            continue;
        };

        let steps = SCRIPT_KEYS
            .iter()
            .filter_map(|k| job.get(*k))
            .flat_map(string_list)
            .collect();

        config.jobs.push(CiJob {
            id,
            steps,
            triggers: triggers_from(job),
            source: source.clone(),
            allow_failure: job.get("allow_failure").is_some_and(truthy),
            stage: job.get("stage").and_then(scalar_text),
        });
    }

    config
}

fn triggers_from(job: &Mapping) -> Vec<Trigger> {
    let mut triggers = Vec::new();

    if let Some(rules) = job.get("rules").map(untag).and_then(Value::as_sequence) {
        for rule in rules.iter().filter_map(|r| untag(r).as_mapping()) {
            if rule
                .get("when")
                .and_then(scalar_text)
                .is_some_and(|w| w == "never")
            {
                continue;
            }
            let trigger = match rule.get("if").and_then(scalar_text) {
                Some(condition) => trigger_for_condition(&condition),
                None => Trigger::Push,
            };
            push_trigger(&mut triggers, trigger);
        }
    }

    let excluded: Vec<Trigger> = job
        .get("except")
        .map(refs_of)
        .unwrap_or_default()
        .iter()
        .map(|r| trigger_for_ref(r))
        .collect();

    if let Some(only) = job.get("only") {
        for name in refs_of(only) {
            let trigger = trigger_for_ref(&name);
            if !excluded.contains(&trigger) {
                push_trigger(&mut triggers, trigger);
            }
        }
    }

    if triggers.is_empty() && !excluded.contains(&Trigger::Push) {
        triggers.push(Trigger::Push);
    }
    triggers
}

/// `only`/`except` take a list of refs or a mapping with a `refs` list.
fn refs_of(value: &Value) -> Vec<String> {
    match untag(value) {
        Value::Mapping(map) => map.get("refs").map(string_list).unwrap_or_default(),
        other => string_list(other),
    }
}

fn trigger_for_condition(condition: &str) -> Trigger {
    let condition = condition.to_ascii_lowercase();
    if condition.contains("schedule") {
        Trigger::Schedule
    } else if condition.contains("merge_request") {
        Trigger::PullRequest
    } else if ["\"web\"", "'web'", "\"api\"", "'api'"]
        .iter()
        .any(|source| condition.contains(source))
    {
        Trigger::Manual
    } else {
        Trigger::Push
    }
}

fn trigger_for_ref(name: &str) -> Trigger {
    match name {
        "schedules" => Trigger::Schedule,
        "merge_requests" | "external_pull_requests" => Trigger::PullRequest,
        "web" | "api" | "triggers" => Trigger::Manual,
        "pipelines" | "chat" => Trigger::Other(name.to_string()),
        // "pushes", "branches", "tags" and branch names/patterns.
        _ => Trigger::Push,
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

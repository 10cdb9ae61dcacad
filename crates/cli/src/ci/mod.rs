// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CI configuration unifier.
//!
//! Parses workflow-style files (`.github/workflows/*.yml`) and the root
//! pipeline-style file (`.gitlab-ci.yml`) into one canonical job model.
//!
//! YAML is only ever loaded as `serde_yaml::Value`: plain mappings,
//! sequences and scalars. A custom `!tag` is kept as `Value::Tagged` and
//! stripped by [`untag`]; nothing is constructed from it. serde_yaml's
//! recursion and alias-repetition limits bound hostile documents.

mod pipeline;
mod workflow;

use serde::Serialize;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Root pipeline-style file.
pub const PIPELINE_FILE: &str = ".gitlab-ci.yml";

/// Directory holding workflow-style files.
pub const WORKFLOW_DIR: &str = ".github/workflows";

/// Shape of a CI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CiFormat {
    /// jobs -> steps -> run, with an `on` trigger block.
    Workflow,
    /// Top-level job keys with script lists and rules/only/except.
    Pipeline,
}

impl CiFormat {
    /// Platform name shown in evidence.
    pub fn platform(self) -> &'static str {
        match self {
            CiFormat::Workflow => "github",
            CiFormat::Pipeline => "gitlab",
        }
    }
}

/// Where a job came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CiSource {
    pub format: CiFormat,
    /// Path relative to the repository root.
    pub path: String,
}

impl CiSource {
    pub fn new(format: CiFormat, path: impl Into<String>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }
}

/// Event that starts a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Push,
    PullRequest,
    Schedule,
    Manual,
    Other(String),
}

/// One job in the canonical model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CiJob {
    /// Job key as written; not unique across files.
    pub id: String,
    /// Step commands in execution order.
    pub steps: Vec<String>,
    pub triggers: Vec<Trigger>,
    pub source: CiSource,
    /// Failures of this job do not fail the pipeline.
    pub allow_failure: bool,
    pub stage: Option<String>,
}

impl CiJob {
    pub fn has_trigger(&self, trigger: &Trigger) -> bool {
        self.triggers.contains(trigger)
    }
}

/// Canonical pipeline: jobs from every parsed file, in discovery order.
///
/// An empty config means "no CI detected"; parse failures are tracked
/// separately by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CiConfig {
    pub jobs: Vec<CiJob>,
}

impl CiConfig {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Append another file's jobs after this one's.
    pub fn extend(&mut self, other: CiConfig) {
        self.jobs.extend(other.jobs);
    }

    pub fn has_schedule(&self) -> bool {
        self.jobs.iter().any(|j| j.has_trigger(&Trigger::Schedule))
    }
}

/// Parse one CI file into the canonical model.
///
/// Fails with [`Error::Parse`] on malformed YAML, a document that is not a
/// mapping, or a missing required key.
pub fn parse(raw: &str, source: &CiSource) -> Result<CiConfig> {
    let mut value: Value = serde_yaml::from_str(raw).map_err(|e| parse_error(source, e))?;
    value.apply_merge().map_err(|e| parse_error(source, e))?;

    let Some(root) = untag(&value).as_mapping() else {
        return Err(parse_error(source, "expected a mapping at the top level"));
    };

    match source.format {
        CiFormat::Workflow => workflow::parse(root, source),
        CiFormat::Pipeline => Ok(pipeline::parse(root, source)),
    }
}

/// CI files among the indexed paths, in discovery order: the root pipeline
/// file, then workflow `.yml` files, then `.yaml` files, each sorted by name.
pub fn discover<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<CiSource> {
    let mut pipeline = None;
    let mut yml = Vec::new();
    let mut yaml = Vec::new();

    for path in paths {
        if path == PIPELINE_FILE {
            pipeline = Some(CiSource::new(CiFormat::Pipeline, path));
            continue;
        }
        let Some(name) = path
            .strip_prefix(WORKFLOW_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            continue;
        };
        if name.contains('/') {
            continue;
        }
        if name.ends_with(".yml") {
            yml.push(path);
        } else if name.ends_with(".yaml") {
            yaml.push(path);
        }
    }

    yml.sort_unstable();
    yaml.sort_unstable();

    pipeline
        .into_iter()
        .chain(
            yml.into_iter()
                .chain(yaml)
                .map(|p| CiSource::new(CiFormat::Workflow, p)),
        )
        .collect()
}

fn parse_error(source: &CiSource, message: impl std::fmt::Display) -> Error {
    Error::Parse {
        path: source.path.clone(),
        message: message.to_string(),
    }
}

/// Strip any number of custom tags, leaving the plain value underneath.
pub(crate) fn untag(value: &Value) -> &Value {
    let mut value = value;
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// Scalar as text; `None` for mappings, sequences and null.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Loose truthiness for flags like `allow_failure` and `continue-on-error`.
pub(crate) fn truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && !s.eq_ignore_ascii_case("false"),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => false,
    }
}

/// String or (nested) list of strings, flattened in order.
pub(crate) fn string_list(value: &Value) -> Vec<String> {
    match untag(value) {
        Value::Sequence(items) => items.iter().flat_map(string_list).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

pub(crate) fn push_trigger(triggers: &mut Vec<Trigger>, trigger: Trigger) {
    if !triggers.contains(&trigger) {
        triggers.push(trigger);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

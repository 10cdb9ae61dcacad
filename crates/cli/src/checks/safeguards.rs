// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AI-specific safeguards: the environment, not the prompt, keeps output honest.

use std::sync::Arc;

use super::first_names;
use crate::check::{Category, Check, CheckResult};
use crate::context::RepoContext;

pub fn checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(AiUsageNorms),
        Arc::new(SmallBatchEnforcement),
        Arc::new(MultipleApproachCulture),
        Arc::new(ErrorHandlingPolicy),
        Arc::new(SecurityCriticalMarking),
    ]
}

const AGENT_FILES: &[&str] = &["claude.md", "agents.md"];

const NORM_FILES: &[&str] = &[
    "claude.md",
    "agents.md",
    "contributing.md",
    "docs/ai-*.md",
    "docs/development.md",
    ".cursor/rules/*.mdc",
];

const NORM_PATTERNS: &[&str] = &[
    r"ai.*(usage|policy|guideline|norm|review)",
    r"(review|verify|check).*(ai|generated|agent)",
    r"(test|tests)\s+before\s+(implement|code|asking)",
    r"code\s+style",
    r"(naming|error.handling|comment)\s+(convention|standard|policy)",
];

define_check! {
    AiUsageNorms {
        id: "ai_usage_norms",
        name: "AI Usage Norms",
        description: "Documented policy on AI usage and review expectations",
        source: "DORA 2025 - clear organizational stance on AI use",
        category: Category::AiSafeguards,
        max_points: 4.0,
    }
}

impl AiUsageNorms {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(found) = NORM_PATTERNS
            .iter()
            .find_map(|pattern| ctx.search_any_file(NORM_FILES, pattern))
        {
            return CheckResult::pass(self, format!("AI usage norms found in {found}"));
        }

        if let Some(agent) = ctx.has_file(AGENT_FILES) {
            return CheckResult::partial(
                self,
                2.0,
                format!("Agent file found ({agent}) but no explicit review norms detected"),
                "Add a section on review expectations for AI-generated code and when \
                 manual implementation is required.",
            );
        }

        CheckResult::fail(
            self,
            "No AI usage norms documented",
            "Document AI usage policies: review expectations for generated code, when \
             manual implementation is required, testing-before-implementation norms.",
        )
    }
}

define_check! {
    SmallBatchEnforcement {
        id: "small_batch_enforcement",
        name: "Small Batch Enforcement",
        description: "PR/MR size limits or guidelines enforced",
        source: "DORA 2025 - working in small batches",
        category: Category::AiSafeguards,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl SmallBatchEnforcement {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_command(r"danger|pr-size|diffstat|size-limit") {
            return CheckResult::pass(self, "PR size check tool found in CI");
        }

        if let Some(contributing) = ctx.has_file(&["contributing.md"])
            && ctx.search_file(
                contributing,
                r"small\s+(pr|mr|batch|change)|size\s+limit|keep.*(small|focused)",
            )
        {
            return CheckResult::pass(
                self,
                format!("Small batch guidelines found in {contributing}"),
            );
        }

        if let Some(agent) = ctx.has_file(AGENT_FILES)
            && ctx.search_file(agent, r"small|batch|incremental|focused")
        {
            return CheckResult::partial(
                self,
                1.5,
                format!("Small batch hints found in {agent}"),
                "Add explicit PR size guidelines or automated size checks to CI.",
            );
        }

        CheckResult::fail(
            self,
            "No small batch enforcement found",
            "Add PR size checks (Danger, pr-size-labeler) or document size guidelines \
             in CONTRIBUTING.md.",
        )
    }
}

define_check! {
    MultipleApproachCulture {
        id: "multiple_approach_culture",
        name: "Design-Before-Code Culture",
        description: "RFC process, design docs, or plan-before-code workflow",
        source: "Blog: cognitive offloading guardrails",
        category: Category::AiSafeguards,
        max_points: 3.0,
    }
}

impl MultipleApproachCulture {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(dir) = ctx.has_dir(&["docs/rfcs", "rfcs", "docs/proposals", "docs/designs"]) {
            return CheckResult::pass(self, format!("RFC/design document directory found: {dir}"));
        }

        let design_docs = ctx.find_files(&[
            "docs/*plan*.md",
            "docs/*design*.md",
            "docs/*rfc*.md",
            "docs/*proposal*.md",
            "docs/phase-*.md",
        ]);
        if !design_docs.is_empty() {
            return CheckResult::pass(
                self,
                format!("Design/plan documents found: {}", first_names(&design_docs, 3)),
            );
        }

        if let Some(agent) = ctx.has_file(AGENT_FILES)
            && ctx.search_file(
                agent,
                r"plan.*before|design.*first|multiple.*approach|spec\.md|plan\.md",
            )
        {
            return CheckResult::pass(
                self,
                format!("Plan-before-code workflow documented in {agent}"),
            );
        }

        if let Some(rule) = ctx.search_any_file(&[".cursor/rules/*.mdc"], r"plan|design|spec") {
            return CheckResult::pass(self, format!("Plan-driven development rule found in {rule}"));
        }

        CheckResult::fail(
            self,
            "No design-before-code process found",
            "Create a docs/rfcs/ or docs/designs/ directory and start significant \
             changes with a design doc or plan.",
        )
    }
}

fn has_any_language(ctx: &RepoContext) -> bool {
    !ctx.languages().is_empty()
}

define_check! {
    ErrorHandlingPolicy {
        id: "error_handling_policy",
        name: "Error Handling Policy",
        description: "Policy against panic/crash patterns in code",
        source: "Blog: AI agents deleting tests, using expect()",
        category: Category::AiSafeguards,
        max_points: 3.0,
        uses_ci: true,
        applies_to: has_any_language,
    }
}

impl ErrorHandlingPolicy {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(cargo) = ctx.has_file(&["cargo.toml"])
            && ctx.search_file(cargo, r"unwrap_used|expect_used")
        {
            return CheckResult::pass(self, "Clippy panic-prevention lints configured");
        }

        if ctx.ci_has_command(r"clippy.*unwrap_used|clippy.*expect_used") {
            return CheckResult::pass(self, "Panic-prevention clippy lints in CI");
        }

        if let Some(eslint) =
            ctx.has_file(&[".eslintrc.json", ".eslintrc.yml", "eslint.config.js"])
            && ctx.search_file(eslint, r"no-throw-literal|no-implicit-coercion")
        {
            return CheckResult::pass(self, "Error handling ESLint rules configured");
        }

        if let Some(agent) = ctx.has_file(AGENT_FILES)
            && ctx.search_file(agent, r"error.handling|unwrap|expect|panic|Result.*\?")
        {
            return CheckResult::partial(
                self,
                1.5,
                format!("Error handling guidelines found in {agent}"),
                "Enforce error handling rules mechanically via lints, not just documentation.",
            );
        }

        CheckResult::fail(
            self,
            "No error handling policy found",
            "Add clippy lints (unwrap_used, expect_used) for Rust, ESLint rules for JS/TS, \
             or document error handling patterns in agent instructions.",
        )
    }
}

define_check! {
    SecurityCriticalMarking {
        id: "security_critical_marking",
        name: "Security-Critical Path Marking",
        description: "Critical code paths identified for extra review",
        source: "Blog: 80% problem in security infrastructure",
        category: Category::AiSafeguards,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl SecurityCriticalMarking {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(owners) = ctx.has_file(&["CODEOWNERS", ".github/CODEOWNERS"]) {
            return CheckResult::pass(self, format!("CODEOWNERS found: {owners}"));
        }

        if let Some(policy) = ctx.has_file(&["security.md", ".github/security.md"]) {
            return CheckResult::pass(self, format!("Security policy found: {policy}"));
        }

        if ctx.ci_has_command(r"sast|dast|semgrep|bandit|gosec|brakeman") {
            return CheckResult::pass(self, "Security scanning in CI");
        }

        CheckResult::fail(
            self,
            "No security-critical path marking found",
            "Add CODEOWNERS for sensitive directories, SECURITY.md for vulnerability \
             reporting, or SAST scanning in CI.",
        )
    }
}

#[cfg(test)]
#[path = "safeguards_tests.rs"]
mod tests;

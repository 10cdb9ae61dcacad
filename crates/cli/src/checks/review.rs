// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Review and drift prevention: separate authoring from reviewing, catch decay.

use std::sync::Arc;

use crate::check::{Category, Check, CheckResult};
use crate::context::RepoContext;

pub fn checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(CodeReviewRequired),
        Arc::new(ScheduledCi),
        Arc::new(StaleDocDetection),
        Arc::new(MrTemplate),
        Arc::new(AutomatedReview),
        Arc::new(DocSyncCheck),
    ]
}

define_check! {
    CodeReviewRequired {
        id: "code_review_required",
        name: "Code Review Required",
        description: "PR/MR reviews required before merge",
        source: "OpenAI Harness Engineering - author/reviewer separation",
        category: Category::Review,
        max_points: 4.0,
        uses_ci: true,
    }
}

impl CodeReviewRequired {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(owners) =
            ctx.has_file(&["CODEOWNERS", ".github/CODEOWNERS", "docs/CODEOWNERS"])
        {
            return CheckResult::pass(self, format!("CODEOWNERS file found: {owners}"));
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if raw.contains("approval") || raw.contains("review") {
            return CheckResult::partial(
                self,
                2.0,
                "Review-related configuration found in CI",
                "Enforce code review via branch protection rules.",
            );
        }

        CheckResult::fail(
            self,
            "No CODEOWNERS or review configuration found; branch protection is not \
             visible to offline analysis",
            "Enable required reviews in branch protection settings and add CODEOWNERS.",
        )
    }
}

define_check! {
    ScheduledCi {
        id: "scheduled_ci",
        name: "Scheduled CI Jobs",
        description: "Nightly or periodic CI jobs for drift detection",
        source: "OpenAI Harness Engineering - garbage collection agents",
        category: Category::Review,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl ScheduledCi {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_schedule() {
            return CheckResult::pass(self, "Scheduled CI pipeline found");
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if raw.contains("cron") || raw.contains("schedule") {
            return CheckResult::pass(self, "Scheduled trigger found in CI config");
        }

        CheckResult::fail(
            self,
            "No scheduled CI jobs found",
            "Add scheduled/nightly CI pipelines for drift detection: stricter lints, \
             dependency freshness, doc coverage scans.",
        )
    }
}

const DOC_QUALITY_TOOLS: &[(&str, &str)] = &[
    ("link checking", r"link.check|markdown.link|lychee|linkinator"),
    ("prose linting", r"vale|textlint|markdownlint"),
];

define_check! {
    StaleDocDetection {
        id: "stale_doc_detection",
        name: "Stale Documentation Detection",
        description: "Checks for TODO/FIXME accumulation or doc freshness",
        source: "OpenAI Harness Engineering - quality drift",
        category: Category::Review,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl StaleDocDetection {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_command(r"todo|fixme|hack") {
            return CheckResult::pass(self, "TODO/FIXME scanning found in CI");
        }

        if let Some((kind, _)) = DOC_QUALITY_TOOLS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_command(pattern))
        {
            return CheckResult::pass(self, format!("Documentation quality check in CI: {kind}"));
        }

        CheckResult::fail(
            self,
            "No stale documentation detection found",
            "Add TODO/FIXME scanning, link checking (lychee), or prose linting (vale) to CI.",
        )
    }
}

define_check! {
    MrTemplate {
        id: "mr_template",
        name: "PR/MR Template",
        description: "Pull/merge request template enforcing description and test plan",
        source: "DORA 2025 - working in small batches",
        category: Category::Review,
        max_points: 2.0,
    }
}

impl MrTemplate {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(template) = ctx.has_file(&[
            ".github/pull_request_template.md",
            ".github/PULL_REQUEST_TEMPLATE/*.md",
            ".gitlab/merge_request_templates/*.md",
            "docs/pull_request_template.md",
            "pull_request_template.md",
        ]) {
            return CheckResult::pass(self, format!("PR/MR template found: {template}"));
        }

        if ctx.has_dir(&[".gitlab/merge_request_templates"]).is_some() {
            return CheckResult::pass(self, "GitLab MR template directory found");
        }

        CheckResult::fail(
            self,
            "No PR/MR template found",
            "Add .github/PULL_REQUEST_TEMPLATE.md or \
             .gitlab/merge_request_templates/Default.md with sections for description, \
             testing, and impact.",
        )
    }
}

const REVIEW_BOT_FILES: &[&str] = &[
    ".coderabbit.yaml",
    ".github/copilot-review.yml",
    "renovate.json",
    ".renovaterc",
    ".renovaterc.json",
    "dependabot.yml",
    ".github/dependabot.yml",
];

const REVIEW_BOT_KEYWORDS: &[&str] = &["coderabbit", "codeclimate", "sonarqube", "sonarcloud", "duo"];

define_check! {
    AutomatedReview {
        id: "automated_review",
        name: "Automated Code Review",
        description: "Bot reviewers or automated review tools configured",
        source: "OpenAI Harness Engineering - separate authoring and reviewing agents",
        category: Category::Review,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl AutomatedReview {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(found) = ctx.has_file(REVIEW_BOT_FILES) {
            return CheckResult::pass(self, format!("Automated review tool configured: {found}"));
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if let Some(keyword) = REVIEW_BOT_KEYWORDS.iter().find(|kw| raw.contains(**kw)) {
            return CheckResult::pass(
                self,
                format!("Automated review tool found in CI: {keyword}"),
            );
        }

        CheckResult::fail(
            self,
            "No automated review tools found",
            "Configure CodeRabbit, SonarCloud, Dependabot/Renovate, or equivalent \
             for automated review on every PR/MR.",
        )
    }
}

const SYNC_COMMANDS: &[&str] = &[r"diff\s+.*\.md", r"doc.*sync", r"agent.*sync", r"golden.*check"];

define_check! {
    DocSyncCheck {
        id: "doc_sync_check",
        name: "Documentation Sync Check",
        description: "CI check that related docs stay in sync",
        source: "OpenAI Harness Engineering - curated knowledge base",
        category: Category::Review,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl DocSyncCheck {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(pattern) = SYNC_COMMANDS.iter().find(|p| ctx.ci_has_command(p)) {
            return CheckResult::pass(self, format!("Doc sync check found in CI: {pattern}"));
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if raw.contains("sync") && (raw.contains("doc") || raw.contains("agent")) {
            return CheckResult::pass(self, "Documentation sync job found in CI");
        }

        CheckResult::fail(
            self,
            "No documentation sync checks found in CI",
            "Add CI jobs that verify related docs stay in sync \
             (e.g. diff AGENTS.md CLAUDE.md, golden fixture checks).",
        )
    }
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;

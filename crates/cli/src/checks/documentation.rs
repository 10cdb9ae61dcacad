// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Architectural documentation: knowledge kept in the repository.

use std::sync::Arc;

use crate::check::{Category, Check, CheckResult};
use crate::context::RepoContext;

pub fn checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(ArchitectureDoc),
        Arc::new(AgentInstructions),
        Arc::new(AdrPresence),
        Arc::new(ModuleBoundaryDocs),
        Arc::new(ApiContracts),
    ]
}

define_check! {
    /// ARCHITECTURE.md or an equivalent overview.
    ArchitectureDoc {
        id: "architecture_doc",
        name: "Architecture Documentation",
        description: "ARCHITECTURE.md or equivalent at repo root",
        source: "matklad ARCHITECTURE.md guide",
        category: Category::Documentation,
        max_points: 5.0,
    }
}

impl ArchitectureDoc {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        match ctx.has_file(&[
            "architecture.md",
            "architecture",
            "docs/architecture.md",
            "docs/architecture/*.md",
            "doc/architecture.md",
        ]) {
            Some(found) => CheckResult::pass(self, format!("Found: {found}")),
            None => CheckResult::fail(
                self,
                "No architecture documentation found",
                "Create ARCHITECTURE.md at repo root: short, stable, focused on \
                 module boundaries and constraints.",
            ),
        }
    }
}

define_check! {
    /// Instructions for coding agents.
    AgentInstructions {
        id: "agent_instructions",
        name: "Agent Instructions",
        description: "CLAUDE.md, AGENTS.md, or equivalent AI agent configuration",
        source: "OpenAI Harness Engineering (2026)",
        category: Category::Documentation,
        max_points: 5.0,
    }
}

impl AgentInstructions {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(found) = ctx.has_file(&[
            "claude.md",
            "agents.md",
            ".cursorrules",
            ".github/copilot-instructions.md",
            "copilot.md",
        ]) {
            return CheckResult::pass(self, format!("Found: {found}"));
        }

        if ctx.has_dir(&[".cursor/rules"]).is_some() {
            return CheckResult::pass(self, "Found: .cursor/rules/ directory");
        }

        CheckResult::fail(
            self,
            "No AI agent instruction files found",
            "Create CLAUDE.md or AGENTS.md with project context, code style, \
             and constraints so agents produce consistent output.",
        )
    }
}

define_check! {
    /// Architecture decision records.
    AdrPresence {
        id: "adr_presence",
        name: "Architecture Decision Records",
        description: "ADR directory with decision records",
        source: "DORA 2025 Report - AI-accessible documentation",
        category: Category::Documentation,
        max_points: 3.0,
    }
}

impl AdrPresence {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(dir) = ctx.has_dir(&[
            "docs/adr",
            "docs/decisions",
            "adr",
            "doc/adr",
            "doc/decisions",
        ]) {
            return CheckResult::pass(self, format!("Found ADR directory: {dir}"));
        }

        if let Some(found) =
            ctx.has_file(&["docs/adr-*.md", "docs/decisions/*.md", "docs/000*.md"])
        {
            return CheckResult::pass(self, format!("Found ADR-like file: {found}"));
        }

        CheckResult::fail(
            self,
            "No Architecture Decision Records found",
            "Create a docs/adr/ directory with numbered markdown decision records.",
        )
    }
}

/// Phrases that state a dependency constraint.
const BOUNDARY_PATTERNS: &[&str] = &[
    r"never\s+depend",
    r"must\s+not\s+depend",
    r"does\s+not\s+(import|depend)",
    r"must\s+not\s+import",
    r"no\s+dependency\s+on",
    r"independent\s+of",
    r"zero.dependency",
];

const BOUNDARY_FILES: &[&str] = &[
    "architecture.md",
    "docs/architecture.md",
    "claude.md",
    "agents.md",
    "readme.md",
    "docs/*.md",
];

define_check! {
    /// Explicit "X must not depend on Y" statements.
    ModuleBoundaryDocs {
        id: "module_boundary_docs",
        name: "Module Boundary Documentation",
        description: "Explicit dependency constraints between modules",
        source: "matklad ARCHITECTURE.md - constraints as absences",
        category: Category::Documentation,
        max_points: 4.0,
    }
}

impl ModuleBoundaryDocs {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let found = BOUNDARY_PATTERNS
            .iter()
            .find_map(|pattern| ctx.search_any_file(BOUNDARY_FILES, pattern));

        match found {
            Some(file) => {
                CheckResult::pass(self, format!("Module boundary constraints found in {file}"))
            }
            None => CheckResult::fail(
                self,
                "No module boundary constraints documented",
                "Document which modules must NOT depend on each other in ARCHITECTURE.md.",
            ),
        }
    }
}

define_check! {
    /// Generated API docs or interface specs.
    ApiContracts {
        id: "api_contracts",
        name: "API Documentation",
        description: "Public API documented via doc generation or spec files",
        source: "DORA 2025 - AI-accessible documentation",
        category: Category::Documentation,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl ApiContracts {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_command(
            r"cargo\s+doc|rustdoc|typedoc|jsdoc|sphinx|mkdocs|pdoc|javadoc|godoc|swag",
        ) {
            return CheckResult::pass(self, "Doc generation found in CI");
        }

        if let Some(spec) = ctx.has_file(&[
            "openapi.yaml",
            "openapi.json",
            "openapi.yml",
            "swagger.yaml",
            "swagger.json",
        ]) {
            return CheckResult::pass(self, format!("API spec found: {spec}"));
        }

        if let Some(config) =
            ctx.has_file(&["mkdocs.yml", "docs/conf.py", "typedoc.json", "jsdoc.json"])
        {
            return CheckResult::pass(self, format!("Doc generation config found: {config}"));
        }

        CheckResult::fail(
            self,
            "No API documentation generation or spec files found",
            "Add doc generation to CI (cargo doc, typedoc, sphinx) or maintain \
             OpenAPI/Swagger specs.",
        )
    }
}

#[cfg(test)]
#[path = "documentation_tests.rs"]
mod tests;

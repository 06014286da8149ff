//! Embedded default catalog.

use crate::models::{Layer, Library, Stack, TaxonomySource};

struct LibrarySeed {
    id: &'static str,
    name: &'static str,
    stack: &'static str,
    rules: &'static [&'static str],
}

const LAYERS: &[(&str, &str)] = &[
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("database", "Database"),
    ("testing", "Testing"),
    ("infrastructure", "Infrastructure"),
    ("coding", "Coding Practices"),
    ("accessibility", "Accessibility"),
];

/// (id, display name, layer)
const STACKS: &[(&str, &str, &str)] = &[
    ("react", "React", "frontend"),
    ("vue", "Vue", "frontend"),
    ("styling", "Styling", "frontend"),
    ("node", "Node.js", "backend"),
    ("rust", "Rust", "backend"),
    ("sql", "SQL", "database"),
    ("nosql", "NoSQL", "database"),
    ("unit", "Unit Testing", "testing"),
    ("e2e", "End-to-End Testing", "testing"),
    ("containers", "Containers", "infrastructure"),
    ("ci-cd", "CI/CD", "infrastructure"),
    ("support-level", "Support Level", "coding"),
    ("version-control", "Version Control", "coding"),
    ("wcag", "WCAG", "accessibility"),
];

const LIBRARIES: &[LibrarySeed] = &[
    LibrarySeed {
        id: "react-coding",
        name: "React Coding Standards",
        stack: "react",
        rules: &[
            "Use functional components with hooks instead of class components",
            "Extract reusable logic into custom hooks named `use*`",
            "Use React.memo only where profiling shows unnecessary re-renders",
        ],
    },
    LibrarySeed {
        id: "react-query",
        name: "React Query",
        stack: "react",
        rules: &[
            "Keep query keys in a single module for {{project_name}} so invalidation stays predictable",
            "Use mutations with optimistic updates for user-facing writes",
            "Configure staleTime per query instead of relying on global defaults",
        ],
    },
    LibrarySeed {
        id: "zustand",
        name: "Zustand",
        stack: "react",
        rules: &[
            "Create one store per domain concern rather than a single global store",
            "Select the smallest slice of state a component needs",
        ],
    },
    LibrarySeed {
        id: "pinia",
        name: "Pinia",
        stack: "vue",
        rules: &[
            "Define stores with the setup syntax for full TypeScript inference",
            "Use storeToRefs when destructuring state in components",
        ],
    },
    LibrarySeed {
        id: "vue-router",
        name: "Vue Router",
        stack: "vue",
        rules: &[
            "Lazy-load route components with dynamic imports",
            "Guard authenticated routes with navigation guards, not component checks",
        ],
    },
    LibrarySeed {
        id: "tailwind",
        name: "Tailwind CSS",
        stack: "styling",
        rules: &[
            "Compose repeated utility groups into components, not @apply blocks",
            "Keep design tokens in the Tailwind config",
        ],
    },
    LibrarySeed {
        id: "express",
        name: "Express",
        stack: "node",
        rules: &[
            "Validate request bodies at the route boundary",
            "Centralise error handling in a single error middleware",
            "Use helmet and rate limiting on every public endpoint",
        ],
    },
    LibrarySeed {
        id: "nestjs",
        name: "NestJS",
        stack: "node",
        rules: &[
            "Keep one module per bounded context",
            "Use DTO classes with class-validator for all inputs",
        ],
    },
    LibrarySeed {
        id: "axum",
        name: "Axum",
        stack: "rust",
        rules: &[
            "Share application state through `State` extractors, not globals",
            "Map domain errors to responses in one `IntoResponse` implementation",
        ],
    },
    LibrarySeed {
        id: "tokio",
        name: "Tokio",
        stack: "rust",
        rules: &[
            "Never block inside async tasks; use spawn_blocking for CPU-bound work",
            "Prefer bounded channels to apply back-pressure",
        ],
    },
    LibrarySeed {
        id: "postgres",
        name: "PostgreSQL",
        stack: "sql",
        rules: &[
            "Use connection pooling sized for the deployment",
            "Add indexes for every foreign key used in joins",
            "Keep schema changes in versioned migrations",
        ],
    },
    LibrarySeed {
        id: "sqlite",
        name: "SQLite",
        stack: "sql",
        rules: &[
            "Enable WAL mode for concurrent readers",
            "Wrap bulk inserts in a single transaction",
        ],
    },
    LibrarySeed {
        id: "mongodb",
        name: "MongoDB",
        stack: "nosql",
        rules: &[
            "Model documents around the queries {{project_name}} actually runs",
            "Use schema validation on collections that store user input",
        ],
    },
    LibrarySeed {
        id: "redis",
        name: "Redis",
        stack: "nosql",
        rules: &[
            "Set a TTL on every cache key",
            "Namespace keys by feature to avoid collisions",
        ],
    },
    LibrarySeed {
        id: "vitest",
        name: "Vitest",
        stack: "unit",
        rules: &[
            "Use vi.mock factories at the top of the file",
            "Prefer explicit assertions over snapshot tests for logic",
        ],
    },
    LibrarySeed {
        id: "jest",
        name: "Jest",
        stack: "unit",
        rules: &[
            "Group related tests with describe blocks",
            "Reset mocks between tests with afterEach",
        ],
    },
    LibrarySeed {
        id: "playwright",
        name: "Playwright",
        stack: "e2e",
        rules: &[
            "Use role-based locators over CSS selectors",
            "Implement the Page Object Model for reusable flows",
            "Run tests in isolated browser contexts",
        ],
    },
    LibrarySeed {
        id: "docker",
        name: "Docker",
        stack: "containers",
        rules: &[
            "Use multi-stage builds to keep runtime images small",
            "Run containers as a non-root user",
        ],
    },
    LibrarySeed {
        id: "kubernetes",
        name: "Kubernetes",
        stack: "containers",
        rules: &[
            "Set resource requests and limits on every container",
            "Define liveness and readiness probes",
        ],
    },
    LibrarySeed {
        id: "github-actions",
        name: "GitHub Actions",
        stack: "ci-cd",
        rules: &[
            "Pin third-party actions to a commit SHA",
            "Cache dependencies keyed on the lockfile hash",
        ],
    },
    LibrarySeed {
        id: "support-expert",
        name: "Expert Support Level",
        stack: "support-level",
        rules: &[
            "Favor elegant, maintainable solutions over verbose code",
            "Highlight potential performance implications and optimization opportunities",
            "Frame solutions within the architecture of {{project_name}}: {{project_description}}",
        ],
    },
    LibrarySeed {
        id: "support-beginner",
        name: "Beginner Support Level",
        stack: "support-level",
        rules: &[
            "Explain each change step by step",
            "Link to official documentation for unfamiliar concepts",
        ],
    },
    LibrarySeed {
        id: "git",
        name: "Git",
        stack: "version-control",
        rules: &[
            "Use conventional commits for every change",
            "Keep feature branches short-lived and rebased on main",
        ],
    },
    LibrarySeed {
        id: "wcag-aa",
        name: "WCAG AA",
        stack: "wcag",
        rules: &[
            "Keep a contrast ratio of at least 4.5:1 for body text",
            "Make every interactive element reachable by keyboard",
            "Provide text alternatives for non-text content",
        ],
    },
];

pub(super) fn builtin_source() -> TaxonomySource {
    TaxonomySource {
        layers: LAYERS
            .iter()
            .map(|(id, name)| Layer {
                id: (*id).into(),
                name: (*name).to_string(),
            })
            .collect(),
        stacks: STACKS
            .iter()
            .map(|(id, name, layer)| Stack {
                id: (*id).into(),
                name: (*name).to_string(),
                layer: (*layer).into(),
            })
            .collect(),
        libraries: LIBRARIES
            .iter()
            .map(|seed| Library {
                id: seed.id.into(),
                name: seed.name.to_string(),
                stack: seed.stack.into(),
                rules: seed.rules.iter().map(|rule| rule.to_string()).collect(),
            })
            .collect(),
    }
}

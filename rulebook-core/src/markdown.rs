//! Markdown fragments for rules documents.
//!
//! Everything here is a pure function of its arguments.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::models::*;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_-]+)\s*\}\}").expect("placeholder pattern is valid")
});

pub const PROJECT_LABEL: &str = "Project";
pub const ALL_RULES_LABEL: &str = "All Rules";

const NO_LIBRARIES_NOTICE: &str =
    "---\n\nNo libraries selected yet. Pick libraries from the rule builder to generate rules.\n";

/// Replace `{{project_name}}` and `{{project_description}}` with values from
/// `project`. Other placeholders are kept exactly as written.
pub fn substitute_placeholders<'a>(template: &'a str, project: &ProjectContext) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(template, |caps: &Captures| match &caps[1] {
        "project_name" => project.name.clone(),
        "project_description" => project.description.clone(),
        _ => caps[0].to_string(),
    })
}

/// Placeholders still present in `text`, in order of appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fail with `UnresolvedPlaceholders` for the first document that still
/// contains a placeholder. Generation never calls this itself.
pub fn ensure_placeholders_resolved(contents: &[RulesContent]) -> Result<()> {
    for content in contents {
        let placeholders = unresolved_placeholders(&content.markdown);
        if !placeholders.is_empty() {
            return Err(Error::UnresolvedPlaceholders {
                file_name: content.file_name.clone(),
                placeholders,
            });
        }
    }
    Ok(())
}

/// The leading project block of every generated document set.
pub fn create_project_markdown(name: &str, description: &str) -> String {
    let mut markdown = format!("# AI Rules for {}\n\n", name);
    if !description.is_empty() {
        markdown.push_str(description);
        markdown.push_str("\n\n");
    }
    markdown
}

/// Project summary document emitted first by the multi-file strategy.
pub fn create_project_rules_content(
    name: &str,
    description: &str,
    target: OutputTarget,
) -> RulesContent {
    RulesContent {
        markdown: create_project_markdown(name, description),
        label: PROJECT_LABEL.to_string(),
        file_name: target.project_file_name().to_string(),
    }
}

/// The single fallback document returned when nothing is selected.
pub fn create_empty_project_rules_content(
    name: &str,
    description: &str,
    target: OutputTarget,
) -> RulesContent {
    let mut markdown = create_project_markdown(name, description);
    markdown.push_str(NO_LIBRARIES_NOTICE);
    RulesContent {
        markdown,
        label: PROJECT_LABEL.to_string(),
        file_name: target.project_file_name().to_string(),
    }
}

/// Render one library's rules, optionally preceded by layer and stack
/// headings.
///
/// Without a `project`, rule fragments are copied as written and every
/// placeholder stays in the text.
///
/// ```text
/// ## Frontend
///
/// ### Guidelines for React
///
/// #### React Query
///
/// - rule one
/// - rule two
/// ```
pub fn render_library_section(
    layer: &Layer,
    stack: &Stack,
    library: &Library,
    project: Option<&ProjectContext>,
    include_layer_header: bool,
    include_stack_header: bool,
) -> String {
    let mut markdown = String::new();

    if include_layer_header {
        markdown.push_str(&format!("## {}\n\n", layer.name));
    }
    if include_stack_header {
        markdown.push_str(&format!("### Guidelines for {}\n\n", stack.name));
    }

    markdown.push_str(&format!("#### {}\n\n", library.name));
    for rule in &library.rules {
        markdown.push_str("- ");
        match project {
            Some(project) => markdown.push_str(&substitute_placeholders(rule, project)),
            None => markdown.push_str(rule),
        }
        markdown.push('\n');
    }
    markdown.push('\n');

    markdown
}

/// Label of a per-library document: `Frontend - React - React Query`.
pub fn library_label(layer: &Layer, stack: &Stack, library: &Library) -> String {
    format!("{} - {} - {}", layer.name, stack.name, library.name)
}

/// File name of a per-library document: `frontend_react_react-query.md`.
///
/// Ids never contain `_`, so distinct libraries always get distinct names.
pub fn library_file_name(
    layer: &Layer,
    stack: &Stack,
    library: &Library,
    target: OutputTarget,
) -> String {
    format!(
        "{}_{}_{}.{}",
        layer.id,
        stack.id,
        library.id,
        target.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Layer, Stack, Library) {
        let layer = Layer {
            id: "frontend".into(),
            name: "Frontend".to_string(),
        };
        let stack = Stack {
            id: "react".into(),
            name: "React".to_string(),
            layer: "frontend".into(),
        };
        let library = Library {
            id: "react-query".into(),
            name: "React Query".to_string(),
            stack: "react".into(),
            rules: vec![
                "Cache queries for {{project_name}}".to_string(),
                "Keep {{ team_name }} in the loop".to_string(),
            ],
        };
        (layer, stack, library)
    }

    #[test]
    fn placeholder_pattern_compiles() {
        let pattern = LazyLock::force(&PLACEHOLDER);
        assert!(pattern.is_match("{{project_name}}"));
        assert!(pattern.is_match("{{ code-owner }}"));
        assert!(!pattern.is_match("{project_name}"));
    }

    #[test]
    fn substitutes_known_placeholders() {
        let project = ProjectContext::new("Acme", "Demo");
        let out = substitute_placeholders("{{project_name}}: {{ project_description }}", &project);
        assert_eq!(out, "Acme: Demo");
    }

    #[test]
    fn leaves_unknown_placeholders_verbatim() {
        let project = ProjectContext::new("Acme", "Demo");
        let out = substitute_placeholders("Ask {{ team_name }} about {{project_name}}", &project);
        assert_eq!(out, "Ask {{ team_name }} about Acme");
        assert_eq!(unresolved_placeholders(&out), vec!["{{ team_name }}"]);
    }

    #[test]
    fn project_markdown_skips_empty_description() {
        assert_eq!(create_project_markdown("Acme", ""), "# AI Rules for Acme\n\n");
        assert_eq!(
            create_project_markdown("Acme", "Demo"),
            "# AI Rules for Acme\n\nDemo\n\n"
        );
    }

    #[test]
    fn renders_section_with_both_headers() {
        let (layer, stack, library) = fixtures();
        let project = ProjectContext::new("Acme", "Demo");
        let out = render_library_section(&layer, &stack, &library, Some(&project), true, true);
        assert_eq!(
            out,
            "## Frontend\n\n### Guidelines for React\n\n#### React Query\n\n\
             - Cache queries for Acme\n- Keep {{ team_name }} in the loop\n\n"
        );
    }

    #[test]
    fn renders_section_without_headers() {
        let (layer, stack, library) = fixtures();
        let out = render_library_section(
            &layer,
            &stack,
            &library,
            Some(&ProjectContext::default()),
            false,
            false,
        );
        assert!(out.starts_with("#### React Query\n\n"));
        assert!(!out.contains("## Frontend"));
        assert!(!out.contains("### Guidelines"));
    }

    #[test]
    fn renders_templates_verbatim_without_project() {
        let (layer, stack, library) = fixtures();
        let out = render_library_section(&layer, &stack, &library, None, false, false);
        assert_eq!(
            out,
            "#### React Query\n\n\
             - Cache queries for {{project_name}}\n- Keep {{ team_name }} in the loop\n\n"
        );
    }

    #[test]
    fn empty_project_content_has_no_headers() {
        let content = create_empty_project_rules_content("Acme", "Demo", OutputTarget::Cursor);
        assert_eq!(content.label, "Project");
        assert_eq!(content.file_name, "project.mdc");
        assert!(content.markdown.starts_with("# AI Rules for Acme\n\nDemo\n\n"));
        assert!(!content.markdown.contains("\n## "));
    }

    #[test]
    fn library_names_are_filesystem_safe() {
        let (layer, stack, library) = fixtures();
        let name = library_file_name(&layer, &stack, &library, OutputTarget::Generic);
        assert_eq!(name, "frontend_react_react-query.md");
        assert_eq!(
            library_label(&layer, &stack, &library),
            "Frontend - React - React Query"
        );
    }

    #[test]
    fn strict_check_reports_first_offender() {
        let contents = vec![
            RulesContent {
                markdown: "clean".to_string(),
                label: "a".to_string(),
                file_name: "a.md".to_string(),
            },
            RulesContent {
                markdown: "needs {{owner}}".to_string(),
                label: "b".to_string(),
                file_name: "b.md".to_string(),
            },
        ];
        match ensure_placeholders_resolved(&contents) {
            Err(Error::UnresolvedPlaceholders {
                file_name,
                placeholders,
            }) => {
                assert_eq!(file_name, "b.md");
                assert_eq!(placeholders, vec!["{{owner}}"]);
            }
            other => panic!("expected unresolved placeholders, got {:?}", other),
        }
        assert!(ensure_placeholders_resolved(&contents[..1]).is_ok());
    }
}

use std::collections::HashSet;

use super::RulesStrategy;
use crate::error::Result;
use crate::markdown::{
    create_empty_project_rules_content, create_project_markdown, render_library_section,
    ALL_RULES_LABEL,
};
use crate::models::*;
use crate::selection::{iterate_layers_stacks_libraries, SelectionGroups};
use crate::taxonomy::Taxonomy;

/// Writes every selected library into one document.
///
/// Each layer heading appears once, at its first library; likewise each
/// stack heading. A stack that starts inside an already-open layer is
/// preceded by an extra blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleFileStrategy {
    target: OutputTarget,
}

impl SingleFileStrategy {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl RulesStrategy for SingleFileStrategy {
    fn generate_rules(
        &self,
        taxonomy: &Taxonomy,
        project: &ProjectContext,
        selected_libraries: &[LibraryId],
        groups: &SelectionGroups,
    ) -> Result<Vec<RulesContent>> {
        if selected_libraries.is_empty() {
            return Ok(vec![create_empty_project_rules_content(
                &project.name,
                &project.description,
                self.target,
            )]);
        }

        let mut markdown = create_project_markdown(&project.name, &project.description);
        let mut seen_layers = HashSet::new();
        let mut seen_stacks = HashSet::new();

        iterate_layers_stacks_libraries(taxonomy, groups, |layer, stack, library| {
            let new_layer = seen_layers.insert(layer.id.clone());
            let new_stack = seen_stacks.insert(stack.id.clone());

            if new_stack && !new_layer {
                markdown.push('\n');
            }
            markdown.push_str(&render_library_section(
                layer,
                stack,
                library,
                Some(project),
                new_layer,
                new_stack,
            ));
        })?;

        tracing::debug!(
            libraries = groups.len(),
            bytes = markdown.len(),
            "Generated single-file rules"
        );

        Ok(vec![RulesContent {
            markdown,
            label: ALL_RULES_LABEL.to_string(),
            file_name: self.target.single_file_name().to_string(),
        }])
    }
}

use super::RulesStrategy;
use crate::error::Result;
use crate::markdown::{
    create_empty_project_rules_content, create_project_rules_content, library_file_name,
    library_label, render_library_section,
};
use crate::models::*;
use crate::selection::{iterate_layers_stacks_libraries, SelectionGroups};
use crate::taxonomy::Taxonomy;

/// Writes a project summary plus one standalone document per library.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFileStrategy {
    target: OutputTarget,
}

impl MultiFileStrategy {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

/// The standalone document for one library, with both headings.
///
/// Pass `None` for `project` to keep placeholders for a later consumer.
pub fn library_rules_content(
    layer: &Layer,
    stack: &Stack,
    library: &Library,
    project: Option<&ProjectContext>,
    target: OutputTarget,
) -> RulesContent {
    RulesContent {
        markdown: render_library_section(layer, stack, library, project, true, true),
        label: library_label(layer, stack, library),
        file_name: library_file_name(layer, stack, library, target),
    }
}

impl RulesStrategy for MultiFileStrategy {
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

        let mut contents = vec![create_project_rules_content(
            &project.name,
            &project.description,
            self.target,
        )];

        iterate_layers_stacks_libraries(taxonomy, groups, |layer, stack, library| {
            contents.push(library_rules_content(
                layer,
                stack,
                library,
                Some(project),
                self.target,
            ));
        })?;

        tracing::debug!(files = contents.len(), "Generated multi-file rules");

        Ok(contents)
    }
}

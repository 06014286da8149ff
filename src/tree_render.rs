//! ASCII tree rendering for the taxonomy with selection markers.

use rulebook_core::{Result, SelectionStore};

const SELECTED: char = '●';
const UNSELECTED: char = '○';

/// One line of the tree: a layer, stack or library.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub title: String,
    pub selected: bool,
    pub children: Vec<TreeNode>,
}

fn selection_symbol(selected: bool) -> char {
    if selected {
        SELECTED
    } else {
        UNSELECTED
    }
}

/// Build layer → stack → library nodes in taxonomy order.
pub fn taxonomy_tree(store: &SelectionStore) -> Result<Vec<TreeNode>> {
    let taxonomy = store.taxonomy();
    let mut roots = Vec::new();

    for layer in taxonomy.layers() {
        let mut stacks = Vec::new();
        for stack in taxonomy.stacks_in_layer(layer.id.as_str())? {
            let libraries = taxonomy
                .libraries_in_stack(stack.id.as_str())?
                .into_iter()
                .map(|library| TreeNode {
                    title: format!("{} ({})", library.name, library.id),
                    selected: store.is_library_selected(library.id.as_str()),
                    children: Vec::new(),
                })
                .collect();
            stacks.push(TreeNode {
                title: stack.name.clone(),
                selected: store.is_stack_selected(stack.id.as_str()),
                children: libraries,
            });
        }
        roots.push(TreeNode {
            title: layer.name.clone(),
            selected: store.is_layer_selected(layer.id.as_str()),
            children: stacks,
        });
    }

    Ok(roots)
}

/// Render nodes as ASCII art with selection symbols.
///
/// Example output:
/// ```text
/// ● Frontend
/// ├── ● React
/// │   ├── ● React Query (react-query)
/// │   └── ○ Zustand (zustand)
/// └── ○ Vue
///     └── ○ Pinia (pinia)
/// ```
pub fn render_tree(nodes: &[TreeNode]) -> String {
    let mut output = String::new();
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        render_node(&mut output, node, "", is_last, true);
    }
    output
}

fn render_node(output: &mut String, node: &TreeNode, prefix: &str, is_last: bool, is_root: bool) {
    if !is_root {
        output.push_str(prefix);
        output.push_str(if is_last { "└── " } else { "├── " });
    }
    output.push(selection_symbol(node.selected));
    output.push(' ');
    output.push_str(&node.title);
    output.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    for (i, child) in node.children.iter().enumerate() {
        let child_is_last = i == node.children.len() - 1;
        render_node(output, child, &child_prefix, child_is_last, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::Taxonomy;
    use std::sync::Arc;

    fn make_node(title: &str, selected: bool, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            title: title.to_string(),
            selected,
            children,
        }
    }

    #[test]
    fn test_single_root() {
        let tree = vec![make_node("Frontend", false, vec![])];
        assert_eq!(render_tree(&tree), "○ Frontend\n");
    }

    #[test]
    fn test_nested_children() {
        let tree = vec![make_node(
            "Frontend",
            true,
            vec![
                make_node(
                    "React",
                    true,
                    vec![
                        make_node("React Query", true, vec![]),
                        make_node("Zustand", false, vec![]),
                    ],
                ),
                make_node("Vue", false, vec![make_node("Pinia", false, vec![])]),
            ],
        )];
        let expected = "● Frontend\n├── ● React\n│   ├── ● React Query\n│   └── ○ Zustand\n└── ○ Vue\n    └── ○ Pinia\n";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_tree_reflects_store_selection() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let mut store = SelectionStore::new(Arc::new(taxonomy));
        store.toggle_library("zustand").unwrap();

        let tree = taxonomy_tree(&store).unwrap();
        let frontend = &tree[0];
        assert_eq!(frontend.title, "Frontend");
        assert!(frontend.selected);

        let rendered = render_tree(&tree);
        assert!(rendered.starts_with("● Frontend\n"));
        assert!(rendered.contains("\n○ Backend\n"));
        assert!(rendered.contains("● Zustand (zustand)"));
        assert!(rendered.contains("○ React Query (react-query)"));
    }
}

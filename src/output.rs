//! Writing generated documents to a project directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rulebook_core::models::{OutputTarget, RulesContent};
use rulebook_core::StrategyKind;

/// Directory under `root` where the target expects documents of this kind.
pub fn install_dir(root: &Path, target: OutputTarget, strategy: StrategyKind) -> PathBuf {
    let relative = match strategy {
        StrategyKind::SingleFile => target.single_file_dir(),
        StrategyKind::MultiFile => target.multi_file_dir(),
    };
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Write each document under the install directory. Existing files are
/// overwritten. Returns the written paths in document order.
pub fn write_rules(
    root: &Path,
    target: OutputTarget,
    strategy: StrategyKind,
    contents: &[RulesContent],
) -> Result<Vec<PathBuf>> {
    let dir = install_dir(root, target, strategy);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(contents.len());
    for content in contents {
        let path = dir.join(&content.file_name);
        fs::write(&path, &content.markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(label = %content.label, path = %path.display(), "Wrote rules file");
        written.push(path);
    }
    Ok(written)
}

/// Print documents to stdout, separated by their labels when there are
/// several.
pub fn render_stdout(contents: &[RulesContent]) -> String {
    if let [single] = contents {
        return single.markdown.clone();
    }
    contents
        .iter()
        .map(|content| format!("<!-- {} ({}) -->\n{}", content.label, content.file_name, content.markdown))
        .collect::<Vec<_>>()
        .join("\n")
}

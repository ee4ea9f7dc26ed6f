use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ExclusionSet;
use crate::encoding;
use crate::error::ExportError;
use crate::progress::{ItemProgress, ProgressConfig};
use crate::report::{DirNode, FileEntry, ReportTree};

/// Walk the project directory and build the report tree.
///
/// Exclusion filters are applied while walking, so excluded directories are
/// never descended into and excluded paths never appear in the tree. An
/// unreadable root is fatal; errors on nested paths are skipped with a
/// warning.
pub fn scan(root: &Path, exclusions: &ExclusionSet) -> Result<ReportTree, ExportError> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    let mut dirs: BTreeMap<PathBuf, DirNode> = BTreeMap::new();
    dirs.insert(PathBuf::new(), DirNode::new(project_name.clone(), String::new()));

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                !exclusions.is_dir_excluded(&name)
            } else {
                !exclusions.is_file_excluded(&name)
            }
        });

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }

                let relative = match entry.path().strip_prefix(root) {
                    Ok(p) => p.to_path_buf(),
                    Err(_) => continue,
                };
                let relative_str = relative.to_string_lossy().replace('\\', "/");
                let name = entry.file_name().to_string_lossy().to_string();

                if entry.file_type().is_dir() {
                    dirs.insert(relative, DirNode::new(name, relative_str));
                } else {
                    let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    let parent = relative.parent().map(|p| p.to_path_buf()).unwrap_or_default();
                    if let Some(parent_node) = dirs.get_mut(&parent) {
                        parent_node
                            .files
                            .push(FileEntry::new(name, relative_str, size));
                    }
                }
            }
            Err(err) => {
                // The root itself being unreadable is fatal; anything below
                // it is skipped so one bad subtree cannot sink the export
                if err.depth() == 0 {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("walk error"));
                    return Err(ExportError::io(root, source));
                }
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                eprintln!("Warning: skipping {}: {}", path, err);
            }
        }
    }

    // Attach subdirectories to their parents, deepest paths first so
    // every parent is still in the map when its children detach
    let keys: Vec<PathBuf> = dirs.keys().cloned().collect();
    for key in keys.into_iter().rev() {
        if key.as_os_str().is_empty() {
            continue;
        }
        if let Some(node) = dirs.remove(&key) {
            let parent = key.parent().map(|p| p.to_path_buf()).unwrap_or_default();
            if let Some(parent_node) = dirs.get_mut(&parent) {
                parent_node.dirs.push(node);
            }
        }
    }

    let mut root_node = dirs
        .remove(&PathBuf::new())
        .unwrap_or_else(|| DirNode::new(project_name.clone(), String::new()));
    root_node.sort();

    Ok(ReportTree {
        project_name,
        root: root_node,
    })
}

/// Read and decode the content of every file in the tree.
///
/// Per-file read failures and binary classifications are non-fatal: the
/// structural entry stays, its content stays empty. Returns the number of
/// files whose content was captured.
pub fn read_contents(
    tree: &mut ReportTree,
    root: &Path,
    progress_config: ProgressConfig,
    verbose: bool,
) -> usize {
    let total = tree.file_count() as u64;
    let progress = ItemProgress::new(total, progress_config, "files");

    let mut captured = 0;
    tree.for_each_file_mut(|entry| {
        if progress.is_enabled() {
            progress.set_message(entry.relative_path.clone());
        }

        let absolute = root.join(&entry.relative_path);
        match fs::read(&absolute) {
            Ok(bytes) => {
                let detected = encoding::detect(&bytes);
                entry.encoding = Some(detected);
                entry.content = encoding::decode(&bytes, detected);

                if entry.content.is_some() {
                    captured += 1;
                } else if verbose {
                    eprintln!(
                        "Skipping content of {} (detected {})",
                        entry.relative_path,
                        detected.label()
                    );
                }
            }
            Err(e) => {
                eprintln!("Warning: failed to read {}: {}", entry.relative_path, e);
            }
        }

        progress.inc(1);
    });

    progress.finish();
    captured
}

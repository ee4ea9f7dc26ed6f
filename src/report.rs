use crate::encoding::Encoding;

/// A file discovered during traversal
#[derive(Debug)]
pub struct FileEntry {
    /// File name without directories
    pub name: String,
    /// Path relative to the project root, forward slashes
    pub relative_path: String,
    /// Size in bytes at scan time
    pub size: u64,
    /// Detected encoding; None until the file has been read
    pub encoding: Option<Encoding>,
    /// Decoded content; None for structure-only runs, binary files,
    /// and files that failed to read
    pub content: Option<String>,
}

impl FileEntry {
    pub fn new(name: String, relative_path: String, size: u64) -> Self {
        Self {
            name,
            relative_path,
            size,
            encoding: None,
            content: None,
        }
    }
}

/// A directory node in the report tree
#[derive(Debug)]
pub struct DirNode {
    /// Directory name without parents
    pub name: String,
    /// Path relative to the project root; empty for the root itself
    pub relative_path: String,
    pub dirs: Vec<DirNode>,
    pub files: Vec<FileEntry>,
}

impl DirNode {
    pub fn new(name: String, relative_path: String) -> Self {
        Self {
            name,
            relative_path,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a DirNode>) {
        out.push(self);
        for dir in &self.dirs {
            dir.collect(out);
        }
    }

    fn for_each_file_mut(&mut self, f: &mut impl FnMut(&mut FileEntry)) {
        for file in &mut self.files {
            f(file);
        }
        for dir in &mut self.dirs {
            dir.for_each_file_mut(f);
        }
    }

    /// Sort subdirectories by name, recursively. Files keep traversal
    /// order, which is already name-sorted.
    pub fn sort(&mut self) {
        self.dirs.sort_by(|a, b| a.name.cmp(&b.name));
        for dir in &mut self.dirs {
            dir.sort();
        }
    }
}

/// In-memory hierarchy of the scanned project, pre-render
#[derive(Debug)]
pub struct ReportTree {
    /// Name of the project directory
    pub project_name: String,
    pub root: DirNode,
}

impl ReportTree {
    pub fn new(project_name: String) -> Self {
        let root = DirNode::new(project_name.clone(), String::new());
        Self { project_name, root }
    }

    /// All directory nodes in preorder, root first
    pub fn directories(&self) -> Vec<&DirNode> {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out
    }

    /// All file entries in preorder
    pub fn files(&self) -> Vec<&FileEntry> {
        self.directories()
            .into_iter()
            .flat_map(|d| d.files.iter())
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.directories().iter().map(|d| d.files.len()).sum()
    }

    /// Visit every file entry mutably, in preorder
    pub fn for_each_file_mut(&mut self, mut f: impl FnMut(&mut FileEntry)) {
        self.root.for_each_file_mut(&mut f);
    }
}

/// Format a byte count as a human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

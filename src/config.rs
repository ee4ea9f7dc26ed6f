use glob::Pattern;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::{Cli, Format, Mode};
use crate::error::ExportError;
use crate::progress::ProgressConfig;
use crate::template::resolve_template;

/// Compiled exclusion rules for directory and file names.
///
/// Patterns match against the entry name, not the full path, and are
/// case-sensitive. Adding a pattern twice is a no-op.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    dir_patterns: Vec<Pattern>,
    file_patterns: Vec<Pattern>,
    seen_dirs: HashSet<String>,
    seen_files: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add directory name patterns, skipping duplicates
    pub fn add_dirs(&mut self, patterns: &[String]) -> Result<(), ExportError> {
        for raw in clean_patterns(patterns) {
            if self.seen_dirs.insert(raw.clone()) {
                self.dir_patterns.push(compile_pattern(&raw)?);
            }
        }
        Ok(())
    }

    /// Add file name patterns, skipping duplicates
    pub fn add_files(&mut self, patterns: &[String]) -> Result<(), ExportError> {
        for raw in clean_patterns(patterns) {
            if self.seen_files.insert(raw.clone()) {
                self.file_patterns.push(compile_pattern(&raw)?);
            }
        }
        Ok(())
    }

    pub fn is_dir_excluded(&self, name: &str) -> bool {
        self.dir_patterns.iter().any(|p| p.matches(name))
    }

    pub fn is_file_excluded(&self, name: &str) -> bool {
        self.file_patterns.iter().any(|p| p.matches(name))
    }

    /// Raw directory patterns, for summary display
    pub fn dir_pattern_strings(&self) -> Vec<String> {
        self.dir_patterns.iter().map(|p| p.to_string()).collect()
    }

    /// Raw file patterns, for summary display
    pub fn file_pattern_strings(&self) -> Vec<String> {
        self.file_patterns.iter().map(|p| p.to_string()).collect()
    }
}

fn compile_pattern(raw: &str) -> Result<Pattern, ExportError> {
    Pattern::new(raw).map_err(|source| ExportError::InvalidPattern {
        pattern: raw.to_string(),
        source,
    })
}

/// Trim entries and drop empties from a user-supplied pattern list
pub fn clean_patterns(patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Final configuration for a single export run; immutable once built
#[derive(Debug)]
pub struct ExportConfig {
    pub root: PathBuf,
    pub output: String,
    pub mode: Mode,
    pub format: Format,
    pub exclusions: ExclusionSet,
    pub verbose: bool,
    pub progress: ProgressConfig,
}

impl ExportConfig {
    /// Build a run configuration from parsed CLI flags.
    ///
    /// Template exclusions are merged with the --exclude-dirs /
    /// --exclude-files lists. The root must be an existing directory.
    pub fn from_cli(cli: &Cli, root: PathBuf) -> Result<Self, ExportError> {
        let mut exclusions = ExclusionSet::new();

        if let Some(ref name) = cli.template {
            let template = resolve_template(name)?;
            exclusions.add_dirs(&template.exclude_dirs)?;
            exclusions.add_files(&template.exclude_files)?;
        }

        exclusions.add_dirs(&cli.exclude_dirs)?;
        exclusions.add_files(&cli.exclude_files)?;

        let config = Self {
            root,
            output: cli.output.clone(),
            mode: cli.mode,
            format: cli.format,
            exclusions,
            verbose: cli.verbose,
            progress: ProgressConfig::from_flags(cli.progress, cli.no_progress),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.root.is_dir() {
            return Err(ExportError::Config(format!(
                "Directory not found: {}",
                self.root.display()
            )));
        }
        if self.output.trim().is_empty() {
            return Err(ExportError::Config(
                "Output file name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Output path with the format extension appended when missing
    pub fn output_path(&self) -> PathBuf {
        let ext = self.format.extension();
        let suffix = format!(".{}", ext);
        if self.output.ends_with(&suffix) {
            PathBuf::from(&self.output)
        } else {
            PathBuf::from(format!("{}{}", self.output, suffix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli_for(dir: &str, extra: &[&str]) -> Cli {
        let mut args = vec!["sanity-exporter", "--dir", dir];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn test_exclusion_set_exact_names() {
        let mut set = ExclusionSet::new();
        set.add_dirs(&["build".to_string()]).unwrap();

        assert!(set.is_dir_excluded("build"));
        assert!(!set.is_dir_excluded("builds"));
        assert!(!set.is_file_excluded("build"));
    }

    #[test]
    fn test_exclusion_set_glob_patterns() {
        let mut set = ExclusionSet::new();
        set.add_files(&["*.pyc".to_string(), "temp.*".to_string()])
            .unwrap();

        assert!(set.is_file_excluded("module.pyc"));
        assert!(set.is_file_excluded("temp.log"));
        assert!(!set.is_file_excluded("module.py"));
    }

    #[test]
    fn test_exclusion_set_case_sensitive() {
        let mut set = ExclusionSet::new();
        set.add_dirs(&["Build".to_string()]).unwrap();

        assert!(set.is_dir_excluded("Build"));
        assert!(!set.is_dir_excluded("build"));
    }

    #[test]
    fn test_exclusion_set_idempotent_add() {
        let mut set = ExclusionSet::new();
        set.add_dirs(&["build".to_string()]).unwrap();
        set.add_dirs(&["build".to_string()]).unwrap();

        assert_eq!(set.dir_pattern_strings(), vec!["build"]);
    }

    #[test]
    fn test_exclusion_set_invalid_pattern_fails() {
        let mut set = ExclusionSet::new();
        let result = set.add_files(&["[".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_patterns_trims_and_drops_empties() {
        let raw = vec![
            " build ".to_string(),
            "".to_string(),
            "  ".to_string(),
            "dist".to_string(),
        ];
        assert_eq!(clean_patterns(&raw), vec!["build", "dist"]);
    }

    #[test]
    fn test_from_cli_merges_template_and_flags() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let cli = cli_for(
            &dir,
            &["--template", "Python", "--exclude-dirs", "docs"],
        );

        let config = ExportConfig::from_cli(&cli, temp_dir.path().to_path_buf()).unwrap();
        assert!(config.exclusions.is_dir_excluded("__pycache__"));
        assert!(config.exclusions.is_dir_excluded(".venv"));
        assert!(config.exclusions.is_dir_excluded("docs"));
        assert!(config.exclusions.is_file_excluded("cached.pyc"));
    }

    #[test]
    fn test_from_cli_unknown_template_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let cli = cli_for(&dir, &["--template", "Cobol"]);

        let result = ExportConfig::from_cli(&cli, temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(ExportError::UnknownTemplate(_))));
    }

    #[test]
    fn test_from_cli_missing_root_fails() {
        let cli = cli_for("/nonexistent/sanity/root", &[]);
        let result = ExportConfig::from_cli(&cli, PathBuf::from("/nonexistent/sanity/root"));
        assert!(matches!(result, Err(ExportError::Config(_))));
    }

    #[test]
    fn test_output_path_appends_extension() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let cli = cli_for(&dir, &["--output", "report", "--format", "json"]);

        let config = ExportConfig::from_cli(&cli, temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("report.json"));
    }

    #[test]
    fn test_output_path_keeps_existing_extension() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let cli = cli_for(&dir, &["--output", "report.html", "--format", "html"]);

        let config = ExportConfig::from_cli(&cli, temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("report.html"));
    }
}

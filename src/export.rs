use std::fs;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::progress::Spinner;
use crate::render::render;
use crate::walker::{read_contents, scan};

/// Result of a completed export run
#[derive(Debug)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    /// Files that appear in the report tree
    pub files_total: usize,
    /// Files whose content was captured (content/both modes)
    pub files_with_content: usize,
    /// Size of the written report
    pub bytes_written: u64,
}

/// Run the whole export pipeline: scan, read, render, write.
///
/// Each run is a pure function of its configuration and the filesystem
/// state at traversal time; traversal, reading, and rendering happen
/// sequentially.
pub fn export_project(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    config.validate()?;

    let spinner = Spinner::new(config.progress, "Scanning project tree");
    let mut tree = scan(&config.root, &config.exclusions)?;
    spinner.finish();

    let files_total = tree.file_count();
    if config.verbose {
        eprintln!("Found {} files to export", files_total);
    }

    let mut files_with_content = 0;
    if config.mode.includes_content() {
        files_with_content = read_contents(&mut tree, &config.root, config.progress, config.verbose);
    }

    let report = render(&tree, config.mode, config.format)?;

    let output_path = config.output_path();
    fs::write(&output_path, &report).map_err(|e| ExportError::io(&output_path, e))?;

    Ok(ExportSummary {
        output_path,
        files_total,
        files_with_content,
        bytes_written: report.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn make_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("src")).unwrap();
        fs::create_dir(root.join("build")).unwrap();
        fs::write(root.join("src/main.py"), "print('hi')\n").unwrap();
        fs::write(root.join("build/out.bin"), [0u8, 1, 2, 3]).unwrap();

        temp_dir
    }

    fn config_for(project: &TempDir, out_dir: &TempDir, extra: &[&str]) -> ExportConfig {
        let dir = project.path().to_str().unwrap().to_string();
        let output = out_dir
            .path()
            .join("export")
            .to_str()
            .unwrap()
            .to_string();
        let mut args = vec![
            "sanity-exporter".to_string(),
            "--dir".to_string(),
            dir,
            "--output".to_string(),
            output,
            "--no-progress".to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        let cli = Cli::parse_from(args);
        ExportConfig::from_cli(&cli, project.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_export_writes_output_with_extension() {
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let config = config_for(&project, &out_dir, &[]);

        let summary = export_project(&config).unwrap();

        assert!(summary.output_path.exists());
        assert_eq!(
            summary.output_path.extension().and_then(|e| e.to_str()),
            Some("txt")
        );
        assert!(summary.bytes_written > 0);
    }

    #[test]
    fn test_export_exclude_dirs_scenario() {
        // Root contains src/main.py and build/out.bin; excluding build
        // leaves only src/main.py in the report
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let config = config_for(
            &project,
            &out_dir,
            &["--mode", "structure", "--exclude-dirs", "build"],
        );

        let summary = export_project(&config).unwrap();
        let report = fs::read_to_string(&summary.output_path).unwrap();

        assert!(report.contains("main.py"));
        assert!(!report.contains("build"));
        assert!(!report.contains("out.bin"));
        assert_eq!(summary.files_total, 1);
    }

    #[test]
    fn test_export_python_template_defaults() {
        let project = make_project();
        fs::create_dir(project.path().join("__pycache__")).unwrap();
        fs::write(project.path().join("__pycache__/mod.pyc"), b"xx").unwrap();
        fs::create_dir(project.path().join(".venv")).unwrap();
        fs::write(project.path().join(".venv/pyvenv.cfg"), b"home = /usr").unwrap();

        let out_dir = TempDir::new().unwrap();
        let config = config_for(
            &project,
            &out_dir,
            &["--mode", "structure", "--template", "Python"],
        );

        let summary = export_project(&config).unwrap();
        let report = fs::read_to_string(&summary.output_path).unwrap();

        assert!(!report.contains("__pycache__"));
        assert!(!report.contains(".venv"));
        assert!(report.contains("main.py"));
    }

    #[test]
    fn test_export_binary_in_structure_not_in_content() {
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let config = config_for(&project, &out_dir, &["--format", "json"]);

        let summary = export_project(&config).unwrap();
        let report = fs::read_to_string(&summary.output_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();

        // Structural entry survives
        let build_files = parsed["structure"]["build"]["files"].as_array().unwrap();
        assert!(build_files.iter().any(|f| f == "out.bin"));

        // Content is omitted for the binary file
        let content = parsed["content"].as_object().unwrap();
        assert!(content.contains_key("src/main.py"));
        assert!(!content.contains_key("build/out.bin"));
        assert_eq!(summary.files_with_content, 1);
    }

    #[test]
    fn test_export_missing_root_fails() {
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let mut config = config_for(&project, &out_dir, &[]);
        config.root = PathBuf::from("/nonexistent/sanity/project");

        let result = export_project(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_unwritable_output_fails() {
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let mut config = config_for(&project, &out_dir, &[]);
        config.output = out_dir
            .path()
            .join("no/such/dir/export")
            .to_str()
            .unwrap()
            .to_string();

        let result = export_project(&config);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_export_html_report() {
        let project = make_project();
        let out_dir = TempDir::new().unwrap();
        let config = config_for(&project, &out_dir, &["--format", "html"]);

        let summary = export_project(&config).unwrap();
        let report = fs::read_to_string(&summary.output_path).unwrap();

        assert!(report.starts_with("<!DOCTYPE html>"));
        assert!(report.contains("main.py"));
    }
}

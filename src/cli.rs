use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sanity-exporter")]
#[command(author, version, about = "Export project structure and file contents to TXT, JSON, or HTML", long_about = None)]
pub struct Cli {
    /// Project directory to export (omit to start the interactive prompt session)
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Output file name (the format extension is appended when missing)
    #[arg(short = 'o', long = "output", default_value = "export")]
    pub output: String,

    /// What the report contains
    #[arg(short = 'm', long = "mode", value_enum, default_value = "both")]
    pub mode: Mode,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "txt")]
    pub format: Format,

    /// Exclusion template to apply (e.g., Android, Web, Python, Rust)
    #[arg(short = 't', long = "template")]
    pub template: Option<String>,

    /// Directory names to exclude (comma-separated, e.g., --exclude-dirs="build,dist")
    #[arg(long = "exclude-dirs", value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// File name patterns to exclude (comma-separated, e.g., --exclude-files="*.log,temp.*")
    #[arg(long = "exclude-files", value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// List available templates and exit
    #[arg(long = "list-templates")]
    pub list_templates: bool,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Force enable progress bar
    #[arg(long = "progress")]
    pub progress: bool,

    /// Force disable progress bar
    #[arg(long = "no-progress", conflicts_with = "progress")]
    pub no_progress: bool,
}

/// Selects whether the report contains the directory structure, file contents, or both
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Both,
    Structure,
    Content,
}

impl Mode {
    pub fn includes_structure(&self) -> bool {
        matches!(self, Mode::Both | Mode::Structure)
    }

    pub fn includes_content(&self) -> bool {
        matches!(self, Mode::Both | Mode::Content)
    }

    /// Human-readable description, used by the interactive summary
    pub fn describe(&self) -> &'static str {
        match self {
            Mode::Both => "Structure and Content",
            Mode::Structure => "Structure Only",
            Mode::Content => "Content Only",
        }
    }
}

/// Output serialization format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Txt,
    Json,
    Html,
}

impl Format {
    /// File extension appended to the output name when missing
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Json => "json",
            Format::Html => "html",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

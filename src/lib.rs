mod cli;
mod config;
mod encoding;
mod error;
mod export;
mod interactive;
mod progress;
mod render;
mod report;
mod template;
mod walker;

// Re-export public APIs
pub use cli::{Cli, Format, Mode};
pub use config::{clean_patterns, ExclusionSet, ExportConfig};
pub use encoding::{decode, detect, Encoding};
pub use error::ExportError;
pub use export::{export_project, ExportSummary};
pub use interactive::run_interactive;
pub use progress::{ItemProgress, ProgressConfig, Spinner, Timer};
pub use render::render;
pub use report::{format_size, DirNode, FileEntry, ReportTree};
pub use template::{builtin_templates, load_templates, resolve_template, Template};
pub use walker::{read_contents, scan};

use anyhow::Result;

use sanity_exporter::{
    export_project, format_size, load_templates, run_interactive, Cli, ExportConfig,
    ProgressConfig, Timer,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.list_templates {
        return cmd_list_templates();
    }

    let config = match cli.dir {
        Some(ref dir) => ExportConfig::from_cli(&cli, dir.clone())?,
        None => {
            // No --dir: fall back to the prompt session when attached to a
            // terminal, otherwise this is a usage error
            if !atty::is(atty::Stream::Stdin) {
                anyhow::bail!(
                    "--dir is required when not running interactively.\n\
                     Run with --dir <path>, or start from a terminal for the prompt session."
                );
            }
            let progress = ProgressConfig::from_flags(cli.progress, cli.no_progress);
            match run_interactive(progress, cli.verbose)? {
                Some(config) => config,
                None => {
                    println!("Aborted.");
                    return Ok(());
                }
            }
        }
    };

    cmd_export(&config)
}

/// Run the export and print the summary report
fn cmd_export(config: &ExportConfig) -> Result<()> {
    let timer = Timer::new();

    let summary = export_project(config)?;

    println!("\nExport completed successfully");
    println!("  Output file: {}", summary.output_path.display());
    if let Ok(absolute) = std::fs::canonicalize(&summary.output_path) {
        println!("  (Full path: {})", absolute.display());
    }
    println!("  Files listed: {}", summary.files_total);
    if config.mode.includes_content() {
        println!("  Files with content: {}", summary.files_with_content);
    }
    println!("  Report size: {}", format_size(summary.bytes_written));
    println!("  Time: {}", timer.elapsed_string());

    Ok(())
}

/// Print the available templates with their exclusion lists
fn cmd_list_templates() -> Result<()> {
    let templates = load_templates()?;

    println!("Available templates:\n");
    for (name, template) in &templates {
        println!("  {}", name);
        if !template.exclude_dirs.is_empty() {
            println!("    dirs:  {}", template.exclude_dirs.join(", "));
        }
        if !template.exclude_files.is_empty() {
            println!("    files: {}", template.exclude_files.join(", "));
        }
    }

    Ok(())
}

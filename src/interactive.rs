use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::{Format, Mode};
use crate::config::{clean_patterns, ExclusionSet, ExportConfig};
use crate::progress::ProgressConfig;
use crate::template::load_templates;

/// Drive the prompt session and build an export configuration.
///
/// Returns `None` when the user declines the final confirmation.
pub fn run_interactive(
    progress: ProgressConfig,
    verbose: bool,
) -> Result<Option<ExportConfig>> {
    println!("   ~$~ SANITY EXPORTER ~$~");

    let mode = prompt_selection(
        "Select export mode:",
        &[
            ("Structure and Content", Mode::Both),
            ("Structure Only", Mode::Structure),
            ("Content Only", Mode::Content),
        ],
    )?;

    let templates = load_templates()?;
    let mut template_options: Vec<(String, Option<String>)> = vec![("No".to_string(), None)];
    for name in templates.keys() {
        template_options.push((name.clone(), Some(name.clone())));
    }
    let borrowed: Vec<(&str, Option<String>)> = template_options
        .iter()
        .map(|(desc, value)| (desc.as_str(), value.clone()))
        .collect();
    let template_choice = prompt_selection("Use a template?", &borrowed)?;

    let mut exclusions = ExclusionSet::new();
    if let Some(ref name) = template_choice {
        let template = &templates[name];
        exclusions.add_dirs(&template.exclude_dirs)?;
        exclusions.add_files(&template.exclude_files)?;
        println!("Template applied: {}", name);
    }

    let root = loop {
        let input = prompt_input("Project directory path", None)?;
        let path = PathBuf::from(input.trim());
        if path.is_dir() {
            break path;
        }
        eprintln!("Directory does not exist!");
    };

    let add_more = prompt_selection(
        "Add extra exclusions?",
        &[("Yes", true), ("No", false)],
    )?;
    if add_more {
        let dirs_input = prompt_input("Exclude folders (comma separated, e.g.: build, dist)", Some(""))?;
        exclusions.add_dirs(&parse_csv(&dirs_input))?;

        let files_input =
            prompt_input("Exclude files (comma separated, e.g.: *.log, temp.*)", Some(""))?;
        exclusions.add_files(&parse_csv(&files_input))?;
    }

    let format = prompt_selection(
        "Select export format:",
        &[("TXT", Format::Txt), ("JSON", Format::Json), ("HTML", Format::Html)],
    )?;

    let default_name = format!("export.{}", format.extension());
    let output = prompt_input("Output filename", Some(&default_name))?;

    println!("\n        EXPORT SETTINGS:");
    println!("    Mode: {}", mode.describe());
    println!("    Format: {}", format.extension().to_uppercase());
    println!("    Directory: {}", root.display());
    println!(
        "    Excluded folders: {}",
        join_or_none(&exclusions.dir_pattern_strings())
    );
    println!(
        "    Excluded files: {}",
        join_or_none(&exclusions.file_pattern_strings())
    );
    println!("    Output file: {}", output);

    let start = prompt_selection("Start export?", &[("Yes", true), ("No", false)])?;
    if !start {
        return Ok(None);
    }

    Ok(Some(ExportConfig {
        root,
        output,
        mode,
        format,
        exclusions,
        verbose,
        progress,
    }))
}

/// Show a numbered selection menu and return the chosen value
fn prompt_selection<T: Clone>(prompt: &str, options: &[(&str, T)]) -> Result<T> {
    println!("\n{}", prompt);
    for (i, (desc, _)) in options.iter().enumerate() {
        println!("{}. {}", i + 1, desc);
    }

    loop {
        print!("Your choice: ");
        io::stdout().flush()?;
        let line = read_line()?;

        match parse_selection(&line, options.len()) {
            Some(index) => return Ok(options[index].1.clone()),
            None => eprintln!("Invalid choice!"),
        }
    }
}

/// Prompt for free-form input, falling back to a default when given
fn prompt_input(prompt: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) if !d.is_empty() => print!("{} (default: {}): ", prompt, d),
        _ => print!("{}: ", prompt),
    }
    io::stdout().flush()?;

    let line = read_line()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn read_line() -> Result<String> {
    read_prompt_line(&mut io::stdin().lock())
}

/// Read one line for a prompt. A 0-byte read means stdin was closed
/// (Ctrl-D), which ends the session instead of re-prompting forever.
fn read_prompt_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        anyhow::bail!("stdin closed before the prompt session finished");
    }
    Ok(line)
}

/// Parse a 1-based menu choice into a 0-based index
fn parse_selection(input: &str, option_count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    if (1..=option_count).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}

/// Split comma-separated user input into cleaned pattern strings
fn parse_csv(input: &str) -> Vec<String> {
    let raw: Vec<String> = input.split(',').map(|s| s.to_string()).collect();
    clean_patterns(&raw)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

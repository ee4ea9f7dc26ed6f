use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::{Format, Mode};
use crate::error::ExportError;
use crate::report::{DirNode, ReportTree};

/// Serialize the report tree in the requested format.
///
/// The mode selects which sections appear; the format changes only the
/// serialization syntax, never the underlying data.
pub fn render(tree: &ReportTree, mode: Mode, format: Format) -> Result<String, ExportError> {
    match format {
        Format::Txt => Ok(render_txt(tree, mode)),
        Format::Json => render_json(tree, mode),
        Format::Html => Ok(render_html(tree, mode)),
    }
}

// ---------- TXT ----------

fn render_txt(tree: &ReportTree, mode: Mode) -> String {
    let mut out = String::new();

    if mode.includes_structure() {
        out.push_str("\n\n===== PROJECT STRUCTURE =====\n\n");
        write_txt_dir(&mut out, &tree.root, 0);
        out.push_str("\n\n");
    }

    if mode.includes_content() {
        out.push_str("\n\n===== FILE CONTENTS =====\n\n");
        for file in tree.files() {
            if let Some(ref content) = file.content {
                out.push_str(&format!("\n~~~~~ {} ~~~~~~\n\n", file.relative_path));
                out.push_str(content);
                out.push_str("\n\n");
            }
        }
    }

    out
}

fn write_txt_dir(out: &mut String, node: &DirNode, depth: usize) {
    let dir_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };
    out.push_str(&format!("{}{}/\n", dir_prefix, node.name));

    let file_prefix = format!("{}├── ", "│   ".repeat(depth));
    let last_prefix = format!("{}└── ", "│   ".repeat(depth));
    for (i, file) in node.files.iter().enumerate() {
        let prefix = if i + 1 == node.files.len() {
            &last_prefix
        } else {
            &file_prefix
        };
        out.push_str(&format!("{}{}\n", prefix, file.name));
    }

    for dir in &node.dirs {
        write_txt_dir(out, dir, depth + 1);
    }
}

// ---------- JSON ----------

#[derive(Serialize)]
struct JsonReport<'a> {
    project: &'a str,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    structure: Option<BTreeMap<String, JsonDir>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<BTreeMap<&'a str, &'a str>>,
}

#[derive(Serialize)]
struct JsonDir {
    directories: Vec<String>,
    files: Vec<String>,
}

fn render_json(tree: &ReportTree, mode: Mode) -> Result<String, ExportError> {
    let structure = mode.includes_structure().then(|| {
        tree.directories()
            .into_iter()
            .map(|dir| {
                let entry = JsonDir {
                    directories: dir.dirs.iter().map(|d| d.name.clone()).collect(),
                    files: dir.files.iter().map(|f| f.name.clone()).collect(),
                };
                (dir.relative_path.clone(), entry)
            })
            .collect()
    });

    let content = mode.includes_content().then(|| {
        tree.files()
            .into_iter()
            .filter_map(|f| {
                f.content
                    .as_deref()
                    .map(|body| (f.relative_path.as_str(), body))
            })
            .collect()
    });

    let report = JsonReport {
        project: &tree.project_name,
        generated_at: chrono::Utc::now().to_rfc3339(),
        structure,
        content,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ---------- HTML ----------

fn render_html(tree: &ReportTree, mode: Mode) -> String {
    let project = escape_html(&tree.project_name);
    let exported_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Project Export: {project}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }}
        h1, h2 {{ color: #2c3e50; }}
        .structure {{ background-color: #f9f9f9; padding: 15px; border-radius: 5px; }}
        .file-content {{ margin-top: 20px; border-left: 3px solid #3498db; padding-left: 15px; }}
        .file-header {{ font-weight: bold; color: #2980b9; }}
        .content {{ white-space: pre-wrap; font-family: monospace; }}
        .tree {{ font-family: monospace; }}
    </style>
</head>
<body>
    <h1>Project Export: {project}</h1>
    <p>Exported at: {exported_at}</p>
"#
    );

    if mode.includes_structure() {
        html.push_str("<h2>Project Structure</h2>\n");
        html.push_str("<div class='structure'>\n<div class='tree'>\n");
        write_html_dir(&mut html, &tree.root, 0);
        html.push_str("</div>\n</div>\n");
    }

    if mode.includes_content() {
        html.push_str("<h2>File Contents</h2>\n");
        for file in tree.files() {
            if let Some(ref content) = file.content {
                html.push_str("<div class='file-content'>\n");
                html.push_str(&format!(
                    "<div class='file-header'>{}</div>\n",
                    escape_html(&file.relative_path)
                ));
                html.push_str(&format!(
                    "<div class='content'>{}</div>\n",
                    escape_html(content)
                ));
                html.push_str("</div>\n");
            }
        }
    }

    html.push_str("</body>\n</html>");
    html
}

fn write_html_dir(out: &mut String, node: &DirNode, depth: usize) {
    const INDENT: &str = "│&nbsp;&nbsp;&nbsp;";

    let dir_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", INDENT.repeat(depth - 1))
    };
    out.push_str(&format!(
        "<div>{}{}/</div>\n",
        dir_prefix,
        escape_html(&node.name)
    ));

    let file_prefix = format!("{}├── ", INDENT.repeat(depth));
    let last_prefix = format!("{}└── ", INDENT.repeat(depth));
    for (i, file) in node.files.iter().enumerate() {
        let prefix = if i + 1 == node.files.len() {
            &last_prefix
        } else {
            &file_prefix
        };
        out.push_str(&format!("<div>{}{}</div>\n", prefix, escape_html(&file.name)));
    }

    for dir in &node.dirs {
        write_html_dir(out, dir, depth + 1);
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

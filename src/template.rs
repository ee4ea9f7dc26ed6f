use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ExportError;

pub const TEMPLATES_FILENAME: &str = "templates.toml";
pub const APP_CONFIG_DIR: &str = "sanity-exporter";

/// A named, predefined exclusion profile for a common project type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    /// Directory names to exclude
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// File name patterns to exclude
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

/// Built-in templates shipped with the binary
pub fn builtin_templates() -> BTreeMap<String, Template> {
    let mut templates = BTreeMap::new();

    templates.insert(
        "Android".to_string(),
        Template {
            exclude_dirs: as_strings(&["build", "gradle", ".gradle", ".idea", "captures"]),
            exclude_files: as_strings(&[
                ".DS_Store",
                ".gitignore",
                "*.pro",
                "*.iml",
                "gradlew",
                "gradlew.bat",
            ]),
        },
    );

    templates.insert(
        "Web".to_string(),
        Template {
            exclude_dirs: as_strings(&["node_modules", "dist", ".cache", "build"]),
            exclude_files: as_strings(&[".DS_Store", "package-lock.json"]),
        },
    );

    templates.insert(
        "Python".to_string(),
        Template {
            exclude_dirs: as_strings(&["__pycache__", ".pytest_cache", ".venv", "venv", "env"]),
            exclude_files: as_strings(&[".DS_Store", "*.pyc"]),
        },
    );

    templates.insert(
        "Rust".to_string(),
        Template {
            exclude_dirs: as_strings(&["target"]),
            exclude_files: as_strings(&[".DS_Store"]),
        },
    );

    templates
}

fn as_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Path of the optional user templates file
/// (e.g., ~/.config/sanity-exporter/templates.toml)
fn user_templates_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_CONFIG_DIR).join(TEMPLATES_FILENAME))
}

/// Parse a templates file body into named templates
fn parse_templates(content: &str) -> Result<BTreeMap<String, Template>, ExportError> {
    toml::from_str(content)
        .map_err(|e| ExportError::Config(format!("Failed to parse {}: {}", TEMPLATES_FILENAME, e)))
}

/// Overlay user-defined templates on the built-ins; same name wins for the user
fn merge_templates(
    mut base: BTreeMap<String, Template>,
    user: BTreeMap<String, Template>,
) -> BTreeMap<String, Template> {
    for (name, template) in user {
        base.insert(name, template);
    }
    base
}

/// Load built-in templates plus any user-defined ones
pub fn load_templates() -> Result<BTreeMap<String, Template>, ExportError> {
    let builtins = builtin_templates();

    let Some(path) = user_templates_path() else {
        return Ok(builtins);
    };
    if !path.exists() {
        return Ok(builtins);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ExportError::io(&path, e))?;
    let user = parse_templates(&content)?;

    Ok(merge_templates(builtins, user))
}

/// Resolve a template by name; unknown names are a configuration error
pub fn resolve_template(name: &str) -> Result<Template, ExportError> {
    let templates = load_templates()?;
    templates
        .get(name)
        .cloned()
        .ok_or_else(|| ExportError::UnknownTemplate(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_present() {
        let templates = builtin_templates();
        assert!(templates.contains_key("Android"));
        assert!(templates.contains_key("Web"));
        assert!(templates.contains_key("Python"));
        assert!(templates.contains_key("Rust"));
    }

    #[test]
    fn test_python_template_default_exclusions() {
        let templates = builtin_templates();
        let python = &templates["Python"];
        assert!(python.exclude_dirs.contains(&"__pycache__".to_string()));
        assert!(python.exclude_dirs.contains(&".venv".to_string()));
        assert!(python.exclude_files.contains(&"*.pyc".to_string()));
    }

    #[test]
    fn test_web_template_excludes_node_modules() {
        let templates = builtin_templates();
        let web = &templates["Web"];
        assert!(web.exclude_dirs.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_parse_templates_toml() {
        let content = r#"
            [Godot]
            exclude_dirs = [".godot", ".import"]
            exclude_files = ["*.tmp"]
        "#;

        let parsed = parse_templates(content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["Godot"].exclude_dirs, vec![".godot", ".import"]);
        assert_eq!(parsed["Godot"].exclude_files, vec!["*.tmp"]);
    }

    #[test]
    fn test_parse_templates_missing_fields_default_empty() {
        let content = r#"
            [Minimal]
            exclude_dirs = ["out"]
        "#;

        let parsed = parse_templates(content).unwrap();
        assert_eq!(parsed["Minimal"].exclude_dirs, vec!["out"]);
        assert!(parsed["Minimal"].exclude_files.is_empty());
    }

    #[test]
    fn test_parse_templates_invalid_toml_fails() {
        let result = parse_templates("not toml {{{");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(TEMPLATES_FILENAME));
    }

    #[test]
    fn test_merge_templates_user_overrides_builtin() {
        let builtins = builtin_templates();
        let mut user = BTreeMap::new();
        user.insert(
            "Python".to_string(),
            Template {
                exclude_dirs: vec!["__pycache__".to_string()],
                exclude_files: Vec::new(),
            },
        );

        let merged = merge_templates(builtins, user);
        assert_eq!(merged["Python"].exclude_dirs, vec!["__pycache__"]);
        assert!(merged["Python"].exclude_files.is_empty());
        // Untouched builtins survive
        assert!(merged.contains_key("Android"));
    }

    #[test]
    fn test_merge_templates_adds_new_names() {
        let builtins = builtin_templates();
        let count = builtins.len();
        let mut user = BTreeMap::new();
        user.insert("Unity".to_string(), Template::default());

        let merged = merge_templates(builtins, user);
        assert_eq!(merged.len(), count + 1);
        assert!(merged.contains_key("Unity"));
    }
}

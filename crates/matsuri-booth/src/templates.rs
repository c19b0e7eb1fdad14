//! Logo template catalog.
//!
//! The built-in templates are embedded at compile time from
//! `contrib/logos.toml` and parsed once into a process-wide catalog.
//! The renderer turns a template into a gradient texture; here it is
//! pure data.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const BUILTIN_LOGOS: &str = include_str!("../../../contrib/logos.toml");

static CATALOG: OnceLock<Vec<LogoTemplate>> = OnceLock::new();

/// Top-level structure of a logo template file.
#[derive(Debug, Clone, Deserialize)]
struct TemplateFile {
    template: Vec<LogoTemplate>,
}

/// One selectable logo: a caption and its gradient stops.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoTemplate {
    pub key: String,
    /// Two-line caption, lines separated by `\n`.
    pub text: String,
    /// Gradient stops as `#RRGGBB` strings, left to right.
    pub colors: [String; 2],
}

fn catalog() -> &'static Vec<LogoTemplate> {
    CATALOG.get_or_init(|| match toml::from_str::<TemplateFile>(BUILTIN_LOGOS) {
        Ok(f) => f.template,
        Err(e) => {
            eprintln!("matsuri-booth: bad logo template TOML: {e}");
            Vec::new()
        }
    })
}

/// Look up a template by its key. Returns a `'static` reference into the
/// embedded catalog.
pub fn lookup_template(key: &str) -> Option<&'static LogoTemplate> {
    catalog().iter().find(|t| t.key == key)
}

/// List all built-in templates.
pub fn list_templates() -> &'static [LogoTemplate] {
    catalog()
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load a user-supplied template file in the same format as the built-in
/// catalog. Unlike the embedded file, errors here surface to the caller.
pub fn load_template_file(path: &Path) -> Result<Vec<LogoTemplate>, TemplateError> {
    let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: TemplateFile = toml::from_str(&text).map_err(|source| TemplateError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.template)
}

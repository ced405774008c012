//! Loading JSON and YAML documents
//!
//! `.yaml` / `.yml` files parse as YAML, everything else as JSON. Stdin
//! (`-`) has no extension, so it is tried as JSON first and then as YAML.
//!
//! JSON numbers cannot be NaN or infinite, so YAML `.nan` and `.inf` load
//! as `null`.

use std::io::Read;
use std::path::Path as FsPath;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    pub fn from_path(path: &FsPath) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DocFormat::Yaml,
            _ => DocFormat::Json,
        }
    }
}

pub fn parse(text: &str, format: DocFormat) -> Result<Value> {
    Ok(match format {
        DocFormat::Json => serde_json::from_str(text)?,
        DocFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Load a document from a file, or from stdin when `source` is `-`
pub fn load(source: &str) -> Result<Value> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return parse_guessing(&text);
    }

    let path = FsPath::new(source);
    let format = DocFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading document");
    let text = std::fs::read_to_string(path)?;
    parse(&text, format)
}

/// JSON first; if that fails, YAML; if both fail, the JSON error
fn parse_guessing(text: &str) -> Result<Value> {
    match parse(text, DocFormat::Json) {
        Ok(value) => Ok(value),
        Err(json_err) => parse(text, DocFormat::Yaml).map_err(|_| json_err),
    }
}

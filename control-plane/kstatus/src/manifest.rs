use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::unstructured::Unstructured;

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{path}: document {index} is not an object but {found}")]
    NotAnObject {
        path: PathBuf,
        index: usize,
        found: &'static str,
    },
}

const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Parses a multi-document YAML (or JSON) stream. Empty documents are
/// skipped; `origin` only labels errors.
pub fn parse_str(
    content: &str,
    origin: &Path,
) -> Result<Vec<Unstructured>, ManifestError> {
    let mut out = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = Value::deserialize(document).map_err(|source| {
            ManifestError::Yaml {
                path: origin.to_path_buf(),
                source,
            }
        })?;
        if value.is_null() {
            continue;
        }
        let resource = Unstructured::try_from(value).map_err(|e| {
            ManifestError::NotAnObject {
                path: origin.to_path_buf(),
                index,
                found: e.found,
            }
        })?;
        out.push(resource);
    }
    Ok(out)
}

pub fn load_file(path: &Path) -> Result<Vec<Unstructured>, ManifestError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let resources = parse_str(&content, path)?;
    debug!(path = %path.display(), count = resources.len(), "loaded manifest");
    Ok(resources)
}

/// Loads every file in `paths` in order. A directory contributes its
/// `.yaml`, `.yml` and `.json` files (not recursively), sorted by name.
pub fn load_paths(paths: &[PathBuf]) -> Result<Vec<Unstructured>, ManifestError> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in manifest_files(path)? {
                out.extend(load_file(&file)?);
            }
        } else {
            out.extend(load_file(path)?);
        }
    }
    Ok(out)
}

fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_manifest = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| MANIFEST_EXTENSIONS.contains(&e));
        if path.is_file() && is_manifest {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

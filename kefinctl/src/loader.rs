//! Reads the administrator override document and the legacy document from
//! disk or the environment. Both accept JSON or TOML.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use kefin_core::AdminOverrides;
use kefin_model::LegacyConfig;

pub const ADMIN_CONFIG_PATH_ENV: &str = "KEFIN_ADMIN_CONFIG_PATH";
pub const ADMIN_CONFIG_JSON_ENV: &str = "KEFIN_ADMIN_CONFIG_JSON";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid TOML in {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to parse {origin}: toml error: {toml}; json error: {json}")]
    Unrecognized {
        origin: String,
        toml: String,
        json: String,
    },
}

/// Where the admin overrides came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminSource {
    #[default]
    None,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Evaluation order:
/// 1) `path` when given,
/// 2) `$KEFIN_ADMIN_CONFIG_PATH` (TOML or JSON file),
/// 3) `$KEFIN_ADMIN_CONFIG_JSON` (inline JSON),
/// 4) no overrides.
pub fn load_admin_overrides(
    path: Option<&Path>,
) -> Result<(AdminOverrides, AdminSource), LoadError> {
    load_admin_overrides_with(path, |key| env::var(key).ok())
}

fn load_admin_overrides_with<F>(
    path: Option<&Path>,
    lookup: F,
) -> Result<(AdminOverrides, AdminSource), LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = path {
        let overrides = load_document(path)?;
        return Ok((overrides, AdminSource::File(path.to_path_buf())));
    }

    if let Some(path_str) = lookup(ADMIN_CONFIG_PATH_ENV)
        && !path_str.trim().is_empty()
    {
        let path = PathBuf::from(path_str);
        let overrides = load_document(&path)?;
        return Ok((overrides, AdminSource::EnvPath(path)));
    }

    if let Some(raw) = lookup(ADMIN_CONFIG_JSON_ENV)
        && !raw.trim().is_empty()
    {
        let overrides =
            serde_json::from_str(&raw).map_err(|source| LoadError::Json {
                origin: ADMIN_CONFIG_JSON_ENV.to_string(),
                source,
            })?;
        return Ok((overrides, AdminSource::EnvInline));
    }

    Ok((AdminOverrides::default(), AdminSource::None))
}

pub fn load_legacy(path: &Path) -> Result<LegacyConfig, LoadError> {
    load_document(path)
}

/// Parses by extension; anything else is tried as TOML, then JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            serde_json::from_str(&contents).map_err(|source| LoadError::Json {
                origin: path.display().to_string(),
                source,
            })
        }
        Some("toml") | Some("tml") => {
            toml::from_str(&contents).map_err(|source| LoadError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => parse_document(&contents, &path.display().to_string()),
    }
}

pub fn parse_document<T: DeserializeOwned>(
    contents: &str,
    origin: &str,
) -> Result<T, LoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            LoadError::Unrecognized {
                origin: origin.to_string(),
                toml: toml_err.to_string(),
                json: json_err.to_string(),
            }
        })
    })
}

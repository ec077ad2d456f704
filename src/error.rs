//! Typed errors for the fallible edges of the app: loading the catalog,
//! loading the config file, and mounting the navigator.
//!
//! The navigator itself never fails once mounted; bad geometry simply
//! leaves the selection unchanged for that tick.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::catalog::CategoryKey;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("catalog has no categories")]
    Empty,
    #[error("duplicate category key `{0}`")]
    DuplicateKey(CategoryKey),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialise config: {0}")]
    Serialise(#[from] toml::ser::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("the navigator needs at least one category")]
    NoCategories,
}

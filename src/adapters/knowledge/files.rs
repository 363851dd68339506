//! Loaders for the on-disk askables (JSON) and rules (YAML) documents.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::askable::{AskableCatalog, CatalogError};
use crate::domain::knowledge::{KnowledgeBase, KnowledgeError};

/// Errors that can occur while loading knowledge files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid askables file {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error("Invalid rules file {path}: {source}")]
    Rules {
        path: PathBuf,
        #[source]
        source: KnowledgeError,
    },
}

async fn read(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the askable catalog from a JSON file.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<AskableCatalog, LoadError> {
    let path = path.as_ref();
    let catalog = AskableCatalog::from_json_str(&read(path).await?).map_err(|source| LoadError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), askables = catalog.len(), "Askables loaded");
    Ok(catalog)
}

/// Loads the rule set from a YAML file.
pub async fn load_knowledge_base(path: impl AsRef<Path>) -> Result<KnowledgeBase, LoadError> {
    let path = path.as_ref();
    let knowledge = KnowledgeBase::from_yaml_str(&read(path).await?).map_err(|source| LoadError::Rules {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rules = knowledge.len(), "Rules loaded");
    Ok(knowledge)
}

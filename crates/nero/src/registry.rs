//! Named repositories resolved from configuration.
//!
//! The registry is built once, before any request is served, and owns every
//! [`Repository`] for the lifetime of the process.

use crate::config::{NeroConfig, RepoConfig};
use crate::error::{combine, NeroError, Result};
use crate::store::Repository;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Registry {
    repos: BTreeMap<String, Repository>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens every configured repository. The first failure aborts.
    pub fn from_config(config: &NeroConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = Self::new();
        for repo in &config.repos {
            registry.insert(open(repo)?)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, repo: Repository) -> Result<()> {
        if self.repos.contains_key(repo.id()) {
            return Err(NeroError::InvalidRequest(format!(
                "repository {} is already registered",
                repo.id()
            )));
        }
        self.repos.insert(repo.id().to_string(), repo);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Repository> {
        self.repos
            .get(name)
            .ok_or_else(|| NeroError::UnknownRepository(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.repos.values()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Closes every repository, reporting all failures together.
    pub fn close(&self) -> Result<()> {
        self.repos
            .values()
            .fold(Ok(()), |acc, repo| combine(acc, repo.close()))
    }
}

fn open(config: &RepoConfig) -> Result<Repository> {
    match (&config.path, config.index_path()) {
        (Some(path), Some(index)) => Repository::open(config.id.clone(), path, index),
        _ => Ok(Repository::memory(config.id.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_config_opens_memory_and_file_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let config = NeroConfig {
            repos: vec![
                RepoConfig::memory("scratch"),
                RepoConfig::file("generic", dir.path().join("generic")),
            ],
            ..Default::default()
        };

        let registry = Registry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.get("scratch").unwrap().is_file_backed());
        let generic = registry.get("generic").unwrap();
        assert!(generic.is_file_backed());
        assert_eq!(
            generic.index_path(),
            Some(dir.path().join("generic").join("index.jsonl").as_path())
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), ["generic", "scratch"]);
    }

    #[test]
    fn test_get_unknown_repository() {
        let registry = Registry::new();
        let err = registry.get("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownRepository);
    }

    #[test]
    fn test_insert_rejects_duplicate_name() {
        let mut registry = Registry::new();
        registry.insert(Repository::memory("a")).unwrap();
        assert!(registry.insert(Repository::memory("a")).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_close_all() {
        let mut registry = Registry::new();
        registry.insert(Repository::memory("a")).unwrap();
        registry.insert(Repository::memory("b")).unwrap();
        registry.close().unwrap();
    }
}

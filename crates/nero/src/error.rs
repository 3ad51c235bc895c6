use crate::model::Media;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NeroError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt index {} at line {line}: {source}", .path.display())]
    IndexCorrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate id {id} in repository {repo}")]
    DuplicateId { repo: String, id: Uuid },

    #[error("cannot {action} in memory-backed repository {repo}")]
    Unsupported { repo: String, action: &'static str },

    /// The asset was written to disk but never made it into the repository.
    #[error("media {} was written but not indexed: {source}", .media.id)]
    NotIndexed {
        media: Box<Media>,
        #[source]
        source: Box<NeroError>,
    },

    #[error("{}", join_messages(.0))]
    Multiple(Vec<NeroError>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("unknown repository: {0}")]
    UnknownRepository(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("media not found: {0}")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, NeroError>;

/// Coarse classification of a [`NeroError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    IndexCorrupt,
    DuplicateId,
    Unsupported,
    NotIndexed,
    Multiple,
    Serialization,
    Config,
    UnknownRepository,
    InvalidRequest,
    NotFound,
}

impl NeroError {
    /// Builds a `map_err` adapter that tags an I/O failure with what was being done and where.
    pub fn io<'a>(
        action: &'static str,
        path: &'a Path,
    ) -> impl FnOnce(std::io::Error) -> Self + 'a {
        move |source| NeroError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NeroError::Io { .. } => ErrorKind::Io,
            NeroError::IndexCorrupt { .. } => ErrorKind::IndexCorrupt,
            NeroError::DuplicateId { .. } => ErrorKind::DuplicateId,
            NeroError::Unsupported { .. } => ErrorKind::Unsupported,
            NeroError::NotIndexed { .. } => ErrorKind::NotIndexed,
            NeroError::Multiple(_) => ErrorKind::Multiple,
            NeroError::Serialization(_) => ErrorKind::Serialization,
            NeroError::Config(_) => ErrorKind::Config,
            NeroError::UnknownRepository(_) => ErrorKind::UnknownRepository,
            NeroError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            NeroError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Merges two outcomes of the same scoped resource, keeping both failures if both failed.
pub(crate) fn combine(first: Result<()>, second: Result<()>) -> Result<()> {
    match (first, second) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(a), Err(b)) => {
            let mut errors = match a {
                NeroError::Multiple(inner) => inner,
                other => vec![other],
            };
            errors.push(b);
            Err(NeroError::Multiple(errors))
        }
    }
}

fn join_messages(errors: &[NeroError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err(action: &'static str) -> NeroError {
        NeroError::io(action, Path::new("/tmp/x"))(std::io::Error::other("boom"))
    }

    #[test]
    fn test_combine_keeps_single_failure() {
        let result = combine(Err(io_err("write asset")), Ok(()));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);

        let result = combine(Ok(()), Err(io_err("sync asset")));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_combine_keeps_both_failures() {
        let err = combine(Err(io_err("write asset")), Err(io_err("sync asset"))).unwrap_err();
        match &err {
            NeroError::Multiple(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Multiple, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("failed to write asset /tmp/x"));
        assert!(message.contains("failed to sync asset /tmp/x"));
    }

    #[test]
    fn test_combine_flattens_nested_multiple() {
        let nested = combine(Err(io_err("a")), Err(io_err("b")));
        let err = combine(nested, Err(io_err("c"))).unwrap_err();
        match err {
            NeroError::Multiple(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_message_names_action_and_path() {
        let err = io_err("open index");
        assert_eq!(err.to_string(), "failed to open index /tmp/x: boom");
    }
}

//! Local workspace probe using std::fs.

use std::io;
use std::path::Path;

use symgen_core::{
    application::{ApplicationError, ports::WorkspaceProbe},
    error::{SymgenError, SymgenResult},
};

/// Production workspace probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWorkspace;

impl LocalWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl WorkspaceProbe for LocalWorkspace {
    fn is_empty(&self, root: &Path) -> SymgenResult<bool> {
        let mut entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(map_io_error(root, e, "read directory")),
        };

        match entries.next() {
            None => Ok(true),
            Some(Ok(_)) => Ok(false),
            Some(Err(e)) => Err(map_io_error(root, e, "read directory entry")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SymgenError {
    ApplicationError::WorkspaceError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_and_populated_directories() {
        let temp = TempDir::new().unwrap();
        let probe = LocalWorkspace::new();

        assert!(probe.is_empty(temp.path()).unwrap());

        std::fs::write(temp.path().join("pom.xml"), "<project/>").unwrap();
        assert!(!probe.is_empty(temp.path()).unwrap());
    }

    #[test]
    fn missing_directory_counts_as_empty() {
        let temp = TempDir::new().unwrap();
        assert!(
            LocalWorkspace::new()
                .is_empty(&temp.path().join("not-yet"))
                .unwrap()
        );
    }

    #[test]
    fn file_in_place_of_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let err = LocalWorkspace::new().is_empty(&file).unwrap_err();
        assert!(matches!(
            err,
            SymgenError::Application(ApplicationError::WorkspaceError { .. })
        ));
    }
}

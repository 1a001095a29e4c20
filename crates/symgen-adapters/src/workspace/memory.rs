//! In-memory workspace probe for testing.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use symgen_core::{
    application::ports::WorkspaceProbe,
    error::{SymgenError, SymgenResult},
};

/// Tracks which folders hold entries. Cloning shares the state.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    occupied: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file at `path`; every ancestor becomes non-empty.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        if let Ok(mut occupied) = self.occupied.write() {
            let mut current = path.as_ref().parent();
            while let Some(dir) = current {
                occupied.insert(dir.to_path_buf());
                current = dir.parent();
            }
        }
    }

    pub fn clear(&self) {
        if let Ok(mut occupied) = self.occupied.write() {
            occupied.clear();
        }
    }
}

impl WorkspaceProbe for MemoryWorkspace {
    fn is_empty(&self, root: &Path) -> SymgenResult<bool> {
        let occupied = self.occupied.read().map_err(|_| SymgenError::Internal {
            message: "workspace lock poisoned".into(),
        })?;
        Ok(!occupied.contains(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_mark_ancestors_occupied() {
        let ws = MemoryWorkspace::new();
        ws.add_file("/out/project/pom.xml");

        assert!(!ws.is_empty(Path::new("/out/project")).unwrap());
        assert!(!ws.is_empty(Path::new("/out")).unwrap());
        assert!(ws.is_empty(Path::new("/elsewhere")).unwrap());

        ws.clear();
        assert!(ws.is_empty(Path::new("/out")).unwrap());
    }
}

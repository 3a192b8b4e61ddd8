//=========================================================================
// Resource Pack Presence
//=========================================================================
//
// Answers "are this version's assets on disk?" for the welcome flow.
//
// Layout checked by `PackDirectory`:
//   <root>/vanilla-<resource_version>/pack.mcmeta
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

//=== PackLocator Trait ===================================================

/// File-presence check for a version's resource pack.
pub trait PackLocator: Send {
    fn is_present(&self, resource_version: &str) -> bool;
}

//=== PackDirectory =======================================================

/// Resolves pack files below a resource-pack root directory.
#[derive(Debug, Clone)]
pub struct PackDirectory {
    root: PathBuf,
}

impl PackDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Deterministic path of the metadata file marking a complete pack.
    pub fn pack_file(&self, resource_version: &str) -> PathBuf {
        self.root
            .join(format!("vanilla-{}", resource_version))
            .join("pack.mcmeta")
    }
}

impl PackLocator for PackDirectory {
    fn is_present(&self, resource_version: &str) -> bool {
        self.pack_file(resource_version).is_file()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn pack_file_path_is_derived_from_version() {
        let packs = PackDirectory::new("/data/packs");
        assert_eq!(
            packs.pack_file("1.20.1"),
            PathBuf::from("/data/packs/vanilla-1.20.1/pack.mcmeta")
        );
    }

    #[test]
    fn presence_follows_metadata_file() {
        let root = std::env::temp_dir().join(format!("aetheric-packs-{}", std::process::id()));
        let packs = PackDirectory::new(&root);
        assert!(!packs.is_present("1.19.4"));

        let file = packs.pack_file("1.19.4");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "{}").unwrap();

        assert!(packs.is_present("1.19.4"));
        assert!(!packs.is_present("1.20.1"));

        fs::remove_dir_all(&root).unwrap();
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const DB_FILENAME: &str = "mindmosaic.sqlite";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root: the directory holding the executable.
    pub fn root_dir() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            // In development the executable sits in target/debug at the workspace root
            if let Ok(mut path) = std::env::current_exe() {
                path.pop(); // exe name
                path.pop(); // debug
                path.pop(); // target

                let core_path = path.join("apps").join("core");
                if core_path.exists() {
                    return core_path;
                }
                return path;
            }
        }

        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                error!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Default data directory (./data), used when none is configured.
    pub fn default_data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Database directory (<data>/db).
    pub fn db_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("db")
    }

    /// SQLite file holding the key/value store.
    pub fn db_file(data_dir: &Path) -> PathBuf {
        Self::db_dir(data_dir).join(DB_FILENAME)
    }

    /// Creates the data and db directories if missing.
    pub fn init(data_dir: &Path) -> Result<(), std::io::Error> {
        let db_path = Self::db_dir(data_dir);

        if !data_dir.exists() {
            info!("Creating data directory: {:?}", data_dir);
            fs::create_dir_all(data_dir)?;
        }

        if !db_path.exists() {
            info!("Creating db directory: {:?}", db_path);
            fs::create_dir_all(&db_path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_db_dir() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("nested").join("data");

        PortablePathManager::init(&data).unwrap();

        assert!(PortablePathManager::db_dir(&data).is_dir());
        assert_eq!(
            PortablePathManager::db_file(&data).file_name().unwrap(),
            "mindmosaic.sqlite"
        );
    }
}

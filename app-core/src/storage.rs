//! This module defines the `Storage` type which collects frontend and backend
//! state information and provides methods to store/load them to/from a JSON
//! file.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use std::path::{Path, PathBuf};

use crate::string_error::ErrorStringExt;

pub const STORAGE_FILE: &str = "./.app_storage.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct Storage<B, F> {
    pub backend_storage: B,
    pub frontend_storage: F,
}

impl<B, F> Storage<B, F>
where
    B: Serialize + DeserializeOwned,
    F: Serialize + DeserializeOwned,
{
    pub fn new(backend_storage: B, frontend_storage: F) -> Self {
        Self {
            backend_storage,
            frontend_storage,
        }
    }

    pub fn save_json(&self, input_path: Option<&Path>) -> Result<(), String> {
        let output_path = storage_path(input_path);
        let file =
            std::fs::File::create(&output_path).err_to_string("could not open storage file")?;
        to_writer_pretty(file, &self).err_to_string("could not save app state to json")?;
        log::debug!("saved app state to file {:?}", output_path);
        Ok(())
    }

    pub fn load_json(input_path: Option<&Path>) -> Result<Storage<B, F>, String> {
        let input_path = storage_path(input_path);
        let file = std::fs::File::open(&input_path).err_to_string("could not open storage file")?;
        let storage =
            from_reader(file).err_to_string("could not load app state from storage file")?;
        log::debug!("loaded app state from file {:?}", input_path);
        Ok(storage)
    }
}

fn storage_path(input_path: Option<&Path>) -> PathBuf {
    input_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(STORAGE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Front {
        text: String,
        bounds: Option<[f64; 4]>,
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let front = Front {
            text: "7".to_string(),
            bounds: Some([0.0, 50.0, 0.0, 1.0]),
        };
        Storage::new((), front).save_json(Some(&path)).unwrap();

        let loaded = Storage::<(), Front>::load_json(Some(&path)).unwrap();
        assert_eq!(loaded.frontend_storage.text, "7");
        assert_eq!(loaded.frontend_storage.bounds, Some([0.0, 50.0, 0.0, 1.0]));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing-here.json");
        let err = Storage::<(), ()>::load_json(Some(&path)).unwrap_err();
        assert!(err.starts_with("could not open storage file"));
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Storage;

/// Stores every key as a JSON file inside a directory. Writes go through a
/// uniquely named temporary file that is persisted over the target, so a
/// crash never leaves a half written value and concurrent writers never
/// share a temporary file.
pub struct FileStorage {
    pub dir: path::PathBuf,
}

impl FileStorage {
    pub fn new(dir: path::PathBuf) -> FileStorage {
        return FileStorage { dir };
    }

    pub fn get_file_path(&self, key: &str) -> Result<path::PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!(format!("Invalid storage key {key}"));
        }
        return Ok(self.dir.join(format!("{key}.json")));
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.get_file_path(key)?;
        match fs::read_to_string(file_path) {
            Ok(payload) => return Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.get_file_path(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let mut temp_file = tempfile::Builder::new()
            .prefix(&format!(".{key}"))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(file_path)?;

        return Ok(());
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let file_path = self.get_file_path(key)?;
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path)?;
        return Ok(());
    }
}

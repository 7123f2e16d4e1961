pub mod file;
pub mod memory;

use std::path;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageName;

pub struct StorageManager {}

impl StorageManager {
    pub fn get(name: StorageName, state_dir: &str) -> Result<StorageBox> {
        match name {
            StorageName::File => {
                return Ok(Arc::new(file::FileStorage::new(path::PathBuf::from(
                    state_dir,
                ))));
            }
            StorageName::Memory => {
                return Ok(Arc::new(memory::MemoryStorage::default()));
            }
        }
    }

    pub fn from_config() -> Result<StorageBox> {
        let storage = Config::get(ConfigKey::Storage);
        let name = StorageName::parse(storage.to_string())
            .ok_or_else(|| return anyhow!(format!("Unknown storage {storage}")))?;

        return StorageManager::get(name, &Config::get(ConfigKey::StateDir));
    }
}

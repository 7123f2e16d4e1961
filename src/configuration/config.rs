#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::StorageName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    HealthCheckTimeout,
    Persona,
    StateDir,
    Storage,
    Username,
}

pub struct Config {}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base
        .unwrap_or_else(env::temp_dir)
        .join("xetra");
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        let default_storage = StorageName::File.to_string();

        #[cfg(not(target_os = "macos"))]
        let config_path = app_dir(dirs::config_dir()).join("config.toml");
        #[cfg(target_os = "macos")]
        let config_path = app_dir(dirs::home_dir().map(|e| return e.join(".config")))
            .join("config.toml");

        let state_dir = app_dir(dirs::data_dir());

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:8000".to_string(),
            ConfigKey::HealthCheckTimeout => "1000".to_string(),
            ConfigKey::Persona => "".to_string(),
            ConfigKey::StateDir => state_dir.to_string_lossy().to_string(),
            ConfigKey::Storage => default_storage,

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    async fn load_file(cmd: &Command, config_path: path::PathBuf) -> Result<()> {
        let toml_str = fs::read_to_string(config_path).await?;
        let doc = toml_str.parse::<toml_edit::Document>()?;

        // A config file cannot point at another config file.
        for key in ConfigKey::iter().filter(|key| return *key != ConfigKey::ConfigFile) {
            let val = match doc.get(&key.to_string()).and_then(|item| return item.as_value()) {
                Some(toml_edit::Value::Integer(val)) => val.value().to_string(),
                Some(toml_edit::Value::String(val)) => val.value().to_string(),
                Some(_) => bail!("config.toml has an invalid type for key '{key}'"),
                None => continue,
            };
            if val.is_empty() {
                continue;
            }

            // Validate against the same possible values clap enforces on flags.
            let possible_values = find_arg(cmd, key).map(arg_possible_values).unwrap_or_default();
            if !possible_values.is_empty() && !possible_values.contains(&val) {
                bail!(
                    "config.toml has an invalid value for key '{key}': {val}\nPossible values are: {}",
                    possible_values.join(", ")
                );
            }

            Config::set(key, &val);
        }

        return Ok(());
    }

    /// Layers defaults, then the config file, then flags and env vars.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let config_file = clap_arg_matches
            .iter()
            .copied()
            .filter_map(|matches| {
                return matches
                    .try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
                    .ok()
                    .flatten();
            })
            .last()
            .cloned()
            .unwrap_or_else(|| return Config::default(ConfigKey::ConfigFile));
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            Config::load_file(&cmd, config_path).await?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            config_file = Config::get(ConfigKey::ConfigFile),
            health_check_timeout = Config::get(ConfigKey::HealthCheckTimeout),
            persona = Config::get(ConfigKey::Persona),
            state_dir = Config::get(ConfigKey::StateDir),
            storage = Config::get(ConfigKey::Storage),
            username = Config::get(ConfigKey::Username),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }
                let arg = find_arg(&cmd, key)?;

                let mut description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = arg_possible_values(arg);
                if !possible_values.is_empty() {
                    description = format!("{description} [possible values: {}]", possible_values.join(", "));
                }

                // Machine specific defaults are left commented out.
                let val = Config::default(key);
                let line = if matches!(key, ConfigKey::StateDir | ConfigKey::Username) || val.is_empty() {
                    format!("# {key} = \"\"")
                } else if val.parse::<i64>().is_ok() {
                    format!("{key} = {val}")
                } else {
                    format!("{key} = \"{val}\"")
                };

                return Some(format!("# {description}\n{line}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&Arg> {
    return cmd
        .get_arguments()
        .find(|arg| return arg.get_long() == Some(key.to_string().as_str()));
}

fn arg_possible_values(arg: &Arg) -> Vec<String> {
    return arg
        .get_possible_values()
        .iter()
        .map(|e| return e.get_name().to_string())
        .collect();
}

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::StorageName;
use crate::domain::services::actions::help_text;
use crate::domain::services::Persistence;
use crate::domain::services::Store;
use crate::domain::services::STORAGE_KEY;
use crate::infrastructure::storage::file::FileStorage;
use crate::infrastructure::storage::StorageManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// Directory the debug log is written to when `RUST_LOG` includes `xetra`.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("XETRA_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("xetra");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn load_persistence() -> Result<Persistence> {
    return Ok(Persistence::new(StorageManager::from_config()?));
}

fn format_personas(personas: &PersonaRegistry, current: &str) -> Vec<String> {
    return personas
        .iter()
        .map(|persona| {
            let mut line = format!(
                "- (ID: {}) {}, {}",
                persona.id, persona.name, persona.description
            );
            if persona.id == current {
                line = Paint::green(format!("{line} [current]")).to_string();
            }
            return format!("{line}\n  Prompt: {}", persona.prompt);
        })
        .collect();
}

fn print_personas_list() -> Result<()> {
    let personas = PersonaRegistry::default();
    let state = load_persistence()?.load(&personas);
    println!(
        "{}",
        format_personas(&personas, &state.current_persona_id).join("\n")
    );

    return Ok(());
}

fn select_persona_interactive(personas: &PersonaRegistry, current: &str) -> Result<Option<String>> {
    let ids = personas.ids();
    let options = personas
        .iter()
        .map(|persona| return format!("{} - {}", persona.name, persona.description))
        .collect::<Vec<String>>();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which persona would you like to talk to?")
        .default(ids.iter().position(|e| return e == current).unwrap_or(0))
        .items(&options)
        .interact_opt()?;

    return Ok(idx.map(|e| return ids[e].to_string()));
}

fn set_persona(persona_id: Option<&String>) -> Result<()> {
    let personas = PersonaRegistry::default();
    let persistence = load_persistence()?;
    let state = persistence.load(&personas);

    let id = match persona_id {
        Some(id) => id.to_string(),
        None => match select_persona_interactive(&personas, &state.current_persona_id)? {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    if !personas.contains(&id) {
        bail!(format!(
            "Unknown persona {id}\nPossible values are: {}",
            personas.ids().join(", ")
        ));
    }

    let mut store = Store::new(personas);
    store.hydrate(state);
    store.subscribe(Box::new(persistence));
    store.set_persona(&id);

    println!("Persona set to {id}");
    return Ok(());
}

fn print_state_path() -> Result<()> {
    if StorageName::parse(Config::get(ConfigKey::Storage)) == Some(StorageName::Memory) {
        println!("State is kept in memory and never written to disk.");
        return Ok(());
    }

    let storage = FileStorage::new(path::PathBuf::from(Config::get(ConfigKey::StateDir)));
    println!("{}", storage.get_file_path(STORAGE_KEY)?.to_string_lossy());
    return Ok(());
}

fn print_state() -> Result<()> {
    let state = match load_persistence()?.read() {
        Ok(state) => state.unwrap_or_default(),
        Err(err) => {
            eprintln!(
                "{}",
                Paint::red(format!(
                    "Persisted state could not be read and was left as is: {err}\nRun `xetra state reset` to clear it."
                ))
            );
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&state)?);
    return Ok(());
}

fn reset_state() -> Result<()> {
    load_persistence()?.reset()?;
    println!("Persisted state has been reset.");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Xetra")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Xetra with environment variable RUST_LOG=xetra")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_persona() -> Arg {
    return Arg::new(ConfigKey::Persona.to_string())
        .short('p')
        .long(ConfigKey::Persona.to_string())
        .env("XETRA_PERSONA")
        .num_args(1)
        .help("The persona to start chatting with. Defaults to the last persona used.")
        .value_parser(PossibleValuesParser::new(PersonaRegistry::default().ids()));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat.")
        .arg(arg_persona());
}

fn subcommand_personas() -> Command {
    return Command::new("personas")
        .about("List and select chat personas.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List all personas with their ids and descriptions."))
        .subcommand(
            Command::new("set")
                .about("Set the persona used for the next chat. Omit passing any persona ID to load an interactive selection.")
                .arg(
                    clap::Arg::new("persona-id")
                        .short('i')
                        .long("id")
                        .help("Persona ID")
                        .required(false),
                ),
        );
}

fn subcommand_state() -> Command {
    return Command::new("state")
        .about("Inspect or reset the saved theme, persona, and settings.")
        .arg_required_else_help(true)
        .subcommand(Command::new("path").about("Print the path of the saved state file."))
        .subcommand(Command::new("show").about("Print the saved state."))
        .subcommand(Command::new("reset").about("Delete the saved state, restoring defaults on next start."));
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("xetra")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_personas())
        .subcommand(subcommand_state())
        .arg(arg_persona())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("XETRA_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("XETRA_API_URL")
                .num_args(1)
                .help(format!("Base URL of the chat API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("XETRA_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when checking the chat API is reachable. [default: {}]", Config::default(ConfigKey::HealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::StateDir.to_string())
                .long(ConfigKey::StateDir.to_string())
                .env("XETRA_STATE_DIR")
                .num_args(1)
                .help(format!("Directory the theme, persona, and settings are saved to. [default: {}]", Config::default(ConfigKey::StateDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Storage.to_string())
                .long(ConfigKey::Storage.to_string())
                .env("XETRA_STORAGE")
                .num_args(1)
                .help(format!("Where to save the theme, persona, and settings. [default: {}]", Config::default(ConfigKey::Storage)))
                .value_parser(PossibleValuesParser::new(StorageName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("XETRA_USERNAME")
                .num_args(1)
                .help("Your name displayed on your own chat bubbles.")
                .global(true),
        );
}

async fn load_config(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<()> {
    return Config::load(build(), vec![matches, subcmd_matches]).await;
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            load_config(&matches, subcmd_matches).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("personas", subcmd_matches)) => {
            load_config(&matches, subcmd_matches).await?;
            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    print_personas_list()?;
                }
                Some(("set", set_matches)) => {
                    set_persona(set_matches.get_one::<String>("persona-id"))?;
                }
                _ => {
                    subcommand_personas().print_long_help()?;
                }
            }
            return Ok(false);
        }
        Some(("state", subcmd_matches)) => {
            load_config(&matches, subcmd_matches).await?;
            match subcmd_matches.subcommand() {
                Some(("path", _)) => {
                    print_state_path()?;
                }
                Some(("show", _)) => {
                    print_state()?;
                }
                Some(("reset", _)) => {
                    reset_state()?;
                }
                _ => {
                    subcommand_state().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}

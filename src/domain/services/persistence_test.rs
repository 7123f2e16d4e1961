use std::sync::Arc;

use anyhow::Result;
use test_utils::legacy_state_fixture;
use test_utils::persisted_state_fixture;

use super::migrate;
use super::Persistence;
use super::STORAGE_KEY;
use crate::domain::models::Message;
use crate::domain::models::PersistedState;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::Settings;
use crate::domain::models::SettingsPatch;
use crate::domain::models::Storage;
use crate::domain::models::StorageBox;
use crate::domain::services::Store;
use crate::infrastructure::storage::memory::MemoryStorage;

fn memory_storage() -> StorageBox {
    return Arc::new(MemoryStorage::default());
}

fn store_with(storage: &StorageBox) -> Store {
    let registry = PersonaRegistry::default();
    let persistence = Persistence::new(storage.clone());
    let persisted = persistence.load(&registry);

    let mut store = Store::new(registry);
    store.subscribe(Box::new(persistence));
    store.hydrate(persisted);
    return store;
}

#[test]
fn it_serializes_versioned_envelope() -> Result<()> {
    let payload = Persistence::serialize(&PersistedState::default())?;
    insta::assert_snapshot!(payload, @r###"{"state":{"darkMode":true,"currentPersonaId":"assistant","settings":{"temperature":0.7,"maxTokens":1000,"showTimestamps":true}},"version":1}"###);
    return Ok(());
}

#[test]
fn it_loads_defaults_when_empty() {
    let storage = memory_storage();
    let state = Persistence::new(storage).load(&PersonaRegistry::default());
    assert_eq!(state, PersistedState::default());
}

#[test]
fn it_loads_persisted_state() -> Result<()> {
    let storage = memory_storage();
    storage.set_item(STORAGE_KEY, &persisted_state_fixture())?;

    let state = Persistence::new(storage).load(&PersonaRegistry::default());
    assert!(!state.dark_mode);
    assert_eq!(state.current_persona_id, "comedian");
    assert_eq!(
        state.settings,
        Settings {
            temperature: 0.3,
            max_tokens: 512,
            show_timestamps: false,
        }
    );

    return Ok(());
}

#[test]
fn it_migrates_legacy_state() -> Result<()> {
    let storage = memory_storage();
    storage.set_item(STORAGE_KEY, &legacy_state_fixture())?;

    let state = Persistence::new(storage).load(&PersonaRegistry::default());
    assert!(state.dark_mode);
    assert_eq!(state.current_persona_id, "writer");
    assert_eq!(state.settings.temperature, 0.5);
    assert_eq!(state.settings.max_tokens, 1000);

    return Ok(());
}

#[test]
fn it_passes_unknown_versions_through() {
    let state = serde_json::json!({"darkMode": false});
    assert_eq!(migrate(state.clone(), 7), state);
}

#[test]
fn it_prefers_new_key_during_migration() {
    let state = serde_json::json!({"currentPersona": "writer", "currentPersonaId": "tutor"});
    assert_eq!(
        migrate(state, 0),
        serde_json::json!({"currentPersonaId": "tutor"})
    );
}

#[test]
fn it_discards_corrupt_state() -> Result<()> {
    let storage = memory_storage();
    storage.set_item(STORAGE_KEY, "{not json")?;

    let state = Persistence::new(storage.clone()).load(&PersonaRegistry::default());
    assert_eq!(state, PersistedState::default());
    assert_eq!(storage.get_item(STORAGE_KEY)?, None);

    return Ok(());
}

#[test]
fn it_reads_without_removing_corrupt_state() -> Result<()> {
    let storage = memory_storage();
    let persistence = Persistence::new(storage.clone());
    assert_eq!(persistence.read()?, None);

    storage.set_item(STORAGE_KEY, "{not json")?;
    assert!(persistence.read().is_err());
    assert_eq!(storage.get_item(STORAGE_KEY)?, Some("{not json".to_string()));

    let mut state = PersistedState::default();
    state.dark_mode = false;
    persistence.save(&state)?;
    assert_eq!(persistence.read()?, Some(state));

    return Ok(());
}

#[test]
fn it_discards_wrongly_typed_state() -> Result<()> {
    let storage = memory_storage();
    storage.set_item(STORAGE_KEY, r#"{"state": {"darkMode": "yes"}, "version": 1}"#)?;

    let state = Persistence::new(storage.clone()).load(&PersonaRegistry::default());
    assert_eq!(state, PersistedState::default());
    assert_eq!(storage.get_item(STORAGE_KEY)?, None);

    return Ok(());
}

#[test]
fn it_resets_unregistered_persona_on_load() -> Result<()> {
    let storage = memory_storage();
    let mut state = PersistedState::default();
    state.current_persona_id = "pirate".to_string();
    storage.set_item(STORAGE_KEY, &Persistence::serialize(&state)?)?;

    let loaded = Persistence::new(storage).load(&PersonaRegistry::default());
    assert_eq!(loaded.current_persona_id, "assistant");

    return Ok(());
}

#[test]
fn it_persists_on_persisted_mutations_only() -> Result<()> {
    let storage = memory_storage();
    let mut store = store_with(&storage);

    store.add_message(Message::user("Hello", "assistant"));
    store.toggle_sidebar();
    store.clear_messages();
    assert_eq!(storage.get_item(STORAGE_KEY)?, None);

    store.toggle_dark_mode();
    assert!(storage.get_item(STORAGE_KEY)?.is_some());

    return Ok(());
}

#[test]
fn it_reloads_persona_but_not_messages() {
    let storage = memory_storage();

    let mut store = store_with(&storage);
    store.set_persona("tutor");
    store.update_settings(SettingsPatch::max_tokens(256));
    store.add_message(Message::user("Hello", "tutor"));
    store.add_message(Message::agent("Hi!", "tutor"));
    store.toggle_sidebar();
    assert_eq!(store.state().messages.len(), 2);

    let reloaded = store_with(&storage);
    assert_eq!(reloaded.state().current_persona_id, "tutor");
    assert_eq!(reloaded.state().settings.max_tokens, 256);
    assert!(reloaded.state().messages.is_empty());
    assert!(!reloaded.state().is_sidebar_open);
}

#[test]
fn it_resets_persisted_state() -> Result<()> {
    let storage = memory_storage();
    let mut store = store_with(&storage);
    store.toggle_dark_mode();

    Persistence::new(storage.clone()).reset()?;
    assert_eq!(storage.get_item(STORAGE_KEY)?, None);

    return Ok(());
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::Subscriber;
use crate::domain::models::AppState;
use crate::domain::models::Mutation;
use crate::domain::models::PersistedState;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::StorageBox;
use crate::domain::models::DEFAULT_PERSONA;

pub const STORAGE_KEY: &str = "xetra-chat-storage";
pub const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Upgrades a stored state payload written by `version` to the current
/// shape. Versions without a known transform pass through untouched.
pub fn migrate(mut state: Value, version: u32) -> Value {
    if version == STORAGE_VERSION {
        return state;
    }

    if version == 0 {
        if let Some(obj) = state.as_object_mut() {
            if let Some(persona) = obj.remove("currentPersona") {
                obj.entry("currentPersonaId").or_insert(persona);
            }
        }
        return state;
    }

    tracing::warn!(
        version,
        current = STORAGE_VERSION,
        "No migration for persisted state version, using as is"
    );
    return state;
}

/// Writes the persisted subset of the store to key-value storage whenever it
/// changes, and reads it back at startup.
pub struct Persistence {
    storage: StorageBox,
}

impl Persistence {
    pub fn new(storage: StorageBox) -> Persistence {
        return Persistence { storage };
    }

    fn parse(payload: &str) -> Result<PersistedState> {
        let envelope: Envelope<Value> = serde_json::from_str(payload)?;
        let state = migrate(envelope.state, envelope.version);
        return Ok(serde_json::from_value(state)?);
    }

    pub fn serialize(state: &PersistedState) -> Result<String> {
        let envelope = Envelope {
            state,
            version: STORAGE_VERSION,
        };
        return Ok(serde_json::to_string(&envelope)?);
    }

    /// Loads the persisted subset. Missing state yields defaults. Unreadable
    /// state is logged, removed from storage, and replaced by defaults.
    pub fn load(&self, personas: &PersonaRegistry) -> PersistedState {
        let payload = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return PersistedState::default(),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to read persisted state");
                return PersistedState::default();
            }
        };

        let mut state = match Persistence::parse(&payload) {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to parse persisted state, resetting to defaults");
                if let Err(remove_err) = self.storage.remove_item(STORAGE_KEY) {
                    tracing::error!(error = ?remove_err, "Failed to remove persisted state");
                }
                return PersistedState::default();
            }
        };

        if !personas.contains(&state.current_persona_id) {
            tracing::warn!(
                persona = state.current_persona_id.as_str(),
                "Persisted persona is not registered, using default"
            );
            state.current_persona_id = DEFAULT_PERSONA.to_string();
        }

        return state;
    }

    /// Reads the persisted subset without touching storage. Unlike `load`,
    /// unreadable state is returned as an error and left in place.
    pub fn read(&self) -> Result<Option<PersistedState>> {
        return match self.storage.get_item(STORAGE_KEY)? {
            Some(payload) => Ok(Some(Persistence::parse(&payload)?)),
            None => Ok(None),
        };
    }

    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let payload = Persistence::serialize(state)?;
        self.storage.set_item(STORAGE_KEY, &payload)?;
        return Ok(());
    }

    pub fn reset(&self) -> Result<()> {
        return self.storage.remove_item(STORAGE_KEY);
    }
}

impl Subscriber for Persistence {
    fn notify(&self, state: &AppState, mutation: &Mutation) {
        if !mutation.touches_persisted() {
            return;
        }

        if let Err(err) = self.save(&state.persisted()) {
            tracing::error!(error = ?err, "Failed to persist state");
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::PersonaRegistry;
use super::Settings;
use super::SettingsPatch;
use super::DEFAULT_PERSONA;

/// Portion of [`AppState`] that survives restarts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub dark_mode: bool,
    #[serde(alias = "currentPersona")]
    pub current_persona_id: String,
    pub settings: Settings,
}

impl Default for PersistedState {
    fn default() -> PersistedState {
        return PersistedState {
            dark_mode: true,
            current_persona_id: DEFAULT_PERSONA.to_string(),
            settings: Settings::default(),
        };
    }
}

/// Discrete state transitions understood by the store.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    ToggleDarkMode,
    SetPersona(String),
    AddMessage(Message),
    ClearMessages,
    ToggleSidebar,
    UpdateSettings(SettingsPatch),
    /// Replaces the persisted subset with values loaded from storage.
    Hydrate(PersistedState),
}

impl Mutation {
    /// True when the mutation may change the persisted subset and should be
    /// written back to storage.
    pub fn touches_persisted(&self) -> bool {
        return matches!(
            self,
            Mutation::ToggleDarkMode | Mutation::SetPersona(_) | Mutation::UpdateSettings(_)
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub dark_mode: bool,
    pub current_persona_id: String,
    pub personas: PersonaRegistry,
    pub messages: Vec<Message>,
    pub is_sidebar_open: bool,
    pub settings: Settings,
}

impl AppState {
    pub fn new(personas: PersonaRegistry) -> AppState {
        let defaults = PersistedState::default();
        return AppState {
            dark_mode: defaults.dark_mode,
            current_persona_id: defaults.current_persona_id,
            personas,
            messages: vec![],
            is_sidebar_open: false,
            settings: defaults.settings,
        };
    }

    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
            }
            Mutation::SetPersona(id) => {
                self.current_persona_id = id;
            }
            Mutation::AddMessage(message) => {
                self.messages.push(message);
            }
            Mutation::ClearMessages => {
                self.messages.clear();
            }
            Mutation::ToggleSidebar => {
                self.is_sidebar_open = !self.is_sidebar_open;
            }
            Mutation::UpdateSettings(patch) => {
                self.settings = self.settings.merge(&patch);
            }
            Mutation::Hydrate(persisted) => {
                self.dark_mode = persisted.dark_mode;
                self.current_persona_id = persisted.current_persona_id;
                self.settings = persisted.settings.sanitized();
            }
        }
    }

    pub fn persisted(&self) -> PersistedState {
        return PersistedState {
            dark_mode: self.dark_mode,
            current_persona_id: self.current_persona_id.to_string(),
            settings: self.settings.clone(),
        };
    }
}

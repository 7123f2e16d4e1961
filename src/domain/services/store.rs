#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use crate::domain::models::AppState;
use crate::domain::models::Message;
use crate::domain::models::Mutation;
use crate::domain::models::PersistedState;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::SettingsPatch;

/// Observer notified after every mutation with the full resulting state.
pub trait Subscriber {
    fn notify(&self, state: &AppState, mutation: &Mutation);
}

pub type SubscriberBox = Box<dyn Subscriber + Send>;

/// Owns the application state. Every change goes through [`Store::dispatch`],
/// which applies the transition and then notifies subscribers in the order
/// they were registered.
pub struct Store {
    state: AppState,
    subscribers: Vec<SubscriberBox>,
}

impl Store {
    pub fn new(personas: PersonaRegistry) -> Store {
        return Store {
            state: AppState::new(personas),
            subscribers: vec![],
        };
    }

    pub fn state(&self) -> &AppState {
        return &self.state;
    }

    pub fn subscribe(&mut self, subscriber: SubscriberBox) {
        self.subscribers.push(subscriber);
    }

    pub fn dispatch(&mut self, mutation: Mutation) {
        tracing::debug!(mutation = ?mutation, "dispatch");
        self.state.apply(mutation.clone());
        for subscriber in self.subscribers.iter() {
            subscriber.notify(&self.state, &mutation);
        }
    }

    pub fn hydrate(&mut self, persisted: PersistedState) {
        self.dispatch(Mutation::Hydrate(persisted));
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dispatch(Mutation::ToggleDarkMode);
    }

    /// Unknown ids are accepted as-is. Views fall back to a generic label for
    /// them.
    pub fn set_persona(&mut self, id: &str) {
        if !self.state.personas.contains(id) {
            tracing::warn!(persona = id, "Selected persona is not registered");
        }
        self.dispatch(Mutation::SetPersona(id.to_string()));
    }

    pub fn add_message(&mut self, message: Message) {
        self.dispatch(Mutation::AddMessage(message));
    }

    pub fn clear_messages(&mut self) {
        self.dispatch(Mutation::ClearMessages);
    }

    pub fn toggle_sidebar(&mut self) {
        self.dispatch(Mutation::ToggleSidebar);
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.dispatch(Mutation::UpdateSettings(patch));
    }
}

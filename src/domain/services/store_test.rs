use std::sync::Arc;
use std::sync::Mutex;

use super::Store;
use super::Subscriber;
use crate::domain::models::AppState;
use crate::domain::models::Message;
use crate::domain::models::Mutation;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::SettingsPatch;

#[derive(Clone, Default)]
struct Recorder {
    snapshots: Arc<Mutex<Vec<(bool, usize)>>>,
}

impl Subscriber for Recorder {
    fn notify(&self, state: &AppState, _mutation: &Mutation) {
        self.snapshots
            .lock()
            .unwrap()
            .push((state.dark_mode, state.messages.len()));
    }
}

#[test]
fn it_notifies_with_post_mutation_state() {
    let recorder = Recorder::default();
    let mut store = Store::new(PersonaRegistry::default());
    store.subscribe(Box::new(recorder.clone()));

    store.toggle_dark_mode();
    store.add_message(Message::user("Hello", "assistant"));

    assert_eq!(
        *recorder.snapshots.lock().unwrap(),
        vec![(false, 0), (false, 1)]
    );
}

#[test]
fn it_clears_messages_idempotently() {
    let mut store = Store::new(PersonaRegistry::default());
    store.add_message(Message::user("one", "assistant"));
    store.add_message(Message::agent("two", "assistant"));

    store.clear_messages();
    assert!(store.state().messages.is_empty());

    store.clear_messages();
    assert!(store.state().messages.is_empty());
}

#[test]
fn it_updates_settings_partially() {
    let mut store = Store::new(PersonaRegistry::default());
    store.update_settings(SettingsPatch::temperature(0.9));

    let settings = &store.state().settings;
    assert_eq!(settings.temperature, 0.9);
    assert_eq!(settings.max_tokens, 1000);
    assert!(settings.show_timestamps);
}

#[test]
fn it_sets_unknown_persona_without_error() {
    let mut store = Store::new(PersonaRegistry::default());
    store.set_persona("pirate");
    assert_eq!(store.state().current_persona_id, "pirate");
    assert_eq!(
        store
            .state()
            .personas
            .display_name(&store.state().current_persona_id, "AI"),
        "AI"
    );
}

#[test]
fn it_toggles_sidebar() {
    let mut store = Store::new(PersonaRegistry::default());
    store.toggle_sidebar();
    assert!(store.state().is_sidebar_open);
    store.toggle_sidebar();
    assert!(!store.state().is_sidebar_open);
}

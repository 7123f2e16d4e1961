use test_utils::long_message_fixture;

use super::bubble_label;
use super::greeting_text;
use super::BubbleList;
use crate::domain::models::AppState;
use crate::domain::models::Message;
use crate::domain::models::Mutation;
use crate::domain::models::PersonaRegistry;
use crate::domain::models::SettingsPatch;
use crate::domain::services::Palette;

fn state_with_messages() -> AppState {
    let mut state = AppState::new(PersonaRegistry::default());
    state.apply(Mutation::AddMessage(Message::user("Hi there!", "assistant")));
    state.apply(Mutation::AddMessage(Message::agent(
        long_message_fixture(),
        "assistant",
    )));
    return state;
}

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::new(Palette::dark(), "You");

    assert_eq!(bubble_list.cache.len(), 0);
    assert_eq!(bubble_list.len(), 0);
}

#[test]
fn it_caches_lines() {
    let state = state_with_messages();
    let mut bubble_list = BubbleList::new(Palette::dark(), "You");
    bubble_list.set_state(&state, 50, Palette::dark());

    assert_eq!(bubble_list.cache.len(), 2);
    assert!(bubble_list.len() > 6);
    assert!(!bubble_list.is_empty());
}

#[test]
fn it_invalidates_cache_on_width_change() {
    let state = state_with_messages();
    let mut bubble_list = BubbleList::new(Palette::dark(), "You");
    bubble_list.set_state(&state, 50, Palette::dark());
    let narrow = bubble_list.len();

    bubble_list.set_state(&state, 120, Palette::dark());
    assert_eq!(bubble_list.cache.len(), 2);
    assert!(bubble_list.len() < narrow);
}

#[test]
fn it_invalidates_cache_on_theme_change() {
    let state = state_with_messages();
    let mut bubble_list = BubbleList::new(Palette::dark(), "You");
    bubble_list.set_state(&state, 50, Palette::dark());
    bubble_list.set_state(&state, 50, Palette::light());

    let first = &bubble_list.lines[0];
    assert_eq!(first.spans[0].style.bg, Some(Palette::light().background));
}

#[test]
fn it_shows_greeting_for_empty_thread() {
    let mut state = state_with_messages();
    let mut bubble_list = BubbleList::new(Palette::dark(), "You");
    bubble_list.set_state(&state, 50, Palette::dark());

    state.apply(Mutation::ClearMessages);
    bubble_list.set_state(&state, 50, Palette::dark());

    assert!(bubble_list.is_empty());
    assert_eq!(bubble_list.len(), 1);
    assert_eq!(bubble_list.cache.len(), 0);
}

#[test]
fn it_greets_with_persona_name() {
    let mut state = AppState::new(PersonaRegistry::default());
    state.apply(Mutation::SetPersona("tutor".to_string()));
    insta::assert_snapshot!(greeting_text(&state), @"Start a conversation with Tutor. Ask questions, get help, or just chat!");

    state.apply(Mutation::SetPersona("pirate".to_string()));
    insta::assert_snapshot!(greeting_text(&state), @"Start a conversation with the AI. Ask questions, get help, or just chat!");
}

#[test]
fn it_labels_bubbles() {
    let mut state = AppState::new(PersonaRegistry::default());
    state.apply(Mutation::UpdateSettings(SettingsPatch::show_timestamps(false)));

    let user = Message::user("Hi", "tutor");
    assert_eq!(bubble_label(&state, &user, "You", false), "You");
    assert_eq!(bubble_label(&state, &user, "dana", false), "dana");

    let agent = Message::agent("Hello", "comedian");
    assert_eq!(bubble_label(&state, &agent, "You", false), "Comedian");

    let unknown = Message::agent("Hello", "pirate");
    assert_eq!(bubble_label(&state, &unknown, "You", false), "AI");

    let error = Message::agent_error("Error: boom");
    assert_eq!(bubble_label(&state, &error, "You", false), "AI");

    let label = bubble_label(&state, &agent, "You", true);
    assert!(label.starts_with("Comedian · "));
    assert_eq!(label.chars().count(), "Comedian · ".chars().count() + 5);
}

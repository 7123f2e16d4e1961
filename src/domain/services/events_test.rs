use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use super::handle_crossterm;
use crate::domain::models::Event;

fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
    return CrosstermEvent::Key(KeyEvent::new(code, modifiers));
}

#[test]
fn it_submits_on_plain_enter() {
    let event = handle_crossterm(key(KeyCode::Enter, KeyModifiers::NONE));
    assert!(matches!(event, Some(Event::KeyboardEnter())));
}

#[test]
fn it_inserts_newline_on_modified_enter() {
    let event = handle_crossterm(key(KeyCode::Enter, KeyModifiers::SHIFT));
    assert!(matches!(event, Some(Event::KeyboardNewline())));

    let event = handle_crossterm(key(KeyCode::Enter, KeyModifiers::ALT));
    assert!(matches!(event, Some(Event::KeyboardNewline())));
}

#[test]
fn it_maps_hotkeys() {
    let event = handle_crossterm(key(KeyCode::Char('t'), KeyModifiers::CONTROL));
    assert!(matches!(event, Some(Event::KeyboardCTRLT())));

    let event = handle_crossterm(key(KeyCode::Char('b'), KeyModifiers::CONTROL));
    assert!(matches!(event, Some(Event::KeyboardCTRLB())));

    let event = handle_crossterm(key(KeyCode::Char('l'), KeyModifiers::CONTROL));
    assert!(matches!(event, Some(Event::KeyboardCTRLL())));

    let event = handle_crossterm(key(KeyCode::Char('p'), KeyModifiers::CONTROL));
    assert!(matches!(event, Some(Event::KeyboardCTRLP())));
}

#[test]
fn it_passes_characters_through() {
    let event = handle_crossterm(key(KeyCode::Char('t'), KeyModifiers::NONE));
    assert!(matches!(event, Some(Event::KeyboardCharInput(_))));
}

#[test]
fn it_ignores_key_releases() {
    let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert!(handle_crossterm(CrosstermEvent::Key(release)).is_none());
}

#[test]
fn it_maps_paste_and_resize() {
    let event = handle_crossterm(CrosstermEvent::Paste("hello".to_string()));
    assert!(matches!(event, Some(Event::KeyboardPaste(text)) if text == "hello"));

    let event = handle_crossterm(CrosstermEvent::Resize(80, 24));
    assert!(matches!(event, Some(Event::UIResize())));
}

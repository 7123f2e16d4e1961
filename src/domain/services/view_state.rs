#[cfg(test)]
#[path = "view_state_test.rs"]
mod tests;

use ratatui::layout::Rect;

use super::BubbleList;
use super::Palette;
use super::Scroll;
use super::Store;
use crate::domain::models::AppState;
use crate::domain::models::Loading;
use crate::domain::models::SettingsPatch;
use crate::domain::models::SlashCommand;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: &str) -> Status {
        return Status {
            text: text.to_string(),
            is_error: false,
        };
    }

    pub fn error(text: &str) -> Status {
        return Status {
            text: text.to_string(),
            is_error: true,
        };
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled,
    Quit,
}

/// Everything the chat screen needs that is not application state: the
/// rendered thread, scroll position, status line, and help overlay.
pub struct ViewState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: Loading,
    pub scroll: Scroll,
    pub show_help: bool,
    pub status: Option<Status>,
    message_count: usize,
}

impl ViewState {
    pub fn new(palette: Palette, user_label: &str) -> ViewState {
        return ViewState {
            bubble_list: BubbleList::new(palette, user_label),
            last_known_height: 0,
            last_known_width: 0,
            loading: Loading::default(),
            scroll: Scroll::default(),
            show_help: false,
            status: None,
            message_count: 0,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
    }

    /// Re-renders the thread against the latest state. Follows the bottom of
    /// the thread whenever a message was added.
    pub fn sync(&mut self, state: &AppState, palette: Palette) {
        self.bubble_list
            .set_state(state, self.last_known_width as usize, palette);
        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height as usize);

        if state.messages.len() > self.message_count {
            self.scroll.last();
        }
        self.message_count = state.messages.len();
    }

    pub fn next_persona(&mut self, store: &mut Store) {
        let state = store.state();
        let next = state
            .personas
            .next_after(&state.current_persona_id)
            .map(|e| return (e.id.to_string(), e.name.to_string()));

        if let Some((id, name)) = next {
            store.set_persona(&id);
            self.status = Some(Status::info(&format!("Talking to {name}")));
        }
    }

    pub fn handle_slash_command(
        &mut self,
        store: &mut Store,
        command: &SlashCommand,
    ) -> CommandOutcome {
        self.show_help = false;

        if command.is_quit() {
            return CommandOutcome::Quit;
        }

        if command.is_help() {
            self.show_help = true;
            self.status = Some(Status::info("Press Esc or send any message to close help"));
            return CommandOutcome::Handled;
        }

        if command.is_clear() {
            store.clear_messages();
            self.status = Some(Status::info("Messages cleared"));
            return CommandOutcome::Handled;
        }

        if command.is_persona() {
            self.set_persona(store, command.first_arg());
            return CommandOutcome::Handled;
        }

        if command.is_temperature() {
            self.set_temperature(store, command.first_arg());
            return CommandOutcome::Handled;
        }

        if command.is_max_tokens() {
            self.set_max_tokens(store, command.first_arg());
            return CommandOutcome::Handled;
        }

        if command.is_timestamps() {
            let show = !store.state().settings.show_timestamps;
            store.update_settings(SettingsPatch::show_timestamps(show));
            let label = if show { "shown" } else { "hidden" };
            self.status = Some(Status::info(&format!("Timestamps {label}")));
            return CommandOutcome::Handled;
        }

        if command.is_dark_mode() {
            store.toggle_dark_mode();
            let label = if store.state().dark_mode { "Dark" } else { "Light" };
            self.status = Some(Status::info(&format!("{label} mode")));
            return CommandOutcome::Handled;
        }

        if command.is_sidebar() {
            store.toggle_sidebar();
            self.status = None;
            return CommandOutcome::Handled;
        }

        return CommandOutcome::Handled;
    }

    fn set_persona(&mut self, store: &mut Store, id: Option<&str>) {
        let id = match id {
            Some(id) => id,
            None => {
                self.next_persona(store);
                return;
            }
        };

        let personas = &store.state().personas;
        let name = match personas.get(id) {
            Some(persona) => persona.name.to_string(),
            None => {
                self.status = Some(Status::error(&format!(
                    "Unknown persona {id}. Available personas: {}",
                    personas.ids().join(", ")
                )));
                return;
            }
        };

        store.set_persona(id);
        self.status = Some(Status::info(&format!("Talking to {name}")));
    }

    fn set_temperature(&mut self, store: &mut Store, value: Option<&str>) {
        let value = match value {
            Some(value) => value,
            None => {
                self.status = Some(Status::info(&format!(
                    "Temperature is {}",
                    store.state().settings.temperature
                )));
                return;
            }
        };

        match value.parse::<f64>() {
            Ok(temperature) if temperature.is_finite() => {
                store.update_settings(SettingsPatch::temperature(temperature));
                self.status = Some(Status::info(&format!(
                    "Temperature set to {}",
                    store.state().settings.temperature
                )));
            }
            _ => {
                self.status = Some(Status::error(&format!(
                    "Invalid temperature {value}. Use a number between 0.0 and 1.0"
                )));
            }
        }
    }

    fn set_max_tokens(&mut self, store: &mut Store, value: Option<&str>) {
        let value = match value {
            Some(value) => value,
            None => {
                self.status = Some(Status::info(&format!(
                    "Max tokens is {}",
                    store.state().settings.max_tokens
                )));
                return;
            }
        };

        match value.parse::<u32>() {
            Ok(max_tokens) if max_tokens > 0 => {
                store.update_settings(SettingsPatch::max_tokens(max_tokens));
                self.status = Some(Status::info(&format!("Max tokens set to {max_tokens}")));
            }
            _ => {
                self.status = Some(Status::error(&format!(
                    "Invalid max tokens {value}. Use a whole number above 0"
                )));
            }
        }
    }
}

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::Bubble;
use super::Palette;
use crate::domain::models::AppState;
use crate::domain::models::Message;
use crate::domain::models::Sender;

#[derive(Clone, Copy, PartialEq)]
struct RenderKey {
    line_width: usize,
    palette: Palette,
    show_timestamps: bool,
}

/// Rendered lines for the whole thread. Bubbles are cached per message id,
/// since messages never change once added, and the cache is dropped whenever
/// the width, theme, or timestamp setting changes.
pub struct BubbleList {
    cache: HashMap<u64, Vec<Line<'static>>>,
    key: Option<RenderKey>,
    lines: Vec<Line<'static>>,
    greeting: Option<String>,
    palette: Palette,
    user_label: String,
}

pub fn greeting_text(state: &AppState) -> String {
    let name = state
        .personas
        .display_name(&state.current_persona_id, "the AI");
    return format!("Start a conversation with {name}. Ask questions, get help, or just chat!");
}

pub fn bubble_label(
    state: &AppState,
    message: &Message,
    user_label: &str,
    show_timestamps: bool,
) -> String {
    let mut label = match message.sender() {
        Sender::User => user_label.to_string(),
        Sender::Agent => {
            let persona = message.persona().unwrap_or_default();
            state.personas.display_name(persona, "AI").to_string()
        }
    };

    if show_timestamps {
        label = format!("{label} · {}", message.time_formatted());
    }

    return label;
}

impl BubbleList {
    pub fn new(palette: Palette, user_label: &str) -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            key: None,
            lines: vec![],
            greeting: None,
            palette,
            user_label: user_label.to_string(),
        };
    }

    pub fn set_state(&mut self, state: &AppState, line_width: usize, palette: Palette) {
        let key = RenderKey {
            line_width,
            palette,
            show_timestamps: state.settings.show_timestamps,
        };
        if self.key != Some(key) {
            self.cache.clear();
            self.key = Some(key);
        }
        self.palette = palette;

        if state.messages.is_empty() {
            self.cache.clear();
            self.lines = vec![];
            self.greeting = Some(greeting_text(state));
            return;
        }
        self.greeting = None;

        let user_label = &self.user_label;
        let mut lines: Vec<Line<'static>> = vec![];
        for message in state.messages.iter() {
            let bubble_lines = self.cache.entry(message.id()).or_insert_with(|| {
                let label = bubble_label(state, message, user_label, key.show_timestamps);
                return Bubble::new(message, label, line_width).as_lines(&palette);
            });
            lines.extend(bubble_lines.iter().cloned());
        }

        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        if self.greeting.is_some() {
            return 1;
        }
        return self.lines.len();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        return self.greeting.is_some();
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: usize) {
        if let Some(greeting) = &self.greeting {
            let top_padding = rect.height.saturating_sub(1) / 2;
            let mut lines = vec![Line::from(""); top_padding as usize];
            lines.push(Line::from(greeting.to_string()));

            frame.render_widget(
                Paragraph::new(lines)
                    .style(self.palette.muted())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                rect,
            );
            return;
        }

        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .style(self.palette.base())
                .block(Block::default())
                .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
            rect,
        );
    }
}

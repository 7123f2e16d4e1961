#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

use super::Subscriber;
use crate::domain::models::AppState;
use crate::domain::models::Mutation;

/// Colours used to draw the chat for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub agent: Color,
    pub error: Color,
}

impl Palette {
    pub fn dark() -> Palette {
        return Palette {
            background: Color::Rgb(17, 24, 39),
            text: Color::Rgb(243, 244, 246),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(192, 132, 252),
            user: Color::Rgb(147, 51, 234),
            agent: Color::Rgb(209, 213, 219),
            error: Color::Rgb(248, 113, 113),
        };
    }

    pub fn light() -> Palette {
        return Palette {
            background: Color::Rgb(249, 250, 251),
            text: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(126, 34, 206),
            user: Color::Rgb(147, 51, 234),
            agent: Color::Rgb(55, 65, 81),
            error: Color::Rgb(220, 38, 38),
        };
    }

    pub fn base(&self) -> Style {
        return Style::default().fg(self.text).bg(self.background);
    }

    pub fn muted(&self) -> Style {
        return self.base().fg(self.muted);
    }

    pub fn highlight(&self) -> Style {
        return self.base().fg(self.accent).add_modifier(Modifier::BOLD);
    }
}

/// Process wide dark mode switch read by the renderer. Kept in sync with the
/// store by subscribing to it, so a toggle and its visual effect happen in the
/// same dispatch.
#[derive(Clone, Default)]
pub struct ThemeFlag {
    dark: Arc<AtomicBool>,
}

impl ThemeFlag {
    pub fn is_dark(&self) -> bool {
        return self.dark.load(Ordering::SeqCst);
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::SeqCst);
    }

    pub fn palette(&self) -> Palette {
        if self.is_dark() {
            return Palette::dark();
        }
        return Palette::light();
    }
}

impl Subscriber for ThemeFlag {
    fn notify(&self, state: &AppState, mutation: &Mutation) {
        if matches!(mutation, Mutation::ToggleDarkMode | Mutation::Hydrate(_)) {
            self.set_dark(state.dark_mode);
        }
    }
}

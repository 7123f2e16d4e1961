#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::Palette;
use crate::domain::models::Message;
use crate::domain::models::Sender;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

/// A message drawn as a rounded box, with the author label in the top
/// border. User messages hug the right edge, agent messages the left.
pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    label: String,
    window_max_width: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, label: String, window_max_width: usize) -> Bubble<'a> {
        let mut alignment = BubbleAlignment::Left;
        if message.sender() == Sender::User {
            alignment = BubbleAlignment::Right;
        }

        return Bubble {
            alignment,
            message,
            label,
            window_max_width,
        };
    }

    pub fn as_lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32 * 0.04).ceil()) as usize;

        // left border + left padding + (text, not counted) + right padding + right
        // border + scrollbar. And then minimum bubble padding.
        let line_border_width = 5 + min_bubble_padding_length;

        let message_lines = self
            .message
            .as_string_lines(self.window_max_width.saturating_sub(line_border_width).max(1));

        let label_length = self.label.chars().count();
        let max_line_length = message_lines
            .iter()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(0)
            .max(label_length);

        // Borders and inner padding add 4 columns around the text.
        let bubble_width = max_line_length + 4;
        let bubble_padding = " ".repeat(self.window_max_width.saturating_sub(bubble_width));

        let border_style = self.border_style(palette);
        let text_style = palette.base();
        let padding_style = palette.base();

        let inner_bar = "─".repeat(max_line_length + 2 - label_length);
        let top_bar = format!("╭{}{inner_bar}╮", self.label);
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));

        let mut rows: Vec<Vec<Span<'static>>> = vec![vec![Span::styled(top_bar, border_style)]];
        for line in message_lines {
            let fill = " ".repeat(max_line_length - line.chars().count());
            rows.push(vec![
                Span::styled("│ ", border_style),
                Span::styled(line, text_style),
                Span::styled(format!("{fill} │"), border_style),
            ]);
        }
        rows.push(vec![Span::styled(bottom_bar, border_style)]);

        return rows
            .into_iter()
            .map(|spans| {
                let padding = Span::styled(bubble_padding.to_string(), padding_style);
                if self.alignment == BubbleAlignment::Left {
                    let mut res = spans;
                    res.push(padding);
                    return Line::from(res);
                }

                let mut res = vec![padding];
                res.extend(spans);
                return Line::from(res);
            })
            .collect();
    }

    fn border_style(&self, palette: &Palette) -> Style {
        if self.message.is_error() {
            return palette.base().fg(palette.error);
        }
        if self.message.sender() == Sender::User {
            return palette.base().fg(palette.user);
        }

        return palette.base().fg(palette.agent);
    }
}

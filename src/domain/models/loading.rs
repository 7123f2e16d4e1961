use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Placeholder rendered in place of the input box while a request is in
/// flight. Cycles through one to three dots on every tick.
#[derive(Default)]
pub struct Loading {
    frame: usize,
}

impl Loading {
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % 3;
    }

    pub fn text(&self, name: &str) -> String {
        let dots = ".".repeat(self.frame + 1);
        return format!("{name} is typing{dots}");
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, name: &str, style: Style) {
        frame.render_widget(
            Paragraph::new(self.text(name))
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());

        return textarea;
    }

    /// Restyles the input box and titles it after the persona being
    /// addressed, such as `Message Tutor...`.
    pub fn decorate(textarea: &mut tui_textarea::TextArea<'a>, persona_name: &str, style: Style) {
        textarea.set_style(style);
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(style)
                .title(format!("Message {persona_name}..."))
                .padding(Padding::new(1, 1, 0, 0)),
        );
    }
}

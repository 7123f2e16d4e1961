#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Local;
use chrono::SecondsFormat;
use chrono::Utc;

use super::Sender;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A single entry in the chat thread. Messages are never edited after
/// creation, only appended to the store or cleared with the rest of the
/// thread.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    id: u64,
    text: String,
    sender: Sender,
    timestamp: String,
    persona: Option<String>,
    is_error: bool,
}

impl Message {
    fn build(sender: Sender, text: &str, persona: Option<&str>, is_error: bool) -> Message {
        return Message {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            text: text.to_string(),
            sender,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            persona: persona.map(|e| return e.to_string()),
            is_error,
        };
    }

    pub fn user(text: &str, persona: &str) -> Message {
        return Message::build(Sender::User, text, Some(persona), false);
    }

    pub fn agent(text: &str, persona: &str) -> Message {
        return Message::build(Sender::Agent, text, Some(persona), false);
    }

    pub fn agent_error(text: &str) -> Message {
        return Message::build(Sender::Agent, text, None, true);
    }

    pub fn id(&self) -> u64 {
        return self.id;
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        return &self.text;
    }

    pub fn sender(&self) -> Sender {
        return self.sender;
    }

    #[cfg(test)]
    pub fn timestamp(&self) -> &str {
        return &self.timestamp;
    }

    pub fn persona(&self) -> Option<&str> {
        return self.persona.as_deref();
    }

    pub fn is_error(&self) -> bool {
        return self.is_error;
    }

    /// Local wall clock time the message was created, as `HH:MM`.
    pub fn time_formatted(&self) -> String {
        return DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|e| {
                return e.with_timezone(&Local).format("%H:%M").to_string();
            })
            .unwrap_or_default();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.replace('\t', "  ").split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if !current_lines.is_empty() && word_len + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}

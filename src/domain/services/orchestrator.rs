#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use anyhow::Result;

use super::Store;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::Message;

pub const NO_RESPONSE_TEXT: &str = "No response from the server";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum SendState {
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// Drives a single message exchange with the chat API:
/// `Idle -> Sending -> {Succeeded, Failed} -> Idle`.
///
/// The user message is appended as soon as a submit is accepted, and the
/// agent reply only once the request settles, so the thread always reads in
/// send order. Submits are ignored while a request is in flight.
pub struct Orchestrator {
    state: SendState,
    pending_persona: Option<String>,
}

impl Default for Orchestrator {
    fn default() -> Orchestrator {
        return Orchestrator {
            state: SendState::Idle,
            pending_persona: None,
        };
    }
}

impl Orchestrator {
    #[cfg(test)]
    pub fn state(&self) -> SendState {
        return self.state;
    }

    pub fn is_sending(&self) -> bool {
        return self.state == SendState::Sending;
    }

    pub fn can_submit(&self, input: &str) -> bool {
        return self.state == SendState::Idle && !input.trim().is_empty();
    }

    /// Accepts `input` for sending. Appends the user message and returns the
    /// request to dispatch, or `None` when the input is blank or a request is
    /// already in flight.
    pub fn submit(&mut self, store: &mut Store, input: &str) -> Option<ChatRequest> {
        if !self.can_submit(input) {
            tracing::debug!(state = %self.state, "Ignoring submit");
            return None;
        }

        let state = store.state();
        let persona = state.current_persona_id.to_string();
        let request = ChatRequest::new(input, &persona, &state.settings);

        store.add_message(Message::user(input, &persona));
        self.pending_persona = Some(persona);
        self.state = SendState::Sending;

        return Some(request);
    }

    /// Appends the reply (or the failure) for the in-flight request and
    /// returns to idle. Returns the terminal state the exchange went through.
    pub fn settle(&mut self, store: &mut Store, result: Result<ChatResponse>) -> SendState {
        if self.state != SendState::Sending {
            tracing::warn!(state = %self.state, "Received chat result with no request in flight");
            return self.state;
        }

        let persona = self.pending_persona.take().unwrap_or_default();
        let outcome = match result {
            Ok(res) => {
                tracing::debug!(
                    model = ?res.model,
                    tokens_used = ?res.tokens_used,
                    "Chat request succeeded"
                );
                let text = res
                    .response
                    .filter(|e| return !e.is_empty())
                    .unwrap_or_else(|| return NO_RESPONSE_TEXT.to_string());
                store.add_message(Message::agent(&text, &persona));
                SendState::Succeeded
            }
            Err(err) => {
                tracing::error!(error = ?err, "Chat request failed");
                store.add_message(Message::agent_error(&format!("Error: {err}")));
                SendState::Failed
            }
        };

        self.state = SendState::Idle;
        return outcome;
    }
}

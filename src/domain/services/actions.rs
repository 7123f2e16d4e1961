#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /persona (/p) [PERSONA_ID] - Switches the persona you are talking to. Without an id, cycles to the next persona.
- /clear (/c) - Clears all messages in the current chat.
- /temperature (/t) [0.0-1.0] - Sets how creative replies should be.
- /maxtokens (/mt) [NUMBER] - Sets the maximum reply length.
- /timestamps (/ts) - Shows or hides message timestamps.
- /dark (/d) - Switches between dark and light mode.
- /sidebar (/s) - Shows or hides the persona and settings sidebar.
- /quit /exit (/q) - Exit Xetra.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Send message
- Shift+Enter / Alt+Enter - Insert a new line
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+B - Toggle sidebar
- CTRL+T - Toggle dark mode
- CTRL+P - Next persona
- CTRL+L - Clear messages
- CTRL+C - Exit Xetra.
        "#;

    return text.trim().to_string();
}

pub struct ActionsService {}

impl ActionsService {
    /// Performs chat requests on behalf of the UI. Each request runs on its
    /// own task and reports back with a single [`Event::ChatSettled`].
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend = Arc::new(backend);

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            match action {
                Action::ChatRequest(request) => {
                    let worker_backend = backend.clone();
                    tokio::spawn(async move {
                        let res = worker_backend.chat(&request).await;
                        if worker_tx.send(Event::ChatSettled(res)).is_err() {
                            tracing::warn!("UI closed before chat request settled");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}

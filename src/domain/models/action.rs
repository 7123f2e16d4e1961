use super::ChatRequest;

pub enum Action {
    ChatRequest(ChatRequest),
}

use anyhow::Result;
use tui_textarea::Input;

use super::ChatResponse;

pub enum Event {
    ChatSettled(Result<ChatResponse>),
    KeyboardCharInput(Input),
    KeyboardCTRLB(),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardCTRLP(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardNewline(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}

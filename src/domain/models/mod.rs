mod action;
mod backend;
mod event;
mod loading;
mod message;
mod persona;
mod sender;
mod settings;
mod slash_commands;
mod state;
mod storage;
mod textarea;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use persona::*;
pub use sender::*;
pub use settings::*;
pub use slash_commands::*;
pub use state::*;
pub use storage::*;
pub use textarea::*;

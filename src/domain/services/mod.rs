pub mod actions;
mod bubble;
mod bubble_list;
pub mod events;
mod orchestrator;
mod persistence;
mod scroll;
mod store;
mod themes;
mod view_state;

pub use bubble::*;
pub use bubble_list::*;
pub use orchestrator::*;
pub use persistence::*;
pub use scroll::*;
pub use store::*;
pub use themes::*;
pub use view_state::*;

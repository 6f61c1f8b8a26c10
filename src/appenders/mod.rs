//! Output stages: text sinks, the text renderer and the remote JSON dispatcher

pub mod console;
pub mod json;
pub mod network;
pub mod sink;

pub use console::TextRenderer;
pub use network::{DispatchOutcome, JsonDispatcher};
pub use sink::{SharedBuffer, TextSink};

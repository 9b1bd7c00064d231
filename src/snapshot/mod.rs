pub mod interpreter;
pub mod reducer;

pub use interpreter::interpret;
pub use reducer::{filter_events, prune, reduce};

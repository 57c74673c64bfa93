pub mod state;
pub mod wrap;

pub use state::{Jump, NavState, ResetPolicy};
pub use wrap::wrap_index;

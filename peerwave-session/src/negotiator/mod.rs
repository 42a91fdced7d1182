mod event;
mod negotiator;
mod pending_candidates;
mod state;

pub use event::*;
pub use negotiator::*;
pub use state::*;

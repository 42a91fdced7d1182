mod collaborator;
mod config;
mod driver;
mod error;
mod negotiator;

pub use collaborator::{MediaSession, SignalSink};
pub use config::SessionConfig;
pub use driver::{SessionDriver, SessionHandle};
pub use error::{MediaError, NegotiationError};
pub use negotiator::{NegotiationState, Negotiator, SessionEvent};

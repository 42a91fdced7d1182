mod media_session;
mod signal_sink;

pub use media_session::*;
pub use signal_sink::*;

mod mock_signaling;

pub use mock_signaling::{MockSignalingOutput, SentSignal};

use peerwave_core::IceServerConfig;

/// Per-session knobs handed to the negotiator at join time.
#[derive(Clone)]
pub struct SessionConfig {
    /// STUN/TURN servers for whatever constructs the media session.
    pub ice_servers: Vec<IceServerConfig>,
    /// A polite peer never initiates: on seeing a full room it waits for
    /// the other side's offer instead of creating one.
    pub polite: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::google_stun()],
            polite: false,
        }
    }
}

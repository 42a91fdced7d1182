/// Where this peer stands in the offer/answer exchange for its room.
///
/// Each peer runs its own independent instance; the two sides are
/// synchronized only through the messages they exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Alone in the room (or not negotiating yet).
    Idle,
    /// Room became full and this side is creating its offer.
    AwaitingLocalOffer,
    /// Offer sent; the remote answer has not arrived yet.
    AwaitingRemoteAnswer,
    /// Room became full but this side is polite: the remote peer offers.
    AwaitingRemoteOffer,
    /// Offer/answer exchange completed.
    Stable,
}

impl NegotiationState {
    /// States in which an incoming offer is applied rather than dropped.
    /// `AwaitingLocalOffer` is included for the glare case: if an offer
    /// crosses ours mid-creation, the last received offer wins.
    pub(crate) fn accepts_offer(self) -> bool {
        matches!(
            self,
            Self::Idle | Self::AwaitingLocalOffer | Self::AwaitingRemoteOffer
        )
    }
}

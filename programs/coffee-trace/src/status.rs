use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    serde::Serialize,
    std::fmt,
};

/// Redemption lifecycle as encoded by the redemption contract.
///
/// Requested -> Processing -> Fulfilled, with Cancelled reachable from
/// either non-terminal state. Codes the contract does not define decode to
/// `Unknown` rather than to a real state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
pub enum RedemptionStatus {
    Requested = 0,
    Processing = 1,
    Fulfilled = 2,
    Cancelled = 3,
    Unknown = 255,
}

impl RedemptionStatus {
    pub fn from_code(code: u64) -> Self {
        match Self::from_u64(code) {
            Some(Self::Unknown) | None => Self::Unknown,
            Some(status) => status,
        }
    }

    /// On-chain code, `None` for `Unknown`.
    pub const fn code(&self) -> Option<u8> {
        match self {
            Self::Requested => Some(0),
            Self::Processing => Some(1),
            Self::Fulfilled => Some(2),
            Self::Cancelled => Some(3),
            Self::Unknown => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Processing => "Processing",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled)
    }

    pub const fn can_transition_to(&self, next: RedemptionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::Processing)
                | (Self::Processing, Self::Fulfilled)
                | (Self::Requested, Self::Cancelled)
                | (Self::Processing, Self::Cancelled)
        )
    }
}

impl fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(RedemptionStatus::from_code(0).as_str(), "Requested");
        assert_eq!(RedemptionStatus::from_code(1).as_str(), "Processing");
        assert_eq!(RedemptionStatus::from_code(2).as_str(), "Fulfilled");
        assert_eq!(RedemptionStatus::from_code(3).as_str(), "Cancelled");
    }

    #[test]
    fn test_decode_unknown_codes() {
        for code in [4, 7, 254, 255, 256, u64::MAX] {
            assert_eq!(RedemptionStatus::from_code(code), RedemptionStatus::Unknown);
        }
        assert_eq!(RedemptionStatus::Unknown.code(), None);
    }

    #[test]
    fn test_code_round_trip() {
        for code in 0..4u8 {
            let status = RedemptionStatus::from_code(code as u64);
            assert_eq!(status.code(), Some(code));
        }
    }

    #[test]
    fn test_transitions() {
        use RedemptionStatus::*;

        assert!(Requested.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Fulfilled));
        assert!(Requested.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));

        // no skipping, no going back, nothing out of a terminal state
        assert!(!Requested.can_transition_to(Fulfilled));
        assert!(!Processing.can_transition_to(Requested));
        assert!(!Fulfilled.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Requested));
        assert!(!Unknown.can_transition_to(Processing));
        assert!(!Requested.can_transition_to(Unknown));

        assert!(Fulfilled.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Processing.is_terminal());
    }

    #[test]
    fn test_serialize_as_name() {
        assert_eq!(
            serde_json::to_string(&RedemptionStatus::Processing).unwrap(),
            "\"Processing\""
        );
    }
}

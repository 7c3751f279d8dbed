//! Audit notifications emitted by the engine.
//!
//! Each accepted operation emits one or more notifications. They form
//! a durable, ordered log that downstream observers (front ends,
//! indexers, auditors) can replay. A vote-cast notification carries the
//! voter but never the choice.

use serde::{Deserialize, Serialize};

use crate::types::{Principal, ProposalId};

/// A fact published by the engine after a committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A proposal was created and scheduled.
    ProposalCreated {
        id: ProposalId,
        title: String,
        start_time: i64,
        end_time: i64,
    },

    /// A ballot was accepted. The choice stays encrypted.
    VoteCast { id: ProposalId, voter: Principal },

    /// Plaintext totals came into existence at closing.
    ResultsRevealed {
        id: ProposalId,
        yes_count: u64,
        no_count: u64,
    },

    /// The proposal transitioned to its terminal Closed state.
    ProposalClosed { id: ProposalId },
}

impl Notification {
    /// The proposal this notification concerns.
    pub fn proposal_id(&self) -> ProposalId {
        match self {
            Notification::ProposalCreated { id, .. }
            | Notification::VoteCast { id, .. }
            | Notification::ResultsRevealed { id, .. }
            | Notification::ProposalClosed { id } => *id,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ciborium::de::Error<std::io::Error>> {
        ciborium::from_reader(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_cbor_roundtrip() {
        let event = Notification::ProposalCreated {
            id: ProposalId::from_index(3),
            title: "budget 2026".to_string(),
            start_time: 1000,
            end_time: 2000,
        };

        let bytes = event.to_bytes();
        let recovered = Notification::from_bytes(&bytes).unwrap();
        assert_eq!(event, recovered);
    }

    #[test]
    fn test_vote_cast_roundtrip() {
        let event = Notification::VoteCast {
            id: ProposalId::from_index(0),
            voter: Principal::derive("alice"),
        };

        let bytes = event.to_bytes();
        assert_eq!(Notification::from_bytes(&bytes).unwrap(), event);
    }

    #[test]
    fn test_proposal_id_accessor() {
        let id = ProposalId::from_index(9);
        let event = Notification::ProposalClosed { id };
        assert_eq!(event.proposal_id(), id);
    }

    #[test]
    fn test_json_rendering_for_observers() {
        // Front ends consume these as JSON; keep the shape stable.
        let event = Notification::ResultsRevealed {
            id: ProposalId::from_index(1),
            yes_count: 2,
            no_count: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ResultsRevealed"));
        assert!(json.contains("yes_count"));
    }
}

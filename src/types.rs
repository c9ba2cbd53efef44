use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a handoff submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// No submission attempted yet
    Idle,
    /// Request issued, not yet settled
    Submitting,
    /// Request settled (any HTTP status counts)
    Done,
    /// Request could not complete at the transport level
    Failed,
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Submitting => write!(f, "SUBMITTING"),
            Self::Done => write!(f, "DONE"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Credential payload delivered to the loopback listener.
///
/// Values are sent verbatim, including empty strings. Serialized key order is
/// the declaration order below, which is what the listener side of the login
/// flow expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token: String,
    pub email: String,
    #[serde(rename = "rToken")]
    pub r_token: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Everything a handoff form reads from its host UI in one shot.
///
/// The port is kept as text exactly as read; it is only ever spliced into the
/// target URL and never serialized into the payload.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub payload: TokenPayload,
    pub port: String,
}

/// Ack body the listener returns for a delivered payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiveAck {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_wire_keys_in_order() {
        let payload = TokenPayload {
            token: "t1".to_string(),
            email: "a@b.com".to_string(),
            r_token: "r1".to_string(),
            client_id: "c1".to_string(),
            client_secret: "s1".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"token":"t1","email":"a@b.com","rToken":"r1","clientID":"c1","clientSecret":"s1"}"#
        );
    }

    #[test]
    fn empty_fields_are_kept_verbatim() {
        let payload = TokenPayload {
            token: String::new(),
            email: String::new(),
            r_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"token":"","email":"","rToken":"","clientID":"","clientSecret":""}"#
        );
    }

    #[test]
    fn payload_roundtrips_through_wire_keys() {
        let json = r#"{"token":"t","email":"e","rToken":"r","clientID":"c","clientSecret":"s"}"#;
        let payload: TokenPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.r_token, "r");
        assert_eq!(payload.client_id, "c");
        assert_eq!(payload.client_secret, "s");
    }

    #[test]
    fn state_display() {
        assert_eq!(SubmitState::Idle.to_string(), "IDLE");
        assert_eq!(SubmitState::Submitting.to_string(), "SUBMITTING");
        assert_eq!(SubmitState::Done.to_string(), "DONE");
        assert_eq!(SubmitState::Failed.to_string(), "FAILED");
    }
}

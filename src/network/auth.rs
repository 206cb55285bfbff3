//! SASL authentication
//!
//! ## Handshake
//! ```text
//!            SASL_AUTH(mech, initial)
//!   Start ─────────────────────────────▶ response
//!                                          │ 0x00 → Success
//!                                          │ 0x21 → Continue: SASL_STEP(mech, step(data))
//!                                          │ else → Failure
//! ```
//!
//! The state machine is pure: `AuthState::advance` maps a state and a
//! response to the next state and the next frame to send. `authenticate`
//! drives it over a connection.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Result, SubdocError};
use crate::protocol::{decode_packet, encode_request, OpCode, Packet, ResponseStatus};

use super::Connection;

/// Credential provider for one SASL mechanism
pub trait SaslMechanism: Send + Sync {
    /// Mechanism name sent as the request key, e.g. `PLAIN`
    fn name(&self) -> &str;

    /// Payload of the opening `SASL_AUTH`
    fn initial_response(&self) -> Result<Vec<u8>>;

    /// Payload answering a server continuation
    fn step(&self, challenge: &[u8]) -> Result<Vec<u8>>;
}

/// RFC 4616 `PLAIN`: `\0user\0password`, no continuation
#[derive(Clone)]
pub struct PlainMechanism {
    username: String,
    password: String,
}

impl PlainMechanism {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for PlainMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlainMechanism")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl SaslMechanism for PlainMechanism {
    fn name(&self) -> &str {
        "PLAIN"
    }

    fn initial_response(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(self.username.len() + self.password.len() + 2);
        payload.push(0);
        payload.extend_from_slice(self.username.as_bytes());
        payload.push(0);
        payload.extend_from_slice(self.password.as_bytes());
        Ok(payload)
    }

    fn step(&self, _challenge: &[u8]) -> Result<Vec<u8>> {
        Err(SubdocError::Protocol(
            "PLAIN does not accept a continuation".to_string(),
        ))
    }
}

/// Handshake progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Start,
    Continue,
    Success,
    Failure(ResponseStatus),
}

impl AuthState {
    /// Opening frame; the handshake is then in `Start`
    pub fn start(mechanism: &dyn SaslMechanism) -> Result<(AuthState, Bytes)> {
        let payload = mechanism.initial_response()?;
        let frame = encode_request(
            OpCode::SaslAuth,
            0,
            &[],
            mechanism.name().as_bytes(),
            &payload,
        )?;
        Ok((AuthState::Start, frame))
    }

    /// Next state for `response`, plus the frame to send if any
    pub fn advance(
        self,
        response: &Packet,
        mechanism: &dyn SaslMechanism,
    ) -> Result<(AuthState, Option<Bytes>)> {
        if self.is_finished() {
            return Err(SubdocError::Protocol(format!(
                "Handshake already finished ({:?})",
                self
            )));
        }

        match response.status() {
            ResponseStatus::Success => Ok((AuthState::Success, None)),
            ResponseStatus::AuthContinue => {
                // A mechanism that cannot answer the challenge ends the handshake
                let payload = match mechanism.step(&response.value) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::debug!("{} cannot continue: {}", mechanism.name(), e);
                        return Ok((AuthState::Failure(ResponseStatus::AuthContinue), None));
                    }
                };
                let frame = encode_request(
                    OpCode::SaslStep,
                    0,
                    &[],
                    mechanism.name().as_bytes(),
                    &payload,
                )?;
                Ok((AuthState::Continue, Some(frame)))
            }
            other => Ok((AuthState::Failure(other), None)),
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, AuthState::Success | AuthState::Failure(_))
    }
}

/// Run the handshake over `connection`
///
/// `Ok(false)` means the node rejected the credentials.
pub fn authenticate(connection: &Connection, mechanism: &Arc<dyn SaslMechanism>) -> Result<bool> {
    let (mut state, frame) = AuthState::start(mechanism.as_ref())?;
    connection.send(&frame)?;

    loop {
        let response = decode_packet(connection.receive()?)?;
        let (next, outbound) = state.advance(&response, mechanism.as_ref())?;
        state = next;

        match state {
            AuthState::Success => {
                tracing::debug!("Connection {} authenticated", connection.id());
                return Ok(true);
            }
            AuthState::Failure(status) => {
                tracing::debug!(
                    "Connection {} authentication rejected: {:?}",
                    connection.id(),
                    status
                );
                return Ok(false);
            }
            AuthState::Start | AuthState::Continue => {}
        }

        if let Some(frame) = outbound {
            connection.send(&frame)?;
        }
    }
}

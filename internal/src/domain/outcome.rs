use std::{net::SocketAddr, time::Duration};

/// Result of exactly one command exchange with the sensor node.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(String),
    /// No datagram arrived before the deadline. Expected, recoverable.
    Timeout(Duration),
    TransportError(String),
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "Success",
            Outcome::Timeout(_) => "Timeout",
            Outcome::TransportError(_) => "TransportError",
        }
    }
}

/// Raw datagram received in answer to a command. The sender address is
/// only used for diagnostics.
#[derive(Debug)]
pub struct Reply {
    pub payload: Vec<u8>,
    pub from: SocketAddr,
}

impl Reply {
    pub fn new(payload: Vec<u8>, from: SocketAddr) -> Self {
        Reply { payload, from }
    }

    pub fn decode(self) -> Outcome {
        match String::from_utf8(self.payload) {
            Ok(text) => Outcome::Success(text),
            Err(e) => Outcome::TransportError(format!(
                "Reply from {} is not valid UTF-8 text: {}",
                self.from,
                e.utf8_error()
            )),
        }
    }
}

use std::{
    fmt::Display,
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use internal::{
    domain::{
        command::{Command, Endpoint},
        error::ConfigurationError,
        outcome::{Outcome, Reply},
    },
    port::sensor::SensorCommandDrivenPort,
};
use log::{debug, error, warn};
use tokio::{
    net::{UdpSocket, lookup_host},
    time::{Instant, timeout_at},
};

use crate::config::sensor_config::SensorConfig;

/// Single-shot UDP command client for the remote sensor node.
///
/// Every exchange binds its own ephemeral socket, connected to the node so
/// the kernel drops datagrams from any other peer, and closes it when the
/// exchange ends. A reply arriving after its deadline hits a closed port
/// and can't be mistaken for the answer to a later command.
///
/// The deadline covers the whole exchange, name resolution included.
pub struct SensorCommandClient {
    endpoint: Endpoint,
    timeout: Duration,
    max_reply_len: usize,
}

impl SensorCommandClient {
    pub fn new(endpoint: Endpoint, timeout: Duration, max_reply_len: usize) -> Result<Self, ConfigurationError> {
        if timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout);
        }
        if max_reply_len == 0 {
            return Err(ConfigurationError::ZeroReplyBuffer);
        }
        Ok(SensorCommandClient {
            endpoint,
            timeout,
            max_reply_len,
        })
    }

    pub fn from_config(config: &SensorConfig) -> Result<Self, ConfigurationError> {
        Self::new(config.endpoint()?, config.timeout(), config.max_reply_len)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn resolve(&self, deadline: Instant) -> Result<SocketAddr, String> {
        self.first_address(deadline, lookup_host((self.endpoint.host(), self.endpoint.port())))
            .await
    }

    async fn first_address<I>(
        &self, deadline: Instant, lookup: impl Future<Output = io::Result<I>>,
    ) -> Result<SocketAddr, String>
    where
        I: Iterator<Item = SocketAddr>,
    {
        match timeout_at(deadline, lookup).await {
            Ok(Ok(mut addresses)) => addresses
                .next()
                .ok_or_else(|| format!("No address found for {}", self.endpoint)),
            Ok(Err(e)) => Err(format!("Cannot resolve {}: {}", self.endpoint, e)),
            Err(_) => Err(format!(
                "Resolving {} did not finish within {:?}",
                self.endpoint, self.timeout
            )),
        }
    }

    async fn open_socket(peer: SocketAddr) -> io::Result<UdpSocket> {
        let local: SocketAddr = if peer.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;
        Ok(socket)
    }

    fn transport_error(&self, stage: &str, cause: impl Display) -> Outcome {
        let detail = format!("{} {} failed: {}", stage, self.endpoint, cause);
        error!("{detail}");
        Outcome::TransportError(detail)
    }
}

impl SensorCommandDrivenPort for SensorCommandClient {
    async fn send_command(&self, command: &Command) -> Outcome {
        let deadline = Instant::now() + self.timeout;
        let peer = match self.resolve(deadline).await {
            Ok(peer) => peer,
            Err(detail) => {
                error!("{detail}");
                return Outcome::TransportError(detail);
            }
        };
        let socket = match Self::open_socket(peer).await {
            Ok(socket) => socket,
            Err(e) => return self.transport_error("Opening socket to", e),
        };
        if let Err(e) = socket.send(command.as_bytes()).await {
            return self.transport_error("Sending command to", e);
        }
        debug!("Sent {} ({} bytes) to {}", command, command.as_bytes().len(), peer);

        let mut buffer = vec![0u8; self.max_reply_len];
        match timeout_at(deadline, socket.recv_from(&mut buffer)).await {
            Ok(Ok((len, from))) => {
                debug!("Received {} bytes from {}", len, from);
                if len == self.max_reply_len {
                    warn!("Reply from {} filled the {} byte buffer and may be truncated", from, len);
                }
                buffer.truncate(len);
                Reply::new(buffer, from).decode()
            }
            Ok(Err(e)) => self.transport_error("Receiving reply from", e),
            Err(_) => {
                warn!("No reply to {} from {} within {:?}", command, self.endpoint, self.timeout);
                Outcome::Timeout(self.timeout)
            }
        }
    }
}

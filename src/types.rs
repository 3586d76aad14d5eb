#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Represents the state of a network socket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum SocketState {
    /// Socket is listening for connections (TCP only)
    Listen,
    /// Socket has an established connection
    Established,
    /// Socket is in the process of connecting
    Connecting,
    /// Socket is closing
    Closing,
    /// Socket is closed
    Closed,
    /// Socket is bound but not connected (UDP)
    Bound,
    /// Unknown or platform-specific state
    Unknown(String),
}

impl SocketState {
    /// Returns true for a TCP socket that counts as an active connection.
    ///
    /// Established, connecting and closing sockets hold their local port on
    /// behalf of a connection. Unrecognised states never count.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Established | Self::Connecting | Self::Closing)
    }
}

impl std::fmt::Display for SocketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listen => write!(f, "LISTEN"),
            Self::Established => write!(f, "ESTABLISHED"),
            Self::Connecting => write!(f, "CONNECTING"),
            Self::Closing => write!(f, "CLOSING"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Bound => write!(f, "BOUND"),
            Self::Unknown(state) => write!(f, "{state}"),
        }
    }
}

/// Transport protocol of a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Protocol {
    /// Transmission Control Protocol
    Tcp,
    /// User Datagram Protocol
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_states() {
        assert!(SocketState::Established.is_connection());
        assert!(SocketState::Connecting.is_connection());
        assert!(SocketState::Closing.is_connection());
        assert!(!SocketState::Listen.is_connection());
        assert!(!SocketState::Closed.is_connection());
        assert!(!SocketState::Bound.is_connection());
        assert!(!SocketState::Unknown("ABHÖREN".into()).is_connection());
    }

    #[test]
    fn test_display() {
        assert_eq!(SocketState::Listen.to_string(), "LISTEN");
        assert_eq!(SocketState::Unknown("0C".into()).to_string(), "0C");
        assert_eq!(Protocol::Udp.to_string(), "UDP");
    }
}

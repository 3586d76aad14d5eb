//! Port sources
//!
//! A [`PortSource`] supplies the raw local-port lists the analyzer works
//! from. [`SystemPortSource`] reads them from the operating system on every
//! call; [`FixedPortSource`] replays lists captured or built ahead of time.

use crate::socket::platform::{list_sockets, SocketInfo};
use crate::types::Protocol;
use crate::Result;

/// Supplier of raw, possibly duplicated, local port numbers.
///
/// The three lists are queried independently and carry no ordering or
/// atomicity guarantee relative to each other.
#[cfg_attr(test, mockall::automock)]
pub trait PortSource {
    /// Local port of every active TCP connection
    ///
    /// # Errors
    /// Returns an error if the TCP socket table cannot be read
    fn active_tcp_connection_ports(&self) -> Result<Vec<u16>>;

    /// Local port of every listening TCP socket
    ///
    /// # Errors
    /// Returns an error if the TCP socket table cannot be read
    fn tcp_listener_ports(&self) -> Result<Vec<u16>>;

    /// Local port of every bound UDP socket
    ///
    /// # Errors
    /// Returns an error if the UDP socket table cannot be read
    fn udp_listener_ports(&self) -> Result<Vec<u16>>;
}

/// Reads the live socket tables of the local host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPortSource;

impl SystemPortSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ports_where<F>(protocol: Protocol, keep: F) -> Result<Vec<u16>>
    where
        F: Fn(&SocketInfo) -> bool,
    {
        Ok(list_sockets(protocol)?
            .iter()
            .filter(|socket| keep(socket))
            .map(SocketInfo::local_port)
            .collect())
    }
}

impl PortSource for SystemPortSource {
    fn active_tcp_connection_ports(&self) -> Result<Vec<u16>> {
        Self::ports_where(Protocol::Tcp, |socket| socket.state.is_connection())
    }

    fn tcp_listener_ports(&self) -> Result<Vec<u16>> {
        Self::ports_where(Protocol::Tcp, SocketInfo::is_listening)
    }

    fn udp_listener_ports(&self) -> Result<Vec<u16>> {
        Self::ports_where(Protocol::Udp, |_| true)
    }
}

/// A port source that always returns the same lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedPortSource {
    pub tcp_connections: Vec<u16>,
    pub tcp_listeners: Vec<u16>,
    pub udp_listeners: Vec<u16>,
}

impl FixedPortSource {
    #[must_use]
    pub fn new(
        tcp_connections: Vec<u16>,
        tcp_listeners: Vec<u16>,
        udp_listeners: Vec<u16>,
    ) -> Self {
        Self {
            tcp_connections,
            tcp_listeners,
            udp_listeners,
        }
    }

    /// Capture the current lists of another source.
    ///
    /// # Errors
    /// Returns the first error raised by `source`
    pub fn capture<S: PortSource>(source: &S) -> Result<Self> {
        Ok(Self {
            tcp_connections: source.active_tcp_connection_ports()?,
            tcp_listeners: source.tcp_listener_ports()?,
            udp_listeners: source.udp_listener_ports()?,
        })
    }
}

impl PortSource for FixedPortSource {
    fn active_tcp_connection_ports(&self) -> Result<Vec<u16>> {
        Ok(self.tcp_connections.clone())
    }

    fn tcp_listener_ports(&self) -> Result<Vec<u16>> {
        Ok(self.tcp_listeners.clone())
    }

    fn udp_listener_ports(&self) -> Result<Vec<u16>> {
        Ok(self.udp_listeners.clone())
    }
}

impl<S: PortSource + ?Sized> PortSource for &S {
    fn active_tcp_connection_ports(&self) -> Result<Vec<u16>> {
        (**self).active_tcp_connection_ports()
    }

    fn tcp_listener_ports(&self) -> Result<Vec<u16>> {
        (**self).tcp_listener_ports()
    }

    fn udp_listener_ports(&self) -> Result<Vec<u16>> {
        (**self).udp_listener_ports()
    }
}

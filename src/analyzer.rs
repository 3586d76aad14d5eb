//! Used/open port analysis over a fixed range
//!
//! [`PortAnalyzer`] combines a [`PortRange`] with a [`PortSource`]. Every
//! query re-reads the source, so two calls may observe different socket
//! tables if the system changed in between.
//!
//! ```rust
//! use portstat::{FixedPortSource, PortAnalyzer, PortRange};
//!
//! let source = FixedPortSource::new(vec![80, 443], vec![22], vec![53]);
//! let analyzer = PortAnalyzer::new(source, PortRange::new(0, 100));
//!
//! assert_eq!(analyzer.all_used()?.len(), 4);
//! assert_eq!(analyzer.all_open()?.len(), 98);
//! # Ok::<(), portstat::Error>(())
//! ```

use crate::ports::{compute_used, union_of, PortSet};
use crate::range::PortRange;
use crate::report::{
    render, Report, OPEN_PORTS_HEADER, OPEN_TCP_HEADER, TCP_LISTENERS_HEADER,
    UDP_LISTENERS_HEADER, USED_PORTS_HEADER, USED_TCP_HEADER,
};
use crate::source::{PortSource, SystemPortSource};
use crate::Result;

/// Computes used and open ports within a range.
#[derive(Debug, Clone)]
pub struct PortAnalyzer<S> {
    range: PortRange,
    source: S,
}

impl PortAnalyzer<SystemPortSource> {
    /// Analyzer over the live socket tables of this host
    #[must_use]
    pub const fn system(range: PortRange) -> Self {
        Self::new(SystemPortSource::new(), range)
    }
}

impl<S: PortSource> PortAnalyzer<S> {
    #[must_use]
    pub const fn new(source: S, range: PortRange) -> Self {
        Self { range, source }
    }

    #[must_use]
    pub const fn range(&self) -> PortRange {
        self.range
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Deduplicate a raw port list into a [`PortSet`].
    pub fn compute_used<I>(&self, ports: I) -> PortSet
    where
        I: IntoIterator<Item = u16>,
    {
        compute_used(ports)
    }

    /// Ports in the configured range that are not in `used`.
    ///
    /// Empty when the range is inverted.
    #[must_use]
    pub fn compute_open(&self, used: &PortSet) -> PortSet {
        self.range.open_ports(used)
    }

    /// Ports with an active TCP connection
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn used_tcp(&self) -> Result<PortSet> {
        let used = compute_used(self.source.active_tcp_connection_ports()?);
        log::trace!("{} ports with active TCP connections", used.len());
        Ok(used)
    }

    /// Ports in range without an active TCP connection
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn open_tcp(&self) -> Result<PortSet> {
        Ok(self.compute_open(&self.used_tcp()?))
    }

    /// Ports with a listening TCP socket
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn tcp_listeners(&self) -> Result<PortSet> {
        let used = compute_used(self.source.tcp_listener_ports()?);
        log::trace!("{} ports with TCP listeners", used.len());
        Ok(used)
    }

    /// Ports with a bound UDP socket
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn udp_listeners(&self) -> Result<PortSet> {
        let used = compute_used(self.source.udp_listener_ports()?);
        log::trace!("{} ports with UDP listeners", used.len());
        Ok(used)
    }

    /// Union of TCP connections, TCP listeners and UDP listeners.
    ///
    /// Not limited to the configured range.
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_used(&self) -> Result<PortSet> {
        let used = union_of([
            self.used_tcp()?,
            self.tcp_listeners()?,
            self.udp_listeners()?,
        ]);
        log::debug!("{} used ports across all sources", used.len());
        Ok(used)
    }

    /// Ports in range that no source reports as used
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_open(&self) -> Result<PortSet> {
        let open = self.compute_open(&self.all_used()?);
        log::debug!("{} open ports in {}", open.len(), self.range);
        Ok(open)
    }

    /// Render `ports` under `header`.
    pub fn render<I>(&self, ports: I, header: &str) -> String
    where
        I: IntoIterator<Item = u16>,
    {
        render(ports, header)
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn open_tcp_report(&self) -> Result<Report> {
        Ok(Report::new(OPEN_TCP_HEADER, self.open_tcp()?))
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn used_tcp_report(&self) -> Result<Report> {
        Ok(Report::new(USED_TCP_HEADER, self.used_tcp()?))
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn tcp_listeners_report(&self) -> Result<Report> {
        Ok(Report::new(TCP_LISTENERS_HEADER, self.tcp_listeners()?))
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn udp_listeners_report(&self) -> Result<Report> {
        Ok(Report::new(UDP_LISTENERS_HEADER, self.udp_listeners()?))
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_open_report(&self) -> Result<Report> {
        Ok(Report::new(OPEN_PORTS_HEADER, self.all_open()?))
    }

    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_used_report(&self) -> Result<Report> {
        Ok(Report::new(USED_PORTS_HEADER, self.all_used()?))
    }

    /// Rendered [`Self::open_tcp_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn open_tcp_string(&self) -> Result<String> {
        Ok(self.open_tcp_report()?.to_string())
    }

    /// Rendered [`Self::used_tcp_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn used_tcp_string(&self) -> Result<String> {
        Ok(self.used_tcp_report()?.to_string())
    }

    /// Rendered [`Self::tcp_listeners_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn tcp_listeners_string(&self) -> Result<String> {
        Ok(self.tcp_listeners_report()?.to_string())
    }

    /// Rendered [`Self::udp_listeners_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn udp_listeners_string(&self) -> Result<String> {
        Ok(self.udp_listeners_report()?.to_string())
    }

    /// Rendered [`Self::all_open_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_open_string(&self) -> Result<String> {
        Ok(self.all_open_report()?.to_string())
    }

    /// Rendered [`Self::all_used_report`]
    ///
    /// # Errors
    /// Propagates any failure of the port source
    pub fn all_used_string(&self) -> Result<String> {
        Ok(self.all_used_report()?.to_string())
    }
}

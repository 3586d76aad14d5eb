//! Plain-text port reports

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::ports::{compute_used, PortSet};

pub const OPEN_PORTS_HEADER: &str = "Open Ports:\n";
pub const USED_PORTS_HEADER: &str = "Used Ports:\n";
pub const OPEN_TCP_HEADER: &str = "Open TCP Ports:\n";
pub const USED_TCP_HEADER: &str = "Used TCP Ports:\n";
pub const TCP_LISTENERS_HEADER: &str = "TCP Listener Ports:\n";
pub const UDP_LISTENERS_HEADER: &str = "UDP Listener Ports:\n";

/// A titled list of ports.
///
/// Renders as the header followed by one `"<rank>: Port <port>\n"` line per
/// port, ascending. The rank is positional only and restarts at 1 for
/// every report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Report {
    pub header: String,
    pub ports: PortSet,
}

impl Report {
    #[must_use]
    pub fn new(header: impl Into<String>, ports: PortSet) -> Self {
        Self {
            header: header.into(),
            ports,
        }
    }

    /// Number of ports listed
    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.header)?;
        for (rank, port) in self.ports.iter().enumerate() {
            writeln!(f, "{}: Port {port}", rank + 1)?;
        }
        Ok(())
    }
}

/// Render `ports` under `header`, deduplicated and in ascending order.
pub fn render<I>(ports: I, header: &str) -> String
where
    I: IntoIterator<Item = u16>,
{
    Report::new(header, compute_used(ports)).to_string()
}

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Portstat
//!
//! Reports which local TCP and UDP ports are in use and which are free
//! within a configurable range.
//!
//! Used ports come from three live sources read from the operating system:
//! - local ports of active TCP connections
//! - local ports of listening TCP sockets
//! - local ports of bound UDP sockets
//!
//! Open ports are the ports of the range that none of those sources report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portstat::{PortAnalyzer, PortRange};
//!
//! let analyzer = PortAnalyzer::system(PortRange::new(1024, 2048));
//!
//! print!("{}", analyzer.all_used_report()?);
//! println!("{} free ports", analyzer.all_open()?.len());
//! # Ok::<(), portstat::Error>(())
//! ```
//!
//! ## Features
//!
//! - `linux-procfs` - Read Linux socket tables through the `procfs` crate
//! - `serde-support` - Enable serialization support for ranges, reports and socket types

mod error;
mod types;

pub mod analyzer;
pub mod ports;
pub mod range;
pub mod report;
pub mod socket;
pub mod source;

pub use error::{Error, Result};
pub use types::{Protocol, SocketState};

pub use analyzer::PortAnalyzer;
pub use ports::{compute_used, PortSet, MAX_PORT, MIN_PORT};
pub use range::PortRange;
pub use report::{render, Report};
pub use socket::platform::SocketInfo;
pub use source::{FixedPortSource, PortSource, SystemPortSource};

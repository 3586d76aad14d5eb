//! Socket table enumeration
//!
//! Cross-platform access to the live TCP and UDP socket tables.

pub mod platform;

pub use platform::{list_sockets, SocketInfo};

//! Port sets
//!
//! A [`PortSet`] is the deduplicated, ascending collection every query in
//! this crate produces.

use std::collections::BTreeSet;

/// Smallest port number
pub const MIN_PORT: u16 = 0;

/// Largest port number
pub const MAX_PORT: u16 = u16::MAX;

/// Unique ports, enumerated in ascending order.
pub type PortSet = BTreeSet<u16>;

/// Collapse a raw port list from one socket table into a [`PortSet`].
///
/// The input may be unsorted and contain duplicates (one entry per socket,
/// and several sockets can share a local port across address families).
pub fn compute_used<I>(ports: I) -> PortSet
where
    I: IntoIterator<Item = u16>,
{
    ports.into_iter().collect()
}

/// Union of several used-port sources.
pub fn union_of<I>(sources: I) -> PortSet
where
    I: IntoIterator<Item = PortSet>,
{
    sources.into_iter().flatten().collect()
}

//! Inclusive port ranges and the open-port scan.

use std::collections::HashSet;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::ports::{PortSet, MAX_PORT, MIN_PORT};

/// An inclusive `[start, end]` range of ports to inspect.
///
/// Bounds are stored exactly as given. An inverted range (`start > end`)
/// is accepted and simply contains no ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl Default for PortRange {
    fn default() -> Self {
        Self::new(MIN_PORT, MAX_PORT)
    }
}

impl PortRange {
    /// Range covering `start..=end`
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Range covering `start..=65535`
    #[must_use]
    pub const fn from_start(start: u16) -> Self {
        Self::new(start, MAX_PORT)
    }

    /// Build a range from optional bounds, defaulting to the full port space.
    #[must_use]
    pub fn from_bounds(start: Option<u16>, end: Option<u16>) -> Self {
        Self::new(start.unwrap_or(MIN_PORT), end.unwrap_or(MAX_PORT))
    }

    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Returns true when the range contains no ports
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of ports in the range
    #[must_use]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::from(self.end - self.start) + 1
        }
    }

    #[must_use]
    pub const fn contains(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }

    /// Iterate the range in ascending order
    pub fn iter(&self) -> std::ops::RangeInclusive<u16> {
        self.start..=self.end
    }

    /// Every port in the range that does not appear in `used`.
    ///
    /// Walks the whole range once against a hashed copy of `used`; the
    /// port space is small enough that nothing smarter pays off.
    #[must_use]
    pub fn open_ports(&self, used: &PortSet) -> PortSet {
        let used: HashSet<u16> = used.iter().copied().collect();

        self.iter().filter(|port| !used.contains(port)).collect()
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

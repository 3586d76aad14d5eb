use std::net::SocketAddr;

use crate::types::{Protocol, SocketState};
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
use crate::Error;
use crate::Result;

/// One row of the system socket table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketInfo {
    pub local_addr: SocketAddr,
    /// Peer address, `None` for listeners and unconnected UDP sockets
    pub remote_addr: Option<SocketAddr>,
    pub state: SocketState,
    pub protocol: Protocol,
}

impl SocketInfo {
    #[must_use]
    pub fn new(
        local_addr: SocketAddr,
        remote_addr: Option<SocketAddr>,
        state: SocketState,
        protocol: Protocol,
    ) -> Self {
        Self {
            local_addr,
            remote_addr: remote_addr.filter(|addr| !is_wildcard(addr)),
            state,
            protocol,
        }
    }

    /// Get the port number of the local address
    #[must_use]
    pub fn local_port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Check if this socket is listening for connections
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == SocketState::Listen
    }
}

fn is_wildcard(addr: &SocketAddr) -> bool {
    addr.port() == 0 && addr.ip().is_unspecified()
}

/// List the system sockets of one protocol, IPv4 and IPv6 alike.
///
/// Every call reads the live socket table; nothing is cached.
///
/// # Errors
/// Returns an error if the socket table cannot be read or the platform has
/// no supported way to enumerate sockets
pub fn list_sockets(protocol: Protocol) -> Result<Vec<SocketInfo>> {
    #[cfg(target_os = "linux")]
    {
        linux::list_sockets(protocol)
    }
    #[cfg(target_os = "windows")]
    {
        windows::list_sockets(protocol)
    }
    #[cfg(target_os = "macos")]
    {
        macos::list_sockets(protocol)
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        let _ = protocol;
        Err(Error::unsupported_platform("socket enumeration"))
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::SocketInfo;
    use crate::types::{Protocol, SocketState};
    use crate::{Error, Result};

    #[cfg(not(feature = "linux-procfs"))]
    use std::fs;
    #[cfg(not(feature = "linux-procfs"))]
    use std::io::{self, BufRead, BufReader};
    #[cfg(not(feature = "linux-procfs"))]
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    #[cfg(feature = "linux-procfs")]
    use procfs::net::{TcpState as ProcfsTcpState, UdpState as ProcfsUdpState};
    #[cfg(feature = "linux-procfs")]
    use procfs::ProcError;

    #[cfg(feature = "linux-procfs")]
    fn convert_tcp_state(state: ProcfsTcpState) -> SocketState {
        match state {
            ProcfsTcpState::Established => SocketState::Established,
            ProcfsTcpState::SynSent | ProcfsTcpState::SynRecv | ProcfsTcpState::NewSynRecv => {
                SocketState::Connecting
            }
            ProcfsTcpState::FinWait1
            | ProcfsTcpState::FinWait2
            | ProcfsTcpState::TimeWait
            | ProcfsTcpState::CloseWait
            | ProcfsTcpState::LastAck
            | ProcfsTcpState::Closing => SocketState::Closing,
            ProcfsTcpState::Close => SocketState::Closed,
            ProcfsTcpState::Listen => SocketState::Listen,
        }
    }

    /// A missing IPv6 table means IPv6 is disabled, not that reading failed.
    #[cfg(feature = "linux-procfs")]
    fn optional_table<T>(table: procfs::ProcResult<Vec<T>>) -> Result<Vec<T>> {
        match table {
            Err(ProcError::NotFound(path)) => {
                log::debug!("socket table {path:?} not present, skipping");
                Ok(Vec::new())
            }
            other => other.map_err(Error::from),
        }
    }

    #[cfg(feature = "linux-procfs")]
    pub fn list_sockets(protocol: Protocol) -> Result<Vec<SocketInfo>> {
        let sockets: Vec<SocketInfo> = match protocol {
            Protocol::Tcp => procfs::net::tcp()?
                .into_iter()
                .chain(optional_table(procfs::net::tcp6())?)
                .map(|entry| {
                    SocketInfo::new(
                        entry.local_address,
                        Some(entry.remote_address),
                        convert_tcp_state(entry.state),
                        Protocol::Tcp,
                    )
                })
                .collect(),
            Protocol::Udp => procfs::net::udp()?
                .into_iter()
                .chain(optional_table(procfs::net::udp6())?)
                .map(|entry| {
                    let state = match entry.state {
                        ProcfsUdpState::Established => SocketState::Established,
                        ProcfsUdpState::Close => SocketState::Bound,
                    };
                    SocketInfo::new(
                        entry.local_address,
                        Some(entry.remote_address),
                        state,
                        Protocol::Udp,
                    )
                })
                .collect(),
        };

        log::debug!("read {} {protocol} sockets via procfs", sockets.len());
        Ok(sockets)
    }

    #[cfg(not(feature = "linux-procfs"))]
    pub fn list_sockets(protocol: Protocol) -> Result<Vec<SocketInfo>> {
        let (v4, v6) = match protocol {
            Protocol::Tcp => ("/proc/net/tcp", "/proc/net/tcp6"),
            Protocol::Udp => ("/proc/net/udp", "/proc/net/udp6"),
        };

        let mut sockets = parse_socket_file(v4, protocol, false)?;
        sockets.extend(parse_socket_file(v6, protocol, true)?);

        log::debug!("read {} {protocol} sockets from /proc/net", sockets.len());
        Ok(sockets)
    }

    #[cfg(not(feature = "linux-procfs"))]
    fn parse_socket_file(
        path: &str,
        protocol: Protocol,
        optional: bool,
    ) -> Result<Vec<SocketInfo>> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if optional && err.kind() == io::ErrorKind::NotFound => {
                log::debug!("socket table {path} not present, skipping");
                return Ok(Vec::new());
            }
            Err(err) => return Err(Error::from_io(path, err)),
        };

        let mut sockets = Vec::new();
        // First line is the column header
        for line in BufReader::new(file).lines().skip(1) {
            let line = line.map_err(|err| Error::from_io(path, err))?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_socket_line(&line, protocol) {
                Some(socket) => sockets.push(socket),
                None => log::warn!("skipping malformed row in {path}: {line}"),
            }
        }

        Ok(sockets)
    }

    #[cfg(not(feature = "linux-procfs"))]
    pub(super) fn parse_socket_line(line: &str, protocol: Protocol) -> Option<SocketInfo> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return None;
        }

        let local_addr = parse_hex_address(parts[1])?;
        let remote_addr = parse_hex_address(parts[2])?;

        let state = match (protocol, u8::from_str_radix(parts[3], 16).ok()?) {
            (Protocol::Tcp, 0x01) => SocketState::Established,
            (Protocol::Tcp, 0x02 | 0x03 | 0x0C) => SocketState::Connecting,
            (Protocol::Tcp, 0x04 | 0x05 | 0x06 | 0x08 | 0x09 | 0x0B) => SocketState::Closing,
            (Protocol::Tcp, 0x07) => SocketState::Closed,
            (Protocol::Tcp, 0x0A) => SocketState::Listen,
            (Protocol::Tcp, other) => SocketState::Unknown(format!("{other:02X}")),
            (Protocol::Udp, 0x01) => SocketState::Established,
            (Protocol::Udp, _) => SocketState::Bound,
        };

        Some(SocketInfo::new(local_addr, Some(remote_addr), state, protocol))
    }

    /// Decode a `/proc/net` endpoint such as `0100007F:1F90`.
    ///
    /// The address is printed as native-endian 32-bit words.
    #[cfg(not(feature = "linux-procfs"))]
    pub(super) fn parse_hex_address(hex_addr: &str) -> Option<SocketAddr> {
        let (addr, port) = hex_addr.split_once(':')?;
        let port = u16::from_str_radix(port, 16).ok()?;

        let ip = match addr.len() {
            8 => {
                let word = u32::from_str_radix(addr, 16).ok()?;
                IpAddr::V4(Ipv4Addr::from(word.to_ne_bytes()))
            }
            32 => {
                let mut bytes = [0u8; 16];
                for (i, chunk) in bytes.chunks_mut(4).enumerate() {
                    let word = u32::from_str_radix(addr.get(i * 8..i * 8 + 8)?, 16).ok()?;
                    chunk.copy_from_slice(&word.to_ne_bytes());
                }
                IpAddr::V6(Ipv6Addr::from(bytes))
            }
            _ => return None,
        };

        Some(SocketAddr::new(ip, port))
    }
}

/// macOS socket tables as printed by `netstat -an`.
///
/// `netstat` reads the kernel's protocol control block lists, so sockets of
/// processes we could not inspect ourselves are still reported. BSD state
/// names come from a fixed kernel table and are never localized.
#[cfg(any(target_os = "macos", test))]
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod macos {
    use super::SocketInfo;
    use crate::types::{Protocol, SocketState};
    use crate::{Error, Result};
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use std::process::Command;

    pub fn list_sockets(protocol: Protocol) -> Result<Vec<SocketInfo>> {
        let family = match protocol {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        };
        let output = Command::new("netstat")
            .args(["-an", "-p", family])
            .output()
            .map_err(|err| Error::from_io("netstat", err))?;
        if !output.status.success() {
            return Err(Error::resource_access(
                "netstat",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let sockets: Vec<SocketInfo> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(parse_netstat_line)
            .filter(|socket| socket.protocol == protocol)
            .collect();

        log::debug!("read {} {protocol} sockets from netstat", sockets.len());
        Ok(sockets)
    }

    /// Parse one `netstat -an` row; headers and other sections yield `None`.
    pub(super) fn parse_netstat_line(line: &str) -> Option<SocketInfo> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let protocol = match parts.first()? {
            proto if proto.starts_with("tcp") => Protocol::Tcp,
            proto if proto.starts_with("udp") => Protocol::Udp,
            _ => return None,
        };
        if parts.len() < 5 {
            return None;
        }

        let local_addr = parse_endpoint(parts[3])?;
        let remote_addr = parse_endpoint(parts[4]);
        let state = match protocol {
            Protocol::Tcp => parse_tcp_state(parts.get(5)?),
            Protocol::Udp => SocketState::Bound,
        };

        Some(SocketInfo::new(local_addr, remote_addr, state, protocol))
    }

    fn parse_tcp_state(state: &str) -> SocketState {
        match state {
            "LISTEN" => SocketState::Listen,
            "ESTABLISHED" => SocketState::Established,
            "SYN_SENT" | "SYN_RCVD" | "SYN_RECEIVED" => SocketState::Connecting,
            "CLOSE_WAIT" | "FIN_WAIT_1" | "CLOSING" | "LAST_ACK" | "FIN_WAIT_2" | "TIME_WAIT" => {
                SocketState::Closing
            }
            "CLOSED" => SocketState::Closed,
            other => SocketState::Unknown(other.to_string()),
        }
    }

    /// Parse `127.0.0.1.631`, `*.22` or `fe80::1%lo0.123`.
    ///
    /// The port follows the last dot. A wildcard or truncated host keeps the
    /// port with an unspecified address; a wildcard port yields `None`.
    pub(super) fn parse_endpoint(endpoint: &str) -> Option<SocketAddr> {
        let (host, port) = endpoint.rsplit_once('.')?;
        let port = port.parse::<u16>().ok()?;

        let host = host.split_once('%').map_or(host, |(addr, _)| addr);
        let ip = host
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Some(SocketAddr::new(ip, port))
    }
}

/// Windows socket tables from the IP Helper API.
///
/// States arrive as numeric `MIB_TCP_STATE` values and ports as network
/// byte order words; decoding them needs no FFI and is shared with tests.
#[cfg(any(target_os = "windows", test))]
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod windows {
    use crate::types::SocketState;

    #[cfg(target_os = "windows")]
    pub use self::tables::list_sockets;

    pub(super) fn tcp_state(state: u32) -> SocketState {
        match state {
            1 => SocketState::Closed,
            2 => SocketState::Listen,
            3 | 4 => SocketState::Connecting,
            5 => SocketState::Established,
            6..=12 => SocketState::Closing,
            other => SocketState::Unknown(format!("MIB_TCP_STATE {other}")),
        }
    }

    /// Port stored in the low 16 bits of a row word, in network byte order
    pub(super) fn decode_port(raw: u32) -> u16 {
        u16::from_be((raw & 0xffff) as u16)
    }

    #[cfg(target_os = "windows")]
    mod tables {
        use super::{decode_port, tcp_state};
        use crate::socket::platform::SocketInfo;
        use crate::types::{Protocol, SocketState};
        use crate::{Error, Result};
        use std::io;
        use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
        use std::ptr::null_mut;

        use winapi::shared::iprtrmib::{TCP_TABLE_OWNER_PID_ALL, UDP_TABLE_OWNER_PID};
        use winapi::shared::minwindef::{DWORD, FALSE, LPVOID, ULONG};
        use winapi::shared::tcpmib::{MIB_TCP6TABLE_OWNER_PID, MIB_TCPTABLE_OWNER_PID};
        use winapi::shared::udpmib::{MIB_UDP6TABLE_OWNER_PID, MIB_UDPTABLE_OWNER_PID};
        use winapi::shared::winerror::{ERROR_INSUFFICIENT_BUFFER, NO_ERROR};
        use winapi::shared::ws2def::{AF_INET, AF_INET6};
        use winapi::um::iphlpapi::{GetExtendedTcpTable, GetExtendedUdpTable};

        pub fn list_sockets(protocol: Protocol) -> Result<Vec<SocketInfo>> {
            let sockets = match protocol {
                Protocol::Tcp => {
                    let mut sockets = tcp4()?;
                    sockets.extend(tcp6()?);
                    sockets
                }
                Protocol::Udp => {
                    let mut sockets = udp4()?;
                    sockets.extend(udp6()?);
                    sockets
                }
            };

            log::debug!("read {} {protocol} sockets from iphlpapi", sockets.len());
            Ok(sockets)
        }

        /// Fill a buffer through one of the `GetExtended*Table` calls.
        ///
        /// The table can grow between the size query and the read, so the
        /// call is repeated until the buffer is large enough.
        fn read_table<F>(operation: &str, query: F) -> Result<Vec<u64>>
        where
            F: Fn(LPVOID, &mut DWORD) -> DWORD,
        {
            let mut size: DWORD = 0;
            let mut buffer: Vec<u64> = Vec::new();
            loop {
                let table = if buffer.is_empty() {
                    null_mut()
                } else {
                    buffer.as_mut_ptr().cast()
                };
                match query(table, &mut size) {
                    NO_ERROR => return Ok(buffer),
                    ERROR_INSUFFICIENT_BUFFER => {
                        buffer = vec![0u64; (size as usize).div_ceil(8)];
                    }
                    code => {
                        #[allow(clippy::cast_possible_wrap)]
                        let err = io::Error::from_raw_os_error(code as i32);
                        return Err(Error::from_io(operation, err));
                    }
                }
            }
        }

        fn v4(addr: DWORD, port: DWORD) -> SocketAddr {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::from(addr.to_ne_bytes())), decode_port(port))
        }

        fn v6(addr: [u8; 16], port: DWORD) -> SocketAddr {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::from(addr)), decode_port(port))
        }

        fn tcp4() -> Result<Vec<SocketInfo>> {
            let buffer = read_table("GetExtendedTcpTable", |table, size| unsafe {
                GetExtendedTcpTable(
                    table,
                    size,
                    FALSE,
                    AF_INET as ULONG,
                    TCP_TABLE_OWNER_PID_ALL,
                    0,
                )
            })?;
            if buffer.is_empty() {
                return Ok(Vec::new());
            }

            let rows = unsafe {
                let table = &*buffer.as_ptr().cast::<MIB_TCPTABLE_OWNER_PID>();
                std::slice::from_raw_parts(table.table.as_ptr(), table.dwNumEntries as usize)
            };
            Ok(rows
                .iter()
                .map(|row| {
                    SocketInfo::new(
                        v4(row.dwLocalAddr, row.dwLocalPort),
                        Some(v4(row.dwRemoteAddr, row.dwRemotePort)),
                        tcp_state(row.dwState),
                        Protocol::Tcp,
                    )
                })
                .collect())
        }

        fn tcp6() -> Result<Vec<SocketInfo>> {
            let buffer = read_table("GetExtendedTcpTable", |table, size| unsafe {
                GetExtendedTcpTable(
                    table,
                    size,
                    FALSE,
                    AF_INET6 as ULONG,
                    TCP_TABLE_OWNER_PID_ALL,
                    0,
                )
            })?;
            if buffer.is_empty() {
                return Ok(Vec::new());
            }

            let rows = unsafe {
                let table = &*buffer.as_ptr().cast::<MIB_TCP6TABLE_OWNER_PID>();
                std::slice::from_raw_parts(table.table.as_ptr(), table.dwNumEntries as usize)
            };
            Ok(rows
                .iter()
                .map(|row| {
                    SocketInfo::new(
                        v6(row.ucLocalAddr, row.dwLocalPort),
                        Some(v6(row.ucRemoteAddr, row.dwRemotePort)),
                        tcp_state(row.dwState),
                        Protocol::Tcp,
                    )
                })
                .collect())
        }

        fn udp4() -> Result<Vec<SocketInfo>> {
            let buffer = read_table("GetExtendedUdpTable", |table, size| unsafe {
                GetExtendedUdpTable(table, size, FALSE, AF_INET as ULONG, UDP_TABLE_OWNER_PID, 0)
            })?;
            if buffer.is_empty() {
                return Ok(Vec::new());
            }

            let rows = unsafe {
                let table = &*buffer.as_ptr().cast::<MIB_UDPTABLE_OWNER_PID>();
                std::slice::from_raw_parts(table.table.as_ptr(), table.dwNumEntries as usize)
            };
            Ok(rows
                .iter()
                .map(|row| {
                    SocketInfo::new(
                        v4(row.dwLocalAddr, row.dwLocalPort),
                        None,
                        SocketState::Bound,
                        Protocol::Udp,
                    )
                })
                .collect())
        }

        fn udp6() -> Result<Vec<SocketInfo>> {
            let buffer = read_table("GetExtendedUdpTable", |table, size| unsafe {
                GetExtendedUdpTable(table, size, FALSE, AF_INET6 as ULONG, UDP_TABLE_OWNER_PID, 0)
            })?;
            if buffer.is_empty() {
                return Ok(Vec::new());
            }

            let rows = unsafe {
                let table = &*buffer.as_ptr().cast::<MIB_UDP6TABLE_OWNER_PID>();
                std::slice::from_raw_parts(table.table.as_ptr(), table.dwNumEntries as usize)
            };
            Ok(rows
                .iter()
                .map(|row| {
                    SocketInfo::new(
                        v6(row.ucLocalAddr, row.dwLocalPort),
                        None,
                        SocketState::Bound,
                        Protocol::Udp,
                    )
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_remote_is_dropped() {
        let socket = SocketInfo::new(
            "0.0.0.0:22".parse().unwrap(),
            Some("0.0.0.0:0".parse().unwrap()),
            SocketState::Listen,
            Protocol::Tcp,
        );
        assert_eq!(socket.remote_addr, None);
        assert_eq!(socket.local_port(), 22);
        assert!(socket.is_listening());
    }

    #[cfg(all(target_os = "linux", not(feature = "linux-procfs")))]
    #[test]
    fn test_parse_proc_tcp_listener() {
        let line = "   0: 0100007F:1F90 00000000:0000 0A 00000000:00000000 00:00000000 \
                    00000000  1000        0 51234 1 0000000000000000 100 0 0 10 0";
        let socket = linux::parse_socket_line(line, Protocol::Tcp).unwrap();
        assert_eq!(socket.local_port(), 8080);
        assert_eq!(socket.state, SocketState::Listen);
        assert_eq!(socket.remote_addr, None);
        #[cfg(target_endian = "little")]
        assert_eq!(socket.local_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[cfg(all(target_os = "linux", not(feature = "linux-procfs")))]
    #[test]
    fn test_parse_proc_tcp_states() {
        let established = "   1: 0100007F:A1B2 0100007F:1F90 01 00000000:00000000 \
            00:00000000 00000000  1000 0 0 1";
        let time_wait = "   2: 0100007F:A1B3 0100007F:1F90 06 00000000:00000000 \
            00:00000000 00000000  1000 0 0 1";
        let unknown = "   3: 0100007F:A1B4 0100007F:1F90 0F 00000000:00000000 \
            00:00000000 00000000  1000 0 0 1";

        let socket = linux::parse_socket_line(established, Protocol::Tcp).unwrap();
        assert_eq!(socket.state, SocketState::Established);
        assert_eq!(socket.remote_addr.map(|a| a.port()), Some(8080));
        let socket = linux::parse_socket_line(time_wait, Protocol::Tcp).unwrap();
        assert_eq!(socket.state, SocketState::Closing);
        let socket = linux::parse_socket_line(unknown, Protocol::Tcp).unwrap();
        assert!(!socket.state.is_connection());
    }

    #[cfg(all(target_os = "linux", not(feature = "linux-procfs")))]
    #[test]
    fn test_parse_proc_udp6() {
        let line = "  12: 00000000000000000000000001000000:0035 \
                    00000000000000000000000000000000:0000 07 00000000:00000000 \
                    00:00000000 00000000   101        0 4242 2 0000000000000000 0";
        let socket = linux::parse_socket_line(line, Protocol::Udp).unwrap();
        assert_eq!(socket.local_port(), 53);
        assert_eq!(socket.state, SocketState::Bound);
        #[cfg(target_endian = "little")]
        assert_eq!(socket.local_addr, "[::1]:53".parse().unwrap());
    }

    #[cfg(all(target_os = "linux", not(feature = "linux-procfs")))]
    #[test]
    fn test_parse_proc_rejects_malformed() {
        assert!(linux::parse_socket_line("garbage", Protocol::Tcp).is_none());
        assert!(linux::parse_socket_line("0: XYZ:0016 00000000:0000 0A", Protocol::Tcp).is_none());
        assert!(linux::parse_hex_address("0100007F").is_none());
        assert!(linux::parse_hex_address("0100:0016").is_none());
    }

    #[test]
    fn test_windows_tcp_states_are_numeric() {
        assert_eq!(windows::tcp_state(2), SocketState::Listen);
        assert_eq!(windows::tcp_state(5), SocketState::Established);
        assert_eq!(windows::tcp_state(3), SocketState::Connecting);
        assert_eq!(windows::tcp_state(11), SocketState::Closing);
        assert_eq!(windows::tcp_state(12), SocketState::Closing);
        assert_eq!(windows::tcp_state(1), SocketState::Closed);
    }

    #[test]
    fn test_windows_unknown_state_is_not_a_connection() {
        let state = windows::tcp_state(99);
        assert!(matches!(state, SocketState::Unknown(_)));
        assert!(!state.is_connection());
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_windows_port_words() {
        // Port 80 in network byte order sits in the low word as 0x5000
        assert_eq!(windows::decode_port(0x0000_5000), 80);
        assert_eq!(windows::decode_port(0x0000_BB01), 443);
        assert_eq!(windows::decode_port(0xFFFF_FFFF), 65535);
    }

    #[test]
    fn test_parse_bsd_netstat_rows() {
        let listener = "tcp4       0      0  127.0.0.1.8080         *.*                    LISTEN";
        let socket = macos::parse_netstat_line(listener).unwrap();
        assert_eq!(socket.protocol, Protocol::Tcp);
        assert_eq!(socket.local_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(socket.remote_addr, None);
        assert!(socket.is_listening());

        let connection =
            "tcp6       0      0  ::1.49670              ::1.5432               ESTABLISHED";
        let socket = macos::parse_netstat_line(connection).unwrap();
        assert_eq!(socket.state, SocketState::Established);
        assert_eq!(socket.remote_addr.map(|a| a.port()), Some(5432));

        let wildcard = "tcp46      0      0  *.22                   *.*                    LISTEN";
        assert_eq!(macos::parse_netstat_line(wildcard).unwrap().local_port(), 22);

        let udp = "udp6       0      0  fe80::1%lo0.123        *.*";
        let socket = macos::parse_netstat_line(udp).unwrap();
        assert_eq!(socket.protocol, Protocol::Udp);
        assert_eq!(socket.local_addr, "[fe80::1]:123".parse().unwrap());
        assert_eq!(socket.state, SocketState::Bound);
    }

    #[test]
    fn test_parse_bsd_netstat_skips_headers() {
        assert!(macos::parse_netstat_line("").is_none());
        assert!(macos::parse_netstat_line("Active Internet connections (including servers)")
            .is_none());
        assert!(macos::parse_netstat_line(
            "Proto Recv-Q Send-Q  Local Address          Foreign Address        (state)"
        )
        .is_none());
    }

    #[test]
    fn test_parse_bsd_endpoint_forms() {
        assert_eq!(macos::parse_endpoint("*.*"), None);
        assert_eq!(macos::parse_endpoint("*.53"), Some("0.0.0.0:53".parse().unwrap()));
        assert_eq!(
            macos::parse_endpoint("fe80::aede:48ff:fe00:1122%en0.546"),
            Some("[fe80::aede:48ff:fe00:1122]:546".parse().unwrap())
        );
        // Truncated hosts keep their port
        assert_eq!(macos::parse_endpoint("fe80::aede:48ff:fe0.631").map(|a| a.port()), Some(631));
    }
}

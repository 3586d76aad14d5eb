//! Linux-specific tests against the live socket tables

#![cfg(target_os = "linux")]

use portstat::socket::platform::list_sockets;
use portstat::{PortAnalyzer, PortRange, PortSource, Protocol, SocketState, SystemPortSource};
use std::io::Write;
use std::net::{TcpListener, TcpStream, UdpSocket};

/// Test that a bound TCP listener shows up as used and not open
#[test]
fn test_linux_tcp_listener_is_used() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind TCP socket");
    let port = listener.local_addr().unwrap().port();

    let analyzer = PortAnalyzer::system(PortRange::new(port, port));
    assert!(analyzer.tcp_listeners().unwrap().contains(&port));
    assert!(analyzer.all_used().unwrap().contains(&port));
    assert!(analyzer.all_open().unwrap().is_empty());
}

/// Test that a bound UDP socket shows up as a UDP listener
#[test]
fn test_linux_udp_socket_is_used() {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind UDP socket");
    let port = socket.local_addr().unwrap().port();

    let ports = SystemPortSource::new().udp_listener_ports().unwrap();
    assert!(ports.contains(&port), "UDP port {port} not reported");
}

/// Test that both ends of a loopback connection count as active connections
#[test]
fn test_linux_active_connection_ports() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind TCP socket");
    let server_port = listener.local_addr().unwrap().port();

    let mut client = TcpStream::connect(("127.0.0.1", server_port)).expect("Failed to connect");
    let (_server_side, _) = listener.accept().expect("Failed to accept");
    client.write_all(b"ping").unwrap();
    let client_port = client.local_addr().unwrap().port();

    let ports = SystemPortSource::new().active_tcp_connection_ports().unwrap();
    assert!(ports.contains(&client_port), "client port {client_port} not reported");
    assert!(ports.contains(&server_port), "accepted connection on {server_port} not reported");

    let sockets = list_sockets(Protocol::Tcp).unwrap();
    assert!(sockets
        .iter()
        .any(|s| s.local_port() == client_port && s.state == SocketState::Established));
}

/// Test that the socket table reads report only the requested protocol
#[test]
fn test_linux_protocol_filtering() {
    let _tcp = TcpListener::bind("127.0.0.1:0").unwrap();
    let _udp = UdpSocket::bind("127.0.0.1:0").unwrap();

    let tcp = list_sockets(Protocol::Tcp).expect("Failed to read TCP table");
    let udp = list_sockets(Protocol::Udp).expect("Failed to read UDP table");

    assert!(!tcp.is_empty());
    assert!(!udp.is_empty());
    assert!(tcp.iter().all(|s| s.protocol == Protocol::Tcp));
    assert!(udp.iter().all(|s| s.protocol == Protocol::Udp));
    assert!(udp.iter().all(|s| s.state != SocketState::Listen));
}

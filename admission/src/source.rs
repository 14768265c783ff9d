use std::net::{IpAddr, SocketAddr};

/// Derive the bucket key from a raw remote endpoint.
///
/// The RPC layer hands over whatever it saw on the socket: `host:port`,
/// a bare host, or an IPv6 form with or without brackets. The port must
/// not leak into the key, otherwise one client dodges its bucket by
/// rotating source ports.
pub fn source_address(endpoint: &str) -> String {
    // A bare IPv6 address contains colons; check before any splitting.
    if endpoint.parse::<IpAddr>().is_ok() {
        return endpoint.to_string();
    }
    if let Ok(socket) = endpoint.parse::<SocketAddr>() {
        return socket.ip().to_string();
    }
    match endpoint.rsplit_once(':') {
        Some((host, port))
            if !host.is_empty() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            host.to_string()
        }
        _ => endpoint.to_string(),
    }
}

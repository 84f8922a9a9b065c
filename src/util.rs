// Host and address resolution through the OS resolver.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::ProbeError;

pub async fn resolve_host_to_ip(host: &str) -> Result<Ipv4Addr, ProbeError> {
    // First try to parse as IP address
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(ip);
    }

    // If parsing fails, resolve via DNS
    let addr = format!("{}:0", host);
    let addrs = tokio::net::lookup_host(&addr)
        .await
        .map_err(|source| ProbeError::Resolution { target: host.to_string(), source })?;

    addrs
        .filter_map(|a| match a.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ProbeError::Resolution {
            target: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no IPv4 address found"),
        })
}

pub async fn resolve_tcp_addr(ip: Ipv4Addr, port: u16) -> Result<SocketAddr, ProbeError> {
    let target = format!("{}:{}", ip, port);
    let mut addrs = tokio::net::lookup_host((ip, port))
        .await
        .map_err(|source| ProbeError::Resolution { target: target.clone(), source })?;

    addrs.next().ok_or_else(|| ProbeError::Resolution {
        target,
        source: io::Error::new(io::ErrorKind::NotFound, "no address found"),
    })
}

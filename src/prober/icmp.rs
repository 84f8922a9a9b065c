use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::unix::AsyncFd;
use tokio::time::{timeout, Instant};
use tracing::debug;

use super::ProbeReport;
use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::packet::ProbePacket;

/// Sends the probe over a raw ICMP socket and times the first datagram back.
///
/// Whatever arrives first is taken as the reply; type, identifier and
/// sequence are not checked. Opening the socket needs root or CAP_NET_RAW.
pub async fn probe_icmp(
    packet: &ProbePacket,
    ip: Ipv4Addr,
    cfg: &ProbeConfig,
) -> Result<ProbeReport, ProbeError> {
    let socket = open_socket(ip)?;
    debug!("raw icmp socket open to {} for seq={}", ip, packet.sequence());

    send(&socket, &packet.to_bytes()).await?;

    let start = Instant::now();
    let mut buf = vec![0u8; cfg.recv_buffer_len];
    let received = timeout(cfg.timeout, recv(&socket, &mut buf))
        .await
        .map_err(|_| ProbeError::timed_out())??;
    let elapsed = start.elapsed();
    debug!("read {} raw bytes from {} in {:?}", received, ip, elapsed);

    Ok(ProbeReport {
        bytes: icmp_len(&buf[..received]),
        sequence: packet.sequence(),
        elapsed,
    })
}

fn open_socket(ip: Ipv4Addr) -> io::Result<AsyncFd<Socket>> {
    let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
    socket.set_nonblocking(true)?;
    socket.connect(&SocketAddr::from((ip, 0)).into())?;
    // SAFETY: the socket owns its fd and is moved into the AsyncFd, so the
    // descriptor stays open and unchanged until the AsyncFd is dropped.
    Ok(unsafe { AsyncFd::register(socket) }?)
}

async fn send(socket: &AsyncFd<Socket>, bytes: &[u8]) -> io::Result<usize> {
    loop {
        let mut guard = socket.writable().await?;
        match guard.try_io(|inner| inner.get_ref().write(bytes)) {
            Ok(result) => return result,
            Err(_would_block) => continue,
        }
    }
}

async fn recv(socket: &AsyncFd<Socket>, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        let mut guard = socket.readable().await?;
        match guard.try_io(|inner| inner.get_ref().read(buf)) {
            Ok(result) => return result,
            Err(_would_block) => continue,
        }
    }
}

/// Raw IPv4 sockets hand back the IP header too; count only the ICMP part.
fn icmp_len(datagram: &[u8]) -> usize {
    match datagram.first() {
        Some(&b) if b >> 4 == 4 => datagram.len().saturating_sub(usize::from(b & 0x0F) * 4),
        _ => datagram.len(),
    }
}

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};
use tracing::debug;

use super::ProbeReport;
use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::packet::ProbePacket;

/// Writes the probe header over a fresh connection and times the first reply.
///
/// Only peers that answer arbitrary bytes (echo-style services) succeed; a
/// bare accept without a reply runs into the read deadline.
pub async fn probe_tcp(
    packet: &ProbePacket,
    addr: SocketAddr,
    cfg: &ProbeConfig,
) -> Result<ProbeReport, ProbeError> {
    let mut stream = timeout(cfg.timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| ProbeError::timed_out())??;
    debug!("connected to {} for seq={}", addr, packet.sequence());

    stream.write_all(&packet.to_bytes()).await?;

    let start = Instant::now();
    let mut buf = vec![0u8; cfg.recv_buffer_len];
    let received = timeout(cfg.timeout, stream.read(&mut buf))
        .await
        .map_err(|_| ProbeError::timed_out())??;
    if received == 0 {
        return Err(ProbeError::eof());
    }
    let elapsed = start.elapsed();
    debug!("read {} bytes from {} in {:?}", received, addr, elapsed);

    Ok(ProbeReport {
        bytes: received,
        sequence: packet.sequence(),
        elapsed,
    })
}

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::packet::ProbePacket;

pub mod icmp;
pub mod tcp_echo;

/// Transport chosen once at startup from the presence of a port argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    Icmp(Ipv4Addr),
    Tcp(SocketAddr),
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMode::Icmp(ip) => write!(f, "{}", ip),
            ProbeMode::Tcp(addr) => write!(f, "{}", addr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub bytes: usize,
    pub sequence: u16,
    pub elapsed: Duration,
}

impl ProbeReport {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn line(&self, mode: &ProbeMode) -> String {
        format!(
            "{} bytes from {}: seq={} time={}ms",
            self.bytes,
            mode,
            self.sequence,
            self.elapsed_ms()
        )
    }
}

pub async fn probe(
    mode: &ProbeMode,
    packet: &ProbePacket,
    cfg: &ProbeConfig,
) -> Result<ProbeReport, ProbeError> {
    match mode {
        ProbeMode::Icmp(ip) => icmp::probe_icmp(packet, *ip, cfg).await,
        ProbeMode::Tcp(addr) => tcp_echo::probe_tcp(packet, *addr, cfg).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_line_matches_ping_output() {
        let report = ProbeReport {
            bytes: 8,
            sequence: 3,
            elapsed: Duration::from_micros(12_987),
        };
        let icmp = ProbeMode::Icmp(Ipv4Addr::new(93, 184, 216, 34));
        assert_eq!(report.line(&icmp), "8 bytes from 93.184.216.34: seq=3 time=12ms");

        let tcp = ProbeMode::Tcp(SocketAddr::from(([93, 184, 216, 34], 443)));
        assert_eq!(report.line(&tcp), "8 bytes from 93.184.216.34:443: seq=3 time=12ms");
    }
}

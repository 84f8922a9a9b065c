mod cli;
mod config;
mod error;
mod packet;
mod prober;
mod scheduler;
mod util;

use cli::{Args, USAGE};
use config::ProbeConfig;
use error::ProbeError;
use packet::ProbePacket;
use prober::ProbeMode;
use scheduler::Scheduler;

use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = ProbeConfig::default();
    let log_level = config.get_tracing_level()?;

    // Logs go to stderr; stdout carries the ping lines only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("xtcping={}", log_level.as_str().to_lowercase()).parse()?,
            ),
        )
        .init();

    let resolved = match Args::from_argv(std::env::args_os()) {
        Ok(args) => resolve_mode(&args).await,
        Err(e) => Err(e),
    };
    let mode = match resolved {
        Ok(mode) => mode,
        Err(ProbeError::Usage(e)) => {
            debug!("usage error: {}", e);
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            println!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    run(&mode, &config).await;
    Ok(ExitCode::SUCCESS)
}

/// Resolves the host and prints the header before the port is looked at.
async fn resolve_mode(args: &Args) -> Result<ProbeMode, ProbeError> {
    let host = args.host()?;
    if !args.rest.is_empty() {
        debug!("ignoring trailing arguments {:?}", args.rest);
    }
    let ip = util::resolve_host_to_ip(host).await?;
    println!("Ping {} ({}):\n", ip, host);

    match args.port()? {
        None => Ok(ProbeMode::Icmp(ip)),
        Some(port) => Ok(ProbeMode::Tcp(util::resolve_tcp_addr(ip, port).await?)),
    }
}

/// Runs the fixed probe sequence, printing one line per attempt.
async fn run(mode: &ProbeMode, config: &ProbeConfig) {
    Scheduler::new(config)
        .run(|seq| async move {
            println!("{}", probe_line(mode, seq, config).await);
        })
        .await;
}

async fn probe_line(mode: &ProbeMode, seq: u16, config: &ProbeConfig) -> String {
    let packet = ProbePacket::build(seq);
    debug!("probe seq={} to {}", seq, mode);
    match prober::probe(mode, &packet, config).await {
        Ok(report) => report.line(mode),
        Err(e) => {
            debug!(fatal = e.is_fatal(), "probe seq={} failed: {}", seq, e);
            format!("Error {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn argv(rest: &[&str]) -> Args {
        Args::from_argv(std::iter::once("xtcping").chain(rest.iter().copied())).unwrap()
    }

    fn fast_config() -> ProbeConfig {
        ProbeConfig {
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(200),
            ..ProbeConfig::default()
        }
    }

    #[tokio::test]
    async fn localhost_without_port_is_icmp() {
        let mode = resolve_mode(&argv(&["localhost"])).await.unwrap();
        assert!(matches!(mode, ProbeMode::Icmp(ip) if ip.is_loopback()));
    }

    #[tokio::test]
    async fn port_selects_tcp() {
        let mode = resolve_mode(&argv(&["127.0.0.1", "443"])).await.unwrap();
        assert_eq!(mode, ProbeMode::Tcp(([127, 0, 0, 1], 443).into()));
    }

    #[tokio::test]
    async fn host_is_resolved_before_port_is_parsed() {
        let err = resolve_mode(&argv(&["no-such-host.invalid", "http"])).await.unwrap_err();
        assert!(matches!(err, ProbeError::Resolution { .. }), "{err:?}");

        let err = resolve_mode(&argv(&["127.0.0.1", "http"])).await.unwrap_err();
        assert!(matches!(err, ProbeError::Usage(_)), "{err:?}");
    }

    #[tokio::test]
    async fn missing_host_is_usage() {
        let err = resolve_mode(&argv(&[])).await.unwrap_err();
        assert!(matches!(err, ProbeError::Usage(_)));
    }

    #[tokio::test]
    async fn echo_service_reports_each_sequence() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 8];
                if sock.read_exact(&mut buf).await.is_ok() {
                    let _ = sock.write_all(&buf).await;
                }
            }
        });

        let mode = ProbeMode::Tcp(addr);
        let cfg = fast_config();
        for seq in 1..=cfg.count {
            let line = probe_line(&mode, seq, &cfg).await;
            assert!(line.starts_with(&format!("8 bytes from {}: seq={} time=", addr, seq)), "{line}");
        }
    }

    #[tokio::test]
    async fn refused_probe_prints_error_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let line = probe_line(&ProbeMode::Tcp(addr), 1, &fast_config()).await;
        assert!(line.starts_with("Error "), "{line}");
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_run() {
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let start = std::time::Instant::now();
        run(&ProbeMode::Tcp(closed), &fast_config()).await;
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn icmp_mode_displays_bare_address() {
        assert_eq!(ProbeMode::Icmp(Ipv4Addr::new(10, 0, 0, 1)).to_string(), "10.0.0.1");
    }
}

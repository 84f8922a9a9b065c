use clap::Parser;

use crate::error::ProbeError;

pub const USAGE: &str = "
Usage:
		xtcping host, like ping, require root privileges !!!
		xtcping host port, like tcping

Example:
		./xtcping www.example.com
		./xtcping www.example.com 443";

/// Positional-only surface: `xtcping <host> [port]`. Trailing arguments are ignored.
#[derive(Parser, Debug, Clone, Default)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    pub host: Option<String>,
    pub port: Option<String>,
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl Args {
    /// Parses argv; anything clap rejects is reported as a usage error.
    pub fn from_argv<I, T>(argv: I) -> Result<Self, ProbeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Args::try_parse_from(argv).map_err(|e| {
            let kind = e.kind().as_str().unwrap_or("invalid arguments");
            ProbeError::Usage(kind.to_string())
        })
    }

    pub fn host(&self) -> Result<&str, ProbeError> {
        self.host
            .as_deref()
            .ok_or_else(|| ProbeError::Usage("missing host".to_string()))
    }

    /// Optional TCP port; a port that is not a u16 is a usage error.
    pub fn port(&self) -> Result<Option<u16>, ProbeError> {
        match &self.port {
            None => Ok(None),
            Some(p) => p
                .parse::<u16>()
                .map(Some)
                .map_err(|e| ProbeError::Usage(format!("invalid port {}: {}", p, e))),
        }
    }
}

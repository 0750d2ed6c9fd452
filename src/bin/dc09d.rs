//! Standalone DC-09 receiver daemon: reads a TOML config describing the
//! listener and its accounts, then logs every acknowledged event until
//! ctrl-c.

use std::sync::Arc;

use futures::FutureExt;
use log::{error, info};
use serde::Deserialize;

use sia_dc09::aio::SiaClient;
use sia_dc09::{AsyncEventHandler, DaemonError, Protocol, SiaAccount};

#[derive(Deserialize)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    protocol: Option<Protocol>,
    #[serde(default)]
    accounts: Vec<AccountConfig>,
}

#[derive(Deserialize)]
struct AccountConfig {
    account_id: String,
    key: Option<String>,
    timeband: Option<(u32, u32)>,
    timezone: Option<chrono_tz::Tz>,
}

#[derive(Debug)]
struct Config {
    host: String,
    port: u16,
    protocol: Protocol,
    accounts: Vec<SiaAccount>,
}

fn parse_config<P>(path: P) -> Result<Config, DaemonError>
where
    P: AsRef<std::path::Path>,
{
    let config_file = std::fs::read_to_string(&path)
        .map_err(|_| DaemonError::MissingConfigFile(format!("{:?}", path.as_ref())))?;
    let parsed: ConfigFile = toml::from_str(&config_file)?;
    let mut accounts = Vec::with_capacity(parsed.accounts.len());
    for account in parsed.accounts {
        let mut built = SiaAccount::new(account.account_id, account.key)?;
        if let Some(timeband) = account.timeband {
            built = built.with_timeband(Some(timeband));
        }
        if let Some(timezone) = account.timezone {
            built = built.with_timezone(timezone);
        }
        accounts.push(built);
    }
    Ok(Config {
        host: parsed.host.unwrap_or_else(|| "0.0.0.0".to_string()),
        port: parsed.port.unwrap_or(7777),
        protocol: parsed.protocol.unwrap_or(Protocol::Tcp),
        accounts,
    })
}

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        println!("Usage: {} /path/to/config/file", args[0]);
        std::process::exit(1);
    }
    let config = parse_config(&args[1])?;
    info!(
        "starting receiver on {}:{} ({} accounts)",
        config.host,
        config.port,
        config.accounts.len()
    );

    let function: AsyncEventHandler = Arc::new(|event| {
        async move {
            info!("{event}");
        }
        .boxed()
    });
    let mut client = SiaClient::new(
        config.host,
        config.port,
        config.accounts,
        function,
        config.protocol,
    );
    client.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    client.stop().await;
    match serde_json::to_string(&client.counts()) {
        Ok(counts) => info!("final counters: {counts}"),
        Err(err) => error!("failed to serialize counters: {err}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
host = "127.0.0.1"
port = 9000
protocol = "udp"

[[accounts]]
account_id = "aaa"
key = "AAAAAAAAAAAAAAAA"
timeband = [80, 40]
timezone = "Europe/Amsterdam"

[[accounts]]
account_id = "006969"
"#
        )
        .unwrap();
        let config = parse_config(file.path()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.protocol, Protocol::Udp);
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].account_id(), "AAA");
        assert_eq!(config.accounts[0].allowed_timeband(), Some((80, 40)));
        assert_eq!(config.accounts[0].timezone(), chrono_tz::Tz::Europe__Amsterdam);
        assert!(!config.accounts[1].encrypted());
    }

    #[test]
    fn test_bad_account_fails_startup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[accounts]]
account_id = "ZZZ"
"#
        )
        .unwrap();
        assert!(matches!(
            parse_config(file.path()),
            Err(DaemonError::AccountError(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            parse_config("/nonexistent/dc09d.toml"),
            Err(DaemonError::MissingConfigFile(_))
        ));
    }
}

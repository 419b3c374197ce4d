use anyhow::{bail, Context};
use clap::Parser;
use climate_api_core::{
    find_config_file, find_data_file, load_config, ConfigSource, DEFAULT_API_PORT,
    DEFAULT_DB_PATH, DEFAULT_MAX_CONNECTIONS, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_WINDOW_DAYS,
    MAX_WINDOW_DAYS,
};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, time::Duration};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default, PartialEq)]
#[command(
    author,
    version,
    about = "Climate API - read-only station precipitation and temperature service"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATE_API_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/climate-api/climate.toml, /etc/climate-api/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATE_API_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "CLIMATE_API_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMATE_API_PORT")]
    pub port: Option<String>,

    /// Public URL used for links on the index page
    #[arg(short, long, env = "CLIMATE_API_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// SQLite file holding the station and measurement tables
    #[arg(long, env = "CLIMATE_API_DB_PATH")]
    pub db_path: Option<String>,

    /// Size of the read-only connection pool
    #[arg(
        long,
        env = "CLIMATE_API_MAX_CONNECTIONS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: Option<u32>,

    /// Seconds a single store query may run before the request fails
    #[arg(
        long,
        env = "CLIMATE_API_QUERY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub query_timeout_secs: Option<u64>,

    /// Length in days of the rolling precipitation/tobs window
    #[arg(
        long,
        env = "CLIMATE_API_WINDOW_DAYS",
        value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS)
    )]
    pub window_days: Option<i64>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    /// Configured dataset path, falling back to the XDG data dir when the file isn't there.
    pub fn db_path(&self) -> String {
        let configured = self
            .db_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        find_data_file(&configured)
            .map(|p| p.display().to_string())
            .unwrap_or(configured)
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs.unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS))
    }

    pub fn window_days(&self) -> i64 {
        self.window_days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }

    /// Flags and env vars win over the config file, field by field.
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            domain: self.domain.or(file_config.domain),
            port: self.port.or(file_config.port),
            remote_url: self.remote_url.or(file_config.remote_url),
            db_path: self.db_path.or(file_config.db_path),
            max_connections: self.max_connections.or(file_config.max_connections),
            query_timeout_secs: self.query_timeout_secs.or(file_config.query_timeout_secs),
            window_days: self.window_days.or(file_config.window_days),
        }
    }

    /// Range checks for values that may have come from the config file, which clap never sees.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(days) = self.window_days {
            if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                bail!("window_days must be between 0 and {}, got {}", MAX_WINDOW_DAYS, days);
            }
        }
        if self.max_connections == Some(0) {
            bail!("max_connections must be at least 1");
        }
        if self.query_timeout_secs == Some(0) {
            bail!("query_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> anyhow::Result<Cli> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATE_API_CONFIG", "climate.toml")
    };

    if let Some(path) = source.path() {
        log::info!("Loading config from: {}", path.display());
    }

    let file_config: Cli = load_config(&source).unwrap_or_else(|e| {
        eprintln!("ignoring unreadable config {}: {}", source, e);
        Cli::default()
    });

    let cli = cli_args.merge(file_config);
    cli.validate()
        .with_context(|| format!("invalid configuration from {}", source))?;
    Ok(cli)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}

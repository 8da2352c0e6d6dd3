mod logging;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, Clock, ContentService, ProgressService, RouteGuard, SessionResolver,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSessionTtl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSessionTtl { raw } => {
                write!(f, "invalid --session-ttl-days value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    launch_callback: Option<String>,
}

impl UiApp for DesktopApp {
    fn session_resolver(&self) -> Arc<SessionResolver> {
        self.services.session_resolver()
    }

    fn route_guard(&self) -> Arc<RouteGuard> {
        self.services.route_guard()
    }

    fn content(&self) -> Arc<ContentService> {
        self.services.content()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn launch_callback(&self) -> Option<String> {
        self.launch_callback.clone()
    }
}

struct Args {
    db_url: String,
    api_url: Option<String>,
    session_ttl_days: Option<i64>,
    callback: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  datapath-hub [--api <base_url>] [--db <sqlite_url>] [--session-ttl-days <n>] [--callback <redirect_url>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", services::config::DEFAULT_API_URL);
    eprintln!("  --db sqlite://datapath.sqlite3");
    eprintln!(
        "  --session-ttl-days {}",
        services::config::DEFAULT_SESSION_TTL_DAYS
    );
    eprintln!();
    eprintln!("--callback takes the sign-in redirect (anything containing #session_id=...).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DATAPATH_API_URL, DATAPATH_DB_URL, DATAPATH_SESSION_TTL_DAYS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("DATAPATH_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://datapath.sqlite3".into(), normalize_sqlite_url);
        let mut api_url = None;
        let mut session_ttl_days = None;
        let mut callback = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api" => api_url = Some(require_value(args, "--api")?),
                "--session-ttl-days" => {
                    let value = require_value(args, "--session-ttl-days")?;
                    let parsed: i64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidSessionTtl { raw: value.clone() })?;
                    session_ttl_days = Some(parsed);
                }
                "--callback" => callback = Some(require_value(args, "--callback")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            api_url,
            session_ttl_days,
            callback,
        })
    }

    /// Environment first, flags on top.
    fn api_config(&self) -> Result<ApiConfig, services::ConfigError> {
        let mut config = ApiConfig::from_env()?;
        if let Some(url) = self.api_url.as_deref() {
            config = config.with_base_url(url)?;
        }
        if let Some(days) = self.session_ttl_days {
            config = config.with_session_ttl_days(days)?;
        }
        Ok(config)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let config = parsed.api_config()?;

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(config, &parsed.db_url, Clock::system()).await?;
    tracing::info!(db = %parsed.db_url, "session cache ready");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        launch_callback: parsed.callback,
    });
    let context = build_app_context(&app);

    // tao can default to always-on-top in some macOS dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("DataPath Hub")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn parses_flags() {
        let args = parse(&[
            "--api",
            "https://hub.example.com",
            "--db",
            "sqlite::memory:",
            "--session-ttl-days",
            "3",
            "--callback",
            "datapath://auth/callback#session_id=abc",
        ])
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.api_url.as_deref(), Some("https://hub.example.com"));
        assert_eq!(args.session_ttl_days, Some(3));
        assert!(args.callback.unwrap().ends_with("session_id=abc"));
    }

    #[test]
    fn rejects_missing_and_unknown_values() {
        assert!(matches!(
            parse(&["--api"]),
            Err(ArgsError::MissingValue { flag: "--api" })
        ));
        assert!(matches!(
            parse(&["--session-ttl-days", "soon"]),
            Err(ArgsError::InvalidSessionTtl { .. })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/hub.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/hub.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}

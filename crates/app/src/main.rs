mod telemetry;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::info;

use api::ApiConfig;
use services::{AppServices, Clock, QuizService, SessionLoopService, StatsService};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    ConflictingBackends,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::ConflictingBackends => {
                write!(f, "--offline cannot be combined with --api-url")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quizdeck [--api-url <url>] [--offline] [--shuffle]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>  REST API base URL (default http://127.0.0.1:8000/api)");
    eprintln!("  --offline        use an in-memory backend with a demo quiz");
    eprintln!("  --shuffle        shuffle flashcards in learn mode");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZDECK_API_URL, QUIZDECK_API_TOKEN, QUIZDECK_API_TIMEOUT_SECS");
    eprintln!("  QUIZDECK_OFFLINE, QUIZDECK_SHUFFLE, QUIZDECK_LOG, QUIZDECK_LOG_FORMAT");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_url: Option<String>,
    offline: bool,
    shuffle: bool,
    help: bool,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl Args {
    fn from_env() -> Self {
        Self {
            offline: env_flag("QUIZDECK_OFFLINE"),
            shuffle: env_flag("QUIZDECK_SHUFFLE"),
            ..Self::default()
        }
    }

    /// Flags override the environment defaults in `self`.
    fn parse(mut self, args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut explicit_url = false;
        let mut explicit_offline = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    self.api_url = Some(require_value(&mut args, "--api-url")?);
                    explicit_url = true;
                }
                "--offline" => {
                    self.offline = true;
                    explicit_offline = true;
                }
                "--shuffle" => self.shuffle = true,
                "--help" | "-h" => self.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        if explicit_url && explicit_offline {
            return Err(ArgsError::ConflictingBackends);
        }
        if explicit_url {
            self.offline = false;
        }
        Ok(self)
    }
}

struct DesktopApp {
    backend_label: String,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn backend_label(&self) -> String {
        self.backend_label.clone()
    }

    fn quizzes(&self) -> Arc<QuizService> {
        self.services.quizzes()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        self.services.session_loop()
    }

    fn stats(&self) -> Arc<StatsService> {
        self.services.stats()
    }
}

/// `--api-url` replaces the URL from the environment but keeps its token and timeout.
fn api_config(api_url: Option<&str>) -> Result<ApiConfig, Box<dyn std::error::Error>> {
    let from_env = ApiConfig::from_env()?;
    let Some(url) = api_url else {
        return Ok(from_env);
    };
    let mut config = ApiConfig::new(url)?.with_timeout(from_env.timeout());
    if let Some(token) = from_env.api_token() {
        config = config.with_token(token);
    }
    Ok(config)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let args = Args::from_env()
        .parse(std::env::args().skip(1))
        .inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let clock = Clock::default_clock();
    let app = if args.offline {
        DesktopApp {
            backend_label: "Offline demo".to_string(),
            services: AppServices::new_offline(clock, args.shuffle).await?,
        }
    } else {
        let config = api_config(args.api_url.as_deref())?;
        DesktopApp {
            backend_label: format!("API: {}", config.base_url()),
            services: AppServices::new_http(config, clock, args.shuffle)?,
        }
    };
    info!(backend = %app.backend_label, shuffle = args.shuffle, "launching desktop window");

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quizdeck")
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

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let args = Args::default()
            .parse(argv(&["--api-url", "http://localhost:9000/api", "--shuffle"]))
            .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000/api"));
        assert!(args.shuffle);
        assert!(!args.offline);
    }

    #[test]
    fn explicit_url_overrides_offline_from_env() {
        let env = Args {
            offline: true,
            ..Args::default()
        };
        let args = env.parse(argv(&["--api-url", "http://localhost/api"])).unwrap();
        assert!(!args.offline);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            Args::default().parse(argv(&["--api-url"])).unwrap_err(),
            ArgsError::MissingValue { flag: "--api-url" }
        );
        assert_eq!(
            Args::default().parse(argv(&["--db"])).unwrap_err(),
            ArgsError::UnknownArg("--db".into())
        );
        assert_eq!(
            Args::default()
                .parse(argv(&["--offline", "--api-url", "http://x/api"]))
                .unwrap_err(),
            ArgsError::ConflictingBackends
        );
    }

    #[test]
    fn api_url_flag_must_be_http() {
        assert!(api_config(Some("ftp://example.com")).is_err());
    }
}

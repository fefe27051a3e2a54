//! CityCare CLI
//!
//! Terminal front end for the CityCare backend:
//! - Log in and list patients
//! - Watch a patient's vitals live
//! - Pick the dashboard theme
//! - Check backend status

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citycare::config::{generate_default_config, Config, LoggingConfig};
use citycare::monitor::{
    MonitorController, MonitorDeps, MonitorSnapshot, MonitorView, SystemClock, TokioTicker,
};
use citycare::{
    ClassList, FileStore, HeaderController, HttpVitalsApi, LogNotifier, Readout, Statistic,
    VitalsApi,
};

#[derive(Parser)]
#[command(name = "citycare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CityCare vitals monitor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in against the backend
    Login {
        /// User id (e.g. USR_PAT_001)
        user: String,
        /// PIN
        pin: String,
    },

    /// List patients
    Patients,

    /// Watch a patient's vitals
    Monitor {
        /// Operator id
        #[arg(short, long)]
        user: Option<String>,
        /// Operator PIN
        #[arg(long)]
        pin: Option<String>,
        /// Patient id (default: resume the saved selection)
        #[arg(short, long)]
        patient: Option<String>,
        /// Statistic (heart_rate, o2, temperature)
        #[arg(short, long)]
        stat: Option<Statistic>,
    },

    /// Show or set the theme
    Theme {
        /// default, ocean or sunrise
        name: Option<String>,
    },

    /// Show backend status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.backend.base_url = url.clone();
    }

    init_logging(&config.logging);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cli.command, config))
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("citycare={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    if let Commands::Config { output } = &command {
        let text = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &text)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", text),
        }
        return Ok(());
    }

    let api = Rc::new(HttpVitalsApi::new(&config.backend)?);
    let store = Rc::new(FileStore::new(&config.storage.path));

    match command {
        Commands::Login { user, pin } => {
            let header = HeaderController::new(
                api.clone(),
                store,
                Rc::new(TerminalClasses::default()),
                Rc::new(LogNotifier),
            );
            let session = header.login(&user, &pin).await?;
            println!("Logged in as {}", session.display_identity());
            if let Some(name) = &session.user.name {
                println!("Name:     {}", name);
            }
            println!("Audience: {}", session.alert_audience());
        }

        Commands::Patients => {
            let patients = api
                .patients()
                .await
                .with_context(|| format!("Cannot list patients from {}", api.base_url()))?;
            if patients.is_empty() {
                println!("{}", citycare::monitor::NO_PATIENTS_LABEL);
            }
            for id in patients {
                println!("{}", id);
            }
        }

        Commands::Monitor {
            user,
            pin,
            patient,
            stat,
        } => {
            let deps = MonitorDeps {
                api: api.clone(),
                store,
                clock: Rc::new(SystemClock),
                ticker: Rc::new(TokioTicker),
                view: Rc::new(TerminalView::default()),
                notifier: Rc::new(LogNotifier),
            };
            let monitor = MonitorController::new(deps, config.monitor.clone());

            if let (Some(user), Some(pin)) = (&user, &pin) {
                if !monitor.login(user, pin).await {
                    anyhow::bail!("Login rejected");
                }
            }

            let started = if patient.is_some() || stat.is_some() {
                monitor.start(patient.as_deref(), stat).await
            } else {
                monitor.restore().await
            };
            if !started {
                anyhow::bail!("Nothing to monitor: pass --patient and --stat");
            }

            println!("Monitoring. Press Ctrl-C to stop.");
            tokio::signal::ctrl_c().await?;
            monitor.stop();
        }

        Commands::Theme { name } => {
            let header = HeaderController::new(
                api,
                store,
                Rc::new(TerminalClasses::default()),
                Rc::new(LogNotifier),
            );
            let theme = match name {
                Some(name) => header.set_theme(&name),
                None => header.restore_theme(),
            };
            println!("Theme: {} ({})", theme.label(), theme.as_str());
        }

        Commands::Status => match api.health().await {
            Ok(health) => {
                println!("CityCare backend at {}", api.base_url());
                println!();
                println!("Status: {}", if health.ok { "ok" } else { "degraded" });
                println!("  Patients:     {}", health.patients);
                println!("  Appointments: {}", health.appointments);
                println!("  Alerts:       {}", health.alerts);
                println!("  Facilities:   {}", health.facilities);
            }
            Err(e) => {
                eprintln!("Cannot connect to CityCare backend at {}", api.base_url());
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Prints a line whenever the readout or chart changes
#[derive(Default)]
struct TerminalView {
    last: RefCell<Option<(Readout, usize)>>,
}

impl MonitorView for TerminalView {
    fn render(&self, snapshot: &MonitorSnapshot) {
        let Some(chart) = &snapshot.chart else {
            return;
        };
        let current = (snapshot.readout.clone(), chart.len());
        if self.last.borrow().as_ref() == Some(&current) {
            return;
        }

        let label = chart.latest().map(|p| p.label.as_str()).unwrap_or("--:--:--");
        let range = chart
            .value_range()
            .map(|(lo, hi)| format!("  [{} .. {}]", lo, hi))
            .unwrap_or_default();
        println!(
            "{} {:<14} {:<24} {:>2}/{}{}",
            label,
            chart.title(),
            snapshot.readout,
            chart.len(),
            chart.capacity(),
            range
        );
        *self.last.borrow_mut() = Some(current);
    }
}

/// The terminal has no body element; theme classes are only tracked for logs
#[derive(Default)]
struct TerminalClasses {
    classes: RefCell<Vec<String>>,
}

impl ClassList for TerminalClasses {
    fn add_class(&self, name: &str) {
        tracing::debug!("theme class {}", name);
        self.classes.borrow_mut().push(name.to_string());
    }

    fn remove_class(&self, name: &str) {
        self.classes.borrow_mut().retain(|c| c != name);
    }
}

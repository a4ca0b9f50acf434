// Entrypoint for the CLI application.
// - Parses arguments, sets up logging and builds `Settings` once.
// - Hands a terminal `Ui` to the selected command and reports its error.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rise_cli::commands::{self, domains, init, login, logout, password, projects, publish, signup};
use rise_cli::config::{Settings, DEFAULT_HOST};
use rise_cli::ui::{TermUi, Ui};

#[derive(Parser)]
#[command(name = "rise", version, about = "Command line interface for rise, the static site hosting platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the rise API
    #[arg(long, global = true, env = "RISE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Directory holding stored credentials [default: ~/.rise]
    #[arg(long, global = true, env = "RISE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Show additional information
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new rise account
    Signup,

    /// Log in to rise
    Login,

    /// Log out of rise
    Logout,

    /// Create a new project in the current directory
    Init,

    /// Publish the current project
    #[command(alias = "deploy")]
    Publish,

    /// List your projects
    Projects {
        #[command(subcommand)]
        command: Option<ProjectsCommand>,
    },

    /// List domains of the current project
    Domains {
        #[command(subcommand)]
        command: Option<DomainsCommand>,
    },

    /// Manage your password
    Password {
        #[command(subcommand)]
        command: PasswordCommand,
    },

    // Dotted spellings accepted by earlier releases.
    #[command(name = "domains.add", hide = true)]
    DomainsAdd { domain: String },

    #[command(name = "domains.rm", hide = true)]
    DomainsRm { domain: String },

    #[command(name = "projects.rm", hide = true)]
    ProjectsRm { name: String },

    #[command(name = "password.change", hide = true)]
    PasswordChange,
}

#[derive(Subcommand)]
enum ProjectsCommand {
    /// Delete a project
    Rm { name: String },
}

#[derive(Subcommand)]
enum DomainsCommand {
    /// Add a custom domain to the current project
    Add { domain: String },

    /// Remove a custom domain from the current project
    Rm { domain: String },

    /// Upload a TLS certificate for a custom domain
    Cert {
        domain: String,
        /// Certificate file (PEM)
        #[arg(long)]
        crt: Option<PathBuf>,
        /// Private key file (PEM)
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Show the TLS certificate installed for a custom domain
    CertInfo { domain: String },
}

#[derive(Subcommand)]
enum PasswordCommand {
    /// Change your password
    Change,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rise=debug,rise_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RISE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(ui: &dyn Ui, settings: &Settings, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Signup => signup::run(ui, settings),
        Command::Login => login::run(ui, settings),
        Command::Logout => logout::run(ui, settings),
        Command::Init => init::run(ui, settings),
        Command::Publish => publish::run(ui, settings),
        Command::Projects { command: None } => projects::list(ui, settings),
        Command::Projects {
            command: Some(ProjectsCommand::Rm { name }),
        } => projects::remove(ui, settings, &name),
        Command::ProjectsRm { name } => projects::remove(ui, settings, &name),
        Command::Domains { command: None } => domains::list(ui, settings),
        Command::Domains { command: Some(cmd) } => match cmd {
            DomainsCommand::Add { domain } => domains::add(ui, settings, &domain),
            DomainsCommand::Rm { domain } => domains::remove(ui, settings, &domain),
            DomainsCommand::Cert { domain, crt, key } => {
                domains::upload_cert(ui, settings, &domain, crt.as_deref(), key.as_deref())
            }
            DomainsCommand::CertInfo { domain } => domains::cert_info(ui, settings, &domain),
        },
        Command::DomainsAdd { domain } => domains::add(ui, settings, &domain),
        Command::DomainsRm { domain } => domains::remove(ui, settings, &domain),
        Command::Password {
            command: PasswordCommand::Change,
        }
        | Command::PasswordChange => password::change(ui, settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings {
        host: cli.host,
        config_dir: cli.config_dir.unwrap_or_else(Settings::default_config_dir),
        project_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let ui = TermUi;
    match run(&ui, &settings, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report(&ui, &err);
            ExitCode::FAILURE
        }
    }
}

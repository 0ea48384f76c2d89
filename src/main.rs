use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mei_mentor_client::config::Config;
use mei_mentor_client::controller::ViewController;
use mei_mentor_client::cpf::CpfInput;
use mei_mentor_client::opportunity::OpportunityService;
use mei_mentor_client::session::{self, Action, Effect, QueryOutcome};
use mei_mentor_client::view;

#[derive(Parser)]
#[command(name = "mei-mentor", version, about = "MEI opportunity analysis client")]
struct Cli {
    /// Backend base URL (overrides MEI_MENTOR_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single CPF and print the dashboard
    Analyze {
        /// CPF, with or without formatting
        cpf: String,
    },
    /// Interactive session (search, activation, hub)
    Interactive,
}

/// Entry point.
///
/// Logs go to stderr so rendered screens on stdout stay clean.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mei_mentor_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_base_url = Config::validate_base_url(&url).context("Invalid --api-url")?;
    }
    tracing::info!("Using backend at {}", config.api_base_url);

    let service = OpportunityService::new(&config).context("Failed to create API client")?;

    match cli.command {
        Command::Analyze { cpf } => analyze(&service, &cpf).await,
        Command::Interactive => interactive(&service).await,
    }
}

async fn analyze(service: &OpportunityService, cpf: &str) -> anyhow::Result<ExitCode> {
    let mut controller = ViewController::new();
    let mut input = CpfInput::new();
    input.set(cpf);

    controller.run(service, cpf).await;
    println!("{}", view::render(&controller, &input));

    Ok(if controller.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn interactive(service: &OpportunityService) -> anyhow::Result<ExitCode> {
    let mut controller = ViewController::new();
    let mut input = CpfInput::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (tx, mut rx) = unbounded_channel::<QueryOutcome>();

    draw(&controller, &input, None)?;

    loop {
        tokio::select! {
            Some((ticket, outcome)) = rx.recv() => {
                if controller.resolve(ticket, outcome) {
                    draw(&controller, &input, None)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let notice = match session::apply(&mut controller, &mut input, Action::parse(&line)) {
                    Effect::Quit => break,
                    Effect::Redraw => None,
                    Effect::Rejected(notice) => Some(notice),
                    Effect::Query(digits) => {
                        let ticket = controller.submit();
                        session::spawn_query(service.clone(), ticket, digits, tx.clone());
                        None
                    }
                };
                draw(&controller, &input, notice.as_deref())?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn draw(controller: &ViewController, input: &CpfInput, notice: Option<&str>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\n{}", view::render(controller, input))?;
    if let Some(notice) = notice {
        writeln!(stdout, "\n! {}", notice)?;
    }
    write!(stdout, "\n> ")?;
    stdout.flush()?;
    Ok(())
}

use clap::Parser;
use ghpush::audit::AuditLogger;
use ghpush::config::{ConfigOverrides, Settings};
use ghpush::error_translation::ErrorTranslator;
use ghpush::git::{InitOutcome, RemoteAction};
use ghpush::ignore::IgnoreOutcome;
use ghpush::workflow::{PushOutcome, RepoAvailability, RunSummary};
use ghpush::{AppError, GitHubClient, Reporter, Stage, Workflow};
use std::path::PathBuf;
use std::process::ExitCode;

/// Initialize a project directory as a git repository and push it to GitHub
#[derive(Parser, Debug)]
#[command(name = "ghpush", version, about)]
struct Cli {
    /// Settings file (default: ./ghpush.toml, then ~/.config/ghpush/config.toml)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short)]
    quiet: bool,

    #[command(flatten)]
    settings: ConfigOverrides,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.quiet);

    if let Err(e) = ctrlc::set_handler(move || {
        reporter.warning("Operation cancelled by user");
        std::process::exit(0);
    }) {
        reporter.warning(format!("Could not install Ctrl-C handler: {e}"));
    }

    reporter.banner("GitHub Push");

    let mut reached = None;
    match run(&cli, &reporter, &mut reached).await {
        Ok(summary) => {
            report_summary(&reporter, &summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&reporter, &e, reached);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, reporter: &Reporter, reached: &mut Option<Stage>) -> Result<RunSummary, AppError> {
    let settings = Settings::load(&cli.settings, cli.config.as_deref())?;
    *reached = Some(Stage::Validated);
    reporter.success(format!(
        "Configuration loaded for {} ({})",
        settings.full_name(),
        settings.project_dir.display()
    ));

    let audit = match &settings.audit_log {
        Some(path) => match AuditLogger::with_path(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                reporter.warning(format!("Audit log disabled: {e}"));
                None
            }
        },
        None => None,
    };

    let client = GitHubClient::new(&settings.api_url, &settings.token)?.with_audit(audit.clone());
    let mut workflow = Workflow::new(&settings, &client, reporter, audit);

    let result = workflow.run().await;
    *reached = Some(workflow.stage());
    result
}

fn report_summary(reporter: &Reporter, summary: &RunSummary) {
    if summary.connection.repository == RepoAvailability::Created {
        reporter.info("Repository was created on GitHub by this run");
    }
    if summary.init == InitOutcome::Created {
        reporter.info("Local repository was initialized by this run");
    }
    if summary.remote == RemoteAction::Updated {
        reporter.info("The previous origin URL was replaced");
    }
    if summary.ignore == IgnoreOutcome::Disabled {
        reporter.info(".gitignore writing disabled");
    }

    match &summary.push {
        PushOutcome::UpToDate => reporter.success("Nothing to push"),
        PushOutcome::Pushed { commit, files, .. } => {
            reporter.success(format!("Pushed {commit} ({files} changed paths)"))
        }
    }
}

fn report_error(reporter: &Reporter, error: &AppError, reached: Option<Stage>) {
    let friendly = ErrorTranslator::translate_app_error(error);

    reporter.error(&friendly.simple_message);
    if friendly.raw_error != friendly.simple_message {
        reporter.detail(&friendly.raw_error);
    }
    if let Some(suggestion) = &friendly.suggestion {
        reporter.info(format!("Suggestion: {suggestion}"));
    }
    if let Some(stage) = reached {
        reporter.info(format!("Last completed step: {stage}"));
    }
}

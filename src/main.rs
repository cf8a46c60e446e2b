//! SkillBridge CLI - terminal client for the SkillBridge platform

use clap::{CommandFactory, Parser};

use skillbridge::cli::{self, Cli, Commands, GlobalOptions};
use skillbridge::client::models::SignupRequest;
use skillbridge::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warn by default, debug with `--debug`; `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Signup {
            name,
            email,
            role,
            password,
            company_name,
            university,
        } => {
            let request = SignupRequest {
                name,
                email,
                password: String::new(),
                role,
                company_name,
                university,
            };
            cli::auth::signup(&opts, request, password).await
        }
        Commands::GoogleLogin { token, role } => cli::auth::google_login(&opts, &token, role).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Open { path } => cli::navigate::open(&opts, &path).await,
        Commands::Apply { project_id } => cli::project::apply(&opts, project_id).await,
        Commands::Withdraw { project_id } => cli::project::withdraw(&opts, project_id).await,
        Commands::Project(cmd) => cli::project::run(&opts, cmd).await,
        Commands::Submission(cmd) => cli::project::submission(&opts, cmd).await,
        Commands::Chat(cmd) => cli::chat::run(&opts, cmd).await,
        Commands::Guide(cmd) => cli::chat::guide(&opts, cmd).await,
        Commands::Job(cmd) => cli::job::run(&opts, cmd).await,
        Commands::Profile(cmd) => cli::profile::run(&opts, cmd).await,
        Commands::Resume(cmd) => cli::profile::resume(&opts, cmd).await,
        Commands::Notifications(cmd) => cli::local::notifications(&opts, cmd),
        Commands::Theme(cmd) => cli::local::theme(&opts, cmd),
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "skillbridge",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Commands::Version => {
            println!("skillbridge version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

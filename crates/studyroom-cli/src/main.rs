use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyroom-cli", version, about = "Studyroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Study session log
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Study streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Statistics and exports
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Profile and study preferences
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Subject { action } => commands::subject::run(action).await,
        Commands::Session { action } => commands::session::run(action).await,
        Commands::Streak { action } => commands::streak::run(action).await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Profile { action } => commands::profile::run(action).await,
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "studyroom-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

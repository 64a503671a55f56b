use anyhow::Result;
use changeset::areas::config::{ClientConfig, DEFAULT_GIT_BINARY, DEFAULT_REMOTE};
use changeset::areas::git::GitClient;
use changeset::areas::repository::Repository;
use changeset::areas::watcher::DEFAULT_DEBOUNCE;
use changeset::artifacts::core::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "changeset",
    version,
    author = "Sami Barbut-Dica",
    about = "Show what changed against the remote, as a tree",
    long_about = "Reconciles unpushed commits, staged and unstaged edits and untracked files \
    into one list of changed files relative to a remote comparison target, \
    and renders it as a directory tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short = 'C', global = true, default_value = ".", help = "Run as if started in <DIR>")]
    dir: PathBuf,
    #[arg(long, global = true, env = "CHANGESET_GIT", default_value = DEFAULT_GIT_BINARY, help = "The git executable")]
    git: PathBuf,
    #[arg(long, global = true, env = "CHANGESET_REMOTE", default_value = DEFAULT_REMOTE, help = "The remote to compare against")]
    remote: String,
    #[arg(long, global = true, env = "CHANGESET_TARGET", help = "Comparison target (default: <remote>/<default branch>)")]
    target: Option<String>,
    #[arg(long, global = true, env = "CHANGESET_TIMEOUT", help = "Seconds before a git invocation is abandoned")]
    timeout: Option<u64>,
    #[arg(long, global = true, help = "Do not fetch the default branch before comparing")]
    offline: bool,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "More diagnostics on stderr (-v, -vv)")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "status",
        about = "List changed files",
        long_about = "Lists every file that differs from the comparison target with its status \
        and where the change lives: untracked, unstaged, staged or unpushed."
    )]
    Status {
        #[arg(long, help = "Report every worktree of the repository")]
        all_worktrees: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(name = "tree", about = "Show changed files as a directory tree")]
    Tree {
        #[arg(long, help = "Report every worktree of the repository")]
        all_worktrees: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(
        name = "compare",
        about = "Show files that differ between two refs",
        long_about = "Shows the files that differ between <FROM> and <TO> as a tree. \
        Without <TO>, <FROM> is compared with the working tree."
    )]
    Compare {
        #[arg(index = 1)]
        from: String,
        #[arg(index = 2)]
        to: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(name = "diff", about = "Show the patch of one changed file")]
    Diff {
        #[arg(index = 1, help = "Repository-relative path of the file")]
        path: String,
    },
    #[command(name = "watch", about = "Re-render the tree whenever the repository changes")]
    Watch {
        #[arg(long, help = "Quiet period before refreshing, in milliseconds")]
        debounce_ms: Option<u64>,
    },
    #[command(name = "worktrees", about = "List worktrees")]
    Worktrees {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(name = "branches", about = "List local and remote-tracking branches")]
    Branches {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(name = "tags", about = "List tags")]
    Tags {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    #[command(name = "default-branch", about = "Print the remote's default branch")]
    DefaultBranch,
    #[command(name = "show", about = "Print a file as it exists at a revision")]
    Show {
        #[arg(index = 1)]
        revision: String,
        #[arg(index = 2)]
        path: String,
    },
}

fn setup_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "changeset=warn",
        1 => "changeset=debug",
        _ => "changeset=trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = ClientConfig::new(cli.git, cli.remote, cli.timeout.map(Duration::from_secs));
    let repository = Repository::open(
        &cli.dir,
        GitClient::new(config),
        cli.offline,
        Box::new(std::io::stdout()),
    )
    .await?;
    let target = cli.target.as_deref();

    match &cli.command {
        Commands::Status {
            all_worktrees,
            format,
        } => repository.status(target, *all_worktrees, *format).await?,
        Commands::Tree {
            all_worktrees,
            format,
        } => repository.tree(target, *all_worktrees, *format).await?,
        Commands::Compare { from, to, format } => {
            repository.compare(from, to.as_deref(), *format).await?
        }
        Commands::Diff { path } => repository.diff(path, target).await?,
        Commands::Watch { debounce_ms } => {
            let debounce = debounce_ms.map(Duration::from_millis).unwrap_or(DEFAULT_DEBOUNCE);
            repository.watch(target, debounce).await?
        }
        Commands::Worktrees { format } => repository.worktrees(*format).await?,
        Commands::Branches { format } => repository.branches(*format).await?,
        Commands::Tags { format } => repository.tags(*format).await?,
        Commands::DefaultBranch => repository.default_branch().await?,
        Commands::Show { revision, path } => repository.show(revision, path).await?,
    }

    Ok(())
}

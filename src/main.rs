use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twig::areas::repository::Repository;
use twig::commands::porcelain::log::LogOptions;

const LOG_FILTER_VAR: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "The twig developers",
    about = "A minimal version-control engine",
    long_about = "twig records which file contents were staged at each commit, \
    keeps branches as named pointers into a content-addressed commit store, \
    and walks the commit graph to show history, compare branches and merge them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command records the content hash of each file in the index. \
        Directories are expanded recursively; '.' stages the whole work tree."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history of the current branch"
    )]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "Create a branch, or list branches when no name is given"
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "switch", about = "Switch HEAD to another branch")]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge another branch into the current branch",
        long_about = "This command fast-forwards the current branch when possible, \
        otherwise creates a merge commit with the union of both sides' changes. \
        It refuses to merge when a file was changed differently on both sides."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
        #[arg(short, long, help = "The merge commit message")]
        message: Option<String>,
    },
    #[command(
        name = "diff",
        about = "Compare the commit histories of two branches"
    )]
    Diff {
        #[arg(index = 1)]
        first: String,
        #[arg(index = 2)]
        second: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of a commit object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(index = 1, help = "The object SHA to print")]
        sha: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Ok(Repository::open(pwd, Box::new(std::io::stdout()))?)
}

fn init_tracing() {
    let filter = std::env::var(LOG_FILTER_VAR)
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?,
            };
            let mut repository = Repository::new(path, Box::new(std::io::stdout()))?;

            repository.init().await?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository()?;

            for path in paths {
                repository.stage(path).await?;
            }
        }
        Commands::Commit { message } => {
            let mut repository = open_repository()?;

            repository.commit(message.trim()).await?;
        }
        Commands::Log { oneline } => {
            let repository = open_repository()?;

            repository.log(&LogOptions { oneline: *oneline })?
        }
        Commands::Branch { name } => {
            let mut repository = open_repository()?;

            match name {
                Some(name) => {
                    repository.create_branch(name)?;
                }
                None => {
                    repository.list_branches()?;
                }
            }
        }
        Commands::Switch { name } => {
            let mut repository = open_repository()?;

            repository.switch_branch(name)?;
        }
        Commands::Merge { branch, message } => {
            let mut repository = open_repository()?;

            repository.merge(branch, message.as_deref().map(str::trim)).await?;
        }
        Commands::Diff { first, second } => {
            let repository = open_repository()?;

            repository.diff(first, second)?;
        }
        Commands::CatFile { sha } => {
            let repository = open_repository()?;

            repository.cat_file(sha)?
        }
    }

    Ok(())
}

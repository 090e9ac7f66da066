use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::domain::TermId;
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/terms.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a term row. New rows are active unless --inactive is given.
    AddTerm {
        content: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        order: i64,
        #[arg(long)]
        inactive: bool,
    },
    Activate {
        term_id: i64,
    },
    Deactivate {
        term_id: i64,
    },
    /// List rows; only active ones unless --all is given.
    List {
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::AddTerm {
            content,
            order,
            inactive,
        } => {
            let term_id = storage.insert_term(&content, order, !inactive).await?;
            println!("created term_id={}", term_id.0);
        }
        Command::Activate { term_id } => set_active(&storage, term_id, true).await?,
        Command::Deactivate { term_id } => set_active(&storage, term_id, false).await?,
        Command::List { all } => {
            let terms = if all {
                storage.list_all_terms().await?
            } else {
                storage.list_active_terms().await?
            };
            for term in terms {
                let marker = if term.is_active { ' ' } else { '-' };
                println!("{marker} id={} order={} {}", term.id.0, term.order, term.content);
            }
        }
    }

    Ok(())
}

async fn set_active(storage: &Storage, term_id: i64, is_active: bool) -> Result<()> {
    if !storage.set_term_active(TermId(term_id), is_active).await? {
        bail!("no term with id {term_id}");
    }
    println!("term_id={term_id} is_active={is_active}");
    Ok(())
}

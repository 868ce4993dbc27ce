use std::sync::Arc;

use ledger::{
    HttpStore, LedgerStore, MemoryStore, SessionHandle, Transaction, TransactionDraft,
    TransactionKind, TxDate,
};

use crate::config::{AddArgs, Command, UpdateArgs};

mod config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "libretto={level},ledger={level},devstore={level}",
            level = settings.level
        ))
        .init();

    if let Command::Serve { listen } = &command {
        let addr = listen.clone().unwrap_or(settings.listen);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        devstore::run_with_listener(Arc::new(MemoryStore::new()), listener).await?;
        return Ok(());
    }

    if settings.owner.is_empty() {
        return Err("owner is required (set --owner or LIBRETTO_OWNER)".into());
    }

    let session = Arc::new(SessionHandle::new());
    session.sign_in(settings.owner.clone());
    let ledger = LedgerStore::builder(
        Arc::new(HttpStore::new(&settings.base_url)?),
        session,
    )
    .build();

    match command {
        Command::List => {
            ledger.load().await?;
            let state = ledger.state();
            if state.transactions.is_empty() {
                println!("no transactions");
            }
            for tx in &state.transactions {
                println!(
                    "{}  {}  {}  {}  {} [{}]",
                    tx.id,
                    tx.date,
                    tx.kind.as_str(),
                    tx.amount,
                    tx.title,
                    tx.category
                );
            }
        }
        Command::Summary => {
            ledger.load().await?;
            let summary = ledger.state().summary;
            println!("income:  {}", summary.income_total);
            println!("expense: {}", summary.expense_total);
            println!("balance: {}", format_minor(summary.balance_minor));
        }
        Command::Add(args) => {
            ledger.add(draft_from(args)?).await?;
            let state = ledger.state();
            println!(
                "added; {} transaction(s), balance {}",
                state.transactions.len(),
                format_minor(state.summary.balance_minor)
            );
        }
        Command::Update(args) => {
            let record = record_from(args, &settings.owner)?;
            ledger.update(record).await?;
            println!("updated");
        }
        Command::Delete { id } => {
            ledger.delete(&id).await?;
            println!("deleted");
        }
        Command::Serve { .. } => unreachable!("serve is handled before the ledger is built"),
    }

    Ok(())
}

fn draft_from(args: AddArgs) -> Result<TransactionDraft, BoxError> {
    let date = match args.date {
        Some(raw) => raw.parse()?,
        None => TxDate::today(),
    };
    Ok(TransactionDraft {
        title: args.title,
        category: args.category,
        amount: args.amount.parse()?,
        kind: TransactionKind::try_from(args.kind.as_str())?,
        date,
    })
}

fn record_from(args: UpdateArgs, owner: &str) -> Result<Transaction, BoxError> {
    Ok(Transaction {
        id: args.id,
        title: args.title,
        category: args.category,
        amount: args.amount.parse()?,
        kind: TransactionKind::try_from(args.kind.as_str())?,
        date: args.date.parse()?,
        owner_id: owner.to_string(),
    })
}

fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

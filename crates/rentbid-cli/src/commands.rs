use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use rentbid_auction::{Auction, AuctionEngine};
use rentbid_registry::ParticipantRegistry;
use rentbid_reputation::{OwnerFactors, ReputationEngine};
use rentbid_store::{
    split_composite_key, InMemoryLedgerStore, Invocation, InvocationId, LedgerStore,
};
use rentbid_types::{AuctionKey, LedgerTimestamp, ParticipantId};
use serde::Serialize;
use serde_json::json;

use crate::cli::*;
use crate::config::CliConfig;
use crate::state::{open_ledger, save_ledger};

type Store = InMemoryLedgerStore;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(&cli.config)?;
    let state_file = cli.state.clone().unwrap_or_else(|| config.state_file.clone());
    let store = Arc::new(open_ledger(&state_file)?);
    let ctx = Session {
        store: Arc::clone(&store),
        config,
        format: cli.format,
    };

    let mutates = cli.command.mutates();
    match cli.command {
        Command::RegisterOwner(args) => cmd_register_owner(&ctx, args),
        Command::RegisterRenter(args) => cmd_register_renter(&ctx, args),
        Command::CreateAuction(args) => cmd_create_auction(&ctx, args),
        Command::JoinAuction(args) => cmd_join_auction(&ctx, args),
        Command::QueryAuction(args) => cmd_query_auction(&ctx, args),
        Command::EndAuction(args) => cmd_end_auction(&ctx, args),
        Command::CheckBalance(args) => cmd_check_balance(&ctx, args),
        Command::RateOwner(args) => cmd_rate_owner(&ctx, args),
        Command::RateRenter(args) => cmd_rate_renter(&ctx, args),
        Command::Show(args) => cmd_show(&ctx, args),
    }?;

    if mutates {
        save_ledger(&store, &state_file)?;
    }
    Ok(())
}

struct Session {
    store: Arc<Store>,
    config: CliConfig,
    format: OutputFormat,
}

impl Session {
    fn registry(&self) -> ParticipantRegistry<Store> {
        ParticipantRegistry::new(Arc::clone(&self.store))
    }

    fn auctions(&self) -> AuctionEngine<Store> {
        AuctionEngine::with_config(Arc::clone(&self.store), self.config.auction.clone())
    }

    fn reputation(&self) -> ReputationEngine<Store> {
        ReputationEngine::new(Arc::clone(&self.store))
    }

    /// Print `value` as JSON, or run `text` for human output.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => text(),
        }
        Ok(())
    }
}

fn cmd_register_owner(ctx: &Session, args: RegisterOwnerArgs) -> anyhow::Result<()> {
    let id = ParticipantId::new(args.id)?;
    let owner = ctx.registry().register_owner(&id, &args.bot_types, args.costs)?;
    ctx.emit(&owner, || {
        println!("{} Registered owner {}", "✓".green().bold(), id.as_str().bold());
        println!("  Bot types: {}", owner.bot_types);
        println!("  Costs: {}", owner.costs);
    })
}

fn cmd_register_renter(ctx: &Session, args: RegisterRenterArgs) -> anyhow::Result<()> {
    let id = ParticipantId::new(args.id)?;
    let renter = ctx
        .registry()
        .register_renter(&id, &args.business_type, args.balance)?;
    ctx.emit(&renter, || {
        println!("{} Registered renter {}", "✓".green().bold(), id.as_str().bold());
        println!("  Business type: {}", renter.business_type);
        println!("  Balance: {}", renter.renter_balance);
    })
}

fn cmd_create_auction(ctx: &Session, args: CreateAuctionArgs) -> anyhow::Result<()> {
    let key = AuctionKey::new(args.key)?;
    let owner = ParticipantId::new(args.owner)?;
    let expires: LedgerTimestamp = args.expires.parse()?;
    let engine = ctx.auctions();
    engine.create_auction(&key, &owner, &args.bot_type, args.start_price, expires)?;
    let auction = engine.query_auction(&key)?;
    ctx.emit(&auction, || {
        println!("{} Created auction {}", "✓".green().bold(), key.as_str().bold());
        print_auction(&auction);
    })
}

fn cmd_join_auction(ctx: &Session, args: JoinAuctionArgs) -> anyhow::Result<()> {
    let key = AuctionKey::new(args.key)?;
    let renter = ParticipantId::new(args.renter)?;
    let invocation = match (args.invocation, args.at) {
        (None, None) => Invocation::begin(),
        (id, at) => Invocation::new(
            id.map(InvocationId::from_raw)
                .unwrap_or_else(InvocationId::generate),
            match at {
                Some(at) => at.parse()?,
                None => LedgerTimestamp::now(),
            },
        ),
    };
    let accepted = ctx
        .auctions()
        .join_auction(&invocation, &key, args.price, &args.wallet, &renter)?;
    ctx.emit(&accepted, || {
        println!(
            "{} Bid accepted on {}: offered {}",
            "✓".green().bold(),
            key.as_str().bold(),
            accepted.offered
        );
        println!("  Clearing price: {}", accepted.clearing_price.to_string().yellow());
        println!("  Highest bid: {}", accepted.highest_bid);
        println!("  Bid key: {}", display_key(&accepted.bid_key).dimmed());
    })
}

fn cmd_query_auction(ctx: &Session, args: AuctionArgs) -> anyhow::Result<()> {
    let key = AuctionKey::new(args.key)?;
    let auction = ctx.auctions().query_auction(&key)?;
    ctx.emit(&auction, || {
        println!("Auction {}", key.as_str().bold());
        print_auction(&auction);
    })
}

fn cmd_end_auction(ctx: &Session, args: AuctionArgs) -> anyhow::Result<()> {
    let key = AuctionKey::new(args.key)?;
    let settlement = ctx.auctions().end_auction(&key)?;
    ctx.emit(&settlement, || {
        println!("{} Auction {} closed", "✓".green().bold(), key.as_str().bold());
        match &settlement.winner {
            Some(winner) => println!("  Winner: {}", winner.as_str().green()),
            None => println!("  Winner: {}", "none (no sale)".dimmed()),
        }
        println!("  Final price: {}", settlement.final_price.to_string().yellow());
    })
}

fn cmd_check_balance(ctx: &Session, args: CheckBalanceArgs) -> anyhow::Result<()> {
    let renter = ParticipantId::new(args.renter)?;
    let insufficient = ctx.auctions().check_balance(args.price, &renter)?;
    let report = json!({
        "renter": renter,
        "price": args.price,
        "insufficient": insufficient,
    });
    ctx.emit(&report, || {
        if insufficient {
            let mark = "✗".red().bold();
            println!("{mark} {} cannot pay {}", renter.as_str().bold(), args.price);
        } else {
            let mark = "✓".green().bold();
            println!("{mark} {} can pay {}", renter.as_str().bold(), args.price);
        }
    })
}

fn cmd_rate_owner(ctx: &Session, args: RateOwnerArgs) -> anyhow::Result<()> {
    let id = ParticipantId::new(args.id)?;
    let score = ctx
        .reputation()
        .rate_owner(&id, OwnerFactors::new(args.u, args.i, args.t))?;
    print_score(ctx, &id, score)
}

fn cmd_rate_renter(ctx: &Session, args: RateRenterArgs) -> anyhow::Result<()> {
    let id = ParticipantId::new(args.id)?;
    let score = ctx.reputation().rate_renter(&id, args.e)?;
    print_score(ctx, &id, score)
}

fn cmd_show(ctx: &Session, args: ShowArgs) -> anyhow::Result<()> {
    let id = ParticipantId::new(args.id)?;
    let stored = ctx
        .store
        .get(id.as_str())?
        .with_context(|| format!("participant not found: {id}"))?;
    let record: serde_json::Value = serde_json::from_slice(&stored.value)
        .with_context(|| format!("decoding record {id}"))?;
    ctx.emit(&record, || {
        println!("Participant {} (version {})", id.as_str().bold(), stored.version);
        if let Some(fields) = record.as_object() {
            for (name, value) in fields {
                println!("  {}: {}", name.cyan(), value);
            }
        }
    })
}

fn print_score(ctx: &Session, id: &ParticipantId, score: f64) -> anyhow::Result<()> {
    ctx.emit(&json!({ "id": id, "score": score }), || {
        let mark = "✓".green().bold();
        println!("{mark} Rated {}: {}", id.as_str().bold(), score.to_string().yellow());
    })
}

fn print_auction(auction: &Auction) {
    let status = if auction.is_open() {
        "open".green()
    } else {
        "closed".red()
    };
    println!("  Status: {status}");
    println!("  Owner: {}  Bot type: {}", auction.owner_id, auction.bot_type);
    println!(
        "  Start: {}  Step: {}  Highest: {}  Clearing: {}",
        auction.start_price,
        auction.step,
        auction.highest_bid,
        auction.final_bid.to_string().yellow()
    );
    println!("  Expires: {}", display_expiry(&auction.expiration_time));
    if let Some(winner) = &auction.winner {
        println!("  Winner: {}", winner.as_str().green());
    }
    if auction.bids.is_empty() {
        println!("  No bids.");
    }
    for (key, bid) in auction.bids.iter() {
        println!(
            "  {} {} bid {} from {}",
            "•".dimmed(),
            bid.bidder.as_str().bold(),
            bid.price,
            display_key(key).dimmed()
        );
    }
}

/// Calendar form of a deadline, or the raw digits if they name no real date.
fn display_expiry(expiry: &LedgerTimestamp) -> String {
    match expiry.to_datetime() {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => expiry.to_string(),
    }
}

/// Human-readable form of a composite key: `type(attr, attr)`.
fn display_key(key: &str) -> String {
    match split_composite_key(key) {
        Some((object_type, attributes)) => format!("{object_type}({})", attributes.join(", ")),
        None => key.to_string(),
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rentbid",
    about = "rentbid: bot rental auctions and reputation on a versioned ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (TOML). A missing file means defaults.
    #[arg(long, global = true, default_value = "rentbid.toml")]
    pub config: PathBuf,

    /// Ledger snapshot file. Overrides `state_file` from the configuration.
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a bot owner
    RegisterOwner(RegisterOwnerArgs),
    /// Register a renter with an opening balance
    RegisterRenter(RegisterRenterArgs),
    /// Open an auction for a bot
    CreateAuction(CreateAuctionArgs),
    /// Place a bid on an open auction
    JoinAuction(JoinAuctionArgs),
    /// Show an auction and its bids
    QueryAuction(AuctionArgs),
    /// Close an auction and pick the winner
    EndAuction(AuctionArgs),
    /// Check whether a renter can pay a price
    CheckBalance(CheckBalanceArgs),
    /// Rate an owner on factors U, I and T
    RateOwner(RateOwnerArgs),
    /// Rate a renter on factor E
    RateRenter(RateRenterArgs),
    /// Show a participant record
    Show(ShowArgs),
}

impl Command {
    /// Whether the command can change the ledger.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Command::QueryAuction(_) | Command::CheckBalance(_) | Command::Show(_)
        )
    }
}

#[derive(Args)]
pub struct RegisterOwnerArgs {
    pub id: String,
    #[arg(long, default_value = "")]
    pub bot_types: String,
    #[arg(long, default_value = "0")]
    pub costs: u64,
}

#[derive(Args)]
pub struct RegisterRenterArgs {
    pub id: String,
    #[arg(long, default_value = "")]
    pub business_type: String,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub balance: i64,
}

#[derive(Args)]
pub struct CreateAuctionArgs {
    pub key: String,
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub bot_type: String,
    #[arg(long)]
    pub start_price: u64,
    /// Deadline as YYYYMMDDHHMMSS (UTC)
    #[arg(long)]
    pub expires: String,
}

#[derive(Args)]
pub struct JoinAuctionArgs {
    pub key: String,
    #[arg(long)]
    pub renter: String,
    #[arg(long)]
    pub price: u64,
    #[arg(long, default_value = "")]
    pub wallet: String,
    /// Invocation time as YYYYMMDDHHMMSS; defaults to now
    #[arg(long)]
    pub at: Option<String>,
    /// Invocation id; defaults to a fresh UUID v7
    #[arg(long)]
    pub invocation: Option<String>,
}

#[derive(Args)]
pub struct AuctionArgs {
    pub key: String,
}

#[derive(Args)]
pub struct CheckBalanceArgs {
    pub renter: String,
    #[arg(long)]
    pub price: u64,
}

#[derive(Args)]
pub struct RateOwnerArgs {
    pub id: String,
    #[arg(short, long, allow_negative_numbers = true)]
    pub u: f64,
    #[arg(short, long, allow_negative_numbers = true)]
    pub i: f64,
    #[arg(short, long, allow_negative_numbers = true)]
    pub t: f64,
}

#[derive(Args)]
pub struct RateRenterArgs {
    pub id: String,
    #[arg(short, long, allow_negative_numbers = true)]
    pub e: f64,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}

//! Urithi CLI - Inspect and edit a file-backed cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! urithi cart show
//!
//! # Add two bracelets in red
//! urithi cart add --product 2 --name "Kikuyu Beaded Bracelet" --price 3500 --quantity 2 --variant red
//!
//! # Change a line's quantity (0 or less removes it)
//! urithi cart update cart_3f2a... 3
//!
//! # Remove a line, or empty the cart
//! urithi cart remove cart_3f2a...
//! urithi cart clear
//!
//! # Print the profile's session id
//! urithi session
//! ```
//!
//! Storage location, keys, shipping rules and currency come from
//! `URITHI_*` environment variables (see `urithi_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use urithi_cart::CartConfig;

mod commands;

#[derive(Parser)]
#[command(name = "urithi")]
#[command(author, version, about = "Urithi cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the session id, creating one if needed
    Session,
}

#[derive(Subcommand)]
enum CartAction {
    /// List lines and totals
    Show,
    /// Add an item (merges with an existing line of the same product and variant)
    Add(AddArgs),
    /// Set a line's quantity; values below 1 remove the line
    Update {
        /// Line id as printed by `cart show`
        line_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Line id as printed by `cart show`
        line_id: String,
    },
    /// Remove every line
    Clear,
}

/// Arguments for `cart add`.
#[derive(Args)]
pub struct AddArgs {
    /// Product id
    #[arg(short, long)]
    pub product: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Unit price
    #[arg(long)]
    pub price: Decimal,

    /// Quantity to add
    #[arg(short, long, default_value_t = 1)]
    pub quantity: i64,

    /// Variant (size, colour, ...)
    #[arg(short, long)]
    pub variant: Option<String>,

    /// Artisan id
    #[arg(long)]
    pub artisan_id: Option<String>,

    /// Artisan display name
    #[arg(long, default_value = "")]
    pub artisan_name: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,
}

fn main() {
    // Initialize tracing; defaults to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "urithi_cli=info,urithi_cart=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config)?,
            CartAction::Add(args) => commands::cart::add(&config, args)?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&config, &line_id, quantity)?;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&config, &line_id)?,
            CartAction::Clear => commands::cart::clear(&config)?,
        },
        Commands::Session => commands::session::show(&config)?,
    }
    Ok(())
}

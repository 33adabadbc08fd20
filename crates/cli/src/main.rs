//! Threadline CLI - Storefront and back office from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse and buy
//! tl shop browse --search "chore coat" --sort price-asc
//! tl cart add chore-coat --size m --color navy
//! tl checkout place --delivery standard --payment online
//! tl checkout pay --reference TXN-4411
//!
//! # Back office
//! tl admin list products
//! tl admin order status o1 shipped
//! ```
//!
//! # Environment Variables
//!
//! - `THREADLINE_API_URL` - Base URL of the REST backend
//! - `THREADLINE_STATE_DIR` - Where the session is kept (default `.threadline`)
//! - `THREADLINE_PASSWORD` - Password for `login`/`register` instead of a prompt
//! - `RUST_LOG` - Log filter, `warn` by default; logs go to stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use threadline_core::models::{ProductQuery, ProductSort};
use threadline_core::{AttributeId, BrandId, CategoryId, PaymentMethod};
use tracing_subscriber::EnvFilter;

use crate::commands::admin::AdminCommand;
use crate::commands::cart::VariantChoice;
use crate::commands::checkout::AddressArgs;
use crate::context::Context;
use crate::error::CliError;

mod commands;
mod context;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "tl")]
#[command(author, version, about = "Threadline storefront and back office")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(long, env = "THREADLINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "THREADLINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Browse the catalog
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place and pay for orders
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Your orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Back-office management
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// Featured products and categories
    Home,
    /// Search and filter products
    Browse(BrowseArgs),
    /// Show one product
    Product {
        slug: String,
        /// Size attribute id
        #[arg(long)]
        size: Option<String>,
        /// Color attribute id
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Args)]
struct BrowseArgs {
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    min_price: Option<Decimal>,
    #[arg(long)]
    max_price: Option<Decimal>,
    /// `newest`, `price-asc`, `price-desc` or `name`
    #[arg(long)]
    sort: Option<ProductSort>,
    /// Only featured products
    #[arg(long)]
    featured: bool,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

impl From<BrowseArgs> for ProductQuery {
    fn from(args: BrowseArgs) -> Self {
        Self {
            search: args.search,
            category: args.category.map(CategoryId::new),
            brand: args.brand.map(BrandId::new),
            gender: args.gender.map(AttributeId::new),
            min_price: args.min_price,
            max_price: args.max_price,
            featured: args.featured.then_some(true),
            sort: args.sort,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        slug: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Variant id, instead of size and color
        #[arg(long, conflicts_with_all = ["size", "color"])]
        variant: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Change a line's quantity; 0 removes it
    Set {
        /// Line number or item id
        line: String,
        qty: u32,
    },
    /// Remove a line
    Remove {
        /// Line number or item id
        line: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Delivery options on offer
    Delivery,
    /// Place an order for the cart
    Place {
        #[command(flatten)]
        address: AddressFlags,
        /// Delivery option id
        #[arg(long)]
        delivery: String,
        /// `cod` or `online`
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
    },
    /// Show the order waiting for payment
    Status,
    /// Confirm payment for the pending order
    Pay {
        #[arg(long)]
        reference: String,
        #[arg(long)]
        provider: Option<String>,
    },
}

/// Shipping address; omitted fields come from the default saved address.
#[derive(Args)]
struct AddressFlags {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    line1: Option<String>,
    #[arg(long)]
    line2: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    country: Option<String>,
}

impl From<AddressFlags> for AddressArgs {
    fn from(flags: AddressFlags) -> Self {
        Self {
            full_name: flags.full_name,
            phone: flags.phone,
            line1: flags.line1,
            line2: flags.line2,
            city: flags.city,
            state: flags.state,
            postal_code: flags.postal_code,
            country: flags.country,
        }
    }
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Your past orders
    List,
    /// Show one order
    Show { id: String },
    /// Cancel an order
    Cancel {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env().await?;
    match cli.command {
        Commands::Login { email, password } => commands::session::login(&ctx, email, password).await?,
        Commands::Register {
            name,
            email,
            phone,
            password,
        } => commands::session::register(&ctx, name, email, phone, password).await?,
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx).await?,
        Commands::Shop { action } => match action {
            ShopAction::Home => commands::shop::home(&ctx).await?,
            ShopAction::Browse(args) => commands::shop::browse(&ctx, &args.into()).await?,
            ShopAction::Product { slug, size, color } => {
                commands::shop::product(&ctx, &slug, size, color).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx).await?,
            CartAction::Add {
                slug,
                size,
                color,
                variant,
                qty,
            } => {
                let choice = VariantChoice {
                    variant,
                    size,
                    color,
                };
                commands::cart::add(&ctx, &slug, choice, qty).await?;
            }
            CartAction::Set { line, qty } => commands::cart::set(&ctx, &line, qty).await?,
            CartAction::Remove { line } => commands::cart::remove(&ctx, &line).await?,
            CartAction::Clear => commands::cart::clear(&ctx).await?,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Delivery => commands::checkout::delivery(&ctx).await?,
            CheckoutAction::Place {
                address,
                delivery,
                payment,
            } => commands::checkout::place(&ctx, address.into(), &delivery, payment).await?,
            CheckoutAction::Status => commands::checkout::status(&ctx)?,
            CheckoutAction::Pay {
                reference,
                provider,
            } => commands::checkout::pay(&ctx, &reference, provider.as_deref()).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&ctx).await?,
            OrdersAction::Show { id } => commands::orders::show(&ctx, &id).await?,
            OrdersAction::Cancel { id, yes } => commands::orders::cancel(&ctx, &id, yes).await?,
        },
        Commands::Admin { action } => commands::admin::run(&ctx, action).await?,
    }
    Ok(())
}

//! Storefront CLI - Shop from the terminal against a local store file.
//!
//! # Usage
//!
//! ```bash
//! # Browse and fill the cart
//! tn-cli products
//! tn-cli cart add P001
//! tn-cli cart inc P001
//! tn-cli cart show
//!
//! # Create an account and buy
//! tn-cli register -r 12345678K -n Ana -s Soto -e ana@gmail.com -p clave1 -a "Av. Siempre Viva 742"
//! tn-cli checkout
//! tn-cli orders
//!
//! # Staff
//! tn-cli login -e admin@duoc.cl -p admin
//! tn-cli admin product P007 "Taladro Percutor" 59990 10 --category herramientas
//! tn-cli admin user -r 11111111 -n Vera -s Rojas -e vera@duoc.cl --role seller
//! ```
//!
//! # Environment Variables
//!
//! See `technova_storefront::config`. `RUST_LOG` overrides the log filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use technova_core::Role;
use technova_storefront::config::StorefrontConfig;
use technova_storefront::db::FileStore;
use technova_storefront::models::NewAccount;
use technova_storefront::services::admin::{ProductInput, UserInput};
use technova_storefront::services::seed;
use technova_storefront::{Storefront, SystemClock};

mod commands;

#[derive(Parser)]
#[command(name = "tn-cli")]
#[command(author, version, about = "TechNova storefront CLI")]
struct Cli {
    /// Store document to use instead of `TECHNOVA_DATA_FILE`
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default catalog and administrator if they are missing
    Seed,
    /// List the catalog
    Products,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart
    Checkout,
    /// Create a customer account and sign in
    Register {
        /// RUN without dots or dash (e.g. 19011022K)
        #[arg(short, long)]
        run: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        surname: String,

        /// @gmail.com or @duoc.cl address
        #[arg(short, long)]
        email: String,

        /// 4 to 10 characters
        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        address: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show the signed-in account's orders
    Orders,
    /// Staff console
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { product_id: String },
    /// Add one more unit of a line
    Inc { product_id: String },
    /// Take one unit off a line (removes it at zero)
    Dec { product_id: String },
    /// Drop a line
    Remove { product_id: String },
    /// Empty the cart
    Clear,
    /// Show lines, item count and total
    Show,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create or replace a product
    Product {
        id: String,
        name: String,
        price: u64,
        stock: u32,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Create a user with the initial password
    User {
        #[arg(short, long)]
        run: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        surname: String,

        #[arg(short, long)]
        email: String,

        /// Role (`customer`, `admin`, `seller`)
        #[arg(long, default_value = "customer")]
        role: Role,
    },
    /// List users
    Users,
    /// List products
    Products,
    /// List every order
    Orders,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "technova_storefront=info,technova_cli=info".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }

    tracing::debug!(path = %config.data_file.display(), "Opening store");
    let store = FileStore::new(config.data_file);
    let clock = SystemClock;
    let storefront = Storefront::new(&store, &clock);

    if config.seed_on_start && !matches!(cli.command, Commands::Seed) {
        seed::seed_defaults(&store)?;
    }

    let result = match cli.command {
        Commands::Seed => commands::catalog::seed(&store),
        Commands::Products => commands::catalog::products(&storefront),
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => commands::cart::add(&storefront, &product_id),
            CartAction::Inc { product_id } => commands::cart::change(&storefront, &product_id, 1),
            CartAction::Dec { product_id } => commands::cart::change(&storefront, &product_id, -1),
            CartAction::Remove { product_id } => commands::cart::remove(&storefront, &product_id),
            CartAction::Clear => commands::cart::clear(&storefront),
            CartAction::Show => commands::cart::show(&storefront),
        },
        Commands::Checkout => commands::cart::checkout(&storefront),
        Commands::Register {
            run,
            name,
            surname,
            email,
            password,
            address,
        } => commands::account::register(
            &storefront,
            NewAccount {
                id: run,
                name,
                surname,
                email,
                secret: password,
                address,
            },
        ),
        Commands::Login { email, password } => {
            commands::account::login(&storefront, &email, &password)
        }
        Commands::Logout => commands::account::logout(&storefront),
        Commands::Whoami => commands::account::whoami(&storefront),
        Commands::Orders => commands::account::orders(&storefront),
        Commands::Admin { action } => match action {
            AdminAction::Product {
                id,
                name,
                price,
                stock,
                category,
            } => commands::admin::product(
                &storefront,
                ProductInput {
                    id,
                    name,
                    price,
                    stock,
                    category,
                },
            ),
            AdminAction::User {
                run,
                name,
                surname,
                email,
                role,
            } => commands::admin::user(
                &storefront,
                UserInput {
                    run,
                    name,
                    surname,
                    email,
                    role,
                },
            ),
            AdminAction::Users => commands::admin::users(&storefront),
            AdminAction::Products => commands::admin::products(&storefront),
            AdminAction::Orders => commands::admin::orders(&storefront),
        },
    };

    result.map_err(|e| {
        e.report();
        e.user_message().into()
    })
}

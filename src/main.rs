//! SupplyMind CLI - companion for the SupplyMind supply-chain platform

use clap::{CommandFactory, Parser};

mod auth;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod link;
mod output;
mod payments;

use cli::{
    CheckoutCommands, Cli, CommandContext, Commands, InventoryCommands, InvoiceCommands,
    LoginCommands, PaymentCommands, PoCommands, ProfileCommands, ReturnsCommands, SetupCommands,
    SupplierCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config_path = cli.config.as_deref();
    let api_host = cli.api_host.as_deref();
    let ctx = || CommandContext::new(cli.format, api_host, config_path, cli.no_cache);

    match cli.command {
        Commands::Init => cli::init::run(api_host, config_path).await,
        Commands::Status => cli::status::run(config_path),
        Commands::Version => {
            println!("supplymind version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "supplymind", &mut std::io::stdout());
            Ok(())
        }
        Commands::Login(login_cmd) => match login_cmd {
            LoginCommands::Password => cli::login::password(api_host, config_path).await,
            LoginCommands::Qr => cli::login::qr(config_path).await,
            LoginCommands::Approve { session_id } => {
                cli::login::approve(&session_id, config_path).await
            }
            LoginCommands::Logout => cli::login::logout(api_host, config_path).await,
        },
        Commands::Setup(setup_cmd) => match setup_cmd {
            SetupCommands::Show => cli::setup::show(config_path),
            SetupCommands::Adopt { payload } => cli::setup::adopt(&payload, config_path),
        },
        Commands::Po(po_cmd) => match po_cmd {
            PoCommands::List => cli::po::list(&ctx()?).await,
            PoCommands::Get { po_id } => cli::po::get(&ctx()?, &po_id).await,
        },
        Commands::Invoice(invoice_cmd) => match invoice_cmd {
            InvoiceCommands::Create { po_id } => cli::invoice::create(&ctx()?, &po_id).await,
            InvoiceCommands::Get { invoice_id } => cli::invoice::get(&ctx()?, &invoice_id).await,
            InvoiceCommands::ForPo { po_id } => cli::invoice::for_po(&ctx()?, &po_id).await,
        },
        Commands::Payment(payment_cmd) => match payment_cmd {
            PaymentCommands::Schedule { invoice_id, amount } => {
                cli::payment::schedule(&ctx()?, &invoice_id, amount).await
            }
            PaymentCommands::Execute { payment_id } => {
                cli::payment::execute(&ctx()?, payment_id).await
            }
            PaymentCommands::List { invoice_id } => {
                cli::payment::list(&ctx()?, &invoice_id).await
            }
        },
        Commands::Supplier(supplier_cmd) => match supplier_cmd {
            SupplierCommands::List => cli::supplier::list(&ctx()?).await,
            SupplierCommands::Status => cli::supplier::status(&ctx()?).await,
            SupplierCommands::Onboard { supplier_id } => {
                cli::supplier::onboard(&ctx()?, &supplier_id).await
            }
        },
        Commands::Checkout(checkout_cmd) => match checkout_cmd {
            CheckoutCommands::Create { po_id, currency } => {
                cli::checkout::create(&ctx()?, &po_id, currency.as_deref()).await
            }
            CheckoutCommands::Confirm {
                intent_id,
                client_secret,
            } => cli::checkout::confirm(&ctx()?, &intent_id, &client_secret).await,
            CheckoutCommands::Watch { intent_id } => {
                cli::checkout::watch(&ctx()?, &intent_id).await
            }
            CheckoutCommands::Refund { intent_id, amount } => {
                cli::checkout::refund(&ctx()?, &intent_id, amount).await
            }
        },
        Commands::Inventory(inventory_cmd) => match inventory_cmd {
            InventoryCommands::List => cli::inventory::list(&ctx()?).await,
            InventoryCommands::Receive { po_id, lines } => {
                cli::inventory::receive(&ctx()?, &po_id, &lines).await
            }
        },
        Commands::Returns(returns_cmd) => match returns_cmd {
            ReturnsCommands::List => cli::returns::list(&ctx()?).await,
            ReturnsCommands::Inspect {
                return_id,
                disposition,
                notes,
            } => cli::returns::inspect(&ctx()?, &return_id, disposition, notes.as_deref()).await,
        },
        Commands::Profile(profile_cmd) => match profile_cmd {
            ProfileCommands::Show => cli::profile::show(&ctx()?).await,
            ProfileCommands::Signature { path } => cli::profile::signature(&ctx()?, &path).await,
        },
    }
}

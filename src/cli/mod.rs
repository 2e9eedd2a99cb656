//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod checkout;
pub mod context;
pub mod init;
pub mod inventory;
pub mod invoice;
pub mod login;
pub mod payment;
pub mod po;
pub mod profile;
pub mod returns;
pub mod setup;
pub mod status;
pub mod supplier;

pub use context::CommandContext;

use crate::client::models::ReturnDisposition;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format, one row per entry (default)
    #[default]
    Table,
    /// JSON format, structured for scripts
    Json,
}

/// SupplyMind CLI - companion for the SupplyMind supply-chain platform
#[derive(Parser, Debug)]
#[command(name = "supplymind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SUPPLYMIND_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SUPPLYMIND_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API host
    #[arg(long, global = true, env = "SUPPLYMIND_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SUPPLYMIND_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "SUPPLYMIND_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize SupplyMind configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Sign in and manage the stored credential
    #[command(subcommand)]
    Login(LoginCommands),

    /// Hand this device's credential to another device
    #[command(subcommand)]
    Setup(SetupCommands),

    /// View purchase orders
    #[command(subcommand)]
    Po(PoCommands),

    /// Create and view supplier invoices
    #[command(subcommand)]
    Invoice(InvoiceCommands),

    /// Schedule and execute supplier payments
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// View suppliers and their payout onboarding
    #[command(subcommand)]
    Supplier(SupplierCommands),

    /// Pay a purchase order through the card processor
    #[command(subcommand)]
    Checkout(CheckoutCommands),

    /// View stock and record receipts
    #[command(subcommand)]
    Inventory(InventoryCommands),

    /// Inspect returned goods
    #[command(subcommand)]
    Returns(ReturnsCommands),

    /// View and update the signed-in user's profile
    #[command(subcommand)]
    Profile(ProfileCommands),
}

/// Login subcommands
#[derive(Subcommand, Debug)]
pub enum LoginCommands {
    /// Sign in with email and password
    Password,

    /// Sign in by showing a QR code to an already-authenticated device
    Qr,

    /// Approve a desktop login session scanned from its QR code
    Approve {
        /// Session identifier from the desktop's QR code
        session_id: String,
    },

    /// Sign out and discard the stored credential
    Logout,
}

/// Setup subcommands
#[derive(Subcommand, Debug)]
pub enum SetupCommands {
    /// Show this device's credential as a setup QR code
    Show,

    /// Adopt a credential from a scanned setup payload
    Adopt {
        /// Scanned payload, including its prefix
        payload: String,
    },
}

/// Purchase order subcommands
#[derive(Subcommand, Debug)]
pub enum PoCommands {
    /// List purchase orders ready for invoicing
    List,

    /// Show one purchase order
    Get {
        /// Purchase order ID
        po_id: String,
    },
}

/// Invoice subcommands
#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    /// Create an invoice from a purchase order
    Create {
        /// Purchase order ID
        po_id: String,
    },

    /// Show one invoice
    Get {
        /// Invoice ID
        invoice_id: String,
    },

    /// Show the invoice tied to a purchase order, if any
    ForPo {
        /// Purchase order ID
        po_id: String,
    },
}

/// Payment subcommands
#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// Schedule a payment against an invoice
    Schedule {
        /// Invoice ID
        invoice_id: String,

        /// Amount in minor units; defaults to the invoice balance
        #[arg(long)]
        amount: Option<i64>,
    },

    /// Execute a scheduled payment
    Execute {
        /// Payment ID
        payment_id: i64,
    },

    /// List payments for an invoice, newest first
    List {
        /// Invoice ID
        invoice_id: String,
    },
}

/// Supplier subcommands
#[derive(Subcommand, Debug)]
pub enum SupplierCommands {
    /// List suppliers
    List,

    /// Show payout onboarding status for every supplier
    Status,

    /// Generate a payout onboarding link for a supplier
    Onboard {
        /// Supplier ID
        supplier_id: String,
    },
}

/// Checkout subcommands
#[derive(Subcommand, Debug)]
pub enum CheckoutCommands {
    /// Start a card payment for a purchase order
    Create {
        /// Purchase order ID
        po_id: String,

        /// ISO currency code; defaults to the configured currency
        #[arg(long)]
        currency: Option<String>,
    },

    /// Confirm a payment with its client secret
    Confirm {
        /// Payment intent ID
        intent_id: String,

        /// Client secret from `checkout create`
        client_secret: String,
    },

    /// Poll a payment until it settles
    Watch {
        /// Payment intent ID
        intent_id: String,
    },

    /// Refund a settled payment
    Refund {
        /// Payment intent ID
        intent_id: String,

        /// Amount in minor units; omit for a full refund
        #[arg(long)]
        amount: Option<i64>,
    },
}

/// Inventory subcommands
#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List stock on hand
    List,

    /// Record goods received against a purchase order
    Receive {
        /// Purchase order ID
        po_id: String,

        /// Received line as SKU=QUANTITY; repeat for multiple lines
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
    },
}

/// Returns subcommands
#[derive(Subcommand, Debug)]
pub enum ReturnsCommands {
    /// List return cases awaiting inspection
    List,

    /// Record an inspection outcome for a return case
    Inspect {
        /// Return case ID
        return_id: String,

        /// Disposition of the returned goods
        #[arg(value_enum)]
        disposition: ReturnDisposition,

        /// Inspection notes
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the signed-in user's profile
    Show,

    /// Upload a signature image
    Signature {
        /// Path to the image file
        path: String,
    },
}

//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use rbl_core::TargetKind;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Check IP addresses and domains against DNS blacklists
///
/// Queries every applicable DNSBL provider concurrently and reports which
/// ones list the target. Use --explain to learn how the lookups work.
#[derive(Parser, Debug)]
#[command(name = "rblcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log filter when RUST_LOG is unset (e.g. "info", "rbl_engine=debug")
    #[arg(long, global = true, env = "RBLCHECK_LOG")]
    pub log_level: Option<String>,

    /// Provider catalog TOML replacing the built-in list
    #[arg(long, global = true, env = "RBLCHECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Maximum provider queries in flight per check
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Per-provider query timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check an IPv4/IPv6 address or a domain
    Check(CheckArgs),

    /// List the DNSBL providers in the catalog
    Providers(ProvidersArgs),

    /// Run the HTTP API
    Serve(ServeArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// IP address or domain to check
    pub target: String,

    /// Exit with status 2 when any provider lists the target
    #[arg(long)]
    pub fail_on_listed: bool,
}

// ============================================================================
// Providers command
// ============================================================================

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Only providers eligible for this target kind (ipv4, ipv6, domain)
    #[arg(short, long)]
    pub kind: Option<TargetKind>,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address, overriding the config file
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Server config file (TOML)
    #[arg(short, long, default_value = "rbl-srv.toml")]
    pub config: PathBuf,
}

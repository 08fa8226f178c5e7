//! rblcheck - DNS blacklist checker
//!
//! Checks IPs and domains against DNSBL providers, from the shell or over HTTP.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    rbl_cli::run().await
}

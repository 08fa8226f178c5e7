//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use rbl_core::{AggregateResponse, RblProvider, RblResult};
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored listing with a summary
    #[default]
    Pretty,
    /// JSON output, identical to the HTTP API body
    Json,
    /// CSV output, one row per result
    Csv,
    /// YAML output
    Yaml,
}

/// Print an aggregate check response.
pub fn print_response(response: &AggregateResponse, format: OutputFormat, verbose: bool) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(response)?),
        OutputFormat::Csv => print!("{}", results_csv(&response.results)?),
        OutputFormat::Pretty => print_response_pretty(response, verbose),
    }
    Ok(())
}

/// Print a list of providers.
pub fn print_providers(providers: &[&RblProvider], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(providers)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(providers)?),
        OutputFormat::Csv => print!("{}", providers_csv(providers)?),
        OutputFormat::Pretty => {
            println!("{}", "DNSBL Providers:".bold().underline());
            for p in providers {
                let ipv6 = if p.supports_ipv6 { " +ipv6" } else { "" };
                println!(
                    "  {:28} {:24} {}{}",
                    p.name.cyan(),
                    p.zone,
                    p.kind.to_string().yellow(),
                    ipv6.dimmed()
                );
            }
            println!();
            println!("{} {}", "Total:".bold(), providers.len());
        }
    }
    Ok(())
}

fn print_response_pretty(response: &AggregateResponse, verbose: bool) {
    println!(
        "{} {} ({})",
        "Target:".bold(),
        response.target.cyan(),
        response.target_type
    );
    if let Some(ips) = &response.resolved_ips {
        println!("{} {}", "Resolved:".bold(), ips.join(", "));
    }
    println!();

    for r in &response.results {
        // Clean rows are noise unless asked for
        if r.is_clean() && !verbose {
            continue;
        }
        println!("  {} {:36} {:>5}ms  {}", status_tag(r), r.rbl, r.response_time, detail(r).dimmed());
    }

    let s = response.summary;
    println!();
    println!(
        "{} {} checked, {} listed, {} clean, {} errors",
        "Summary:".bold(),
        s.total_checked,
        if s.listed_count > 0 {
            s.listed_count.to_string().red().bold()
        } else {
            s.listed_count.to_string().green()
        },
        s.clean_count,
        s.error_count,
    );
    if s.listed_count == 0 {
        println!("{}", "Not listed on any checked provider.".green());
    }
}

fn status_tag(r: &RblResult) -> colored::ColoredString {
    if r.listed {
        "LISTED".red().bold()
    } else if r.is_error() {
        "ERROR ".yellow()
    } else {
        "clean ".green()
    }
}

fn detail(r: &RblResult) -> String {
    if let Some(error) = &r.error {
        return error.clone();
    }
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(r.response.as_deref());
    parts.extend(r.reason.as_deref());
    parts.extend(r.url.as_deref());
    parts.join("  ")
}

/// CSV with one row per result; absent fields are empty cells.
pub fn results_csv(results: &[RblResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rbl", "listed", "response", "reason", "responseTime", "error", "url"])?;
    for r in results {
        let listed = r.listed.to_string();
        let response_time = r.response_time.to_string();
        wtr.write_record([
            r.rbl.as_str(),
            listed.as_str(),
            r.response.as_deref().unwrap_or(""),
            r.reason.as_deref().unwrap_or(""),
            response_time.as_str(),
            r.error.as_deref().unwrap_or(""),
            r.url.as_deref().unwrap_or(""),
        ])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

/// CSV of the provider catalog.
pub fn providers_csv(providers: &[&RblProvider]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["name", "zone", "type", "supportsIPv6", "url"])?;
    for p in providers {
        let kind = p.kind.to_string();
        let ipv6 = p.supports_ipv6.to_string();
        wtr.write_record([p.name.as_str(), p.zone.as_str(), &kind, &ipv6, p.url.as_str()])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

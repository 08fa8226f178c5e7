//! Educational features: explanations of what each command does.

use colored::Colorize;
use rbl_core::TargetKind;
use rbl_engine::{build_query_name, classify, RblCatalog};

/// Command explanation builder.
pub struct Explain {
    description: String,
    query: Option<String>,
    what_happens: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            query: None,
            what_happens: Vec::new(),
            learn_more: None,
        }
    }

    fn query(mut self, name: String) -> Self {
        self.query = Some(name);
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn learn_more(mut self, url: &str) -> Self {
        self.learn_more = Some(url.to_string());
        self
    }

    /// Print the explanation to stderr, leaving stdout to the results.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", "=== What This Does ===".bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if let Some(query) = &self.query {
            eprintln!("{} {}", "Example query:".bold(), query.dimmed());
        }

        if let Some(url) = &self.learn_more {
            eprintln!("{} {}", "Learn more:".bold(), url.cyan().underline());
        }

        eprintln!();
        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn check(target: &str) -> Self {
        let target = classify(target);
        let mut explain = Self::new(&format!(
            "Checks the {} {} against every DNSBL provider that lists {} targets.",
            target.kind, target.value, target.kind
        ));

        explain = match target.kind {
            TargetKind::Ipv4 => explain
                .step("Reverses the four octets (192.0.2.1 -> 1.2.0.192)")
                .step("Appends each provider zone and looks up an A record"),
            TargetKind::Ipv6 => explain
                .step("Expands the address to 32 hex nibbles")
                .step("Reverses the nibbles, dot-separated, and appends each IPv6-capable zone"),
            TargetKind::Domain => explain
                .step("Resolves the domain's A and AAAA records first")
                .step("Queries domain blacklists with the name itself")
                .step("Queries IP blacklists for every resolved address"),
        };

        explain = explain
            .step("NXDOMAIN means not listed; an answer like 127.0.0.2 means listed")
            .step("Answers in 127.255.0.0/16 mean the provider refused the query")
            .step("Listings are enriched with the provider's TXT reason");

        let example = RblCatalog::builtin()
            .eligible(target.kind)
            .next()
            .and_then(|p| build_query_name(&target.value, target.kind, &p.zone).ok());
        if let Some(name) = example {
            explain = explain.query(name);
        }

        explain.learn_more("https://en.wikipedia.org/wiki/Domain_Name_System_blocklist")
    }

    pub fn providers() -> Self {
        Self::new("Lists the DNSBL providers a check queries.")
            .step("IP lists answer for IPv4, and for IPv6 only when marked +ipv6")
            .step("Domain lists answer for domain names")
            .step("Lists of type 'both' answer for either")
    }

    pub fn serve() -> Self {
        Self::new("Runs the DNSBL check HTTP API.")
            .step("POST /api/rbl-check with {\"target\": \"...\"} runs a check")
            .step("GET /api/rbl-check/providers lists the catalog")
            .step("GET /health reports liveness and catalog size")
    }
}

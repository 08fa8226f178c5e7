//! End-to-end checks against a scripted resolver.

mod common;

use common::FakeLookup;
use rbl_core::{LookupError, ProviderKind, RblError, TargetKind};
use rbl_engine::executor::BLOCKED_MESSAGE;
use rbl_engine::{EngineConfig, RblCatalog, RblEngine};
use std::sync::Arc;
use std::time::Duration;

fn engine_with(fake: FakeLookup) -> (RblEngine, Arc<FakeLookup>) {
    engine_with_config(fake, EngineConfig::default())
}

fn engine_with_config(fake: FakeLookup, config: EngineConfig) -> (RblEngine, Arc<FakeLookup>) {
    let fake = Arc::new(fake);
    let engine = RblEngine::new(Arc::new(RblCatalog::builtin()), fake.clone(), config);
    (engine, fake)
}

fn ip_capable_providers() -> usize {
    RblCatalog::builtin()
        .iter()
        .filter(|p| matches!(p.kind, ProviderKind::Ip | ProviderKind::Both))
        .count()
}

fn assert_summary_consistent(response: &rbl_core::AggregateResponse) {
    let s = response.summary;
    assert_eq!(s.total_checked, response.results.len());
    assert_eq!(s.total_checked, s.listed_count + s.clean_count + s.error_count);
    for r in &response.results {
        assert!(!(r.listed && r.error.is_some()), "{r:?}");
    }
}

#[tokio::test]
async fn documentation_ip_is_clean_everywhere() {
    let (engine, _) = engine_with(FakeLookup::new());

    let response = engine.check("203.0.113.7").await.unwrap();

    let k = ip_capable_providers();
    assert_eq!(k, 14);
    assert_eq!(response.target, "203.0.113.7");
    assert_eq!(response.target_type, TargetKind::Ipv4);
    assert!(response.resolved_ips.is_none());
    assert_eq!(response.summary.total_checked, k);
    assert_eq!(response.summary.listed_count, 0);
    assert_eq!(response.summary.clean_count, k);
    assert_eq!(response.summary.error_count, 0);
    assert_summary_consistent(&response);
}

#[tokio::test]
async fn missing_domain_fails_the_request() {
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a_err("no-such-domain.invalid", LookupError::NotFound)
            .aaaa_err("no-such-domain.invalid", LookupError::NotFound),
    );

    let err = engine.check("no-such-domain.invalid").await.unwrap_err();

    assert!(matches!(err, RblError::DomainResolution { .. }));
    assert!(err.to_string().contains("does not exist"));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn domain_without_address_records() {
    let (engine, fake) = engine_with(
        FakeLookup::new()
            .a_err("mail-only.example", LookupError::NoData)
            .aaaa_err("mail-only.example", LookupError::NotFound),
    );

    let err = engine.check("mail-only.example").await.unwrap_err();

    assert!(err.to_string().contains("exists but has no A or AAAA records"));
    // aborted before any provider query
    assert_eq!(fake.a_calls(), 1);
}

#[tokio::test]
async fn blank_target_is_a_validation_error() {
    let (engine, fake) = engine_with(FakeLookup::new());

    for raw in ["", "   ", "\t\n"] {
        let err = engine.check(raw).await.unwrap_err();
        assert!(matches!(err, RblError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }
    assert_eq!(fake.a_calls(), 0);
}

#[tokio::test]
async fn malformed_ipv6_is_rejected_up_front() {
    let (engine, fake) = engine_with(FakeLookup::new());

    let err = engine.check("1::2::3").await.unwrap_err();

    assert!(matches!(err, RblError::InvalidAddress(_)));
    assert_eq!(fake.a_calls(), 0);
}

#[tokio::test]
async fn meta_range_answer_is_a_block_not_a_listing() {
    let (engine, _) = engine_with(FakeLookup::new().a("7.113.0.203.zen.spamhaus.org", &["127.255.0.1"]));

    let response = engine.check("203.0.113.7").await.unwrap();

    let zen = response.results.iter().find(|r| r.rbl == "Spamhaus ZEN").unwrap();
    assert!(!zen.listed);
    assert_eq!(zen.error.as_deref(), Some(BLOCKED_MESSAGE));
    assert_eq!(response.summary.listed_count, 0);
    assert_eq!(response.summary.error_count, 1);
    assert_summary_consistent(&response);
}

#[tokio::test]
async fn refusal_text_is_a_block_with_the_reason() {
    let name = "7.113.0.203.bl.spamcop.net";
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a(name, &["127.0.0.2"])
            .txt(name, "Query refused: open resolver, please use your own DNS"),
    );

    let response = engine.check("203.0.113.7").await.unwrap();

    let spamcop = response.results.iter().find(|r| r.rbl == "SpamCop").unwrap();
    assert!(!spamcop.listed);
    assert_eq!(
        spamcop.error.as_deref(),
        Some("Query refused: open resolver, please use your own DNS")
    );
}

#[tokio::test]
async fn genuine_listing_carries_reason_and_provider_info() {
    let name = "7.113.0.203.b.barracudacentral.org";
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a(name, &["127.0.0.2"])
            .txt(name, "Listed: poor reputation"),
    );

    let response = engine.check("203.0.113.7").await.unwrap();

    let barracuda = response.results.iter().find(|r| r.rbl == "Barracuda").unwrap();
    assert!(barracuda.listed);
    assert!(barracuda.error.is_none());
    assert_eq!(barracuda.response.as_deref(), Some("127.0.0.2"));
    assert_eq!(barracuda.reason.as_deref(), Some("Listed: poor reputation"));
    assert_eq!(barracuda.url.as_deref(), Some("https://www.barracudacentral.org/rbl"));
    assert!(barracuda.description.is_some());
    assert!(response.is_listed());
    assert_eq!(response.listings().count(), 1);
}

#[tokio::test]
async fn txt_failure_does_not_affect_classification() {
    let name = "7.113.0.203.psbl.surriel.com";
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a(name, &["127.0.0.2"])
            .txt_err(name, LookupError::Other("SERVFAIL".into())),
    );

    let response = engine.check("203.0.113.7").await.unwrap();

    let psbl = response.results.iter().find(|r| r.rbl == "PSBL").unwrap();
    assert!(psbl.listed);
    assert!(psbl.reason.is_none());
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_alone() {
    let name = "7.113.0.203.dnsbl.sorbs.net";
    let (engine, _) = engine_with(FakeLookup::new().delay(name, Duration::from_secs(30)));

    let response = engine.check("203.0.113.7").await.unwrap();

    let sorbs = response.results.iter().find(|r| r.rbl == "SORBS").unwrap();
    assert!(!sorbs.listed);
    assert_eq!(sorbs.error.as_deref(), Some("Query timeout (>1s)"));
    assert!(sorbs.response_time >= 1000);

    assert_eq!(response.summary.error_count, 1);
    assert_eq!(response.summary.clean_count, ip_capable_providers() - 1);
}

#[tokio::test]
async fn resolver_errors_are_reported_per_provider() {
    let (engine, _) = engine_with(
        FakeLookup::new().a_err("7.113.0.203.cbl.abuseat.org", LookupError::Other("SERVFAIL".into())),
    );

    let response = engine.check("203.0.113.7").await.unwrap();

    let cbl = response.results.iter().find(|r| r.rbl == "CBL").unwrap();
    assert_eq!(cbl.error.as_deref(), Some("SERVFAIL"));
    assert_eq!(response.results.len(), ip_capable_providers());
}

#[tokio::test]
async fn ipv6_target_only_hits_ipv6_capable_providers() {
    let (engine, _) = engine_with(FakeLookup::new());

    let response = engine.check("2001:DB8::1").await.unwrap();

    assert_eq!(response.target, "2001:db8::1");
    assert_eq!(response.target_type, TargetKind::Ipv6);
    let names: Vec<&str> = response.results.iter().map(|r| r.rbl.as_str()).collect();
    assert_eq!(names, vec!["Spamhaus ZEN", "DroneBL", "SPFBL", "Hostkarma"]);
}

#[tokio::test]
async fn domain_target_checks_domain_and_each_address() {
    let v6_listing = "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.dnsbl.dronebl.org";
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a("example.com", &["198.51.100.1"])
            .aaaa("example.com", &["2001:db8::1"])
            .a("example.com.dbl.spamhaus.org", &["127.0.1.2"])
            .a(v6_listing, &["127.0.0.3"]),
    );

    let response = engine.check("Example.COM.").await.unwrap();

    assert_eq!(response.target, "example.com");
    assert_eq!(response.target_type, TargetKind::Domain);
    assert_eq!(
        response.resolved_ips.as_deref(),
        Some(&["198.51.100.1".to_string(), "2001:db8::1".to_string()][..])
    );

    let catalog = RblCatalog::builtin();
    let expected = catalog.eligible(TargetKind::Domain).count()
        + catalog.eligible(TargetKind::Ipv4).count()
        + catalog.eligible(TargetKind::Ipv6).count();
    assert_eq!(response.results.len(), expected);

    // domain-level results come first and carry no suffix
    assert_eq!(response.results[0].rbl, "SPFBL");
    assert!(response
        .results
        .iter()
        .any(|r| r.rbl == "Spamhaus DBL" && r.listed));
    assert!(response
        .results
        .iter()
        .any(|r| r.rbl == "Spamhaus ZEN (198.51.100.1)" && !r.listed));
    assert!(response
        .results
        .iter()
        .any(|r| r.rbl == "DroneBL (2001:db8::1)" && r.listed));

    assert_eq!(response.summary.listed_count, 2);
    assert_summary_consistent(&response);
}

#[tokio::test]
async fn ipv6_only_domain_still_resolves() {
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a_err("v6only.example", LookupError::NoData)
            .aaaa("v6only.example", &["2001:db8::53"]),
    );

    let response = engine.check("v6only.example").await.unwrap();

    assert_eq!(response.resolved_ips, Some(vec!["2001:db8::53".to_string()]));
    assert!(response.results.iter().any(|r| r.rbl == "DroneBL (2001:db8::53)"));
}

#[tokio::test]
async fn mapped_ipv6_answer_is_checked_not_rejected() {
    let mapped_listing = format!("1.0.2.0.0.0.0.c.f.f.f.f.{}zen.spamhaus.org", "0.".repeat(20));
    let (engine, _) = engine_with(
        FakeLookup::new()
            .a("mapped.example", &["192.0.2.1"])
            .aaaa("mapped.example", &["::ffff:192.0.2.1"])
            .a(&mapped_listing, &["127.0.0.4"]),
    );

    let response = engine.check("mapped.example").await.unwrap();

    assert_eq!(
        response.resolved_ips,
        Some(vec!["192.0.2.1".to_string(), "::ffff:192.0.2.1".to_string()])
    );
    let catalog = RblCatalog::builtin();
    assert_eq!(
        response.results.len(),
        catalog.eligible(TargetKind::Domain).count()
            + catalog.eligible(TargetKind::Ipv4).count()
            + catalog.eligible(TargetKind::Ipv6).count()
    );
    let zen = response
        .results
        .iter()
        .find(|r| r.rbl == "Spamhaus ZEN (::ffff:192.0.2.1)")
        .unwrap();
    assert!(zen.listed);
    assert_eq!(zen.response.as_deref(), Some("127.0.0.4"));
    assert_eq!(response.summary.error_count, 0);
    assert_summary_consistent(&response);
}

#[tokio::test]
async fn mapped_ipv6_literal_is_accepted() {
    let (engine, _) = engine_with(FakeLookup::new());

    let response = engine.check("::FFFF:192.0.2.1").await.unwrap();

    assert_eq!(response.target_type, TargetKind::Ipv6);
    assert_eq!(response.target, "::ffff:192.0.2.1");
    assert_eq!(response.summary.clean_count, response.results.len());
}

#[tokio::test(start_paused = true)]
async fn concurrency_bound_holds_across_addresses() {
    let config = EngineConfig {
        concurrency: 3,
        ..EngineConfig::default()
    };
    let (engine, fake) = engine_with_config(
        FakeLookup::new()
            .default_delay(Duration::from_millis(20))
            .a("multi.example", &["192.0.2.1", "192.0.2.2", "192.0.2.3"]),
        config,
    );

    let response = engine.check("multi.example").await.unwrap();

    assert_eq!(response.results.len(), 6 + 3 * 14);
    // the resolution lookup runs before any provider query
    assert!(fake.peak() <= 3, "peak was {}", fake.peak());
    assert_summary_consistent(&response);
}

#[tokio::test(start_paused = true)]
async fn summary_invariant_holds_for_mixed_outcomes() {
    let catalog = RblCatalog::builtin();
    let ip_providers: Vec<_> = catalog.eligible(TargetKind::Ipv4).cloned().collect();

    let mut seed: u64 = 0x9e37_79b9;
    for round in 0..25u32 {
        let target = format!("192.0.{}.{}", round % 7, round * 9 % 255);
        let reversed = format!("{}.{}.0.192", round * 9 % 255, round % 7);

        let mut fake = FakeLookup::new();
        for provider in &ip_providers {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let name = format!("{reversed}.{}", provider.zone);
            fake = match (seed >> 33) % 6 {
                0 => fake.a(&name, &["127.0.0.2"]),
                1 => fake.a(&name, &["127.255.0.3"]),
                2 => fake.a_err(&name, LookupError::Other("SERVFAIL".into())),
                3 => fake.delay(&name, Duration::from_secs(3)),
                4 => fake.a_err(&name, LookupError::NoData),
                _ => fake,
            };
        }

        let (engine, _) = engine_with(fake);
        let response = engine.check(&target).await.unwrap();
        assert_eq!(response.results.len(), ip_providers.len());
        assert_summary_consistent(&response);
    }
}

//! In-memory DNS fake shared by the engine tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rbl_core::LookupError;
use rbl_engine::DnsLookup;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted resolver. Unknown names answer NXDOMAIN.
#[derive(Default)]
pub struct FakeLookup {
    a: HashMap<String, Result<Vec<Ipv4Addr>, LookupError>>,
    aaaa: HashMap<String, Result<Vec<Ipv6Addr>, LookupError>>,
    txt: HashMap<String, Result<Vec<Vec<String>>, LookupError>>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    a_calls: AtomicUsize,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(mut self, name: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.a.insert(name.to_string(), Ok(ips));
        self
    }

    pub fn a_err(mut self, name: &str, err: LookupError) -> Self {
        self.a.insert(name.to_string(), Err(err));
        self
    }

    pub fn aaaa(mut self, name: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.aaaa.insert(name.to_string(), Ok(ips));
        self
    }

    pub fn aaaa_err(mut self, name: &str, err: LookupError) -> Self {
        self.aaaa.insert(name.to_string(), Err(err));
        self
    }

    pub fn txt(mut self, name: &str, text: &str) -> Self {
        self.txt
            .insert(name.to_string(), Ok(vec![vec![text.to_string()]]));
        self
    }

    pub fn txt_err(mut self, name: &str, err: LookupError) -> Self {
        self.txt.insert(name.to_string(), Err(err));
        self
    }

    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Highest number of A lookups that overlapped.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn a_calls(&self) -> usize {
        self.a_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self, name: &str) {
        let delay = self.delays.get(name).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

struct InFlight<'a>(&'a FakeLookup);

impl<'a> InFlight<'a> {
    fn enter(fake: &'a FakeLookup) -> Self {
        let now = fake.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        fake.peak.fetch_max(now, Ordering::SeqCst);
        fake.a_calls.fetch_add(1, Ordering::SeqCst);
        Self(fake)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsLookup for FakeLookup {
    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        let _guard = InFlight::enter(self);
        self.wait(name).await;
        self.a.get(name).cloned().unwrap_or(Err(LookupError::NotFound))
    }

    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, LookupError> {
        self.wait(name).await;
        self.aaaa
            .get(name)
            .cloned()
            .unwrap_or(Err(LookupError::NotFound))
    }

    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>, LookupError> {
        self.txt
            .get(name)
            .cloned()
            .unwrap_or(Err(LookupError::NoData))
    }
}

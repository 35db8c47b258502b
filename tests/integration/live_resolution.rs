//! End-to-end resolution against real upstreams. Ignored by default;
//! run with `cargo test -p crawldns-bench -- --ignored` on a machine
//! with outbound DNS and HTTPS connectivity.

use crawldns_application::ports::HostCache;
use crawldns_domain::{ResolverConfig, ResolverMode};
use crawldns_infrastructure::Resolver;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
#[ignore]
async fn doh_race_resolves_real_hostname() {
    init_tracing();
    let config = ResolverConfig::default().with_mode(ResolverMode::Doh);
    let resolver = Resolver::from_config(&config).unwrap();

    let address = resolver
        .get_address("example.com", Some(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(address.is_ipv4());
    assert_eq!(resolver.cache().lookup("example.com"), Some(address));
}

#[tokio::test]
#[ignore]
async fn native_path_resolves_via_public_nameserver() {
    init_tracing();
    let config = ResolverConfig::default()
        .with_nameservers(vec!["1.1.1.1".to_string()])
        .with_timeout_ms(5_000);
    let resolver = Resolver::from_config(&config).unwrap();

    let address = resolver.get_address("example.com", None).await.unwrap();

    assert!(address.is_ipv4());
    // Second call is answered from cache even with a tiny budget.
    let cached = resolver
        .get_address("example.com", Some(Duration::from_millis(1)))
        .await
        .unwrap();
    assert_eq!(cached, address);
}

// Embedded data from build.rs: brand domains, URL shorteners.

include!(concat!(env!("OUT_DIR"), "/brands_gen.rs"));
include!(concat!(env!("OUT_DIR"), "/shorteners_gen.rs"));

/// Built-in high-value brand domains, in look-alike scan order.
pub fn builtin_brands() -> &'static [&'static str] {
    BRANDS
}

/// Built-in URL shortener hostnames.
pub fn builtin_shorteners() -> &'static [&'static str] {
    SHORTENERS
}

/// Approximate the registrable domain as the last two non-empty labels.
///
/// Hosts with fewer than two labels yield whatever labels exist, so
/// `localhost` stays `localhost` and an empty host stays empty.
pub fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".").to_lowercase()
}

use anyhow::{Context as AnyhowContext, Result};
use std::net::SocketAddr;

/// Address `orgchart serve` listens on. Every address `bind` resolves to
/// must be loopback unless `public` is set.
pub async fn resolve_guarded_bind_addr(bind: &str, public: bool) -> Result<SocketAddr> {
    let candidates: Vec<SocketAddr> = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("Cannot resolve listen address {bind}"))?
        .collect();

    if let Some(exposed) = candidates.iter().find(|addr| !addr.ip().is_loopback()) {
        if !public {
            anyhow::bail!(
                "Refusing to bind to non-loopback address without --public: {bind} resolves to {exposed}"
            )
        }
        log::warn!("Serving on {exposed}; the org chart is reachable from other hosts");
    }

    pick_listen_addr(&candidates).with_context(|| format!("{bind} resolved to no addresses"))
}

/// IPv4 when both families resolve.
fn pick_listen_addr(candidates: &[SocketAddr]) -> Option<SocketAddr> {
    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
}

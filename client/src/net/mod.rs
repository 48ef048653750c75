//! Wallet and contract access for the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `controller` holds the operation logic and is runtime-agnostic;
//! `eip1193` binds it to the browser wallet and only exists in hydrate builds.

pub mod controller;
#[cfg(feature = "hydrate")]
pub mod eip1193;

#[cfg(feature = "hydrate")]
use crate::state::session::SignalStore;

#[cfg(feature = "hydrate")]
pub type BrowserController = controller::WhitelistController<eip1193::Eip1193Provider, SignalStore, eip1193::AlertNotifier>;

/// Build a controller over the injected wallet and the page's session signals.
///
/// # Errors
///
/// Returns [`contract::RpcError::Unavailable`] when no wallet is injected.
#[cfg(feature = "hydrate")]
pub fn browser_controller(store: SignalStore) -> Result<BrowserController, contract::RpcError> {
    let provider = eip1193::Eip1193Provider::detect()?;
    Ok(controller::WhitelistController::new(provider, store, eip1193::AlertNotifier))
}

/// Connect and run the follow-up reads, logging any failure.
#[cfg(feature = "hydrate")]
pub async fn run_connect(store: SignalStore) {
    match browser_controller(store) {
        Ok(c) => {
            if let Err(e) = c.connect_and_sync().await {
                leptos::logging::error!("connect failed: {e}");
            }
        }
        Err(e) => leptos::logging::error!("wallet unavailable: {e}"),
    }
}

/// Submit the join transaction, logging any failure.
#[cfg(feature = "hydrate")]
pub async fn run_join(store: SignalStore) {
    match browser_controller(store) {
        Ok(c) => match c.join().await {
            Ok(tx_hash) => leptos::logging::log!("joined whitelist in {tx_hash}"),
            Err(e) => leptos::logging::error!("join failed: {e}"),
        },
        Err(e) => leptos::logging::error!("wallet unavailable: {e}"),
    }
}

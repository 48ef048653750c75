//! Whitelist view-controller: wallet connect, membership, count, and join.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page event handlers construct a controller over the injected wallet and
//! the page's [`SessionStore`], run one operation, and decide how to report
//! the returned [`OpError`]. Only the wrong-network case is shown to the user
//! (through the [`Notifier`]); everything else is logged.
//!
//! CONCURRENCY
//! ===========
//! Each operation claims its [`Operation`] slot in the store for its whole
//! duration, so a double click or an overlapping page-load sync returns
//! `OpError::Busy` instead of issuing a second request. Different operations
//! may interleave.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::time::Duration;

use contract::alloy_primitives::{Address, B256};
use contract::{
    Provider, REQUIRED_CHAIN_ID, RECEIPT_POLL_INTERVAL, RpcError, WRONG_NETWORK_PROMPT, WhitelistContract,
    rpc, wait_for_receipt,
};
use leptos::logging::warn;

use crate::state::session::{Operation, SessionEvent, SessionStore};

/// Failure of one controller operation.
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },
    #[error("wallet is not connected")]
    NotConnected,
    #[error("wallet exposed no account")]
    NoAccount,
    #[error("{0} already in progress")]
    Busy(Operation),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Blocking user-facing notice (a browser `alert` in production).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Outcome of the follow-up reads that run after a successful connect.
#[derive(Debug)]
pub struct SyncReport {
    pub membership: Result<bool, OpError>,
    pub count: Result<u64, OpError>,
    pub capacity: Result<u64, OpError>,
}

struct InFlightGuard<'a, S: SessionStore> {
    store: &'a S,
    op: Operation,
}

impl<S: SessionStore> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        self.store.finish(self.op);
    }
}

pub struct WhitelistController<P, S, N> {
    provider: P,
    store: S,
    notifier: N,
    poll_interval: Duration,
}

impl<P: Provider, S: SessionStore, N: Notifier> WhitelistController<P, S, N> {
    pub fn new(provider: P, store: S, notifier: N) -> Self {
        Self { provider, store, notifier, poll_interval: RECEIPT_POLL_INTERVAL }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ask the wallet for authorization and verify the active network.
    ///
    /// On a network mismatch the user is notified once and the session is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::WrongNetwork`] on mismatch, or the wallet failure.
    pub async fn connect(&self) -> Result<(), OpError> {
        let _guard = self.begin(Operation::Connect)?;
        let granted = rpc::request_accounts(&self.provider).await?;
        self.ensure_network(true).await?;
        if granted.is_empty() {
            return Err(OpError::NoAccount);
        }
        self.store.dispatch(SessionEvent::Connected);
        Ok(())
    }

    /// [`Self::connect`], then the membership, count, and capacity reads
    /// concurrently. Follow-up failures are logged and reported but never
    /// undo the connection.
    ///
    /// # Errors
    ///
    /// Returns only the connect failure.
    pub async fn connect_and_sync(&self) -> Result<SyncReport, OpError> {
        self.connect().await?;
        let (membership, count, capacity) =
            futures::join!(self.check_membership(), self.refresh_count(), self.refresh_capacity());
        let report = SyncReport { membership, count, capacity };
        report.log_failures();
        Ok(report)
    }

    /// Read whether the current account is already whitelisted.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::NoAccount`] when the wallet is not authorized.
    pub async fn check_membership(&self) -> Result<bool, OpError> {
        let _guard = self.begin(Operation::CheckMembership)?;
        self.ensure_network(false).await?;
        let account = self.current_account().await?;
        let joined = WhitelistContract::deployed(&self.provider).is_whitelisted(account).await?;
        self.store.dispatch(SessionEvent::MembershipChecked(joined));
        Ok(joined)
    }

    /// Read the current whitelist size.
    ///
    /// # Errors
    ///
    /// Propagates network and contract failures; state is unchanged.
    pub async fn refresh_count(&self) -> Result<u64, OpError> {
        let _guard = self.begin(Operation::RefreshCount)?;
        self.ensure_network(false).await?;
        self.read_count().await
    }

    /// Read the whitelist capacity.
    ///
    /// # Errors
    ///
    /// Propagates network and contract failures; state is unchanged.
    pub async fn refresh_capacity(&self) -> Result<u64, OpError> {
        let _guard = self.begin(Operation::RefreshCapacity)?;
        self.ensure_network(false).await?;
        let max = WhitelistContract::deployed(&self.provider).max_whitelisted_addresses().await?;
        self.store.dispatch(SessionEvent::CapacityRefreshed(max));
        Ok(max)
    }

    /// Submit `addAddressToWhitelist()` and wait for it to be mined.
    ///
    /// `loading` is set once the wallet accepts the transaction and cleared on
    /// every exit path after that. After confirmation the count is re-read
    /// outside the [`Operation::RefreshCount`] slot, so an overlapping refresh
    /// cannot leave the pre-join count behind. That read only logs failures;
    /// the session is marked as joined either way.
    ///
    /// # Errors
    ///
    /// Returns rejections, reverts, and network failures; membership is unchanged.
    pub async fn join(&self) -> Result<B256, OpError> {
        let snapshot = self.store.snapshot();
        if !snapshot.wallet_connected {
            return Err(OpError::NotConnected);
        }
        if snapshot.loading {
            return Err(OpError::Busy(Operation::Join));
        }
        let guard = self.begin(Operation::Join)?;
        self.ensure_network(true).await?;
        let account = self.current_account().await?;
        let tx_hash = WhitelistContract::deployed(&self.provider)
            .add_address_to_whitelist(account)
            .await?;

        self.store.dispatch(SessionEvent::JoinSubmitted);
        if let Err(e) = wait_for_receipt(&self.provider, tx_hash, self.poll_interval).await {
            self.store.dispatch(SessionEvent::JoinFailed);
            return Err(e.into());
        }
        self.store.dispatch(SessionEvent::JoinConfirmed);
        drop(guard);

        if let Err(e) = self.read_count().await {
            warn!("count refresh after join failed: {e}");
        }
        self.store.dispatch(SessionEvent::MembershipChecked(true));
        Ok(tx_hash)
    }

    fn begin(&self, op: Operation) -> Result<InFlightGuard<'_, S>, OpError> {
        if !self.store.try_begin(op) {
            return Err(OpError::Busy(op));
        }
        Ok(InFlightGuard { store: &self.store, op })
    }

    async fn read_count(&self) -> Result<u64, OpError> {
        let count = WhitelistContract::deployed(&self.provider).num_addresses_whitelisted().await?;
        self.store.dispatch(SessionEvent::CountRefreshed(count));
        Ok(count)
    }

    async fn ensure_network(&self, notify: bool) -> Result<(), OpError> {
        let actual = rpc::chain_id(&self.provider).await?;
        if actual != REQUIRED_CHAIN_ID {
            if notify {
                self.notifier.notify(WRONG_NETWORK_PROMPT);
            }
            return Err(OpError::WrongNetwork { expected: REQUIRED_CHAIN_ID, actual });
        }
        Ok(())
    }

    async fn current_account(&self) -> Result<Address, OpError> {
        rpc::accounts(&self.provider)
            .await?
            .first()
            .copied()
            .ok_or(OpError::NoAccount)
    }
}

impl SyncReport {
    fn log_failures(&self) {
        if let Err(e) = &self.membership {
            warn!("membership check failed: {e}");
        }
        if let Err(e) = &self.count {
            warn!("count refresh failed: {e}");
        }
        if let Err(e) = &self.capacity {
            warn!("capacity refresh failed: {e}");
        }
    }
}

//! Wallet/whitelist session state and its reducer.
//!
//! DESIGN
//! ======
//! The session is a small `Copy` record. Every transition goes through
//! [`SessionState::apply`], which returns a fresh record, so the rendered
//! affordance is always a pure function of one snapshot.
//!
//! INVARIANTS
//! ==========
//! - `loading` is set only by `JoinSubmitted` and cleared by the join's
//!   confirmation or failure.
//! - `joined_whitelist` never goes back to `false` within a session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use leptos::prelude::*;

/// In-memory page session. Discarded on reload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub wallet_connected: bool,
    pub joined_whitelist: bool,
    /// A join transaction is submitted and not yet mined.
    pub loading: bool,
    pub whitelisted_count: u64,
    /// Contract capacity, once read.
    pub max_whitelisted: Option<u64>,
}

/// Completion events that move the session forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    MembershipChecked(bool),
    CountRefreshed(u64),
    CapacityRefreshed(u64),
    JoinSubmitted,
    JoinConfirmed,
    JoinFailed,
}

/// The single action/notice the page shows for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    Connect,
    Joined,
    Loading,
    Join,
}

impl Affordance {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connect => "Connect your wallet",
            Self::Joined => "Thanks for joining the Whitelist!",
            Self::Loading => "Loading...",
            Self::Join => "Join the Whitelist",
        }
    }
}

impl SessionState {
    /// Return the state after `event`.
    #[must_use]
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Connected => Self { wallet_connected: true, ..self },
            SessionEvent::MembershipChecked(joined) => Self {
                joined_whitelist: self.joined_whitelist || joined,
                ..self
            },
            SessionEvent::CountRefreshed(count) => Self { whitelisted_count: count, ..self },
            SessionEvent::CapacityRefreshed(max) => Self { max_whitelisted: Some(max), ..self },
            SessionEvent::JoinSubmitted => Self { loading: true, ..self },
            SessionEvent::JoinConfirmed | SessionEvent::JoinFailed => Self { loading: false, ..self },
        }
    }

    /// Select what the action area renders.
    ///
    /// `joined_whitelist` and `loading` only matter once connected, and a
    /// completed join wins over a stale loading flag.
    #[must_use]
    pub fn affordance(&self) -> Affordance {
        if !self.wallet_connected {
            Affordance::Connect
        } else if self.joined_whitelist {
            Affordance::Joined
        } else if self.loading {
            Affordance::Loading
        } else {
            Affordance::Join
        }
    }

    /// Text of the live count line.
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.max_whitelisted {
            Some(max) => format!(
                "{} have already joined the whitelist ({} spots total)",
                self.whitelisted_count, max
            ),
            None => format!("{} have already joined the whitelist", self.whitelisted_count),
        }
    }
}

/// Contract operations the page can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Connect,
    CheckMembership,
    RefreshCount,
    RefreshCapacity,
    Join,
}

impl Operation {
    fn bit(self) -> u8 {
        match self {
            Self::Connect => 1,
            Self::CheckMembership => 1 << 1,
            Self::RefreshCount => 1 << 2,
            Self::RefreshCapacity => 1 << 3,
            Self::Join => 1 << 4,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::CheckMembership => "membership check",
            Self::RefreshCount => "count refresh",
            Self::RefreshCapacity => "capacity refresh",
            Self::Join => "join",
        };
        f.write_str(name)
    }
}

/// Set of operations currently outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InFlight(u8);

impl InFlight {
    /// Mark `op` as started. Returns `false` if it was already running.
    pub fn begin(&mut self, op: Operation) -> bool {
        if self.contains(op) {
            return false;
        }
        self.0 |= op.bit();
        true
    }

    pub fn end(&mut self, op: Operation) {
        self.0 &= !op.bit();
    }

    #[must_use]
    pub fn contains(self, op: Operation) -> bool {
        self.0 & op.bit() != 0
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self.0 == 0
    }
}

/// Where the view-controller reads and writes session state.
pub trait SessionStore {
    fn snapshot(&self) -> SessionState;
    fn dispatch(&self, event: SessionEvent);
    /// Claim `op`; `false` if another call of the same kind is running.
    fn try_begin(&self, op: Operation) -> bool;
    fn finish(&self, op: Operation);
}

/// Session store backed by reactive signals provided as page context.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore {
    pub session: RwSignal<SessionState>,
    pub in_flight: RwSignal<InFlight>,
}

impl SignalStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(SessionState::default()),
            in_flight: RwSignal::new(InFlight::default()),
        }
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for SignalStore {
    fn snapshot(&self) -> SessionState {
        self.session.get_untracked()
    }

    fn dispatch(&self, event: SessionEvent) {
        self.session.update(|s| *s = s.apply(event));
    }

    fn try_begin(&self, op: Operation) -> bool {
        self.in_flight.try_update(|f| f.begin(op)).unwrap_or(false)
    }

    fn finish(&self, op: Operation) {
        self.in_flight.update(|f| f.end(op));
    }
}

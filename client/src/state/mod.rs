//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page has one piece of state: the wallet/whitelist session, provided
//! to components as a [`session::SignalStore`] context.

pub mod session;

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session from Leptos context and render one piece of
//! the page each.

pub mod action_button;
pub mod site_footer;

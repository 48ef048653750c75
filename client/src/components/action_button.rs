//! Stateful action area: connect, join, loading, or the thank-you notice.
//!
//! SYSTEM CONTEXT
//! ==============
//! Exactly one affordance is rendered, chosen by
//! [`SessionState::affordance`]. Clicks spawn controller operations on the
//! browser event loop; the session signals update as they complete.

#[cfg(test)]
#[path = "action_button_test.rs"]
mod action_button_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::session::{Affordance, SignalStore};

/// CSS class for an affordance.
fn affordance_class(affordance: Affordance) -> &'static str {
    match affordance {
        Affordance::Joined => "description",
        Affordance::Loading => "button button--loading",
        Affordance::Connect | Affordance::Join => "button",
    }
}

#[component]
pub fn ActionButton() -> impl IntoView {
    let store = expect_context::<SignalStore>();

    let on_connect = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(crate::net::run_connect(store));
    };
    let on_join = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(crate::net::run_join(store));
    };

    move || {
        let affordance = store.session.get().affordance();
        let class = affordance_class(affordance);
        let label = affordance.label();
        match affordance {
            Affordance::Connect => view! { <button class=class on:click=on_connect>{label}</button> }.into_any(),
            Affordance::Join => view! { <button class=class on:click=on_join>{label}</button> }.into_any(),
            Affordance::Loading => view! { <button class=class disabled=true>{label}</button> }.into_any(),
            Affordance::Joined => view! { <div class=class>{label}</div> }.into_any(),
        }
    }
}

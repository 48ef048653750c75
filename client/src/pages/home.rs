//! Landing page: collection blurb, live whitelist count, and the action area.
//!
//! SYSTEM CONTEXT
//! ==============
//! On hydration the page immediately attempts a wallet connection so returning
//! users see their membership without clicking. The connect itself runs
//! through the same guarded controller path as the button.

use leptos::prelude::*;

use crate::components::action_button::ActionButton;
use crate::components::site_footer::SiteFooter;
use crate::state::session::SignalStore;

pub const TITLE: &str = "Welcome to Virtual Gravity!";
pub const DESCRIPTION: &str = "Its an NFT collection for developers in Virtual Gravity";

#[component]
pub fn HomePage() -> impl IntoView {
    let store = expect_context::<SignalStore>();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if !store.session.get_untracked().wallet_connected {
            leptos::task::spawn_local(crate::net::run_connect(store));
        }
    });

    let count_label = move || store.session.get().count_label();

    view! {
        <div class="main">
            <div>
                <h1 class="title">{TITLE}</h1>
                <div class="description">{DESCRIPTION}</div>
                <div class="description">{count_label}</div>
                <ActionButton/>
            </div>
            <div>
                <img class="image" src="/crypto-devs.svg" alt=""/>
            </div>
        </div>
        <SiteFooter/>
    }
}

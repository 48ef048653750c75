//! Static page footer.

use leptos::prelude::*;

pub const FOOTER_LINK: &str = "https://www.virtual-gravity.com";

#[component]
pub fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="footer">
            "Made with \u{2764} by "
            <a href=FOOTER_LINK>"Virtual Gravity"</a>
        </footer>
    }
}

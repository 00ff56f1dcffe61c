//! Site footer: copyright line and social media links.

use crate::config::FooterConfig;
use maud::{Markup, html};

/// Site footer: copyright line and social links.
///
/// Each link is classed by network (`social-youtube`) so the stylesheet can
/// draw its icon; the title is kept for screen readers.
pub fn footer(settings: &FooterConfig) -> Markup {
    html! {
        footer.footer {
            p { (settings.text) }
            @if !settings.links.is_empty() {
                div.social-media {
                    @for link in &settings.links {
                        a class={ "social-" (link.network) } href=(link.url) aria-label=(link.title) {
                            span.is-sr-only { (link.title) }
                        }
                    }
                }
            }
        }
    }
}

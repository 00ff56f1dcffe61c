//! Navigation bar (home and section pages) and header (everything else).
//!
//! Both list one link per declared section, in declared order, and mark the
//! selected one. With fewer than two sections there is nothing to navigate
//! between and the list is left out.

use crate::context::PublishingContext;
use crate::types::{SectionId, absolute_path};
use maud::{Markup, html};

fn shows_section_links(ctx: &PublishingContext) -> bool {
    ctx.sections().len() > 1
}

/// Fixed top bar with the logo, site name, tagline and section links.
///
/// Without a selection (the home page) the bar also starts its entrance
/// animation.
pub fn navbar(ctx: &PublishingContext, selected: Option<SectionId>) -> Markup {
    let site = ctx.site();
    html! {
        div.navbar.is-fixed-top.animate-start[selected.is_none()] {
            a href="/" {
                div.has-text-centered.logo-outer {
                    @if let Some(logo) = &site.image {
                        figure.logo {
                            img src=(absolute_path(logo)) alt={ "The " (site.name) " logo" };
                        }
                    }
                    h1.title."is-1" style="text-transform: uppercase;" { (site.name) }
                    @if let Some(tagline) = &site.tagline {
                        h2.subtitle."is-2" { (tagline) }
                    }
                }
            }
            @if shows_section_links(ctx) {
                div.navbar-menu id="navbar" {
                    div.navbar-start {
                        @for section in ctx.sections() {
                            a.navbar-item.is-active[selected == Some(section.id)] href=(section.path) {
                                (section.title)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Compact header with the site name and section links.
pub fn header(ctx: &PublishingContext, selected: Option<SectionId>) -> Markup {
    html! {
        header {
            div.wrapper {
                a.site-name href="/" { (ctx.site().name) }
                @if shows_section_links(ctx) {
                    nav {
                        ul {
                            @for section in ctx.sections() {
                                li {
                                    a class=[(selected == Some(section.id)).then_some("selected")] href=(section.path) {
                                        (section.title)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContentSnapshot;
    use crate::test_helpers::*;

    fn context_with_sections(sections: Vec<SectionId>) -> PublishingContext {
        let mut site = site();
        site.sections = sections;
        context_with(site, ContentSnapshot::default())
    }

    #[test]
    fn header_lists_sections_in_declared_order() {
        let ctx = context_with_sections(vec![SectionId::Sponsorship, SectionId::About]);
        let html = header(&ctx, None).into_string();
        assert_eq!(positions(&html, "<li>").len(), 2);
        assert_in_order(
            &html,
            &[r#"href="/sponsorship">Sponsorship"#, r#"href="/about">About"#],
        );
    }

    #[test]
    fn header_omits_nav_with_one_section() {
        let ctx = context_with_sections(vec![SectionId::Robots]);
        let html = header(&ctx, Some(SectionId::Robots)).into_string();
        assert!(!html.contains("<nav>"));
        assert!(html.contains(r#"<a class="site-name" href="/">Demacia</a>"#));
    }

    #[test]
    fn header_omits_nav_with_no_sections() {
        let ctx = context_with_sections(vec![]);
        assert!(!header(&ctx, None).into_string().contains("<nav>"));
    }

    #[test]
    fn header_marks_selected_section() {
        let ctx = context_with_sections(SectionId::ALL.to_vec());
        let html = header(&ctx, Some(SectionId::Robots)).into_string();
        assert_eq!(positions(&html, r#"class="selected""#).len(), 1);
        assert!(html.contains(r#"<a class="selected" href="/robots">Robots</a>"#));
        assert!(html.contains(r#"<a href="/about">About</a>"#));
    }

    #[test]
    fn header_links_carry_no_empty_class() {
        let ctx = context_with_sections(SectionId::ALL.to_vec());
        for selected in [None, Some(SectionId::About)] {
            let html = header(&ctx, selected).into_string();
            assert!(!html.contains(r#"class="""#), "{html}");
        }
    }

    #[test]
    fn navbar_one_item_per_section() {
        let ctx = context_with_sections(SectionId::ALL.to_vec());
        let html = navbar(&ctx, None).into_string();
        assert_eq!(positions(&html, r#"class="navbar-item"#).len(), 3);
        assert_in_order(&html, &["/about", "/robots", "/sponsorship"]);
    }

    #[test]
    fn navbar_omits_menu_with_one_section() {
        let ctx = context_with_sections(vec![SectionId::About]);
        let html = navbar(&ctx, None).into_string();
        assert!(!html.contains("navbar-menu"));
        assert!(!html.contains("navbar-item"));
    }

    #[test]
    fn navbar_marks_active_section() {
        let ctx = context_with_sections(SectionId::ALL.to_vec());
        let html = navbar(&ctx, Some(SectionId::Sponsorship)).into_string();
        assert!(html.contains(r#"<a class="navbar-item is-active" href="/sponsorship">"#));
        assert_eq!(positions(&html, "is-active").len(), 1);
    }

    #[test]
    fn navbar_animates_only_without_selection() {
        let ctx = context_with_sections(SectionId::ALL.to_vec());
        assert!(
            navbar(&ctx, None)
                .into_string()
                .starts_with(r#"<div class="navbar is-fixed-top animate-start">"#)
        );
        assert!(
            navbar(&ctx, Some(SectionId::About))
                .into_string()
                .starts_with(r#"<div class="navbar is-fixed-top">"#)
        );
    }

    #[test]
    fn navbar_logo_and_tagline_are_optional() {
        let mut site = site();
        site.image = None;
        site.tagline = None;
        let ctx = context_with(site, ContentSnapshot::default());
        let html = navbar(&ctx, None).into_string();
        assert!(!html.contains("<figure"));
        assert!(!html.contains("subtitle"));
        assert!(html.contains("Demacia</h1>"));
    }

    #[test]
    fn section_titles_come_from_content() {
        let html = header(&sample_context(), None).into_string();
        assert!(html.contains(r#"<a href="/robots">Our Robots</a>"#));
    }
}

//! Page bodies, one function per [`super::View`] variant.

use super::Theme;
use super::footer::footer;
use super::image::{ImageRef, ResponsiveImage};
use super::lists::{item_list, tag_list as item_tags};
use super::navigation::{header, navbar};
use crate::context::{PublishingContext, TAG_LIST_PATH, tag_path};
use crate::types::{Index, Item, Page, Section, Tag};
use maud::{Markup, PreEscaped, html};

const SLIDESHOW_SCRIPT: &str = "/js/slides.js";

/// Full-width slideshow; the first slide and its control start active.
fn slideshow(slides: &[String]) -> (Markup, Vec<ImageRef>) {
    let pictures: Vec<ResponsiveImage> = slides
        .iter()
        .map(|path| ResponsiveImage::new(path, 100))
        .collect();
    let markup = html! {
        div.slideshow {
            div.slides {
                @for (idx, picture) in pictures.iter().enumerate() {
                    @let class = if idx == 0 { "slide active" } else { "slide" };
                    (picture.markup(class, "Slideshow"))
                }
            }
            div.controls {
                @for idx in 0..pictures.len() {
                    div.control.active[idx == 0] {}
                }
            }
            script src=(SLIDESHOW_SCRIPT) {}
        }
    };
    let images = pictures
        .into_iter()
        .map(ResponsiveImage::into_reference)
        .collect();
    (markup, images)
}

pub(super) fn index(index: &Index, ctx: &PublishingContext, theme: &Theme) -> (Markup, Vec<ImageRef>) {
    let (slides, images) = slideshow(&theme.hero.slides);
    let markup = html! {
        (navbar(ctx, None))
        section.hero.is-primary.is-bold {
            div.hero-body."px-0"."py-0".is-block {
                (slides)
            }
        }
        section.text.container.has-text-centered {
            (PreEscaped(&index.body))
        }
        (footer(&theme.footer))
        @for script in &theme.hero.scripts {
            script src=(script) {}
        }
    };
    (markup, images)
}

pub(super) fn section(section: &Section, ctx: &PublishingContext, theme: &Theme) -> Markup {
    html! {
        (navbar(ctx, Some(section.id)))
        section.text.container.has-text-centered {
            (PreEscaped(&section.body))
        }
        (footer(&theme.footer))
    }
}

pub(super) fn item(item: &Item, ctx: &PublishingContext, theme: &Theme) -> Markup {
    html! {
        (header(ctx, Some(item.section)))
        div.wrapper {
            article {
                div.content {
                    (PreEscaped(&item.body))
                }
                div.tags {
                    span { "Tagged with: " }
                    (item_tags(&item.tags))
                }
            }
        }
        (footer(&theme.footer))
    }
}

pub(super) fn page(page: &Page, ctx: &PublishingContext, theme: &Theme) -> Markup {
    html! {
        (header(ctx, None))
        div.wrapper {
            div.content {
                (PreEscaped(&page.body))
            }
        }
        (footer(&theme.footer))
    }
}

pub(super) fn tag_list(tags: &[&Tag], ctx: &PublishingContext, theme: &Theme) -> Markup {
    let mut sorted = tags.to_vec();
    sorted.sort();
    sorted.dedup();
    html! {
        (header(ctx, None))
        div.wrapper {
            h1 { "Browse all tags" }
            ul.all-tags {
                @for tag in sorted {
                    li.tag { a href=(tag_path(tag)) { (tag) } }
                }
            }
        }
        (footer(&theme.footer))
    }
}

pub(super) fn tag_detail(tag: &Tag, ctx: &PublishingContext, theme: &Theme) -> Markup {
    html! {
        (header(ctx, None))
        div.wrapper {
            h1 { "Tagged with " span.tag { (tag) } }
            a.browse-all href=(TAG_LIST_PATH) { "Browse all tags" }
            (item_list(&ctx.items_tagged_with(tag)))
        }
        (footer(&theme.footer))
    }
}

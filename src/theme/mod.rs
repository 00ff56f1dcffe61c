//! The Demacia theme: maps content to HTML documents.
//!
//! Rendering is a pure function of a [`View`] and the
//! [`PublishingContext`]. Nothing is written to disk here and no state is
//! shared between calls; images that need optimised variants are returned
//! alongside the markup in [`Rendered::images`] and collected by the caller.
//!
//! ## Views
//!
//! | View         | Path              | Chrome                          |
//! |--------------|-------------------|---------------------------------|
//! | `Index`      | `/`               | navbar, hero slideshow, footer  |
//! | `Section`    | `/<section>`      | navbar (section selected)       |
//! | `Item`       | `/<section>/<slug>` | header (owning section selected) |
//! | `Page`       | page path         | header                          |
//! | `TagList`    | `/tags`           | header                          |
//! | `TagDetail`  | `/tags/<slug>`    | header                          |
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

pub mod footer;
pub mod head;
pub mod image;
pub mod lists;
pub mod navigation;
mod views;

use crate::config::{FooterConfig, HeadConfig, HeroConfig, SiteConfig};
use crate::context::{PublishingContext, TAG_LIST_PATH, tag_path};
use crate::types::{Index, Item, Location, Page, Section, Tag};
use image::ImageRef;
use maud::{DOCTYPE, Markup, html};
use std::fmt;

/// One page of the site, carrying only what its view needs.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Index(&'a Index),
    Section(&'a Section),
    Item(&'a Item),
    Page(&'a Page),
    /// Every known tag, in any order; the view sorts them.
    TagList(Vec<&'a Tag>),
    TagDetail(&'a Tag),
}

impl View<'_> {
    /// Site path the view is published under.
    pub fn path(&self) -> String {
        match self {
            View::Index(_) => "/".to_string(),
            View::Section(section) => section.path.clone(),
            View::Item(item) => item.path.clone(),
            View::Page(page) => page.path.clone(),
            View::TagList(_) => TAG_LIST_PATH.to_string(),
            View::TagDetail(tag) => tag_path(tag),
        }
    }

    /// Head metadata for the view.
    pub fn location(&self) -> Location {
        match self {
            View::Index(index) => Location {
                title: index.title.clone(),
                description: index.description.clone(),
                path: self.path(),
                image: index.image.clone(),
            },
            View::Section(section) => Location {
                title: section.title.clone(),
                description: section.description.clone(),
                path: self.path(),
                image: None,
            },
            View::Item(item) => Location {
                title: item.title.clone(),
                description: item.description.clone(),
                path: self.path(),
                image: item.image.clone(),
            },
            View::Page(page) => Location {
                title: page.title.clone(),
                description: page.description.clone(),
                path: self.path(),
                image: page.image.clone(),
            },
            View::TagList(_) => Location {
                title: "Tags".to_string(),
                path: self.path(),
                ..Location::default()
            },
            View::TagDetail(tag) => Location {
                title: format!("Tagged with {tag}"),
                path: self.path(),
                ..Location::default()
            },
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            View::Index(_) => ViewKind::Index,
            View::Section(_) => ViewKind::Section,
            View::Item(_) => ViewKind::Item,
            View::Page(_) => ViewKind::Page,
            View::TagList(_) => ViewKind::TagList,
            View::TagDetail(_) => ViewKind::TagDetail,
        }
    }
}

/// Which variant a [`View`] is, without the borrowed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Index,
    Section,
    Item,
    Page,
    TagList,
    TagDetail,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Index => "index",
            ViewKind::Section => "section",
            ViewKind::Item => "item",
            ViewKind::Page => "page",
            ViewKind::TagList => "tag-list",
            ViewKind::TagDetail => "tag-detail",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered document and the images it references.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub markup: Markup,
    pub images: Vec<ImageRef>,
}

impl Rendered {
    fn text(markup: Markup) -> Self {
        Self {
            markup,
            images: Vec::new(),
        }
    }

    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

/// Theme settings, split out of the site configuration.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub head: HeadConfig,
    pub hero: HeroConfig,
    pub footer: FooterConfig,
}

impl Theme {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            head: config.head.clone(),
            hero: config.hero.clone(),
            footer: config.footer.clone(),
        }
    }

    /// Render a complete HTML document for `view`.
    pub fn render(&self, view: &View, ctx: &PublishingContext) -> Rendered {
        let (body_class, body) = match view {
            View::Index(index) => {
                let (markup, images) = views::index(index, ctx, self);
                let document = self.document(view, ctx, None, markup);
                return Rendered {
                    markup: document,
                    images,
                };
            }
            View::Section(section) => (
                Some("has-navbar-fixed-top"),
                views::section(section, ctx, self),
            ),
            View::Item(item) => (Some("item-page"), views::item(item, ctx, self)),
            View::Page(page) => (None, views::page(page, ctx, self)),
            View::TagList(tags) => (None, views::tag_list(tags, ctx, self)),
            View::TagDetail(tag) => (None, views::tag_detail(tag, ctx, self)),
        };
        Rendered::text(self.document(view, ctx, body_class, body))
    }

    fn document(
        &self,
        view: &View,
        ctx: &PublishingContext,
        body_class: Option<&str>,
        body: Markup,
    ) -> Markup {
        let site = ctx.site();
        html! {
            (DOCTYPE)
            html lang=(site.language) {
                (head::head(&view.location(), site, &self.head))
                body class=[body_class] {
                    (body)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::SectionId;

    fn render(view: &View) -> String {
        let ctx = sample_context();
        Theme::default().render(view, &ctx).into_string()
    }

    #[test]
    fn tag_views_have_fixed_paths() {
        let tag = Tag::new("Build Season");
        assert_eq!(View::TagDetail(&tag).path(), "/tags/build-season");
        assert_eq!(View::TagList(vec![&tag]).path(), "/tags");
    }

    #[test]
    fn tag_view_titles() {
        let tag = Tag::new("robot");
        assert_eq!(View::TagDetail(&tag).location().title, "Tagged with robot");
        assert_eq!(View::TagList(vec![]).location().title, "Tags");
    }

    #[test]
    fn view_kinds_cover_every_variant() {
        let ctx = sample_context();
        let kinds: Vec<ViewKind> = ctx.views().iter().map(View::kind).collect();
        assert_eq!(kinds[0], ViewKind::Index);
        assert_eq!(kinds[1], ViewKind::Section);
        assert_eq!(kinds[2], ViewKind::Item);
        assert_eq!(kinds.last(), Some(&ViewKind::TagList));
        assert!(kinds.contains(&ViewKind::Page));
        assert!(kinds.contains(&ViewKind::TagDetail));
        assert_eq!(ViewKind::TagDetail.to_string(), "tag-detail");
    }

    #[test]
    fn item_location_carries_image() {
        let ctx = sample_context();
        let mut item = find_item(&ctx, "the-team").clone();
        item.image = Some("/img/team.jpg".into());
        let location = View::Item(&item).location();
        assert_eq!(location.path, "/about/the-team");
        assert_eq!(location.image.as_deref(), Some("/img/team.jpg"));
    }

    #[test]
    fn documents_start_with_doctype_and_lang() {
        let ctx = sample_context();
        let html = render(&View::Index(ctx.index()));
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\"><head>"));
    }

    #[test]
    fn untitled_index_uses_site_name() {
        let ctx = sample_context();
        assert!(render(&View::Index(ctx.index())).contains("<title>Demacia</title>"));
    }

    #[test]
    fn body_classes_per_view() {
        let ctx = sample_context();
        let section = ctx.section(SectionId::About).unwrap();
        assert!(render(&View::Section(section)).contains(r#"<body class="has-navbar-fixed-top">"#));
        let item = find_item(&ctx, "the-team");
        assert!(render(&View::Item(item)).contains(r#"<body class="item-page">"#));
        assert!(render(&View::Page(&ctx.pages()[0])).contains("<body>"));
    }

    #[test]
    fn only_index_references_images() {
        let ctx = sample_context();
        let theme = Theme::default();
        for view in ctx.views() {
            let rendered = theme.render(&view, &ctx);
            match view {
                View::Index(_) => assert_eq!(rendered.images.len(), theme.hero.slides.len()),
                _ => assert!(rendered.images.is_empty(), "{} has images", view.path()),
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let ctx = sample_context();
        let theme = Theme::default();
        for view in ctx.views() {
            let first = theme.render(&view, &ctx).into_string();
            let second = theme.render(&view, &ctx).into_string();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn theme_from_config_copies_settings() {
        let mut config = SiteConfig::default();
        config.footer.text = "Demacia 2021".into();
        let theme = Theme::from_config(&config);
        assert_eq!(theme.footer.text, "Demacia 2021");
        assert_eq!(theme.hero.slides, config.hero.slides);
    }
}

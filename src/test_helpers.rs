//! Shared test utilities for the demacia-site test suite.
//!
//! Provides snapshot builders, a sample context, lookup helpers, and HTML
//! assertions used across module tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let ctx = sample_context();
//! let item = find_item(&ctx, "infinite-recharge");
//! assert_eq!(tag_names(&item.tags), vec!["robot", "2020"]);
//! ```

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::context::{ContentSnapshot, ItemSnapshot, PageSnapshot, PublishingContext, SectionSnapshot};
use crate::types::{Item, SectionId, Site, Tag};

// =========================================================================
// Builders
// =========================================================================

/// The stock Demacia site record.
pub fn site() -> Site {
    SiteConfig::default().site()
}

/// Midnight UTC on an ISO `YYYY-MM-DD` date.
pub fn date(day: &str) -> DateTime<Utc> {
    format!("{day}T00:00:00Z")
        .parse()
        .unwrap_or_else(|e| panic!("bad test date '{day}': {e}"))
}

pub fn item_snapshot(slug: &str, day: &str, tags: &[&str]) -> ItemSnapshot {
    ItemSnapshot {
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        description: format!("About {slug}"),
        body: format!("<p>{slug} body</p>"),
        date: date(day),
        tags: tags.iter().map(|t| Tag::new(*t)).collect(),
        image: None,
    }
}

pub fn section_snapshot(id: SectionId, items: Vec<ItemSnapshot>) -> SectionSnapshot {
    SectionSnapshot {
        id,
        title: None,
        description: String::new(),
        body: format!("<p>{id} section</p>"),
        items,
    }
}

pub fn context_with(site: Site, snapshot: ContentSnapshot) -> PublishingContext {
    PublishingContext::new(site, snapshot).unwrap()
}

/// A small site: three items over two sections, four tags, one page.
///
/// Tags in first-seen order: `team`, `robot`, `2019`, `2020`.
pub fn sample_context() -> PublishingContext {
    // Authored oldest-first, so date sorting is observable.
    let mut robots = section_snapshot(
        SectionId::Robots,
        vec![
            item_snapshot("destination-deep-space", "2019-02-15", &["robot", "2019"]),
            item_snapshot("infinite-recharge", "2020-02-20", &["robot", "2020"]),
        ],
    );
    robots.title = Some("Our Robots".to_string());
    let snapshot = ContentSnapshot {
        index: crate::context::IndexSnapshot {
            body: "<p>Welcome to Demacia</p>".to_string(),
            ..Default::default()
        },
        sections: vec![
            section_snapshot(
                SectionId::About,
                vec![item_snapshot("the-team", "2020-09-01", &["team"])],
            ),
            robots,
        ],
        pages: vec![PageSnapshot {
            path: "/contact".to_string(),
            title: "Contact".to_string(),
            description: "How to reach us".to_string(),
            body: "<p>Write to us</p>".to_string(),
            image: None,
        }],
    };
    context_with(site(), snapshot)
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by slug. Panics if not found.
pub fn find_item<'a>(ctx: &'a PublishingContext, slug: &str) -> &'a Item {
    ctx.items().find(|i| i.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = ctx.items().map(|i| i.slug.as_str()).collect();
        panic!("item '{slug}' not found. Available: {slugs:?}")
    })
}

pub fn tag_names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.as_str()).collect()
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Byte offsets of every occurrence of `needle`.
pub fn positions(html: &str, needle: &str) -> Vec<usize> {
    html.match_indices(needle).map(|(i, _)| i).collect()
}

/// Assert that `needles` appear in `html` in the given order.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match html[from..].find(needle) {
            Some(offset) => from += offset + needle.len(),
            None => panic!("'{needle}' missing or out of order in:\n{html}"),
        }
    }
}

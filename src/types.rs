//! Domain model shared by the context, theme, and generation stages.
//!
//! Everything here is immutable once built. The [`crate::context`] module is
//! the only place that constructs sections and items from a content snapshot;
//! the theme only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of sections the site can declare.
///
/// Configuration picks an ordered subset; the order there is the navigation
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    About,
    Robots,
    Sponsorship,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [SectionId::About, SectionId::Robots, SectionId::Sponsorship];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::About => "about",
            SectionId::Robots => "robots",
            SectionId::Sponsorship => "sponsorship",
        }
    }

    /// Title used when the content snapshot does not provide one.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionId::About => "About",
            SectionId::Robots => "Robots",
            SectionId::Sponsorship => "Sponsorship",
        }
    }

    /// Site path of the section listing page, e.g. `/robots`.
    pub fn path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A case-sensitive label cross-referencing items across sections.
///
/// Ordering is lexicographic on the tag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL-safe form used in `/tags/<slug>`.
    pub fn slug(&self) -> String {
        slug::slugify(&self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Site-wide configuration record, built from [`crate::config::SiteConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Base URL, e.g. `https://demacia5635.github.io/`.
    pub url: String,
    pub name: String,
    pub description: String,
    /// BCP 47 language tag for the `lang` attribute.
    pub language: String,
    pub favicon: Option<String>,
    /// Default social preview image (also used as the navbar logo).
    pub image: Option<String>,
    pub tagline: Option<String>,
    /// Declared sections, in navigation order. Unique.
    pub sections: Vec<SectionId>,
}

impl Site {
    /// Absolute URL for a site path.
    ///
    /// ```
    /// # use demacia_site::types::Site;
    /// # let mut site = demacia_site::config::SiteConfig::default().site();
    /// site.url = "https://example.org/".into();
    /// assert_eq!(site.url_for("/about"), "https://example.org/about");
    /// assert_eq!(site.url_for(""), "https://example.org/");
    /// ```
    pub fn url_for(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Root-relative form of a configured path: `favicon.png` → `/favicon.png`.
pub fn absolute_path(path: &str) -> String {
    if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// The site's home page content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: Option<String>,
}

/// A top-level grouping of items with its own listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub path: String,
    pub description: String,
    pub body: String,
    pub items: Vec<Item>,
}

/// A dated, taggable piece of content owned by exactly one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Owning section.
    pub section: SectionId,
    pub slug: String,
    /// `/<section>/<slug>`.
    pub path: String,
    pub title: String,
    pub description: String,
    /// Already-rendered HTML.
    pub body: String,
    pub date: DateTime<Utc>,
    /// Deduplicated, in authored order.
    pub tags: Vec<Tag>,
    pub image: Option<String>,
}

impl Item {
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Standalone content outside any section.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub path: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: Option<String>,
}

/// Head metadata of whatever is being rendered.
///
/// Empty `title` and `description` fall back to the site's own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub title: String,
    pub description: String,
    pub path: String,
    pub image: Option<String>,
}

//! The publishing context: a read-only snapshot of the whole site.
//!
//! The external content pipeline parses markdown and hands over a JSON
//! snapshot ([`ContentSnapshot`]). [`PublishingContext::new`] pairs it with
//! the configured [`Site`], fills in sections the snapshot leaves out, wires
//! every item to its owning section, and from then on only answers queries.
//!
//! ```json
//! {
//!   "index": { "body": "<p>Welcome</p>" },
//!   "sections": [
//!     {
//!       "id": "robots",
//!       "title": "Our Robots",
//!       "body": "<p>Every season we build one.</p>",
//!       "items": [
//!         {
//!           "slug": "infinite-recharge",
//!           "title": "Infinite Recharge",
//!           "description": "Our 2020 robot",
//!           "body": "<p>...</p>",
//!           "date": "2020-02-20T00:00:00Z",
//!           "tags": ["2020", "robot"]
//!         }
//!       ]
//!     }
//!   ],
//!   "pages": [{ "path": "/contact", "title": "Contact", "body": "<p>...</p>" }]
//! }
//! ```

use crate::theme::View;
use crate::types::{Index, Item, Page, Section, SectionId, Site, Tag};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("content has section `{0}`, which the site does not declare")]
    UndeclaredSection(SectionId),
    #[error("content lists section `{0}` more than once")]
    DuplicateSection(SectionId),
    #[error("path `{0}` has a `.` or `..` segment")]
    InvalidPath(String),
    #[error("more than one page publishes to `{0}`")]
    DuplicatePath(String),
}

/// Content as handed over by the external markdown pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentSnapshot {
    pub index: IndexSnapshot,
    pub sections: Vec<SectionSnapshot>,
    pub pages: Vec<PageSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexSnapshot {
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSnapshot {
    pub id: SectionId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSnapshot {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSnapshot {
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Site path of the tag-list page.
pub const TAG_LIST_PATH: &str = "/tags";

/// Site path of a tag-detail page: `/tags/<slug>`.
pub fn tag_path(tag: &Tag) -> String {
    format!("{TAG_LIST_PATH}/{}", tag.slug())
}

/// Read a content snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<ContentSnapshot, ContextError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read-only view over the site and all of its content.
#[derive(Debug, Clone)]
pub struct PublishingContext {
    site: Site,
    index: Index,
    sections: Vec<Section>,
    pages: Vec<Page>,
}

impl PublishingContext {
    pub fn new(site: Site, snapshot: ContentSnapshot) -> Result<Self, ContextError> {
        let mut provided: Vec<SectionSnapshot> = Vec::with_capacity(snapshot.sections.len());
        for section in snapshot.sections {
            if !site.sections.contains(&section.id) {
                return Err(ContextError::UndeclaredSection(section.id));
            }
            if provided.iter().any(|s| s.id == section.id) {
                return Err(ContextError::DuplicateSection(section.id));
            }
            for item in &section.items {
                check_segments(&item.slug)?;
            }
            provided.push(section);
        }

        let sections = site
            .sections
            .iter()
            .map(|&id| match provided.iter().position(|s| s.id == id) {
                Some(pos) => build_section(provided.swap_remove(pos)),
                None => {
                    log::debug!("section `{id}` has no content, rendering it empty");
                    empty_section(id)
                }
            })
            .collect();

        let index = Index {
            title: snapshot.index.title,
            description: snapshot.index.description,
            body: snapshot.index.body,
            image: snapshot.index.image,
        };

        let pages = snapshot
            .pages
            .into_iter()
            .map(|p| {
                check_segments(&p.path)?;
                Ok(Page {
                    path: crate::types::absolute_path(&p.path),
                    title: p.title,
                    description: p.description,
                    body: p.body,
                    image: p.image,
                })
            })
            .collect::<Result<Vec<_>, ContextError>>()?;

        let ctx = Self {
            site,
            index,
            sections,
            pages,
        };
        ctx.check_unique_paths()?;
        Ok(ctx)
    }

    /// Every view must land in its own output file. `/tags/` and `/tags`
    /// share one, so paths are compared without empty segments.
    fn check_unique_paths(&self) -> Result<(), ContextError> {
        let mut seen = HashSet::new();
        for view in self.views() {
            let path = view.path();
            if !seen.insert(path_key(&path)) {
                return Err(ContextError::DuplicatePath(path));
            }
        }
        Ok(())
    }

    /// Load `path` and build a context against `site`.
    pub fn load(site: Site, path: &Path) -> Result<Self, ContextError> {
        Self::new(site, load_snapshot(path)?)
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Sections in navigation order; one per declared section id.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All items, section by section, in authored order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Items carrying `tag`, newest first. Equal dates keep authored order.
    pub fn items_tagged_with(&self, tag: &Tag) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items().filter(|item| item.has_tag(tag)).collect();
        // `sort_by` is stable
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    /// Every tag used by any item, in first-seen order.
    pub fn all_tags(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = Vec::new();
        for tag in self.items().flat_map(|item| item.tags.iter()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    pub fn tag_list_path(&self) -> &'static str {
        TAG_LIST_PATH
    }

    pub fn tag_path(&self, tag: &Tag) -> String {
        tag_path(tag)
    }

    /// Every page the site publishes, in output order.
    pub fn views(&self) -> Vec<View<'_>> {
        let mut views = vec![View::Index(&self.index)];
        for section in &self.sections {
            views.push(View::Section(section));
            views.extend(section.items.iter().map(View::Item));
        }
        views.extend(self.pages.iter().map(View::Page));
        let tags = self.all_tags();
        if !tags.is_empty() {
            views.extend(tags.iter().map(|&tag| View::TagDetail(tag)));
            views.push(View::TagList(tags));
        }
        views
    }
}

fn build_section(snapshot: SectionSnapshot) -> Section {
    let id = snapshot.id;
    let path = id.path();
    let items = snapshot
        .items
        .into_iter()
        .map(|item| Item {
            section: id,
            path: format!("{}/{}", path, item.slug.trim_matches('/')),
            slug: item.slug,
            title: item.title,
            description: item.description,
            body: item.body,
            date: item.date,
            tags: dedup_tags(item.tags),
            image: item.image,
        })
        .collect();
    Section {
        id,
        title: snapshot
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| id.default_title().to_string()),
        path,
        description: snapshot.description,
        body: snapshot.body,
        items,
    }
}

/// Content-supplied paths may not carry `.` or `..` segments.
fn check_segments(path: &str) -> Result<(), ContextError> {
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(ContextError::InvalidPath(path.to_string()));
    }
    Ok(())
}

fn path_key(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn empty_section(id: SectionId) -> Section {
    Section {
        id,
        title: id.default_title().to_string(),
        path: id.path(),
        description: String::new(),
        body: String::new(),
        items: Vec::new(),
    }
}

fn dedup_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut unique: Vec<Tag> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

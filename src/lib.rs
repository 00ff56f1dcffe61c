//! # Demacia Site
//!
//! Static site generator and theme for the Demacia FRC team website.
//!
//! Content (sections of dated, tagged items, plus standalone pages) arrives
//! as a JSON snapshot from the markdown pipeline. This crate maps it onto
//! HTML documents with a fixed theme, writes them to disk, and tells the
//! downstream tools (image optimiser, CSS tooling, deployment) what to do.
//!
//! # Architecture
//!
//! ```text
//! config.toml ─┐
//!              ├─→ PublishingContext ─→ View ─→ Theme::render ─→ Output/<path>/index.html
//! content.json ┘                                        └──────→ Output/images.json
//! ```
//!
//! Rendering is a pure function from a view and the context to markup.
//! Views are a closed enum, so every page kind is handled in one `match`.
//! Images a page references are returned next to its markup, never stored
//! in shared state, which keeps rendering order-independent.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, merging, and validation |
//! | [`types`] | Domain model: site, sections, items, pages, tags |
//! | [`context`] | Content snapshot parsing and the read-only publishing context |
//! | [`theme`] | Maud templates: head, navigation, views, responsive images |
//! | [`pipeline`] | Build stages and their artifact contracts |
//! | [`generate`] | Writes pages, `images.json`, copies resources, runs a build |
//! | [`sitemap`] | `sitemap.xml` for every published page |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `env_logger` setup |

pub mod config;
pub mod context;
pub mod generate;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod sitemap;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

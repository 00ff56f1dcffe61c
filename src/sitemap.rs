//! `sitemap.xml` for the published views.

use crate::context::PublishingContext;
use crate::theme::View;
use std::fs;
use std::path::Path;

pub const SITEMAP_FILENAME: &str = "sitemap.xml";

/// A single `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    /// `YYYY-MM-DD`.
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_xml(&self.loc)));
        if let Some(ref lastmod) = self.lastmod {
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
        }
        xml.push_str("</url>");
        xml
    }
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One entry per view, sorted by URL. Items carry their date as `lastmod`.
pub fn entries(ctx: &PublishingContext) -> Vec<SitemapEntry> {
    let site = ctx.site();
    let mut entries: Vec<SitemapEntry> = ctx
        .views()
        .iter()
        .map(|view| SitemapEntry {
            loc: site.url_for(&view.path()),
            lastmod: match view {
                View::Item(item) => Some(item.date.format("%Y-%m-%d").to_string()),
                _ => None,
            },
        })
        .collect();
    entries.sort_by(|a, b| a.loc.cmp(&b.loc));
    entries
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">");
    for entry in entries {
        xml.push_str(&entry.to_xml());
    }
    xml.push_str("</urlset>");
    xml
}

/// Write `sitemap.xml` into `output_dir`. Returns the number of URLs.
pub fn generate_sitemap(ctx: &PublishingContext, output_dir: &Path) -> std::io::Result<usize> {
    let entries = entries(ctx);
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(SITEMAP_FILENAME);
    fs::write(&path, render_sitemap(&entries))?;
    log::info!(
        target: "sitemap",
        "Generated sitemap with {} URLs at {}",
        entries.len(),
        path.display()
    );
    Ok(entries.len())
}

//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity
//! (section, item, page, tag, stage) leads with its positional index and
//! title; output files and contracts follow as `→` targets or indented
//! context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 About (1 items)
//!     001 the team
//!         Date: 2020-09-01
//!         Tags: team
//! 002 Our Robots (2 items)
//!     ...
//!
//! Pages
//! 001 Contact → /contact
//!
//! Tags
//!     2019 (1), 2020 (1), robot (2), team (1)
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 About → about/index.html
//!     001 the team → about/the-team/index.html
//! ...
//! Generated 13 pages, 4 images
//! ```
//!
//! ## Plan
//!
//! ```text
//! 001 prepare-images-for-optimization (external)
//! 002 add-markdown-files (external)
//!     Writes: Content
//! 003 add-slides (external)
//!     Reads: Content
//!     Writes: Content
//! 004 copy-resources
//!     Reads: Resources
//!     Writes: Assets
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::context::PublishingContext;
use crate::generate::{BuildReport, GenerateReport, StageOutcome};
use crate::pipeline::{Artifact, Pipeline};
use crate::theme::ViewKind;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional item count.
///
/// ```text
/// 001 Our Robots (2 items)
/// 001 Contact
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} items)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn artifact_list(artifacts: &[Artifact]) -> String {
    artifacts
        .iter()
        .map(|a| format!("{a:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory of a publishing context.
pub fn format_check_output(ctx: &PublishingContext) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Sections".to_string());
    for (i, section) in ctx.sections().iter().enumerate() {
        lines.push(entity_header(i + 1, &section.title, Some(section.items.len())));
        let summary = strip_html_tags(&section.body);
        let summary = summary.trim();
        if !summary.is_empty() {
            lines.push(format!("{}Body: {}", indent(1), truncate_desc(summary, 40)));
        }
        for (j, item) in section.items.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), entity_header(j + 1, &item.title, None)));
            lines.push(format!("{}Date: {}", indent(2), item.date.format("%Y-%m-%d")));
            if !item.tags.is_empty() {
                let tags: Vec<&str> = item.tags.iter().map(|t| t.as_str()).collect();
                lines.push(format!("{}Tags: {}", indent(2), tags.join(", ")));
            }
        }
    }

    if !ctx.pages().is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in ctx.pages().iter().enumerate() {
            lines.push(format!(
                "{} \u{2192} {}",
                entity_header(i + 1, &page.title, None),
                page.path
            ));
        }
    }

    let mut tags = ctx.all_tags();
    if !tags.is_empty() {
        tags.sort();
        let counts: Vec<String> = tags
            .iter()
            .map(|tag| format!("{} ({})", tag, ctx.items_tagged_with(tag).len()))
            .collect();
        lines.push(String::new());
        lines.push("Tags".to_string());
        lines.push(format!("{}{}", indent(1), counts.join(", ")));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(ctx: &PublishingContext) {
    for line in format_check_output(ctx) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generated pages, items nested under their section.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut sections = 0;
    let mut items = 0;
    let mut others = 0;

    for page in &report.pages {
        let target = page.file.display();
        match page.kind {
            ViewKind::Index => lines.push(format!("Home \u{2192} {}", target)),
            ViewKind::Section => {
                sections += 1;
                items = 0;
                lines.push(format!(
                    "{} \u{2192} {}",
                    entity_header(sections, &page.title, None),
                    target
                ));
            }
            ViewKind::Item => {
                items += 1;
                lines.push(format!(
                    "{}{} \u{2192} {}",
                    indent(1),
                    entity_header(items, &page.title, None),
                    target
                ));
            }
            ViewKind::Page | ViewKind::TagList | ViewKind::TagDetail => {
                if others == 0 {
                    lines.push(String::new());
                    lines.push("Pages".to_string());
                }
                others += 1;
                lines.push(format!(
                    "{}{} \u{2192} {}",
                    indent(1),
                    entity_header(others, &page.title, None),
                    target
                ));
            }
        }
    }

    lines.push(format!(
        "Generated {} pages, {} images",
        report.pages.len(),
        report.images.len()
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Format pipeline stages with their contracts.
pub fn format_plan_output(pipeline: &Pipeline) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, stage) in pipeline.stages().iter().enumerate() {
        let header = entity_header(i + 1, stage.name(), None);
        if stage.is_internal() {
            lines.push(header);
        } else {
            lines.push(format!("{} (external)", header));
        }
        if !stage.reads().is_empty() {
            lines.push(format!("{}Reads: {}", indent(1), artifact_list(stage.reads())));
        }
        if !stage.writes().is_empty() {
            lines.push(format!("{}Writes: {}", indent(1), artifact_list(stage.writes())));
        }
    }
    lines
}

/// Print plan output to stdout.
pub fn print_plan_output(pipeline: &Pipeline) {
    for line in format_plan_output(pipeline) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format one line per stage, followed by the generate output.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (stage, outcome)) in report.stages.iter().enumerate() {
        let detail = match outcome {
            StageOutcome::Copied(n) => format!("copied {} files", n),
            StageOutcome::Generated(generated) => format!(
                "{} pages, {} images",
                generated.pages.len(),
                generated.images.len()
            ),
            StageOutcome::Sitemap(n) => format!("{} URLs", n),
            StageOutcome::HandedOff => "handed off".to_string(),
        };
        lines.push(format!("{}: {}", entity_header(i + 1, stage.name(), None), detail));
    }
    if let Some(generated) = report.generated() {
        lines.push(String::new());
        lines.extend(format_generate_output(generated));
    }
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

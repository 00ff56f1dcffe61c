//! Responsive `<picture>` elements.
//!
//! Every image is listed at four breakpoints. For a display width of `p`% of
//! the viewport, the candidate for screen width `s` is `round(s * p / 100)`
//! pixels wide and lives next to the original as
//! `<stem>-<pixels>px.webp`. The external optimiser produces those files from
//! the [`ImageRef`]s the theme returns.
//!
//! ```text
//! /img/slides/1.jpg at 50%:
//!   srcset  /img/slides/1-384px.webp 384w, /img/slides/1-512px.webp 512w, ...
//!   sizes   (max-width: 768px) 50vw, (max-width: 1024px) 50vw, (max-width: 1216px) 50vw, 50vw
//!   img     /img/slides/1.jpg
//! ```

use maud::{Markup, html};
use serde::Serialize;

/// Screen widths the candidates are computed for, smallest first.
pub const SCREEN_WIDTHS: [u32; 4] = [768, 1024, 1216, 1408];

/// Format every candidate is converted to.
const VARIANT_EXTENSION: &str = "webp";
const VARIANT_MIME: &str = "image/webp";

/// Source formats kept as-is for the `<img>` fallback.
const LOSSLESS_EXTENSIONS: [&str; 1] = ["png"];

/// Fallback format for everything else.
const FALLBACK_EXTENSION: &str = "jpg";

/// An image the optimiser has to produce variants for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef {
    pub path: String,
    /// Intended display width, as a percentage of the viewport.
    pub width_percentage: u32,
}

/// One breakpoint candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageVariant {
    pub screen_width: u32,
    pub pixel_width: u32,
    pub file: String,
}

impl ImageRef {
    /// # Panics
    ///
    /// If `path` has no file extension.
    pub fn variants(&self) -> Vec<ImageVariant> {
        let (stem, _) = expect_extension(&self.path);
        variants_for(stem, self.width_percentage)
    }
}

/// Candidate width for `screen_width` at `width_percentage`, rounded half away from zero.
pub fn pixel_width(screen_width: u32, width_percentage: u32) -> u32 {
    (f64::from(screen_width) * f64::from(width_percentage) / 100.0).round() as u32
}

/// Split `dir/name.ext` into `("dir/name", "ext")`.
///
/// `None` when the last path segment has no extension, or is only an
/// extension (`.hidden`).
pub fn split_extension(path: &str) -> Option<(&str, &str)> {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let dot = file_start + path[file_start..].rfind('.')?;
    let extension = &path[dot + 1..];
    if dot == file_start || extension.is_empty() {
        return None;
    }
    Some((&path[..dot], extension))
}

fn expect_extension(path: &str) -> (&str, &str) {
    split_extension(path)
        .unwrap_or_else(|| panic!("image path `{path}` has no file extension"))
}

fn variants_for(stem: &str, width_percentage: u32) -> Vec<ImageVariant> {
    SCREEN_WIDTHS
        .iter()
        .map(|&screen_width| {
            let pixel_width = pixel_width(screen_width, width_percentage);
            ImageVariant {
                screen_width,
                pixel_width,
                file: format!("{stem}-{pixel_width}px.{VARIANT_EXTENSION}"),
            }
        })
        .collect()
}

/// A `<picture>` with its breakpoint candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveImage {
    reference: ImageRef,
    fallback: String,
    variants: Vec<ImageVariant>,
}

impl ResponsiveImage {
    /// # Panics
    ///
    /// If `path` has no file extension. Callers pass configured or authored
    /// image paths, which are validated up front.
    pub fn new(path: &str, width_percentage: u32) -> Self {
        let (stem, extension) = expect_extension(path);
        let lossless = LOSSLESS_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext));
        let fallback = if lossless {
            path.to_string()
        } else {
            format!("{stem}.{FALLBACK_EXTENSION}")
        };
        Self {
            reference: ImageRef {
                path: path.to_string(),
                width_percentage,
            },
            fallback,
            variants: variants_for(stem, width_percentage),
        }
    }

    pub fn variants(&self) -> &[ImageVariant] {
        &self.variants
    }

    /// `srcset`: each candidate file with its `w` descriptor.
    pub fn srcset(&self) -> String {
        self.variants
            .iter()
            .map(|v| format!("{} {}w", v.file, v.pixel_width))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `sizes`: a max-width condition per breakpoint, the largest one unconditional.
    pub fn sizes(&self) -> String {
        let pct = self.reference.width_percentage;
        let last = self.variants.len().saturating_sub(1);
        self.variants
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                if idx == last {
                    format!("{pct}vw")
                } else {
                    format!("(max-width: {}px) {pct}vw", v.screen_width)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `src` of the `<img>` fallback.
    pub fn fallback_src(&self) -> &str {
        &self.fallback
    }

    pub fn reference(&self) -> &ImageRef {
        &self.reference
    }

    pub fn into_reference(self) -> ImageRef {
        self.reference
    }

    pub fn markup(&self, class: &str, alt: &str) -> Markup {
        let class = (!class.is_empty()).then_some(class);
        html! {
            picture class=[class] {
                source srcset=(self.srcset()) sizes=(self.sizes()) type=(VARIANT_MIME);
                img src=(self.fallback) alt=(alt);
            }
        }
    }
}

//! Site generation: writes rendered views and hand-off files to disk.
//!
//! ## Output Structure
//!
//! ```text
//! Output/
//! ├── index.html                      # Home page
//! ├── about/index.html                # Section pages
//! ├── robots/
//! │   ├── index.html
//! │   └── infinite-recharge/index.html  # Item pages
//! ├── contact/index.html              # Standalone pages
//! ├── tags/
//! │   ├── index.html                  # Tag list
//! │   └── robot/index.html            # Tag detail pages
//! ├── images.json                     # Images the optimizer must produce variants for
//! ├── sitemap.xml
//! └── ...                             # Copied resources
//! ```
//!
//! ## Build
//!
//! [`build`] walks a validated [`Pipeline`]. The three stages this crate
//! owns (`copy-resources`, `generate-html`, `generate-sitemap`) run here; the
//! rest are handed off to external tools and only logged.

use crate::context::PublishingContext;
use crate::pipeline::{Pipeline, PipelineError, StageKind};
use crate::sitemap;
use crate::theme::{Theme, ViewKind};
use crate::theme::image::{ImageRef, ImageVariant};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

pub const IMAGE_MANIFEST_FILENAME: &str = "images.json";

/// A page written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub kind: ViewKind,
    pub title: String,
    /// Site path.
    pub path: String,
    /// File path relative to the output directory.
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// Unique image references, in first-seen order.
    pub images: Vec<ImageRef>,
}

/// One `images.json` entry.
#[derive(Debug, Serialize)]
struct ImageManifestEntry<'a> {
    path: &'a str,
    width_percentage: u32,
    variants: Vec<ImageVariant>,
}

/// Output file for a site path: `/` → `index.html`, `/a/b` → `a/b/index.html`.
pub fn output_file(path: &str) -> PathBuf {
    let mut file = PathBuf::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        file.push(segment);
    }
    file.push("index.html");
    file
}

/// Render every view into `output_dir` and write `images.json`.
pub fn generate(
    ctx: &PublishingContext,
    theme: &Theme,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut report = GenerateReport::default();
    for view in ctx.views() {
        let rendered = theme.render(&view, ctx);
        let path = view.path();
        let file = output_file(&path);
        let target = output_dir.join(&file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        for image in &rendered.images {
            if !report.images.contains(image) {
                report.images.push(image.clone());
            }
        }
        fs::write(&target, rendered.into_string())?;
        log::debug!("wrote {} {}", view.kind(), file.display());
        report.pages.push(GeneratedPage {
            kind: view.kind(),
            title: view.location().title,
            path,
            file,
        });
    }

    write_image_manifest(&report.images, output_dir)?;
    Ok(report)
}

fn write_image_manifest(images: &[ImageRef], output_dir: &Path) -> Result<(), GenerateError> {
    let entries: Vec<ImageManifestEntry> = images
        .iter()
        .map(|image| ImageManifestEntry {
            path: &image.path,
            width_percentage: image.width_percentage,
            variants: image.variants(),
        })
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(output_dir.join(IMAGE_MANIFEST_FILENAME), json)?;
    Ok(())
}

/// Copy the resources tree into `dst`. Returns the number of files copied.
///
/// A missing `src` is not an error: the site simply has no resources.
pub fn copy_resources(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        log::warn!("resources directory {} not found, skipping", src.display());
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    log::debug!("copied {copied} resource files from {}", src.display());
    Ok(copied)
}

/// Where a build reads resources from and writes to.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub resources: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Copied this many resource files.
    Copied(usize),
    Generated(GenerateReport),
    /// Wrote a sitemap with this many URLs.
    Sitemap(usize),
    /// Left to an external tool.
    HandedOff,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub stages: Vec<(StageKind, StageOutcome)>,
}

impl BuildReport {
    pub fn generated(&self) -> Option<&GenerateReport> {
        self.stages.iter().find_map(|(_, outcome)| match outcome {
            StageOutcome::Generated(report) => Some(report),
            _ => None,
        })
    }
}

/// Run the internal stages of `pipeline` in order.
pub fn build(
    pipeline: &Pipeline,
    ctx: &PublishingContext,
    theme: &Theme,
    paths: &BuildPaths,
) -> Result<BuildReport, GenerateError> {
    pipeline.validate()?;

    let mut report = BuildReport::default();
    for &stage in pipeline.stages() {
        let outcome = match stage {
            StageKind::CopyResources => {
                StageOutcome::Copied(copy_resources(&paths.resources, &paths.output)?)
            }
            StageKind::GenerateHtml => {
                StageOutcome::Generated(generate(ctx, theme, &paths.output)?)
            }
            StageKind::GenerateSitemap => {
                StageOutcome::Sitemap(sitemap::generate_sitemap(ctx, &paths.output)?)
            }
            _ => {
                log::info!(target: "pipeline", "handing off {stage} to external tool");
                StageOutcome::HandedOff
            }
        };
        report.stages.push((stage, outcome));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn read(dir: &Path, file: &str) -> String {
        fs::read_to_string(dir.join(file)).unwrap_or_else(|e| panic!("reading {file}: {e}"))
    }

    // =========================================================================
    // Paths
    // =========================================================================

    #[test]
    fn output_file_paths() {
        assert_eq!(output_file("/"), PathBuf::from("index.html"));
        assert_eq!(output_file("/about"), PathBuf::from("about/index.html"));
        assert_eq!(
            output_file("/robots/infinite-recharge/"),
            PathBuf::from("robots/infinite-recharge/index.html")
        );
    }

    // =========================================================================
    // generate
    // =========================================================================

    #[test]
    fn writes_one_file_per_view() {
        let tmp = TempDir::new().unwrap();
        let ctx = sample_context();
        let report = generate(&ctx, &Theme::default(), tmp.path()).unwrap();

        assert_eq!(report.pages.len(), ctx.views().len());
        for page in &report.pages {
            assert!(tmp.path().join(&page.file).is_file(), "{} missing", page.file.display());
        }
        assert!(read(tmp.path(), "index.html").contains("Welcome to Demacia"));
        assert!(read(tmp.path(), "robots/infinite-recharge/index.html").contains("infinite-recharge body"));
        assert!(read(tmp.path(), "tags/index.html").contains("Browse all tags"));
        assert!(read(tmp.path(), "tags/robot/index.html").contains("Tagged with"));
    }

    #[test]
    fn report_records_kinds_and_titles() {
        let tmp = TempDir::new().unwrap();
        let ctx = sample_context();
        let report = generate(&ctx, &Theme::default(), tmp.path()).unwrap();
        let contact = report.pages.iter().find(|p| p.path == "/contact").unwrap();
        assert_eq!(contact.kind, ViewKind::Page);
        assert_eq!(contact.title, "Contact");
        assert_eq!(contact.file, PathBuf::from("contact/index.html"));
    }

    #[test]
    fn image_manifest_lists_slides_with_variants() {
        let tmp = TempDir::new().unwrap();
        let ctx = sample_context();
        let theme = Theme::default();
        let report = generate(&ctx, &theme, tmp.path()).unwrap();
        assert_eq!(report.images.len(), theme.hero.slides.len());

        let json: serde_json::Value =
            serde_json::from_str(&read(tmp.path(), "images.json")).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["path"], "/img/slides/1.jpg");
        assert_eq!(entries[0]["width_percentage"], 100);
        let variants = entries[0]["variants"].as_array().unwrap();
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[0]["file"], "/img/slides/1-768px.webp");
    }

    #[test]
    fn duplicate_images_listed_once() {
        let tmp = TempDir::new().unwrap();
        let ctx = sample_context();
        let mut theme = Theme::default();
        theme.hero.slides = vec!["/img/a.jpg".into(), "/img/b.jpg".into(), "/img/a.jpg".into()];
        let report = generate(&ctx, &theme, tmp.path()).unwrap();
        let paths: Vec<&str> = report.images.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/img/a.jpg", "/img/b.jpg"]);
    }

    // =========================================================================
    // copy_resources
    // =========================================================================

    #[test]
    fn copies_nested_resources() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("img/slides")).unwrap();
        fs::write(src.path().join("favicon.png"), b"png").unwrap();
        fs::write(src.path().join("img/slides/1.jpg"), b"jpg").unwrap();

        let copied = copy_resources(src.path(), dst.path()).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(read(dst.path(), "img/slides/1.jpg"), "jpg");
        assert_eq!(read(dst.path(), "favicon.png"), "png");
    }

    #[test]
    fn missing_resources_are_skipped() {
        let dst = TempDir::new().unwrap();
        let copied = copy_resources(&dst.path().join("nope"), dst.path()).unwrap();
        assert_eq!(copied, 0);
    }

    // =========================================================================
    // build
    // =========================================================================

    #[test]
    fn build_runs_internal_stages_and_hands_off_the_rest() {
        let tmp = TempDir::new().unwrap();
        let paths = BuildPaths {
            resources: tmp.path().join("Resources"),
            output: tmp.path().join("Output"),
        };
        fs::create_dir_all(&paths.resources).unwrap();
        fs::write(paths.resources.join("styles.css"), "body {}").unwrap();

        let ctx = sample_context();
        let report = build(&Pipeline::default(), &ctx, &Theme::default(), &paths).unwrap();

        assert_eq!(report.stages.len(), StageKind::ALL.len());
        for (stage, outcome) in &report.stages {
            assert_eq!(
                stage.is_internal(),
                *outcome != StageOutcome::HandedOff,
                "{stage}"
            );
        }
        let copied = report
            .stages
            .iter()
            .find(|(stage, _)| *stage == StageKind::CopyResources)
            .map(|(_, outcome)| outcome);
        assert_eq!(copied, Some(&StageOutcome::Copied(1)));
        assert!(report.generated().is_some());
        assert!(paths.output.join("styles.css").is_file());
        assert!(paths.output.join("index.html").is_file());
        assert!(paths.output.join("sitemap.xml").is_file());
    }

    #[test]
    fn build_without_sitemap_stage() {
        let tmp = TempDir::new().unwrap();
        let paths = BuildPaths {
            resources: tmp.path().join("Resources"),
            output: tmp.path().join("Output"),
        };
        let pipeline = Pipeline::from_names(&["add-markdown-files", "generate-html"]).unwrap();
        build(&pipeline, &sample_context(), &Theme::default(), &paths).unwrap();
        assert!(paths.output.join("index.html").is_file());
        assert!(!paths.output.join("sitemap.xml").exists());
    }
}

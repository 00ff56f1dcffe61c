//! The build pipeline as data.
//!
//! A build is an ordered list of named stages. Each stage declares which
//! artifacts it reads and which it writes, so an ordering can be checked
//! before anything runs: a stage may only read an artifact that is a source
//! (present before the build starts) or that an earlier stage wrote.
//!
//! Only three stages run in-process ([`StageKind::is_internal`]). The rest
//! (markdown ingestion, Sass, CSS inlining and tree-shaking, image
//! optimisation, JS minification, deployment) are handed to external tools
//! with the contracts recorded here.
//!
//! ```text
//! prepare-images-for-optimization
//! add-markdown-files   Content
//! add-slides           Content              → Content
//! copy-resources       Resources            → Assets
//! generate-html        Content              → Html, ImageManifest
//! generate-sitemap     Content              → Sitemap
//! compile-sass         SassSources          → Stylesheet
//! inline-css           Html, Stylesheet     → Html
//! remove-unused-css    Html                 → Html
//! optimize-images      ImageManifest, Assets → Images
//! uglify-js            Assets               → Assets
//! deploy               Html, Assets         → Deployment
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("unknown pipeline stage `{0}`")]
    UnknownStage(String),
    #[error("pipeline stage `{0}` is listed more than once")]
    DuplicateStage(StageKind),
    #[error("pipeline has no `generate-html` stage")]
    MissingHtml,
    #[error("stage `{stage}` reads {artifact:?}, which no earlier stage produces")]
    UnmetInput { stage: StageKind, artifact: Artifact },
    #[error("stage `deploy` must be the last stage")]
    DeployNotLast,
}

/// Something a stage consumes or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Parsed content snapshot (sections, items, pages).
    Content,
    /// The raw resources directory.
    Resources,
    SassSources,
    /// Resources copied into the output directory.
    Assets,
    Html,
    /// `(path, width %)` list for the image optimiser.
    ImageManifest,
    Images,
    Stylesheet,
    Sitemap,
    Deployment,
}

impl Artifact {
    /// Present before the first stage runs.
    pub fn is_source(self) -> bool {
        matches!(self, Artifact::Resources | Artifact::SassSources)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Installs the optimiser's image hook. No artifact contract.
    PrepareImagesForOptimization,
    AddMarkdownFiles,
    /// Adds slides to the content snapshot. The theme itself takes its
    /// slides from `[hero]` config, so this only matters to external tooling.
    AddSlides,
    CopyResources,
    GenerateHtml,
    GenerateSitemap,
    CompileSass,
    InlineCss,
    RemoveUnusedCss,
    OptimizeImages,
    UglifyJs,
    Deploy,
}

impl StageKind {
    pub const ALL: [StageKind; 12] = [
        StageKind::PrepareImagesForOptimization,
        StageKind::AddMarkdownFiles,
        StageKind::AddSlides,
        StageKind::CopyResources,
        StageKind::GenerateHtml,
        StageKind::GenerateSitemap,
        StageKind::CompileSass,
        StageKind::InlineCss,
        StageKind::RemoveUnusedCss,
        StageKind::OptimizeImages,
        StageKind::UglifyJs,
        StageKind::Deploy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::PrepareImagesForOptimization => "prepare-images-for-optimization",
            StageKind::AddMarkdownFiles => "add-markdown-files",
            StageKind::AddSlides => "add-slides",
            StageKind::CopyResources => "copy-resources",
            StageKind::GenerateHtml => "generate-html",
            StageKind::GenerateSitemap => "generate-sitemap",
            StageKind::CompileSass => "compile-sass",
            StageKind::InlineCss => "inline-css",
            StageKind::RemoveUnusedCss => "remove-unused-css",
            StageKind::OptimizeImages => "optimize-images",
            StageKind::UglifyJs => "uglify-js",
            StageKind::Deploy => "deploy",
        }
    }

    /// Whether this crate executes the stage itself.
    pub fn is_internal(self) -> bool {
        matches!(
            self,
            StageKind::CopyResources | StageKind::GenerateHtml | StageKind::GenerateSitemap
        )
    }

    pub fn reads(self) -> &'static [Artifact] {
        use Artifact::*;
        match self {
            StageKind::PrepareImagesForOptimization => &[],
            StageKind::AddMarkdownFiles => &[],
            StageKind::AddSlides => &[Content],
            StageKind::CopyResources => &[Resources],
            StageKind::GenerateHtml => &[Content],
            StageKind::GenerateSitemap => &[Content],
            StageKind::CompileSass => &[SassSources],
            StageKind::InlineCss => &[Html, Stylesheet],
            StageKind::RemoveUnusedCss => &[Html],
            StageKind::OptimizeImages => &[ImageManifest, Assets],
            StageKind::UglifyJs => &[Assets],
            StageKind::Deploy => &[Html, Assets],
        }
    }

    pub fn writes(self) -> &'static [Artifact] {
        use Artifact::*;
        match self {
            StageKind::PrepareImagesForOptimization => &[],
            StageKind::AddMarkdownFiles => &[Content],
            StageKind::AddSlides => &[Content],
            StageKind::CopyResources => &[Assets],
            StageKind::GenerateHtml => &[Html, ImageManifest],
            StageKind::GenerateSitemap => &[Sitemap],
            StageKind::CompileSass => &[Stylesheet],
            StageKind::InlineCss => &[Html],
            StageKind::RemoveUnusedCss => &[Html],
            StageKind::OptimizeImages => &[Images],
            StageKind::UglifyJs => &[Assets],
            StageKind::Deploy => &[Deployment],
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PipelineError::UnknownStage(s.to_string()))
    }
}

/// An ordered, validated list of stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    stages: Vec<StageKind>,
}

impl Pipeline {
    /// Parse and validate stage names in order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, PipelineError> {
        let stages = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<StageKind>, _>>()?;
        let pipeline = Pipeline { stages };
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut available: Vec<Artifact> = Vec::new();
        for (idx, &stage) in self.stages.iter().enumerate() {
            if self.stages[..idx].contains(&stage) {
                return Err(PipelineError::DuplicateStage(stage));
            }
            if stage == StageKind::Deploy && idx + 1 != self.stages.len() {
                return Err(PipelineError::DeployNotLast);
            }
            for &artifact in stage.reads() {
                if !artifact.is_source() && !available.contains(&artifact) {
                    return Err(PipelineError::UnmetInput { stage, artifact });
                }
            }
            available.extend_from_slice(stage.writes());
        }
        if !self.stages.contains(&StageKind::GenerateHtml) {
            return Err(PipelineError::MissingHtml);
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            stages: default_stage_names()
                .iter()
                .filter_map(|name| name.parse().ok())
                .collect(),
        }
    }
}

/// Stage names of the stock pipeline, in order.
pub fn default_stage_names() -> Vec<String> {
    [
        "prepare-images-for-optimization",
        "add-markdown-files",
        "add-slides",
        "copy-resources",
        "generate-html",
        "generate-sitemap",
        "compile-sass",
        "inline-css",
        "remove-unused-css",
        "optimize-images",
        "uglify-js",
        "deploy",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

use clap::{Parser, Subcommand};
use demacia_site::context::PublishingContext;
use demacia_site::generate::{self, BuildPaths};
use demacia_site::theme::Theme;
use demacia_site::{config, logging, output};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "demacia-site")]
#[command(about = "Static site generator for the Demacia FRC team website")]
#[command(long_about = "\
Static site generator for the Demacia FRC team website

Content is parsed from markdown by an external pipeline into a JSON snapshot.
This tool renders it with the Demacia theme and hands the rest of the build
(Sass, CSS inlining, image optimisation, deployment) to external tools.

Project layout:

  .
  ├── config.toml        # Site config (optional, overrides stock defaults)
  ├── content.json       # Content snapshot: index, sections with items, pages
  ├── Resources/         # Copied verbatim to the output root
  └── Output/            # Generated site
      ├── index.html
      ├── robots/infinite-recharge/index.html
      ├── tags/robot/index.html
      ├── images.json    # Images the optimiser must produce variants for
      └── sitemap.xml

Relative paths are resolved against --root.

Run 'demacia-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root holding config.toml
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Content snapshot produced by the markdown pipeline
    #[arg(long, default_value = "content.json", global = true)]
    content: PathBuf,

    /// Resources directory copied to the output root
    #[arg(long, default_value = "Resources", global = true)]
    resources: PathBuf,

    /// Output directory
    #[arg(long, default_value = "Output", global = true)]
    output: PathBuf,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the configured pipeline: internal stages run, external ones are handed off
    Build,
    /// Render HTML and images.json only
    Generate,
    /// Validate config and content without writing anything
    Check,
    /// Print the configured pipeline with each stage's contract
    Plan,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.root)?;
    let pipeline = site_config.pipeline()?;

    if let Command::Plan = cli.command {
        output::print_plan_output(&pipeline);
        return Ok(());
    }

    let content = under_root(&cli.root, &cli.content);
    let ctx = PublishingContext::load(site_config.site(), &content)?;
    let theme = Theme::from_config(&site_config);
    let output_dir = under_root(&cli.root, &cli.output);
    let started = Instant::now();

    match cli.command {
        Command::Build => {
            let paths = BuildPaths {
                resources: under_root(&cli.root, &cli.resources),
                output: output_dir.clone(),
            };
            println!("==> Building {} → {}", content.display(), output_dir.display());
            let report = generate::build(&pipeline, &ctx, &theme, &paths)?;
            output::print_build_output(&report);
            println!(
                "==> Build complete in {}",
                logging::format_elapsed_time(started.elapsed())
            );
        }
        Command::Generate => {
            println!("==> Generating HTML → {}", output_dir.display());
            let report = generate::generate(&ctx, &theme, &output_dir)?;
            output::print_generate_output(&report);
            println!(
                "==> Generated in {}",
                logging::format_elapsed_time(started.elapsed())
            );
        }
        Command::Check => {
            println!("==> Checking {}", content.display());
            output::print_check_output(&ctx);
            println!("==> Content is valid");
        }
        Command::Plan | Command::GenConfig => {}
    }

    Ok(())
}

fn under_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use decision_wheels::{
    DirSink, DirSinkOpts, ExportFormat, ExportOpts, ExportSink, Opportunity, RasterOpts,
    Workspace,
};

#[derive(Parser, Debug)]
#[command(name = "decision-wheels", version)]
struct Cli {
    /// Log filter (e.g. `info`, `decision_wheels=debug`).
    #[arg(long, global = true, env = "DECISION_WHEELS_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print averages, the like-for-like check and the verdict.
    Summary(SummaryArgs),
    /// Export the comparison as JSON, SVG and/or raster images.
    Export(ExportArgs),
    /// Write a single wheel as a standalone SVG.
    Wheel(WheelArgs),
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// Input wheels JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input wheels JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Formats to produce (repeatable).
    #[arg(long = "format", value_enum, default_values_t = vec![FormatChoice::Json, FormatChoice::Svg, FormatChoice::Webp])]
    formats: Vec<FormatChoice>,

    /// File name prefix.
    #[arg(long, default_value = decision_wheels::DEFAULT_FILE_STEM)]
    stem: String,

    /// Raster pixel density.
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Raster timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Skip system font discovery when rasterizing (text is omitted).
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Fail instead of replacing existing files.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct WheelArgs {
    /// Input wheels JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Wheel id to draw.
    #[arg(long)]
    id: u32,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Json,
    Svg,
    Webp,
    Png,
}

impl From<FormatChoice> for ExportFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Json => Self::Json,
            FormatChoice::Svg => Self::Svg,
            FormatChoice::Webp => Self::WebP,
            FormatChoice::Png => Self::Png,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Summary(args) => cmd_summary(args),
        Command::Export(args) => cmd_export(args),
        Command::Wheel(args) => cmd_wheel(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<Vec<Opportunity>> {
    let opportunities = decision_wheels::load_opportunities_from_path(path)
        .with_context(|| format!("load wheels from '{}'", path.display()))?;
    if let Err(e) = Workspace::from_opportunities(opportunities.clone()) {
        tracing::warn!(error = %e, "input is not a valid working set; continuing anyway");
    }
    Ok(opportunities)
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let opportunities = load(&args.in_path)?;
    let summary = decision_wheels::summarize(&opportunities);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let opportunities = load(&args.in_path)?;
    let opts = ExportOpts {
        file_stem: args.stem,
        raster: RasterOpts {
            scale: args.scale,
            timeout: Duration::from_millis(args.timeout_ms),
            system_fonts: !args.no_system_fonts,
            ..RasterOpts::default()
        },
    };
    let formats: Vec<ExportFormat> = args.formats.into_iter().map(Into::into).collect();
    let mut sink = DirSink::new(
        &args.out_dir,
        DirSinkOpts {
            overwrite: !args.no_overwrite,
        },
    );

    let mut failures = 0usize;
    for (format, res) in decision_wheels::export_all(&opportunities, &formats, &opts) {
        let saved = res.and_then(|artifact| {
            sink.save(&artifact)?;
            Ok(sink.path_for(&artifact))
        });
        match saved {
            Ok(path) => eprintln!("wrote {}", path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("{} export failed: {e}", format.extension());
                if e.suggests_vector_fallback() {
                    eprintln!("hint: the SVG export (--format svg) does not need rasterization");
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} exports failed", formats.len());
    }
    Ok(())
}

fn cmd_wheel(args: WheelArgs) -> anyhow::Result<()> {
    let opportunities = load(&args.in_path)?;
    let opp = opportunities
        .iter()
        .find(|o| o.id == args.id)
        .with_context(|| format!("no wheel with id {} in '{}'", args.id, args.in_path.display()))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, decision_wheels::render_wheel_document(opp))
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use arseg_labels::{
    read_sentences, rebuild_line, LabelScheme, Pipeline, PipelineConfig, RebuildOptions, RunStats,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "arseg",
    about = "Edit-script inference and label projection for Arabic segmentation data"
)]
struct Cli {
    /// Pipeline config file (JSON); falls back to $ARSEG_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report every skipped line at warn level
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Run the full rule cascade on unsegmented rewrites instead of tagging them wholesale
    #[arg(long, global = true)]
    no_special_noseg: bool,

    /// Boundary marker used in the segmented side
    #[arg(long, global = true)]
    marker: Option<char>,

    /// Which character swaps are labeled REW
    #[arg(long, value_enum, global = true)]
    scheme: Option<SchemeArg>,

    /// Write end-of-run counters as JSON to this file
    #[arg(long, global = true)]
    stats_json: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Basic,
    Full,
}

impl From<SchemeArg> for LabelScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Basic => LabelScheme::Basic,
            SchemeArg::Full => LabelScheme::Full,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Dump the inferred edit script of every record
    Edits {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// One JSON object per line instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write BEGIN/CONT/REW character training lines
    Labels {
        input: Option<PathBuf>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Write segment-level lines aligned with a tag file
    Align {
        input: Option<PathBuf>,
        /// One line of `segment|||tag` tokens per sentence
        #[arg(long)]
        tags: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rebuild segmented text from tagger output
    Rebuild {
        input: Option<PathBuf>,
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Apply orthographic rewrites for REW characters
        #[arg(long)]
        rewrite: bool,
        /// Write segments space-separated, marking prefixes with this string
        #[arg(long)]
        prefix_marker: Option<String>,
        /// Write segments space-separated, marking suffixes with this string
        #[arg(long)]
        suffix_marker: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let pipeline = Pipeline::new(config);

    let stats = match cli.command {
        Commands::Edits {
            ref input,
            ref output,
            json,
        } => {
            let reader = open_input(input.as_deref())?;
            let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
            let (records, stats) = pipeline.edit_records(&lines);
            let marker = pipeline.config().engine.seg_marker;
            let mut out = open_output(output.as_deref())?;
            for record in &records {
                if json {
                    serde_json::to_writer(&mut out, record)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "{}", record.render(marker))?;
                }
            }
            out.flush()?;
            Some(stats)
        }
        Commands::Labels {
            ref input,
            ref output,
        } => {
            let sentences = read_sentences(open_input(input.as_deref())?)?;
            let (lines, stats) = pipeline.training_lines(&sentences)?;
            write_lines(output.as_deref(), &lines)?;
            Some(stats)
        }
        Commands::Align {
            ref input,
            ref tags,
            ref output,
        } => {
            let sentences = read_sentences(open_input(input.as_deref())?)?;
            let tag_lines = BufReader::new(
                File::open(tags).with_context(|| format!("opening tag file {}", tags.display()))?,
            )
            .lines()
            .collect::<io::Result<Vec<_>>>()?;
            let (lines, stats) = pipeline.aligned_lines(&sentences, &tag_lines)?;
            write_lines(output.as_deref(), &lines)?;
            Some(stats)
        }
        Commands::Rebuild {
            ref input,
            ref output,
            rewrite,
            ref prefix_marker,
            ref suffix_marker,
        } => {
            let clitic_markers = match (prefix_marker, suffix_marker) {
                (None, None) => None,
                (prefix, suffix) => Some((
                    prefix.clone().unwrap_or_default(),
                    suffix.clone().unwrap_or_default(),
                )),
            };
            let options = RebuildOptions {
                apply_rewrites: rewrite,
                marker: pipeline.config().engine.seg_marker,
                clitic_markers,
            };
            let reader = open_input(input.as_deref())?;
            let mut out = open_output(output.as_deref())?;
            let mut rebuilt = 0usize;
            for (n, line) in reader.lines().enumerate() {
                let line = line?;
                let text = rebuild_line(&line, &options)
                    .with_context(|| format!("tagged line {}", n + 1))?;
                writeln!(out, "{text}")?;
                rebuilt += 1;
            }
            out.flush()?;
            info!("rebuilt {rebuilt} lines");
            None
        }
    };

    if let Some(stats) = stats {
        report(&stats, cli.stats_json.as_deref())?;
    }
    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::from_env_or_default()?,
    };
    if cli.verbose {
        config.engine.verbose = true;
    }
    if cli.no_special_noseg {
        config.engine.special_noseg = false;
    }
    if let Some(marker) = cli.marker {
        config.engine.seg_marker = marker;
    }
    if let Some(scheme) = cli.scheme {
        config.scheme = scheme.into();
    }
    Ok(config)
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn write_lines(path: Option<&Path>, lines: &[String]) -> anyhow::Result<()> {
    let mut out = open_output(path)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn report(stats: &RunStats, stats_json: Option<&Path>) -> anyhow::Result<()> {
    info!("{stats}");
    if let Some(path) = stats_json {
        fs::write(path, serde_json::to_string_pretty(stats)?)
            .with_context(|| format!("writing stats to {}", path.display()))?;
    }
    Ok(())
}

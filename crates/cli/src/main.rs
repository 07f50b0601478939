//! glyphflow - Extract translation units from a PDF text-layer dump
//!
//! A command line tool that reads the per-page text content and viewport a
//! PDF engine reported (as JSON), reconstructs the page layout and prints the
//! resulting units with their ids and highlight rectangles as JSON.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use glyphflow_core::api::{DocumentExtractor, ExtractOptions};
use glyphflow_core::engine::DocumentDump;
use glyphflow_core::ids::DocumentId;
use glyphflow_core::layout::{Granularity, LayoutParams, PageExtraction, SentenceScope};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Unit granularity on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitKind {
    /// One unit per sentence
    Sentence,
    /// One unit per paragraph
    Paragraph,
}

/// Sentence splitting scope on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scope {
    /// Split each paragraph separately
    Paragraph,
    /// Split the concatenated text of each column
    Column,
}

/// Extract translation units from a JSON text-layer dump.
#[derive(Parser, Debug)]
#[command(name = "glyphflow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the text-layer dump (JSON)
    dump: PathBuf,

    /// PDF file the dump was taken from; its bytes determine the document id
    #[arg(long, conflicts_with = "doc_id")]
    pdf: Option<PathBuf>,

    /// Document id to use verbatim
    #[arg(long = "doc-id")]
    doc_id: Option<String>,

    /// A comma-separated list of page numbers to extract (1-indexed)
    #[arg(short = 'p', long)]
    pages: Option<String>,

    /// The maximum number of pages to extract (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    /// Extract pages in parallel
    #[arg(long, action = ArgAction::SetTrue)]
    parallel: bool,

    /// Layout parameters as a JSON file; flags below override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Unit granularity
    #[arg(short = 'g', long, value_enum)]
    granularity: Option<UnitKind>,

    /// Sentence splitting scope
    #[arg(long = "sentence-scope", value_enum)]
    sentence_scope: Option<Scope>,

    /// Keep watermark runs in the content
    #[arg(long = "no-watermarks", action = ArgAction::SetTrue)]
    no_watermarks: bool,

    /// Treat every page as a single column
    #[arg(long = "no-columns", action = ArgAction::SetTrue)]
    no_columns: bool,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Parse 1-indexed page numbers into 0-indexed ones.
fn parse_page_numbers(spec: &str) -> Result<Vec<usize>> {
    spec.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let n: usize = s.parse().with_context(|| format!("invalid page number {s:?}"))?;
            if n == 0 {
                bail!("page numbers start at 1");
            }
            Ok(n - 1)
        })
        .collect()
}

/// Build LayoutParams from the params file and flag overrides.
fn build_params(args: &Args) -> Result<LayoutParams> {
    let mut params = match &args.params {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open params file {}", path.display()))?;
            serde_json::from_reader(io::BufReader::new(file))
                .with_context(|| format!("failed to parse params file {}", path.display()))?
        }
        None => LayoutParams::default(),
    };

    if let Some(kind) = args.granularity {
        params.granularity = match kind {
            UnitKind::Sentence => Granularity::Sentence,
            UnitKind::Paragraph => Granularity::Paragraph,
        };
    }
    if let Some(scope) = args.sentence_scope {
        params.sentence_scope = match scope {
            Scope::Paragraph => SentenceScope::Paragraph,
            Scope::Column => SentenceScope::Column,
        };
    }
    if args.no_watermarks {
        params.filter_watermarks = false;
    }
    if args.no_columns {
        params.detect_columns = false;
    }
    params.validate()?;
    Ok(params)
}

/// Document id from `--doc-id`, the `--pdf` bytes, or the dump bytes.
fn document_id(args: &Args) -> Result<DocumentId> {
    if let Some(id) = &args.doc_id {
        return Ok(DocumentId::new(id.clone())?);
    }
    let path = args.pdf.as_ref().unwrap_or(&args.dump);
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(DocumentId::from_bytes(&bytes))
}

fn run(args: &Args) -> Result<Vec<PageExtraction>> {
    let params = build_params(args)?;
    let doc = document_id(args)?;
    let dump = DocumentDump::from_path(&args.dump)
        .with_context(|| format!("failed to load dump {}", args.dump.display()))?;

    let options = ExtractOptions {
        page_numbers: args.pages.as_deref().map(parse_page_numbers).transpose()?,
        maxpages: args.maxpages,
        params,
    };
    info!(doc = %doc, pages = dump.len(), parallel = args.parallel, "extracting");

    let extractor = DocumentExtractor::new(&dump.pages, doc, options);
    let pages = if args.parallel {
        extractor.extract_all_parallel()?
    } else {
        extractor.pages()?.collect::<glyphflow_core::Result<Vec<_>>>()?
    };

    let units: usize = pages.iter().map(|p| p.units.len()).sum();
    info!(pages = pages.len(), units, "done");
    Ok(pages)
}

fn main() -> Result<()> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let pages = run(&args)?;

    let out: Box<dyn Write> = if args.outfile == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(
            File::create(&args.outfile)
                .with_context(|| format!("failed to create {}", args.outfile))?,
        )
    };
    let mut out = BufWriter::new(out);
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &pages)?;
    } else {
        serde_json::to_writer(&mut out, &pages)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

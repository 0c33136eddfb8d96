use adaptive_chunker::{stream_chunks, ChunkStats, ChunkingConfig, STRATEGY_NAMES};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Number of chunks previewed when `--max-chunks-displayed` is not given
const DEFAULT_CHUNKS_DISPLAYED: usize = 10;

/// Split a document into token-budgeted chunks along its structure
#[derive(Parser, Debug)]
#[command(name = "adaptive-chunker", version, about)]
struct Cli {
    /// File to chunk
    file: Option<PathBuf>,

    /// Chunk this text instead of a file
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Segmentation strategy (defaults to adaptive detection)
    #[arg(long, value_name = "NAME")]
    strategy: Option<String>,

    /// Maximum estimated tokens per chunk
    #[arg(long, value_name = "N")]
    max_tokens: Option<usize>,

    /// Estimated tokens repeated between successive chunks
    #[arg(long, value_name = "N")]
    overlap: Option<usize>,

    /// Emit oversized blocks verbatim instead of re-splitting them
    #[arg(long)]
    no_fallback: bool,

    /// How many chunks to print before the statistics
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNKS_DISPLAYED)]
    max_chunks_displayed: usize,

    /// Print every chunk as a JSON line instead of the preview and statistics
    #[arg(long)]
    json: bool,

    /// JSON file with max_tokens / overlap_tokens / allow_fallback / strategy
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = read_input(&cli)?;
    let config = load_config(&cli)?;
    let (options, selection) = config.resolve().with_context(|| {
        format!("valid strategies: adaptive, {}", STRATEGY_NAMES.join(", "))
    })?;

    let strategy = selection.resolve(&text);
    let memory_before = resident_memory();
    let start = Instant::now();
    let mut chunks = Vec::new();
    for chunk in stream_chunks(&text, strategy, &options) {
        chunks.push(chunk?);
    }
    let elapsed = start.elapsed();
    let memory_after = resident_memory();

    if cli.json {
        for chunk in &chunks {
            println!("{}", serde_json::to_string(chunk)?);
        }
        return Ok(());
    }

    let shown = cli.max_chunks_displayed.min(chunks.len());
    for (i, chunk) in chunks.iter().take(shown).enumerate() {
        println!("--- Chunk {} ---\n{}\n", i + 1, chunk.text);
    }
    if chunks.len() > shown {
        println!("... ({} more chunks not shown)\n", chunks.len() - shown);
    }

    let stats =
        ChunkStats::from_chunks(&chunks, elapsed).with_memory(memory_before, memory_after);
    println!("=== Stats ===");
    println!("Strategy:                   {} ({})", strategy, selection);
    println!("Total chunks:               {}", stats.chunk_count);
    println!("Oversized chunks:           {}", stats.oversized_count);
    println!("Total characters:           {}", stats.total_chars);
    println!("Chunks/s:                   {:.2}", stats.chunks_per_sec());
    println!("Chars/s:                    {:.2}", stats.chars_per_sec());
    println!("Mean chunk size (chars):    {:.2}", stats.mean_chars);
    println!(
        "Min/Max chunk size (chars): {} / {}",
        stats.min_chars, stats.max_chars
    );
    println!("Std dev chunk size (chars): {:.2}", stats.std_dev_chars);
    println!(
        "Total time:                 {:.2} ms",
        elapsed.as_secs_f64() * 1000.0
    );
    match stats.memory_usage() {
        Some(usage) => println!("Memory usage:               {}", usage),
        None => println!("Memory usage:               unavailable"),
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resident set size of this process in bytes
fn resident_memory() -> Option<usize> {
    memory_stats::memory_stats().map(|usage| usage.physical_mem)
}

fn read_input(cli: &Cli) -> Result<String> {
    match (&cli.text, &cli.file) {
        (Some(text), _) if !text.is_empty() => Ok(text.clone()),
        (_, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => bail!(
            "no input given\n\
             Usage: adaptive-chunker <file> [--strategy <name>] [--max-tokens <n>] [--overlap <n>] [--max-chunks-displayed <n>]\n       \
             adaptive-chunker --text 'your text here' [--strategy <name>] [--max-tokens <n>] [--overlap <n>] [--max-chunks-displayed <n>]"
        ),
    }
}

/// Config file values, overridden by any flags given on the command line
fn load_config(cli: &Cli) -> Result<ChunkingConfig> {
    let from_file = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            ChunkingConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => ChunkingConfig::default(),
    };

    let from_flags = ChunkingConfig {
        max_tokens: cli.max_tokens,
        overlap_tokens: cli.overlap,
        allow_fallback: cli.no_fallback.then_some(false),
        strategy: cli.strategy.clone(),
    };

    Ok(from_file.merge(from_flags))
}

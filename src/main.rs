use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use apriori::{
    config::checked_threshold, Apriori, CandidatePruning, FileSource, FrequentItemsets,
    MiningConfig, SamplingConfig,
};
use clap::Parser;
use itertools::Itertools;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "apriori", about = "Find frequent item sets in a basket file")]
struct Cli {
    /// Basket file, one whitespace-separated basket per line
    input: PathBuf,

    /// Minimum support count
    #[arg(short = 't', long)]
    threshold: Option<i64>,

    /// Read the file once and mine it in memory instead of re-reading it every round
    #[arg(long)]
    in_memory: bool,

    /// Mine a sample that keeps each basket with this probability
    #[arg(long, value_name = "P")]
    sample: Option<f64>,

    /// With --sample: re-count results on the full file to drop false positives
    #[arg(long, requires = "sample")]
    verify: bool,

    /// With --sample: seed for a reproducible sample
    #[arg(long, requires = "sample")]
    seed: Option<u64>,

    /// Largest item set size to mine
    #[arg(long)]
    max_len: Option<usize>,

    /// Abort when a round generates more candidates than this
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Only count candidates whose every subset is frequent
    #[arg(long)]
    prune: bool,

    /// JSON file with `mining` and `sampling` sections; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    mining: MiningConfig,
    sampling: Option<SamplingConfig>,
}

fn load_config(cli: &Cli) -> anyhow::Result<(MiningConfig, Option<SamplingConfig>)> {
    let FileConfig {
        mut mining,
        mut sampling,
    } = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("cannot parse config {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    if let Some(threshold) = cli.threshold {
        mining.threshold = checked_threshold(threshold)?;
    } else if cli.config.is_none() {
        anyhow::bail!("a threshold is required (--threshold or --config)");
    }
    if cli.max_len.is_some() {
        mining.max_len = cli.max_len;
    }
    if cli.max_candidates.is_some() {
        mining.max_candidates = cli.max_candidates;
    }
    if cli.prune {
        mining.pruning = CandidatePruning::AllSubsets;
    }

    if let Some(probability) = cli.sample {
        let mut config = SamplingConfig::new(probability, cli.verify);
        config.seed = cli.seed;
        sampling = Some(config);
    }

    Ok((mining, sampling))
}

fn write_itemsets(itemsets: &FrequentItemsets, out: &mut impl Write) -> io::Result<()> {
    let rows = itemsets
        .iter()
        .map(|(itemset, count)| {
            let labels = itemsets.labels(itemset).into_iter().sorted().collect_vec();
            (labels, count)
        })
        .sorted_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    for (labels, count) in rows {
        writeln!(out, "{}\t{}", labels.join(" "), count)?;
    }
    out.flush()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let (mining, sampling) = load_config(&cli)?;
    let apriori = Apriori::new(mining)?;
    let source = FileSource::new(&cli.input);

    let itemsets = match (&sampling, cli.in_memory) {
        (Some(sampling), _) => apriori.mine_randomized(&source, sampling)?,
        (None, true) => apriori.mine_in_memory(&source)?,
        (None, false) => apriori.mine(&source)?,
    };

    let stdout = io::stdout();
    write_itemsets(&itemsets, &mut BufWriter::new(stdout.lock()))?;
    Ok(())
}

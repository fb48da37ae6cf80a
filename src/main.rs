use anyhow::Context;
use clap::Parser;
use mlq_sim::io::{load_path, write_report};
use mlq_sim::{MlqScheduler, PolicyKind};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Simulate multi-level queue CPU scheduling over a process record file.
#[derive(Debug, Parser)]
#[command(name = "mlq-sim", version)]
struct Args {
    /// Record file, one `label;burst;arrival;queue;priority` per line
    input: PathBuf,

    /// Report file; defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Queue hierarchy, highest priority first: fcfs, sjf, or rr:<quantum>
    #[arg(long, value_delimiter = ',', default_value = "rr:3,sjf,fcfs")]
    queues: Vec<PolicyKind>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let records = load_path(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    log::info!(
        "loaded {} processes, hierarchy: {}",
        records.len(),
        args.queues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    );

    let mut scheduler = MlqScheduler::new(&args.queues, records)?;
    scheduler.run();
    let rows = scheduler.metrics();
    log::info!("{} processes completed at t={}", rows.len(), scheduler.now());

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_report(&mut out, &rows)?;
            out.flush()?;
        }
        None => write_report(&mut io::stdout().lock(), &rows)?,
    }

    Ok(())
}

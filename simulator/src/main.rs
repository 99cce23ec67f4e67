use anyhow::Context;
use clap::{ArgGroup, Parser};
use generator::{run_feed, SentenceGenerator};
use gui_bridge::bridge;
use sentimentcore::snapshot::abbreviate_count;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Pipeline;

mod analysis;
mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Sentiment backend for the live dashboard")]
#[command(group(ArgGroup::new("mode").required(true).multiple(true).args(["offline", "serve"])))]
struct Args {
    /// Classify this many generated sentences, print a summary and exit
    #[arg(long)]
    offline: Option<usize>,
    /// Append the offline summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
    /// Synthetic sentences per second while serving (0 disables the feed)
    #[arg(long, default_value_t = 5.0)]
    rate: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Serve the dashboard endpoints until Ctrl+C
    #[arg(long)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.bind, args.rate, args.seed)
    };

    let pipeline = Pipeline::new(&workflow_config)?;

    if let Some(count) = args.offline {
        let mut generator = SentenceGenerator::new(workflow_config.feed.clone());
        let mut mismatched = 0usize;
        for _ in 0..count {
            let (intended, sentence) = generator.next_sentence();
            let classified = pipeline
                .process(&sentence)?
                .context("generator produced a blank sentence")?;
            if classified.category != intended {
                mismatched += 1;
            }
        }

        let store = pipeline.store();
        let store = store
            .read()
            .map_err(|_| anyhow::anyhow!("sentiment store lock poisoned"))?;
        let totals = store.totals().unwrap_or_default();
        let report = format!(
            "sentences={} processed={} positive={} negative={} neutral={} all={} mismatched={}\n",
            count,
            store.processed(),
            abbreviate_count(totals.positive),
            abbreviate_count(totals.negative),
            abbreviate_count(totals.neutral),
            abbreviate_count(totals.total()),
            mismatched
        );
        print!("Offline run -> {report}");

        if let Some(report_path) = args.report {
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&report_path)
                .with_context(|| format!("opening report {}", report_path.display()))?;
            file.write_all(report.as_bytes())?;
        }
    }

    if args.serve {
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for the HTTP bridge")?;
        runtime.block_on(async {
            tokio::spawn(run_feed(
                SentenceGenerator::new(workflow_config.feed.clone()),
                pipeline.clone(),
            ));
            let shutdown = async {
                if let Err(err) = signal::ctrl_c().await {
                    log::error!("awaiting Ctrl+C failed: {err}");
                }
            };
            bridge::serve(pipeline.clone(), workflow_config.bind, shutdown).await
        })?;
        log::info!("blank sentences ignored: {}", pipeline.ignored());
    }

    Ok(())
}

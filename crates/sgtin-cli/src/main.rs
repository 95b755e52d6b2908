//! `epcgen`: command-line front end for SGTIN-96 encoding and batch planning.

mod config;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sgtin::{
    BatchRequest, Chunk, Epc, LabelRule, Overage, Progress, Record, RecordSink, SerialCursor,
    SerialNumber, TemplateLookup, TrackingRecord, Upc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

fn init_tracing(format: LogFormat) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let format = match std::env::var("EPCGEN_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Ok(value) if value.eq_ignore_ascii_case("compact") => LogFormat::Compact,
            _ => format,
        };

        match format {
            LogFormat::Json => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_target(true)
                .json()
                .flatten_event(true)
                .init(),
            LogFormat::Compact => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_target(true)
                .compact()
                .init(),
        }
    });
}

#[derive(Parser)]
#[command(name = "epcgen", version)]
#[command(about = "Generate SGTIN-96 EPCs for UPC serial ranges", long_about = None)]
struct Cli {
    /// Config file (defaults to ./epcgen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode one UPC and serial to an EPC
    Encode {
        #[arg(long)]
        upc: String,
        #[arg(long, allow_hyphen_values = true)]
        serial: String,
    },
    /// Show the fields of an EPC
    Decode { epc: String },
    /// List the chunks a batch would be split into
    Plan {
        #[command(flatten)]
        batch: BatchArgs,
        /// Print JSON instead of one line per chunk
        #[arg(long)]
        json: bool,
    },
    /// Print the first ten records of a range
    Preview {
        #[arg(long)]
        upc: String,
        #[arg(long)]
        start: u64,
        #[arg(long)]
        quantity: u64,
    },
    /// Stream every record of a batch as JSON lines
    Generate {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Print the roll tracking record for a batch
    Tracker {
        #[command(flatten)]
        batch: BatchArgs,
        #[arg(long)]
        labels_per_roll: Option<u64>,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        label_size: Option<String>,
    },
    /// Reserve the serial range following the last issued serial
    NextRange {
        #[arg(long)]
        current: u64,
        #[arg(long)]
        quantity: u64,
    },
}

#[derive(Args)]
struct BatchArgs {
    #[arg(long)]
    upc: String,
    /// First serial of the batch
    #[arg(long)]
    start: u64,
    /// Ordered quantity, before overage
    #[arg(long)]
    quantity: u64,
    /// Maximum records per chunk
    #[arg(long)]
    per_batch: Option<u64>,
    /// Add a 2% overage
    #[arg(long)]
    two_percent: bool,
    /// Add a 7% overage (compounds with 2%)
    #[arg(long)]
    seven_percent: bool,
    #[arg(long, value_enum)]
    label_rule: Option<RuleArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RuleArg {
    Legacy,
    Plain,
}

impl From<RuleArg> for LabelRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Legacy => LabelRule::Legacy,
            RuleArg::Plain => LabelRule::Plain,
        }
    }
}

impl BatchArgs {
    fn request(&self, config: &Config) -> Result<BatchRequest> {
        let upc = Upc::parse(&self.upc)?;
        let overage = Overage {
            two_percent: self.two_percent || config.overage.two_percent,
            seven_percent: self.seven_percent || config.overage.seven_percent,
        };
        let per_batch = self.per_batch.unwrap_or(config.max_per_batch);
        let request = BatchRequest::new(upc, self.start, self.quantity, per_batch)
            .and_then(|r| r.with_overage(overage))
            .context("invalid batch")?;
        Ok(request)
    }

    fn rule(&self, config: &Config) -> LabelRule {
        self.label_rule.map(Into::into).unwrap_or(config.label_rule)
    }
}

/// Writes records as JSON lines tagged with their chunk label.
struct JsonLinesSink<W: Write> {
    out: W,
    label: String,
}

#[derive(Serialize)]
struct Line<'a> {
    chunk: &'a str,
    #[serde(flatten)]
    record: Record,
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    type Error = io::Error;

    fn begin_chunk(&mut self, chunk: &Chunk) -> io::Result<()> {
        self.label.clone_from(&chunk.label);
        Ok(())
    }

    fn record(&mut self, record: Record) -> io::Result<()> {
        let line = Line {
            chunk: &self.label,
            record,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")
    }

    fn end_chunk(&mut self, chunk: &Chunk, progress: Progress) -> io::Result<()> {
        self.out.flush()?;
        info!(
            label = %chunk.label,
            completed = progress.completed,
            total = progress.total,
            "chunk written"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct TrackerOutput {
    #[serde(flatten)]
    record: TrackingRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<PathBuf>,
}

/// Looks up the print template when both customer and label size are given.
fn resolve_template(
    config: &Config,
    customer: Option<String>,
    label_size: Option<String>,
) -> Result<Option<PathBuf>> {
    match (customer, label_size) {
        (Some(customer), Some(size)) => Ok(Some(
            config
                .template_table()
                .lookup(&customer, &size)
                .with_context(|| format!("no template configured for {customer} / {size}"))?,
        )),
        _ => Ok(None),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(config.log_format);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Encode { upc, serial } => {
            let upc = Upc::parse(&upc)?;
            let serial: SerialNumber = serial.parse()?;
            let epc = sgtin::encode(&upc, serial.value())?;
            writeln!(out, "{epc}")?;
        }
        Command::Decode { epc } => {
            let epc: Epc = epc.parse()?;
            writeln!(out, "header:         0x{:02X}", epc.header())?;
            writeln!(out, "filter:         {}", epc.filter())?;
            writeln!(out, "partition:      {}", epc.partition())?;
            writeln!(out, "company prefix: {:07}", epc.company_prefix())?;
            writeln!(out, "item reference: {:05}", epc.item_reference())?;
            writeln!(out, "serial:         {}", epc.serial())?;
        }
        Command::Plan { batch, json } => {
            let request = batch.request(&config)?;
            let chunks: Vec<Chunk> = request.chunks(batch.rule(&config)).collect();
            if json {
                serde_json::to_writer_pretty(&mut out, &chunks)?;
                writeln!(out)?;
            } else {
                for chunk in &chunks {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        chunk.index, chunk.start_serial, chunk.end_serial, chunk.label
                    )?;
                }
            }
        }
        Command::Preview {
            upc,
            start,
            quantity,
        } => {
            let upc = Upc::parse(&upc)?;
            for record in sgtin::preview(&upc, start, quantity)? {
                writeln!(out, "{}\t{}\t{}", record.upc, record.serial, record.epc)?;
            }
        }
        Command::Generate { batch } => {
            let request = batch.request(&config)?;
            let mut sink = JsonLinesSink {
                out,
                label: String::new(),
            };
            sgtin::generate(&request, batch.rule(&config), &mut sink)
                .context("generating batch")?;
            return Ok(());
        }
        Command::Tracker {
            batch,
            labels_per_roll,
            customer,
            label_size,
        } => {
            let request = batch.request(&config)?;
            let record = request.tracking_record(labels_per_roll.unwrap_or(config.labels_per_roll));
            let template = resolve_template(&config, customer, label_size)?;
            serde_json::to_writer_pretty(&mut out, &TrackerOutput { record, template })?;
            writeln!(out)?;
        }
        Command::NextRange { current, quantity } => {
            let range = SerialCursor::new(current).allocate(quantity)?;
            writeln!(out, "{}\t{}", range.start, range.end)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_batch_args_apply_config_defaults() {
        let cli = Cli::try_parse_from([
            "epcgen", "plan", "--upc", "012345678905", "--start", "1000", "--quantity", "1000",
        ])
        .unwrap();
        let Command::Plan { batch, .. } = cli.command else {
            panic!("expected plan");
        };

        let config = Config {
            max_per_batch: 300,
            overage: Overage {
                two_percent: true,
                seven_percent: false,
            },
            label_rule: LabelRule::Plain,
            ..Config::default()
        };
        let request = batch.request(&config).unwrap();
        assert_eq!(request.total_quantity(), 1020);
        assert_eq!(request.max_per_batch(), 300);
        assert_eq!(batch.rule(&config), LabelRule::Plain);
    }

    #[test]
    fn test_batch_args_flags_override() {
        let cli = Cli::try_parse_from([
            "epcgen",
            "generate",
            "--upc",
            "012345678905",
            "--start",
            "1",
            "--quantity",
            "1000",
            "--per-batch",
            "250",
            "--seven-percent",
            "--label-rule",
            "legacy",
        ])
        .unwrap();
        let Command::Generate { batch } = cli.command else {
            panic!("expected generate");
        };

        let config = Config {
            label_rule: LabelRule::Plain,
            ..Config::default()
        };
        let request = batch.request(&config).unwrap();
        assert_eq!(request.total_quantity(), 1070);
        assert_eq!(request.max_per_batch(), 250);
        assert_eq!(batch.rule(&config), LabelRule::Legacy);
    }

    #[test]
    fn test_resolve_template() {
        let config = Config {
            templates: vec![config::TemplateEntry {
                customer: "Acme".to_string(),
                label_size: "2x1".to_string(),
                path: PathBuf::from("templates/Acme/2x1.btw"),
            }],
            ..Config::default()
        };

        let found =
            resolve_template(&config, Some("Acme".to_string()), Some("2x1".to_string())).unwrap();
        assert_eq!(found, Some(PathBuf::from("templates/Acme/2x1.btw")));

        assert_eq!(
            resolve_template(&config, Some("Acme".to_string()), None).unwrap(),
            None
        );

        let err = resolve_template(&config, Some("Acme".to_string()), Some("4x6".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "no template configured for Acme / 4x6");
    }

    #[test]
    fn test_json_lines_sink() {
        let request = BatchRequest::new(Upc::parse("012345678905").unwrap(), 1, 3, 2).unwrap();
        let mut sink = JsonLinesSink {
            out: Vec::new(),
            label: String::new(),
        };
        sgtin::generate(&request, LabelRule::Legacy, &mut sink).unwrap();

        let text = String::from_utf8(sink.out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["chunk"], "012345678905.DB1.0K-0K");
        assert_eq!(lines[0]["UPC"], "012345678905");
        assert_eq!(lines[0]["Serial #"], 1);
        assert_eq!(lines[0]["EPC"], "303400C0E4424C8000000001");
        assert_eq!(lines[2]["chunk"], "012345678905.DB2.0K-0K");
    }
}

use clap::Parser;
use log::info;
use monthly_averages::{Archive, FrameArchive, MonthAverages, StationZone, TimeSpan, UnitsConfig};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Computes twelve-month climatological averages from a weather archive
struct Cli {
    /// Archive table (CSV or Parquet) with dateTime, usUnits, interval, outTemp and rain columns
    #[arg(long)]
    archive: PathBuf,

    /// JSON unit configuration with "Groups" and "StringFormats"
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start of the report period as a unix timestamp, defaults to the first record
    #[arg(long)]
    start: Option<i64>,

    /// End of the report period as a unix timestamp, defaults to the last record
    #[arg(long)]
    stop: Option<i64>,

    /// Station time zone for calendar months and days: "local", "utc" or an offset like "+02:00"
    #[arg(long, default_value = "local", allow_hyphen_values = true)]
    zone: StationZone,

    /// Where to write the JSON object, defaults to stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map(UnitsConfig::from_file)
        .transpose()?;
    let archive = FrameArchive::from_path(&cli.archive)?.with_zone(cli.zone);

    let start = match cli.start {
        Some(start) => start,
        None => archive.first_good_stamp()?.unwrap_or_default(),
    };
    let stop = match cli.stop {
        Some(stop) => stop,
        None => archive
            .get_record(i64::MAX)?
            .map(|record| record.date_time)
            .unwrap_or(start),
    };
    let timespan = TimeSpan::new(start, stop);
    info!("Computing monthly averages for {}", timespan);

    let averages = MonthAverages::builder()
        .maybe_config(config)
        .zone(cli.zone)
        .build();
    let results = averages.get_extension_list(timespan, || &archive)?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for search_list in &results {
        serde_json::to_writer_pretty(&mut writer, search_list)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

//! Grid clustering tool for geo markers
//!
//! Reads markers from a CSV file, clusters them on the pixel grid of a Web
//! Mercator view, and writes either one row per cluster or the original rows
//! of each cluster's representative marker.

use anyhow::{Context, Result, bail, ensure};
use bitvec::prelude::*;
use clap::Parser;
use csv::{ReaderBuilder, Writer, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rust_gridcluster::cluster::{Bounds, Cluster, GridCluster, GridConfig, Marker, WebMercator};


#[derive(Parser)]
#[command(name = "rust_gridcluster_cli")]
#[command(about = "Grid-aligned geo marker clustering tool", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude[,weight[,category]] columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Web Mercator zoom level of the view
    #[arg(short, long, default_value_t = 10.0)]
    zoom: f64,

    /// Grid cell size in pixels
    #[arg(short, long, default_value_t = rust_gridcluster::cluster::DEFAULT_SIZE)]
    size: f64,

    /// Padding around the view, as a fraction of its extent
    #[arg(short, long, default_value_t = rust_gridcluster::cluster::DEFAULT_VIEW_PADDING)]
    padding: f64,

    /// View bounds as min_lat,max_lat,min_lng,max_lng (default: all markers)
    #[arg(short, long, value_parser = parse_bounds, allow_hyphen_values = true)]
    bounds: Option<Bounds>,

    /// Write the input rows of each cluster's representative marker instead
    /// of cluster summaries
    #[arg(short, long)]
    representatives: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    ensure!(args.size > 0.0, "grid size must be positive, got {}", args.size);
    ensure!(
        args.padding >= 0.0,
        "view padding must not be negative, got {}",
        args.padding
    );

    let (markers, csv_records) = read_markers_and_csv(&args.input)
        .with_context(|| format!("reading markers from {}", args.input.display()))?;

    if markers.is_empty() {
        bail!("No markers found in CSV file");
    }
    debug!(markers = markers.len(), input = %args.input.display(), "read markers");

    let mut engine = GridCluster::with_config(GridConfig {
        size: args.size,
        view_padding: args.padding,
    });
    for marker in markers {
        engine.register_marker(marker);
    }

    let view = match args.bounds {
        Some(bounds) => bounds,
        None => default_view(&engine)?,
    };
    debug!(?view, zoom = args.zoom, size = args.size, "processing view");

    let projection = WebMercator::new(args.zoom);
    let count = engine.process_view(&view, &projection).len();
    info!(clusters = count, "clustered markers");

    let mut writer = open_output(args.output.as_deref())?;
    if args.representatives {
        let rows = representative_rows(&engine, csv_records.len());
        write_selected_records(&mut writer, &csv_records, &rows)?;
    } else {
        write_clusters(&mut writer, engine.clusters())?;
    }
    writer.flush()?;

    if let Some(output) = &args.output {
        debug!(output = %output.display(), "clusters written");
    }
    Ok(())
}

/// Margin added around the markers' bounding box, in degrees
const VIEW_MARGIN: f64 = 1e-6;

/// View covering every visible marker
///
/// The sweep keeps only latitudes strictly inside the view, so the bounding
/// box alone would drop the markers lying on its edges, and all of them when
/// the box is flat.
fn default_view<T>(engine: &GridCluster<T>) -> Result<Bounds> {
    let bounds = engine
        .compute_global_bounds()
        .context("no visible marker to derive the view from")?;

    Ok(Bounds::new(
        bounds.min_lat - VIEW_MARGIN,
        bounds.max_lat + VIEW_MARGIN,
        bounds.min_lng - VIEW_MARGIN,
        bounds.max_lng + VIEW_MARGIN,
    ))
}

/// Logs go to stderr so stdout stays clean CSV
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Parses `min_lat,max_lat,min_lng,max_lng`
fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid bounds {s:?}: {e}"))?;

    match values[..] {
        [min_lat, max_lat, min_lng, max_lng] => Ok(Bounds::new(min_lat, max_lat, min_lng, max_lng)),
        _ => Err(format!(
            "expected 4 comma separated values, got {}",
            values.len()
        )),
    }
}

/// CSV records type alias for readability
type CsvRecords = Vec<Vec<String>>;

/// Markers carry the index of the CSV record they were read from
type RowMarker = Marker<usize>;

/// Checks whether the first record is a header row
fn has_header(records: &[Vec<String>]) -> bool {
    records
        .first()
        .and_then(|record| record.first())
        .is_some_and(|cell| cell.trim().parse::<f64>().is_err())
}

/// Reads markers and CSV records from a file in a single pass
///
/// Expected format: `latitude,longitude[,weight[,category]]` (header row is
/// optional). An empty or unparsable weight defaults to 1 and an empty
/// category means uncategorized. Rows without valid coordinates are skipped.
///
/// # Returns
///
/// A tuple `(markers, records)` where:
/// - `markers` are parsed markers, their payload being the record index
/// - `records` are raw CSV records for output preservation
fn read_markers_and_csv(filename: &Path) -> Result<(Vec<RowMarker>, CsvRecords)> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    let start_idx = if has_header(&records) { 1 } else { 0 };
    let mut markers = Vec::new();

    for (row, record) in records.iter().enumerate().skip(start_idx) {
        if record.len() < 2 {
            continue;
        }

        let lat = record[0].trim().parse::<f64>();
        let lng = record[1].trim().parse::<f64>();
        let (Ok(lat), Ok(lng)) = (lat, lng) else {
            continue;
        };

        let mut marker = Marker::new(lat, lng, row);
        if let Some(weight) = record.get(2).and_then(|w| w.trim().parse::<f64>().ok()) {
            marker = marker.with_weight(weight);
        }
        if let Some(category) = record.get(3).map(|c| c.trim()).filter(|c| !c.is_empty()) {
            marker = marker.with_category(category);
        }
        markers.push(marker);
    }

    Ok((markers, records))
}

/// Marks the records holding the representative marker of each cluster
fn representative_rows(engine: &GridCluster<usize>, num_records: usize) -> BitVec {
    let mut rows = bitvec![0; num_records];

    for cluster in engine.clusters() {
        let row = cluster
            .marker()
            .and_then(|id| engine.marker(id))
            .map(|marker| marker.payload);
        if let Some(row) = row.filter(|&row| row < num_records) {
            rows.set(row, true);
        }
    }

    rows
}

/// Opens the CSV output, stdout when no path is given
fn open_output(path: Option<&Path>) -> Result<Writer<Box<dyn io::Write>>> {
    let sink: Box<dyn io::Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(WriterBuilder::new().flexible(true).from_writer(sink))
}

/// Writes the selected records, keeping the header row if there is one
fn write_selected_records<W: io::Write>(
    writer: &mut Writer<W>,
    csv_records: &[Vec<String>],
    rows: &BitSlice,
) -> Result<()> {
    if has_header(csv_records) {
        writer.write_record(&csv_records[0])?;
    }

    for row in rows.iter_ones() {
        if let Some(record) = csv_records.get(row) {
            writer.write_record(record)?;
        }
    }

    Ok(())
}

/// Formats category stats as `name:count` pairs joined by `;`
fn format_stats(cluster: &Cluster) -> String {
    cluster
        .stats()
        .iter()
        .map(|(category, count)| format!("{category}:{count}"))
        .collect::<Vec<_>>()
        .join(";")
}

/// Writes one row per cluster
///
/// Format: `latitude,longitude,population,weight,categories`, the position
/// being the weighted centroid.
fn write_clusters<W: io::Write>(writer: &mut Writer<W>, clusters: &[Cluster]) -> Result<()> {
    writer.write_record(["latitude", "longitude", "population", "weight", "categories"])?;

    for cluster in clusters {
        let center = cluster.average_position();
        writer.write_record([
            center.lat.to_string(),
            center.lng.to_string(),
            cluster.population().to_string(),
            cluster.total_weight().to_string(),
            format_stats(cluster),
        ])?;
    }

    Ok(())
}

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [COL_LAUNCH_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY];

/// Violations of the launch-record schema. I/O and parse failures travel
/// separately as `anyhow` context chains.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: &'static str },
    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },
    #[error("file contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    LaunchDataset::from_records(records).ok_or_else(|| SchemaError::Empty.into())
}

// ---------------------------------------------------------------------------
// Row validation shared by the text formats
// ---------------------------------------------------------------------------

/// One row as it appears in CSV / JSON, before validation.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<i64>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

fn validate(
    row: usize,
    flight_number: Option<i64>,
    launch_site: String,
    payload_mass_kg: f64,
    class: f64,
    booster_version: Option<String>,
    booster_version_category: String,
) -> Result<LaunchRecord, SchemaError> {
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(SchemaError::InvalidPayload {
            row,
            value: payload_mass_kg,
        });
    }
    // Exactly 0 or 1; fractional values are not truncated.
    let outcome = if class == 0.0 || class == 1.0 {
        Outcome::from_class(class as i64)
    } else {
        None
    }
    .ok_or(SchemaError::InvalidClass { row, value: class })?;

    Ok(LaunchRecord {
        flight_number,
        launch_site,
        payload_mass_kg,
        outcome,
        booster_version,
        booster_version_category,
    })
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        validate(
            row,
            self.flight_number,
            self.launch_site,
            self.payload_mass_kg,
            self.class,
            self.booster_version,
            self.booster_version_category,
        )
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// CSV layout: header row with column names; extra columns are ignored.
fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(SchemaError::MissingColumn(col).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<LaunchRecord>> {
    let rows: Vec<RawLaunchRow> = serde_json::from_str(text).context("parsing JSON records")?;
    rows.into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i).map_err(Into::into))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Numeric columns may be any integer or float type, string columns Utf8 or
/// LargeUtf8; everything is cast to Float64 / Int64 / Utf8 before reading.
/// `class` is read as Float64 so a fractional value is rejected, not truncated.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }
    Ok(records)
}

/// Append the rows of one record batch. `first_row` numbers rows across batches.
fn read_batch(batch: &RecordBatch, first_row: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = required_column(batch, COL_LAUNCH_SITE, &DataType::Utf8)?;
    let payloads = required_column(batch, COL_PAYLOAD, &DataType::Float64)?;
    let classes = required_column(batch, COL_CLASS, &DataType::Float64)?;
    let categories = required_column(batch, COL_BOOSTER_CATEGORY, &DataType::Utf8)?;
    let flights = optional_column(batch, COL_FLIGHT_NUMBER, &DataType::Int64)?;
    let versions = optional_column(batch, COL_BOOSTER_VERSION, &DataType::Utf8)?;

    let sites = sites.as_string::<i32>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let classes = classes.as_primitive::<Float64Type>();
    let categories = categories.as_string::<i32>();
    let flights = flights.as_ref().map(|a| a.as_primitive::<Int64Type>());
    let versions = versions.as_ref().map(|a| a.as_string::<i32>());

    for i in 0..batch.num_rows() {
        let row = first_row + i;
        non_null(sites, i, row, COL_LAUNCH_SITE)?;
        non_null(payloads, i, row, COL_PAYLOAD)?;
        non_null(classes, i, row, COL_CLASS)?;
        non_null(categories, i, row, COL_BOOSTER_CATEGORY)?;

        let flight_number = flights.filter(|a| a.is_valid(i)).map(|a| a.value(i));
        let booster_version = versions
            .filter(|a| a.is_valid(i))
            .map(|a| a.value(i).to_string());

        out.push(validate(
            row,
            flight_number,
            sites.value(i).to_string(),
            payloads.value(i),
            classes.value(i),
            booster_version,
            categories.value(i).to_string(),
        )?);
    }
    Ok(())
}

fn non_null(arr: &dyn Array, i: usize, row: usize, column: &'static str) -> Result<(), SchemaError> {
    if arr.is_null(i) {
        Err(SchemaError::NullValue { row, column })
    } else {
        Ok(())
    }
}

fn required_column(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef> {
    optional_column(batch, name, to)?.ok_or_else(|| SchemaError::MissingColumn(name).into())
}

fn optional_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<Option<ArrayRef>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let cast_col = cast(col, to).with_context(|| format!("casting column '{name}' to {to}"))?;
    Ok(Some(cast_col))
}

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster eras: category, typical payload ceiling (kg), success probability.
const ERAS: [(&str, f64, f64); 5] = [
    ("v1.0", 1_000.0, 0.2),
    ("v1.1", 4_500.0, 0.35),
    ("FT", 6_000.0, 0.7),
    ("B4", 9_600.0, 0.6),
    ("B5", 9_600.0, 0.95),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

struct Row {
    flight_number: i64,
    launch_site: &'static str,
    payload_mass_kg: f64,
    class: i64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SimpleRng, per_era: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut flight_number = 1;
    for (era_no, &(category, ceiling, p_success)) in ERAS.iter().enumerate() {
        // Early eras flew only from the first pad.
        let sites: &[&'static str] = if era_no == 0 { &SITES[..1] } else { &SITES };
        for _ in 0..per_era {
            let payload = (rng.next_f64() * ceiling).round();
            rows.push(Row {
                flight_number,
                launch_site: rng.pick(sites),
                payload_mass_kg: payload,
                class: i64::from(rng.next_f64() < p_success),
                booster_version: format!("F9 {category} B{}", 1000 + flight_number),
                category,
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for r in rows {
        writer.write_record([
            r.flight_number.to_string(),
            r.launch_site.to_string(),
            r.class.to_string(),
            format!("{:.1}", r.payload_mass_kg),
            r.booster_version.clone(),
            r.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 12);

    write_csv("sample_launches.csv", &rows)?;
    write_parquet("sample_launches.parquet", &rows)?;

    println!(
        "Wrote {} launches across {} sites to sample_launches.csv / sample_launches.parquet",
        rows.len(),
        SITES.len()
    );
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration of the dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: success by site and payload vs. outcome")]
pub struct Config {
    /// Launch records file (.csv, .json or .parquet).
    #[arg(default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Step of the payload range sliders, in kg.
    #[arg(long, default_value_t = 1000.0, value_parser = parse_step)]
    pub payload_step: f64,
}

fn parse_step(s: &str) -> Result<f64, String> {
    let step: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(format!("payload step must be a positive number, got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(cfg.data, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(cfg.payload_step, 1000.0);
    }

    #[test]
    fn explicit_values() {
        let cfg =
            Config::try_parse_from(["launch-dash", "data/launches.parquet", "--payload-step", "250"])
                .unwrap();
        assert_eq!(cfg.data, PathBuf::from("data/launches.parquet"));
        assert_eq!(cfg.payload_step, 250.0);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(Config::try_parse_from(["launch-dash", "--payload-step", "0"]).is_err());
        assert!(Config::try_parse_from(["launch-dash", "--payload-step", "-5"]).is_err());
    }
}

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wifi_consensus::{
    CalculatorConfig, Fix, MemoryLocationStore, VerificationOutcome, VerifyingLocationCalculator,
};

/// Printed summary of one calculation
#[derive(Serialize)]
struct Output<'a> {
    fix: Option<&'a Fix>,
    verification: String,
    report: &'a wifi_consensus::CalculationReport,
}

fn usage(program: &str) -> String {
    format!("Usage: {} <fixes_json> <now_ms> [config_json]", program)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("wifi-consensus", |s| s.as_str());

    if args.len() < 3 || args.len() > 4 {
        eprintln!("{}", usage(program));
        return Err("Invalid arguments".into());
    }

    let json_path = &args[1];
    let now_ms = args[2].parse::<u64>()?;
    let config = match args.get(3) {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };

    let json_data = std::fs::read_to_string(json_path)?;
    let fixes: Vec<Fix> = serde_json::from_str(&json_data)?;

    let calculator = VerifyingLocationCalculator::new(config)?;
    let mut store = MemoryLocationStore::new();
    let calculation = calculator.calculate_at(&fixes, now_ms, &mut store);

    let verification = match &calculation.verification {
        VerificationOutcome::NotRequired => "not required".to_string(),
        VerificationOutcome::Persisted { count } => format!("persisted {} fixes", count),
        VerificationOutcome::Failed(e) => format!("failed: {}", e),
    };
    let output = Output {
        fix: calculation.fix.as_ref(),
        verification,
        report: &calculation.report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixes_from_json() {
        let json_data = r#"
        [
          { "latitude": 37.7749, "longitude": -122.4194, "accuracy": 40.0, "signal_level": -60, "source_id": "ap-1" },
          { "latitude": 37.7751, "longitude": -122.4190, "accuracy": 35.0, "signal_level": -72, "source_id": "ap-2",
            "altitude": 16.0 },
          { "latitude": 37.7747, "longitude": -122.4197, "accuracy": 60.0, "signal_level": -81, "source_id": "ap-3" }
        ]
        "#;
        let fixes: Vec<Fix> = serde_json::from_str(json_data).unwrap();
        let calculator = VerifyingLocationCalculator::default();
        let mut store = MemoryLocationStore::new();

        let calculation = calculator.calculate_at(&fixes, 1_723_111_199_986, &mut store);

        let fix = calculation.fix.as_ref().unwrap();
        assert_eq!(fix.altitude, Some(16.0));
        assert!((fix.latitude - 37.7749).abs() < 0.001);
        assert_eq!(store.len(), 3);
        assert!(usage("wifi-consensus").contains("<fixes_json>"));
    }
}

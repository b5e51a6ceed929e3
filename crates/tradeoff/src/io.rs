//! Request loading and response writing

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tradeoff_core::{TradeoffInput, TradeoffOutput};

/// Encoding of a request file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
}

impl RequestFormat {
    /// `.yaml` and `.yml` are YAML; anything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => RequestFormat::Yaml,
            _ => RequestFormat::Json,
        }
    }
}

pub fn parse_request(content: &str, format: RequestFormat) -> Result<TradeoffInput> {
    match format {
        RequestFormat::Yaml => {
            serde_saphyr::from_str(content).wrap_err("Failed to parse YAML request")
        }
        RequestFormat::Json => {
            serde_json::from_str(content).wrap_err("Failed to parse JSON request")
        }
    }
}

/// Read and parse a request file
pub fn load_request(path: &Path) -> Result<TradeoffInput> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read request file {}", path.display()))?;
    let request = parse_request(&content, RequestFormat::from_path(path))
        .wrap_err_with(|| format!("Invalid request in {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        debts = request.debts.len(),
        goals = request.goals.len(),
        "Loaded request"
    );
    Ok(request)
}

pub fn render_output(output: &TradeoffOutput, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(output)?
    } else {
        serde_json::to_string_pretty(output)?
    };
    Ok(json)
}

/// Write content to a file using write-then-rename.
///
/// A reader never observes a half-written response, even if the process
/// is interrupted mid-write.
pub fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tradeoff_core::{FinancialPriority, SimulationConfig, StrategyEvaluator};

    const YAML_REQUEST: &str = r#"
monthly_income: 6200
essential_expenses: 3400
debts:
  - name: Visa
    kind: credit_card
    balance: 4200
    interest_rate: 0.229
    minimum_payment: 125
  - name: Car
    kind: auto_loan
    balance: 14000
    interest_rate: 0.054
    minimum_payment: 310
goals:
  - id: wedding
    name: Wedding
    target_amount: 15000
    current_amount: 2000
emergency_fund:
  target_amount: 10000
  current_amount: 6000
preferences:
  priority: debt_free
as_of: 2025-04-01
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(RequestFormat::from_path(Path::new("req.yaml")), RequestFormat::Yaml);
        assert_eq!(RequestFormat::from_path(Path::new("req.YML")), RequestFormat::Yaml);
        assert_eq!(RequestFormat::from_path(Path::new("req.json")), RequestFormat::Json);
        assert_eq!(RequestFormat::from_path(Path::new("request")), RequestFormat::Json);
    }

    #[test]
    fn test_load_yaml_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.yaml");
        fs::write(&path, YAML_REQUEST).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.monthly_income, 6_200.0);
        assert_eq!(request.debts.len(), 2);
        assert_eq!(request.debts[0].name, "Visa");
        assert_eq!(request.goals[0].id.as_str(), "wedding");
        assert_eq!(request.preferences.priority, FinancialPriority::DebtFree);
        assert_eq!(request.as_of, Some(jiff::civil::date(2025, 4, 1)));
        assert_eq!(request.simulation, None);
    }

    #[test]
    fn test_load_json_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            r#"{"monthly_income": 4000, "essential_expenses": 2500, "simulation": {"num_simulations": 25}}"#,
        )
        .unwrap();

        let request = load_request(&path).unwrap();
        assert!(request.debts.is_empty());
        assert_eq!(
            request.simulation,
            Some(SimulationConfig::default().with_simulations(25))
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_request(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err}").contains("Failed to read request file"));
    }

    #[test]
    fn test_malformed_request_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_request(&path).is_err());
    }

    #[test]
    fn test_write_response_atomically() {
        let request = parse_request(YAML_REQUEST, RequestFormat::Yaml).unwrap();
        let mut evaluator =
            StrategyEvaluator::with_seed(SimulationConfig::default().with_simulations(50), 3);
        let output = evaluator.execute(&request).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("response.json");
        atomic_write(&path, &render_output(&output, true).unwrap()).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let written: TradeoffOutput =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.recommended_strategy, output.recommended_strategy);
        assert_eq!(written.strategies.len(), 3);
    }
}

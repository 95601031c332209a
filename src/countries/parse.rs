use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
pub struct RawCountry {
    pub name: String,
    #[serde(rename = "alpha3Code")]
    pub code: String,
    pub region: String,
    pub population: u64,
    pub borders: Vec<String>,
    pub timezones: Vec<String>,
    pub languages: Vec<Value>,
}

pub fn load_countries(path: &Path) -> Result<Vec<RawCountry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read country data from {}", path.display()))?;
    parse_countries(&raw)
        .with_context(|| format!("failed to parse country data in {}", path.display()))
}

pub(super) fn parse_countries(raw: &str) -> Result<Vec<RawCountry>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in country data")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("country data must be a JSON array"))?;

    let mut countries = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let country = RawCountry::deserialize(entry)
            .with_context(|| format!("invalid country record at index {index}"))?;
        countries.push(country);
    }

    Ok(countries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"[
        {
            "name": "Portugal",
            "alpha3Code": "PRT",
            "region": "Europe",
            "population": 10374822,
            "borders": ["ESP"],
            "timezones": ["UTC-01:00", "UTC"],
            "languages": [{"iso639_1": "pt", "name": "Portuguese"}],
            "capital": "Lisbon"
        },
        {
            "name": "Japan",
            "alpha3Code": "JPN",
            "region": "Asia",
            "population": 126960000,
            "borders": [],
            "timezones": ["UTC+09:00"],
            "languages": [{"iso639_1": "ja", "name": "Japanese"}]
        }
    ]"#;

    #[test]
    fn parses_records_and_ignores_unknown_fields() {
        let countries = parse_countries(SAMPLE).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].code, "PRT");
        assert_eq!(countries[0].timezones.len(), 2);
        assert_eq!(countries[1].borders.len(), 0);
        assert_eq!(countries[1].languages.len(), 1);
    }

    #[test]
    fn missing_field_is_an_error_naming_the_record() {
        let raw = r#"[{"name": "Nowhere", "alpha3Code": "NWH", "region": "Asia", "population": 1}]"#;
        let error = parse_countries(raw).unwrap_err();
        assert!(format!("{error:#}").contains("index 0"));
    }

    #[test]
    fn rejects_non_array_document() {
        assert!(parse_countries(r#"{"name": "Portugal"}"#).is_err());
    }

    #[test]
    fn empty_array_is_empty_input() {
        assert!(parse_countries("[]").unwrap().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let countries = load_countries(file.path()).unwrap();
        assert_eq!(countries.len(), 2);
    }

    #[test]
    fn bundled_dataset_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/countries.json");
        let countries = load_countries(&path).unwrap();
        assert!(!countries.is_empty());
        assert!(countries.iter().all(|country| country.code.len() == 3));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");
        let error = load_countries(&path).unwrap_err();
        assert!(error.to_string().contains("countries.json"));
    }
}

use crate::error::{CutPlanError, Result};
use crate::material::{CutRequirement, Material};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

const EXPECTED_LENGTH_HEADER: &str = "Length";
const EXPECTED_QUANTITY_HEADER: &str = "Quantity";

#[derive(Debug, Deserialize)]
struct MaterialsFile {
    materials: Vec<Material>,
}

/// Loads materials from a TOML file with a `[[materials]]` array of tables.
///
/// Only field presence and types are checked here; domain validation
/// (positive lengths, feasible cuts) happens when a material is solved.
///
/// # Errors
/// Returns `Config` with the offending path if the file cannot be read or
/// parsed.
pub fn load_materials_toml<P: AsRef<Path>>(path: P) -> Result<Vec<Material>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        CutPlanError::Config(format!(
            "Failed to read materials file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let file: MaterialsFile = toml::from_str(&content).map_err(|e| {
        CutPlanError::Config(format!(
            "Failed to parse materials file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(file.materials)
}

/// Loads materials from a JSON file holding an array of material objects.
pub fn load_materials_json<P: AsRef<Path>>(path: P) -> Result<Vec<Material>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        CutPlanError::Config(format!(
            "Failed to read materials file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let materials: Vec<Material> = serde_json::from_str(&content)?;
    Ok(materials)
}

/// Reads a `Length,Quantity` CSV of required cuts.
///
/// # Errors
/// Returns error if the file cannot be read or the CSV format is invalid.
pub fn read_cuts_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CutRequirement>> {
    let file = std::fs::File::open(path)?;
    read_cuts_from_reader(file)
}

/// Read CSV with `Length,Quantity` format.
/// - Blank rows are skipped
/// - Duplicate lengths are merged by summing their quantities
/// - Extra columns are tolerated
pub fn read_cuts_from_reader<R: Read>(reader: R) -> Result<Vec<CutRequirement>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    // BTreeMap over the raw bit pattern keeps merged lengths in a stable
    // ascending order; lengths come straight from the file, so equal bits
    // mean equal values.
    let mut merged: BTreeMap<u64, (f64, u32)> = BTreeMap::new();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if let Some((length, quantity)) = parse_record(&rec, row)? {
            let entry = merged.entry(length.to_bits()).or_insert((length, 0));
            entry.1 += quantity;
        }
    }

    Ok(merged
        .into_values()
        .map(|(length, quantity)| CutRequirement { length, quantity })
        .collect())
}

/// Validates CSV headers match expected format
fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| CutPlanError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    let length_header = headers
        .get(0)
        .ok_or_else(|| CutPlanError::CsvHeader("Missing length column at index 0".to_string()))?;

    let quantity_header = headers
        .get(1)
        .ok_or_else(|| CutPlanError::CsvHeader("Missing quantity column at index 1".to_string()))?;

    if !length_header.eq_ignore_ascii_case(EXPECTED_LENGTH_HEADER) {
        return Err(CutPlanError::CsvHeader(format!(
            "Expected '{}' in column 0, found '{}'",
            EXPECTED_LENGTH_HEADER, length_header
        )));
    }

    if !quantity_header.eq_ignore_ascii_case(EXPECTED_QUANTITY_HEADER) {
        return Err(CutPlanError::CsvHeader(format!(
            "Expected '{}' in column 1, found '{}'",
            EXPECTED_QUANTITY_HEADER, quantity_header
        )));
    }

    Ok(())
}

fn parse_record(rec: &StringRecord, row: usize) -> Result<Option<(f64, u32)>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }
    let length_str = get_column_value(rec, 0, row)?;
    let quantity_str = get_column_value(rec, 1, row)?;

    if length_str.is_empty() {
        return Ok(None);
    }

    let length: f64 = length_str.parse().map_err(|e| CutPlanError::FieldParse {
        row,
        field: "length",
        value: length_str.to_string(),
        source: e,
    })?;

    // FieldParse carries a ParseFloatError; integer quantities map to Config.
    let quantity: u32 = quantity_str.parse().map_err(|_| {
        CutPlanError::Config(format!("Invalid quantity at row {}: {}", row, quantity_str))
    })?;

    Ok(Some((length, quantity)))
}

/// Safely extracts a column value from a CSV record
fn get_column_value(record: &StringRecord, column_index: usize, row_number: usize) -> Result<&str> {
    record
        .get(column_index)
        .map(str::trim)
        .ok_or_else(|| CutPlanError::CsvRow {
            row: row_number,
            got: record.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_cuts_basic() {
        let data = "Length,Quantity\n101.5,2\n25,6\n";
        let cuts = read_cuts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            cuts,
            vec![
                CutRequirement {
                    length: 25.0,
                    quantity: 6
                },
                CutRequirement {
                    length: 101.5,
                    quantity: 2
                },
            ]
        );
    }

    #[test]
    fn test_read_cuts_merges_duplicates_and_skips_blanks() {
        let data = "Length,Quantity\n25,2\n\n25,3\n";
        let cuts = read_cuts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(cuts.len(), 1);
        assert_eq!(cuts[0].quantity, 5);
    }

    #[test]
    fn test_read_cuts_header_case_insensitive() {
        let data = "length,QUANTITY\n10,1\n";
        assert!(read_cuts_from_reader(data.as_bytes()).is_ok());
    }

    #[test]
    fn test_read_cuts_wrong_header() {
        let data = "Size,Count\n10,1\n";
        let err = read_cuts_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CutPlanError::CsvHeader(_)));
    }

    #[test]
    fn test_read_cuts_bad_length_reports_row() {
        let data = "Length,Quantity\n10,1\nabc,2\n";
        let err = read_cuts_from_reader(data.as_bytes()).unwrap_err();
        match err {
            CutPlanError::FieldParse { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("expected FieldParse, got {other:?}"),
        }
    }

    #[test]
    fn test_read_cuts_bad_quantity() {
        let data = "Length,Quantity\n10,two\n";
        assert!(read_cuts_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_materials_toml_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[materials]]
name = "oak 80x80"
stock_length = 500.0
stock_cost = 484.0
saw_kerf = 1.0
required_cuts = [
    {{ length = 101.5, quantity = 2 }},
    {{ length = 25.0, quantity = 6 }},
]

[[materials]]
name = "pine 18x82"
stock_length = 300.0
stock_cost = 91.0
required_cuts = [{{ length = 25.0, quantity = 24 }}]
"#
        )
        .unwrap();

        let materials = load_materials_toml(file.path()).unwrap();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].name, "oak 80x80");
        assert_eq!(materials[0].required_cuts.len(), 2);
        // saw_kerf defaults to 0 when omitted.
        assert_eq!(materials[1].saw_kerf, 0.0);
    }

    #[test]
    fn test_load_materials_toml_missing_file() {
        let err = load_materials_toml("no_such_file.toml").unwrap_err();
        assert!(matches!(err, CutPlanError::Config(_)));
        assert!(err.to_string().contains("no_such_file.toml"));
    }

    #[test]
    fn test_load_materials_toml_parse_error_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();
        let err = load_materials_toml(file.path()).unwrap_err();
        assert!(matches!(err, CutPlanError::Config(_)));
    }

    #[test]
    fn test_load_materials_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "m", "stock_length": 10.0, "stock_cost": 5.0,
                 "saw_kerf": 0.0,
                 "required_cuts": [{{"length": 4.0, "quantity": 2}}]}}]"#
        )
        .unwrap();
        let materials = load_materials_json(file.path()).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].required_cuts[0].quantity, 2);
    }
}

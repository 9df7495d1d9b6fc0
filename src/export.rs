use crate::error::{CutPlanError, Result};
use crate::report::MaterialResult;
use chrono::Local;
use csv::WriterBuilder;
use itertools::Itertools;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Writes one material's cutting plan to a timestamped CSV file, one row
/// per stock piece. Returns the path of the written file.
///
/// # Arguments
/// * `result` - solved plan for one material
/// * `output_dir` - directory for the file, created if missing; current
///   working directory when `None`
pub fn export_plan_csv(result: &MaterialResult, output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("cutplan_{}_{timestamp}.csv", slugify(&result.name));

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| CutPlanError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| CutPlanError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    let writer = BufWriter::new(file);
    let mut wtr = WriterBuilder::new().from_writer(writer);

    wtr.write_record(["Piece", "Cuts", "TotalLengthUsed", "Waste"])?;
    for piece in &result.cutting_plan {
        let cuts = piece.cuts_to_make.iter().map(|c| c.to_string()).join(" ");
        wtr.write_record([
            piece.stock_piece_number.to_string(),
            cuts,
            piece.total_length_used.to_string(),
            piece.waste.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(file_path)
}

/// Filesystem-safe material name: anything outside [A-Za-z0-9._-] becomes '-'.
fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

use crate::material::Material;
use crate::solver::Packing;
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Write;

/// Cutting instructions for one physical stock piece, in original
/// (pre-kerf) lengths. Lengths are rounded to two decimals for display;
/// the search itself never rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceReport {
    pub stock_piece_number: usize,
    pub cuts_to_make: Vec<f64>,
    pub total_length_used: f64,
    pub waste: f64,
}

/// Solved plan for one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialResult {
    pub name: String,
    pub stock_pieces_needed: usize,
    pub material_cost: f64,
    pub stock_length: f64,
    pub saw_kerf: f64,
    pub cutting_plan: Vec<PieceReport>,
}

/// A material rejected before the search started, kept so the report can
/// flag it instead of silently dropping it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMaterial {
    pub name: String,
    pub reason: String,
}

/// Results for a whole run, in input order. The grand total covers solved
/// materials only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub materials: Vec<MaterialResult>,
    pub skipped: Vec<SkippedMaterial>,
    pub grand_total_cost: f64,
}

impl OptimizationResult {
    pub fn material(&self, name: &str) -> Option<&MaterialResult> {
        self.materials.iter().find(|m| m.name == name)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a winning packing back into a per-material result: original
/// lengths per piece, per-piece waste, and material cost.
pub fn build_material_result(material: &Material, packing: &Packing) -> MaterialResult {
    let cutting_plan = packing
        .pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| {
            // Revert from kerf-adjusted size back to the requested length.
            let mut cuts_to_make: Vec<f64> = piece
                .iter()
                .map(|&cut_size| round2(cut_size - material.saw_kerf))
                .collect();
            cuts_to_make.sort_by(|a, b| b.partial_cmp(a).unwrap());

            let total_length_used: f64 = piece.iter().sum();
            PieceReport {
                stock_piece_number: i + 1,
                cuts_to_make,
                total_length_used: round2(total_length_used),
                waste: round2(material.stock_length - total_length_used),
            }
        })
        .collect();

    MaterialResult {
        name: material.name.clone(),
        stock_pieces_needed: packing.piece_count(),
        material_cost: packing.piece_count() as f64 * material.stock_cost,
        stock_length: material.stock_length,
        saw_kerf: material.saw_kerf,
        cutting_plan,
    }
}

/// Renders the full run as a human-readable report.
pub fn render_text(result: &OptimizationResult) -> String {
    let mut out = String::new();
    let rule = "-----------------------------------------";

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "      *** OPTIMAL CUTTING PLAN ***");
    let _ = writeln!(out, "{rule}");

    for material in &result.materials {
        let _ = writeln!(out, "\n## Material: {}", material.name);
        let _ = writeln!(
            out,
            " > Stock pieces needed: {}",
            material.stock_pieces_needed
        );
        let _ = writeln!(out, " > Stock length: {}", material.stock_length);
        let _ = writeln!(out, " > Saw kerf: {}", material.saw_kerf);
        let _ = writeln!(out, " > Material cost: {}", material.material_cost);
        let _ = writeln!(out, "\n   Cutting plan:");
        for piece in &material.cutting_plan {
            let cuts = piece.cuts_to_make.iter().map(|c| c.to_string()).join(", ");
            let _ = writeln!(out, "   - Stock piece #{}:", piece.stock_piece_number);
            let _ = writeln!(out, "     Cuts to make: [{cuts}]");
            let _ = writeln!(
                out,
                "     Total length used (incl. kerf): {}",
                piece.total_length_used
            );
            let _ = writeln!(out, "     Waste: {}", piece.waste);
        }
    }

    if !result.skipped.is_empty() {
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, "Skipped materials:");
        for skipped in &result.skipped {
            let _ = writeln!(out, " - {}: {}", skipped.name, skipped.reason);
        }
    }

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "### GRAND TOTAL COST: {} ###", result.grand_total_cost);
    let _ = writeln!(out, "{rule}");
    out
}

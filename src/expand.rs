use crate::error::{CutPlanError, Result};
use crate::material::Material;

/// Expands a material's `{length -> quantity}` requirements into a flat list
/// of kerf-adjusted cut sizes, sorted from largest to smallest.
///
/// The space a cut consumes on the saw is its length plus the kerf. Sorting
/// descending is the First-Fit-Decreasing heuristic: large, hard-to-fit cuts
/// are placed first, which lets the solver find good plans early and prune
/// most of the search tree. It does not affect optimality of the exact
/// search, only its running time.
///
/// # Errors
/// Returns `InvalidInput` if the material fails structural validation, or
/// `InfeasibleCut` if any single cut plus kerf exceeds the stock length.
/// No partial result is produced.
pub fn expand_cuts(material: &Material) -> Result<Vec<f64>> {
    material.validate()?;

    let mut cut_sizes = Vec::with_capacity(material.total_cut_count());
    for req in &material.required_cuts {
        let cut_size = req.length + material.saw_kerf;
        if cut_size > material.stock_length {
            return Err(CutPlanError::InfeasibleCut {
                material: material.name.clone(),
                length: req.length,
                kerf: material.saw_kerf,
                stock_length: material.stock_length,
            });
        }
        for _ in 0..req.quantity {
            cut_sizes.push(cut_size);
        }
    }

    // Largest first. NaN is excluded by validation, so total ordering holds.
    cut_sizes.sort_by(|a, b| b.partial_cmp(a).unwrap());
    Ok(cut_sizes)
}

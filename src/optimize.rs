use crate::error::Result;
use crate::expand::expand_cuts;
use crate::material::Material;
use crate::report::{MaterialResult, OptimizationResult, SkippedMaterial, build_material_result};
use crate::solver::pack_cuts;
use log::{info, warn};

/// Solves one material end to end: expand and validate, search, report.
///
/// # Errors
/// Returns the expander's `InvalidInput` / `InfeasibleCut` errors; the
/// search itself cannot fail on validated input.
pub fn optimize_material(material: &Material) -> Result<MaterialResult> {
    info!(
        "Processing material '{}' ({} cuts, stock length {})",
        material.name,
        material.total_cut_count(),
        material.stock_length
    );

    let cut_sizes = expand_cuts(material)?;
    let packing = pack_cuts(&cut_sizes, material.stock_length);
    let result = build_material_result(material, &packing);

    info!(
        "Optimal plan for '{}' uses {} stock piece(s), cost {}",
        result.name, result.stock_pieces_needed, result.material_cost
    );
    Ok(result)
}

/// Solves each material independently and aggregates the run.
///
/// Materials are mutually independent; one material failing validation is
/// logged, recorded under `skipped` and excluded from the grand total, and
/// the remaining materials are still solved.
pub fn optimize_materials(materials: &[Material]) -> OptimizationResult {
    let mut result = OptimizationResult::default();

    for material in materials {
        match optimize_material(material) {
            Ok(material_result) => {
                result.grand_total_cost += material_result.material_cost;
                result.materials.push(material_result);
            }
            Err(err) => {
                warn!("Skipping material '{}': {}", material.name, err);
                result.skipped.push(SkippedMaterial {
                    name: material.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CutPlanError;
    use crate::material::CutRequirement;

    fn material(
        name: &str,
        stock_length: f64,
        stock_cost: f64,
        saw_kerf: f64,
        cuts: &[(f64, u32)],
    ) -> Material {
        Material {
            name: name.to_string(),
            stock_length,
            stock_cost,
            saw_kerf,
            required_cuts: cuts
                .iter()
                .map(|&(length, quantity)| CutRequirement { length, quantity })
                .collect(),
        }
    }

    #[test]
    fn test_scenario_a_exact_fit_zero_kerf() {
        let m = material("a", 10.0, 1.0, 0.0, &[(6.0, 1), (4.0, 2)]);
        let result = optimize_material(&m).unwrap();
        assert_eq!(result.stock_pieces_needed, 2);
    }

    #[test]
    fn test_scenario_b_kerf_forces_extra_piece() {
        let with_kerf = material("b", 10.0, 1.0, 1.0, &[(5.0, 2)]);
        assert_eq!(optimize_material(&with_kerf).unwrap().stock_pieces_needed, 2);

        let without_kerf = material("b", 10.0, 1.0, 0.0, &[(5.0, 2)]);
        assert_eq!(
            optimize_material(&without_kerf).unwrap().stock_pieces_needed,
            1
        );
    }

    #[test]
    fn test_scenario_c_infeasible_cut() {
        let m = material("c", 10.0, 1.0, 0.0, &[(11.0, 1)]);
        assert!(matches!(
            optimize_material(&m),
            Err(CutPlanError::InfeasibleCut {
                length,
                stock_length,
                ..
            }) if length == 11.0 && stock_length == 10.0
        ));
    }

    #[test]
    fn test_scenario_d_grand_total() {
        let materials = vec![
            material("one-piece", 300.0, 91.0, 1.0, &[(25.0, 2)]),
            material("two-piece", 10.0, 484.0, 1.0, &[(5.0, 2)]),
        ];
        let result = optimize_materials(&materials);
        assert_eq!(result.material("one-piece").unwrap().stock_pieces_needed, 1);
        assert_eq!(result.material("two-piece").unwrap().stock_pieces_needed, 2);
        assert_eq!(result.grand_total_cost, 1.0 * 91.0 + 2.0 * 484.0);
    }

    #[test]
    fn test_completeness_of_displayed_lengths() {
        let m = material(
            "oak",
            500.0,
            484.0,
            1.0,
            &[(101.5, 2), (84.5, 2), (25.0, 6), (32.0, 4)],
        );
        let result = optimize_material(&m).unwrap();

        let mut displayed: Vec<f64> = result
            .cutting_plan
            .iter()
            .flat_map(|p| p.cuts_to_make.iter().copied())
            .collect();
        let mut expected: Vec<f64> = m
            .required_cuts
            .iter()
            .flat_map(|req| std::iter::repeat_n(req.length, req.quantity as usize))
            .collect();
        displayed.sort_by(|a, b| a.partial_cmp(b).unwrap());
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(displayed, expected);

        for piece in &result.cutting_plan {
            assert!(piece.waste >= 0.0);
            assert!(piece.total_length_used <= m.stock_length);
        }
    }

    #[test]
    fn test_failed_material_does_not_stop_others() {
        let materials = vec![
            material("broken", 10.0, 5.0, 0.0, &[(11.0, 1)]),
            material("fine", 10.0, 5.0, 0.0, &[(4.0, 2)]),
        ];
        let result = optimize_materials(&materials);
        assert_eq!(result.materials.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].name, "broken");
        assert!(result.skipped[0].reason.contains("11"));
        assert_eq!(result.grand_total_cost, 5.0);
    }

    #[test]
    fn test_material_with_no_cuts_costs_nothing() {
        let m = material("empty", 10.0, 7.0, 0.5, &[]);
        let result = optimize_material(&m).unwrap();
        assert_eq!(result.stock_pieces_needed, 0);
        assert_eq!(result.material_cost, 0.0);
        assert!(result.cutting_plan.is_empty());
    }
}

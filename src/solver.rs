//! Exact bin-packing search.
//!
//! Assigns every cut size to a stock piece so that no piece exceeds the
//! stock length, minimising the number of pieces. Depth-first backtracking
//! with branch-and-bound pruning against the best complete plan found so
//! far. The cut list is expected in descending order (see `expand_cuts`);
//! the search is exact either way, but the ordering is what keeps it fast.

/// A complete assignment of cut sizes to stock pieces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    /// One inner vector per physical stock piece, holding the kerf-adjusted
    /// cut sizes assigned to it.
    pub pieces: Vec<Vec<f64>>,
}

impl Packing {
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

/// Best complete plan found so far. Owned by one solve call, passed by
/// mutable reference into the recursion, read by the pruning check on every
/// node. `usize::MAX` stands for "no plan yet".
struct BestSolution {
    piece_count: usize,
    plan: Option<Vec<Vec<f64>>>,
}

/// Computes the minimum-piece packing of `cut_sizes` into stock of length
/// `stock_length`.
///
/// Every cut size must individually fit in one stock piece; the expander
/// guarantees this before the search starts, so the search itself cannot
/// fail. An empty cut list yields the trivial zero-piece packing. With n
/// cuts, one piece per cut is always a valid completion, so a finite answer
/// is guaranteed.
pub fn pack_cuts(cut_sizes: &[f64], stock_length: f64) -> Packing {
    let mut best = BestSolution {
        piece_count: usize::MAX,
        plan: None,
    };
    let mut current: Vec<Vec<f64>> = Vec::new();
    search(cut_sizes, stock_length, &mut current, &mut best);

    Packing {
        pieces: best.plan.unwrap_or_default(),
    }
}

fn search(
    remaining: &[f64],
    stock_length: f64,
    current: &mut Vec<Vec<f64>>,
    best: &mut BestSolution,
) {
    // Prune: a partial plan already as large as the best complete plan can
    // only finish with at least as many pieces.
    if current.len() >= best.piece_count {
        return;
    }

    let Some((&cut, rest)) = remaining.split_first() else {
        // All cuts placed: strict improvement replaces the snapshot; a later
        // plan with an equal count never does.
        if current.len() < best.piece_count {
            best.piece_count = current.len();
            best.plan = Some(current.clone());
        }
        return;
    };

    // Try the cut on every existing piece with room, in plan order.
    for i in 0..current.len() {
        if current[i].iter().sum::<f64>() + cut <= stock_length {
            current[i].push(cut);
            search(rest, stock_length, current, best);
            current[i].pop();
        }
    }

    // Then open a fresh piece for it.
    current.push(vec![cut]);
    search(rest, stock_length, current, best);
    current.pop();
}

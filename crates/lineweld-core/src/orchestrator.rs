//! Top-level consolidation pipeline: simplify, merge, close, simplify.
//!
//! Ported from `cleanup.py`'s top-level `consolidate_paths` driver, which
//! runs the same four stages in the same order for the same reason: the
//! merge engine produces long runs of near-collinear points along spliced
//! seams, and the closure pass can introduce a fresh seam vertex of its
//! own, so a final simplification pass is needed to clean both up.

use crate::closure::close_pass;
use crate::merge::merge;
use crate::simplify::simplify_paths;
use crate::types::{ConsolidationConfig, ConsolidationError, Polyline};

/// Summary counts from a [`consolidate`] run, useful for diagnostics and
/// the CLI's `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Number of polylines given to [`consolidate`].
    pub input_count: usize,
    /// Number of polylines remaining after the merge pass.
    pub after_merge_count: usize,
    /// Number of polylines in the final output.
    pub output_count: usize,
}

/// Run the full consolidation pipeline over `polylines`.
///
/// Stages, in order:
/// 1. Simplify every input polyline with [`ConsolidationConfig::simplify_tol`].
/// 2. Merge collinear, spatially-close open polylines end to end.
/// 3. Promote near-closed open polylines to closed ones.
/// 4. Simplify again, to clean up seams introduced by steps 2 and 3.
///
/// # Errors
///
/// Returns [`ConsolidationError::NegativeTolerance`] if `config` fails
/// [`ConsolidationConfig::validate`]; in that case no work is done.
pub fn consolidate(
    polylines: Vec<Polyline>,
    config: &ConsolidationConfig,
) -> Result<(Vec<Polyline>, ConsolidationReport), ConsolidationError> {
    config.validate()?;

    let input_count = polylines.len();

    let simplified = simplify_paths(&polylines, config.simplify_tol);
    let merged = merge(simplified, config);
    let after_merge_count = merged.len();
    let closed = close_pass(merged, config.d_tol, config.a_tol);
    let output = simplify_paths(&closed, config.simplify_tol);
    let output_count = output.len();

    Ok((
        output,
        ConsolidationReport {
            input_count,
            after_merge_count,
            output_count,
        },
    ))
}

//! The merge engine: iteratively splices collinear, spatially-close open
//! polylines into longer strokes.
//!
//! Ported from `cleanup.py`'s `try_merge_at_endpoint` and
//! `merge_collinear` (loop structure and retry-same-identifier-on-success
//! policy) and `merge_paths` (splice/orientation table, seam dedup via
//! approximate equality). No teacher Rust module solves this exact
//! problem — `mst_join.rs`/`join.rs` build a minimum spanning
//! tree/Eulerian path over *all* segments, a different algorithm —
//! so the state shape here (an owned arena plus a `BTreeSet` active set,
//! plain functions over a mutable struct) follows the teacher's general
//! preference for explicit state over trait objects.

use std::collections::BTreeSet;

use crate::geometry::{approx_eq, collinear, direction, offset};
use crate::index::{End, EndpointIndex};
use crate::types::{ConsolidationConfig, Point, Polyline};

/// Owns the evolving collection of polylines during merging: an
/// append-only arena keyed by stable identifier, plus the set of
/// identifiers still open and eligible for further merges.
///
/// Slots are never removed, only replaced (`i` keeps its slot across a
/// merge) or left in place (a retired `j` simply drops out of `active`).
/// This is how identifiers survive the in-place rewrite a merge performs.
struct WorkingSet {
    slots: Vec<Polyline>,
    active: BTreeSet<usize>,
    /// Identifiers absorbed into another slot by a successful merge.
    /// Disjoint from closed/degenerate identifiers, which were simply
    /// never made active — this set exists so `into_output` can drop the
    /// stale pre-merge content still sitting in a retired `j`'s slot.
    retired: BTreeSet<usize>,
}

impl WorkingSet {
    fn from_polylines(polylines: Vec<Polyline>) -> (Self, EndpointIndex) {
        let mut active = BTreeSet::new();
        let mut index = EndpointIndex::new();
        for (id, polyline) in polylines.iter().enumerate() {
            if !polyline.is_degenerate() && !polyline.is_closed() {
                active.insert(id);
                index.insert(id, polyline);
            }
        }
        (
            Self {
                slots: polylines,
                active,
                retired: BTreeSet::new(),
            },
            index,
        )
    }

    fn get(&self, id: usize) -> &Polyline {
        &self.slots[id]
    }

    fn replace(&mut self, id: usize, polyline: Polyline) {
        self.slots[id] = polyline;
    }

    fn retire(&mut self, id: usize) {
        self.active.remove(&id);
        self.retired.insert(id);
    }

    fn into_output(self) -> Vec<Polyline> {
        let retired = self.retired;
        self.slots
            .into_iter()
            .enumerate()
            .filter(move |(id, _)| !retired.contains(id))
            .map(|(_, polyline)| polyline)
            .collect()
    }
}

/// Splice polyline `a` (merging at `end_a`) with polyline `b` (merging at
/// `end_b`), producing a result whose sense preserves `a`'s direction at
/// its non-merged end.
///
/// `a` is never reversed. `b` is reversed exactly when `end_a == end_b`
/// (both ends are "starts" or both are "ends" — the two paths approach
/// the join from the same rotational sense, so one of them must be
/// flipped to flow into the other). The concatenation order follows
/// `end_a`: if `a` is merging at its end, `a` leads; if at its start,
/// `b` leads. This single routine replaces the four-way branch over
/// `(end_a, end_b)` the orientation table implies.
fn splice(a: &Polyline, end_a: End, b: &Polyline, end_b: End) -> Polyline {
    let mut b_points = b.points().to_vec();
    if end_a == end_b {
        b_points.reverse();
    }
    let a_points = a.points().to_vec();

    let (mut leading, trailing) = if end_a == End::End {
        (a_points, b_points)
    } else {
        (b_points, a_points)
    };

    match (leading.last(), trailing.first()) {
        (Some(&last), Some(&first)) if approx_eq(last, first) => {
            leading.extend_from_slice(&trailing[1..]);
        }
        _ => leading.extend_from_slice(&trailing),
    }

    Polyline::new(leading)
}

/// Unit tangent at `end` of `polyline`, computed from its two points
/// adjacent to that end. `None` if that segment is degenerate.
fn tangent_at(polyline: &Polyline, end: End) -> Option<Point> {
    let points = polyline.points();
    match end {
        End::Start => direction(points[1], points[0]),
        End::End => {
            let n = points.len();
            direction(points[n - 2], points[n - 1])
        }
    }
}

/// Attempt one end-merge step for `id` at `end`. On success, `id`'s slot
/// holds the spliced polyline, the matched identifier is retired, the
/// index reflects both changes, and this returns `true`.
fn try_merge_at(
    working: &mut WorkingSet,
    index: &mut EndpointIndex,
    id: usize,
    end: End,
    config: &ConsolidationConfig,
) -> bool {
    let polyline = working.get(id).clone();
    if polyline.len() < 2 {
        return false;
    }
    let points = polyline.points();
    let endpoint = match end {
        End::Start => points[0],
        End::End => points[points.len() - 1],
    };
    let Some(tangent) = tangent_at(&polyline, end) else {
        return false;
    };

    let offset_tol = config.offset_tol();

    for hit in index.query(endpoint, config.d_tol) {
        if hit.id == id || !working.active.contains(&hit.id) {
            continue;
        }
        let candidate = working.get(hit.id).clone();
        if candidate.len() < 2 {
            continue;
        }
        let Some(candidate_tangent) = tangent_at(&candidate, hit.end) else {
            continue;
        };
        if !collinear(tangent, candidate_tangent, config.a_tol) {
            continue;
        }
        if offset(endpoint, tangent, hit.point, offset_tol) {
            continue;
        }

        index.remove(id, &polyline);
        index.remove(hit.id, &candidate);

        let merged = splice(&polyline, end, &candidate, hit.end);
        working.replace(id, merged.clone());
        working.retire(hit.id);
        index.insert(id, &merged);

        return true;
    }

    false
}

/// Run the merge engine to quiescence: repeatedly scan the active set,
/// trying an end-merge then a start-merge at each identifier (retrying
/// the same identifier after each success), until a full pass produces
/// no merges.
///
/// Termination is guaranteed because every successful merge retires one
/// identifier; at most `polylines.len() - 1` merges can occur.
#[must_use]
pub fn merge(polylines: Vec<Polyline>, config: &ConsolidationConfig) -> Vec<Polyline> {
    let (mut working, mut index) = WorkingSet::from_polylines(polylines);

    loop {
        let snapshot: Vec<usize> = working.active.iter().copied().collect();
        let mut any_merge = false;

        for id in snapshot {
            if !working.active.contains(&id) {
                continue;
            }
            loop {
                if try_merge_at(&mut working, &mut index, id, End::End, config) {
                    any_merge = true;
                    continue;
                }
                if try_merge_at(&mut working, &mut index, id, End::Start, config) {
                    any_merge = true;
                    continue;
                }
                break;
            }
        }

        if !any_merge {
            break;
        }
    }

    working.into_output()
}

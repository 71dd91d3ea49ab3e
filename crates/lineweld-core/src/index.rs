//! Endpoint spatial index backing the merge engine's proximity queries.
//!
//! Maintains one entry per end of every currently-open polyline and
//! answers "which endpoints lie within radius r of this point" queries
//! in ascending-distance order. Grounded on `mujou-pipeline`'s use of
//! `rstar::RTree<GeomWithData<_, _>>` for spatial queries over tagged
//! geometry (see `mst_join.rs`); the query contract itself (radius
//! search sorted by distance, identifiers retired on merge) is ported
//! from `path_index.py`'s `PathIndex`.
//!
//! Unlike the Python original's dual axis-sorted lists with lazy
//! tombstoning, this uses `rstar`'s native dynamic `insert`/`remove`:
//! merging two polylines physically removes both old endpoint pairs and
//! inserts the spliced polyline's new pair, so retired identifiers never
//! linger in the tree waiting to be filtered out of a later query.

use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::types::{Point, Polyline};

/// Which end of a polyline an endpoint record names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// The polyline's first point.
    Start,
    /// The polyline's last point.
    End,
}

/// Identifies one endpoint record: a polyline identifier plus which end.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EndpointKey {
    id: usize,
    end: End,
}

type Entry = GeomWithData<[f64; 2], EndpointKey>;

/// One hit returned by [`EndpointIndex::query`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMatch {
    /// Identifier of the matched polyline.
    pub id: usize,
    /// Which end of the matched polyline this record names.
    pub end: End,
    /// The endpoint's coordinates.
    pub point: Point,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

/// Spatial index over the endpoints of open polylines.
#[derive(Debug, Default)]
pub struct EndpointIndex {
    tree: RTree<Entry>,
}

impl EndpointIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Populate an index from an initial `(identifier, polyline)` set.
    /// Closed and degenerate polylines contribute no entries.
    #[must_use]
    pub fn build(polylines: &[(usize, Polyline)]) -> Self {
        let mut index = Self::new();
        for (id, polyline) in polylines {
            index.insert(*id, polyline);
        }
        index
    }

    /// All endpoint records within `radius` of `point`, sorted by
    /// ascending distance. An empty result is an ordinary outcome, not
    /// an error.
    #[must_use]
    pub fn query(&self, point: Point, radius: f64) -> Vec<EndpointMatch> {
        if radius < 0.0 {
            return Vec::new();
        }
        let center = [point.x, point.y];
        let mut matches: Vec<EndpointMatch> = self
            .tree
            .locate_within_distance(center, radius * radius)
            .map(|entry| {
                let geom = entry.geom();
                let hit_point = Point::new(geom[0], geom[1]);
                EndpointMatch {
                    id: entry.data.id,
                    end: entry.data.end,
                    point: hit_point,
                    distance: hit_point.distance(point),
                }
            })
            .collect();
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches
    }

    /// Add the two endpoint records for an open polyline. No-op for a
    /// closed or degenerate polyline (it has no business in the index).
    pub fn insert(&mut self, id: usize, polyline: &Polyline) {
        if polyline.is_closed() || polyline.is_degenerate() {
            return;
        }
        if let (Some(&start), Some(&end)) = (polyline.first(), polyline.last()) {
            self.tree.insert(Entry::new(
                [start.x, start.y],
                EndpointKey {
                    id,
                    end: End::Start,
                },
            ));
            self.tree
                .insert(Entry::new([end.x, end.y], EndpointKey { id, end: End::End }));
        }
    }

    /// Remove the two endpoint records for `polyline` at its *current*
    /// coordinates (i.e. call this before mutating or retiring it, not
    /// after). No-op for a closed or degenerate polyline, which never
    /// had entries to begin with.
    pub fn remove(&mut self, id: usize, polyline: &Polyline) {
        if polyline.is_closed() || polyline.is_degenerate() {
            return;
        }
        if let Some(&start) = polyline.first() {
            self.tree.remove(&Entry::new(
                [start.x, start.y],
                EndpointKey {
                    id,
                    end: End::Start,
                },
            ));
        }
        if let Some(&end) = polyline.last() {
            self.tree
                .remove(&Entry::new([end.x, end.y], EndpointKey { id, end: End::End }));
        }
    }
}

//! Spatial filtering of dataset locations against an area of interest.
//!
//! The client only needs one geometric primitive: which points fall inside a polygon.
//! It is exposed as the [`PolygonIntersector`] trait so the default `geo`/`rstar`
//! implementation can be swapped out.

use geo::{BoundingRect, Intersects, Point, Polygon};
use log::debug;
use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};
use std::fmt::Debug;

/// Decides which points intersect an area of interest.
pub trait PolygonIntersector: Send + Sync + Debug {
    /// Returns the indices of the `points` that intersect `area`, in ascending order.
    ///
    /// `None` entries never match. An empty `area` matches nothing.
    fn intersecting(&self, points: &[Option<Point<f64>>], area: &Polygon<f64>) -> Vec<usize>;
}

/// [`PolygonIntersector`] that prunes candidates with an R-tree over the points and
/// confirms each candidate with an exact `geo` intersection test.
///
/// Points on the polygon boundary count as inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct RTreeIntersector;

struct IndexedPoint {
    index: usize,
    point: Point<f64>,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x(), self.point.y()])
    }
}

/// Selects the points whose envelope intersects a bounding box.
struct WithinBounds(AABB<[f64; 2]>);

impl SelectionFunction<IndexedPoint> for WithinBounds {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        self.0.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &IndexedPoint) -> bool {
        self.0.intersects(&leaf.envelope())
    }
}

impl PolygonIntersector for RTreeIntersector {
    fn intersecting(&self, points: &[Option<Point<f64>>], area: &Polygon<f64>) -> Vec<usize> {
        let Some(bounds) = area.bounding_rect() else {
            debug!("Area of interest is empty, no dataset can match");
            return vec![];
        };

        let tree = RTree::bulk_load(
            points
                .iter()
                .enumerate()
                .filter_map(|(index, point)| point.map(|point| IndexedPoint { index, point }))
                .collect(),
        );
        let bounds = WithinBounds(AABB::from_corners(
            [bounds.min().x, bounds.min().y],
            [bounds.max().x, bounds.max().y],
        ));

        let mut hits: Vec<usize> = tree
            .locate_with_selection_function(bounds)
            .filter(|candidate| area.intersects(&candidate.point))
            .map(|candidate| candidate.index)
            .collect();
        hits.sort_unstable();
        debug!(
            "{} of {} points intersect the area of interest",
            hits.len(),
            points.len()
        );
        hits
    }
}

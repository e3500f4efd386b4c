//! Spatial predicates backing the footprint test, built on the `geo` crate.
//!
//! The matching algorithms do not prescribe a geometry model; they only need
//! a permissive, symmetric "touches" predicate. [`SpatialOverlap`] captures
//! that capability (contains / intersects / within) and is implemented for
//! the common `geo` footprint types.

use geo::{Contains, Geometry, Intersects, MultiPolygon, Polygon, Rect};

/// Capability trait for footprint geometries.
///
/// Any 2-D shape providing containment, intersection and within tests can
/// participate in colocation. Implementations are provided for
/// [`geo::Polygon`], [`geo::MultiPolygon`] (footprints split at the
/// antimeridian arrive as multipolygons), [`geo::Rect`] and the dynamic
/// [`geo::Geometry`].
pub trait SpatialOverlap {
    fn contains_shape(&self, other: &Self) -> bool;

    fn intersects_shape(&self, other: &Self) -> bool;

    fn within_shape(&self, other: &Self) -> bool {
        other.contains_shape(self)
    }
}

macro_rules! impl_spatial_overlap {
    ($($shape:ty),+ $(,)?) => {
        $(
            impl SpatialOverlap for $shape {
                fn contains_shape(&self, other: &Self) -> bool {
                    self.contains(other)
                }

                fn intersects_shape(&self, other: &Self) -> bool {
                    self.intersects(other)
                }
            }
        )+
    };
}

impl_spatial_overlap!(Polygon, MultiPolygon, Rect, Geometry);

/// The permissive spatial predicate used by all matchers.
///
/// True iff `a` contains, intersects or lies within `b`. When either
/// footprint is absent the predicate is vacuously true and matching degrades
/// to a pure interval join.
///
/// # Examples
///
/// ```rust
/// use coloc::footprint_test;
/// use geo::{polygon, Polygon};
///
/// let west: Polygon = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 4.0, y: 0.0),
///     (x: 4.0, y: 4.0),
///     (x: 0.0, y: 4.0),
///     (x: 0.0, y: 0.0),
/// ];
/// let east: Polygon = polygon![
///     (x: 3.0, y: 0.0),
///     (x: 7.0, y: 0.0),
///     (x: 7.0, y: 4.0),
///     (x: 3.0, y: 4.0),
///     (x: 3.0, y: 0.0),
/// ];
///
/// assert!(footprint_test(Some(&west), Some(&east)));
/// assert!(footprint_test(None::<&Polygon>, Some(&east)));
/// ```
pub fn footprint_test<G: SpatialOverlap>(a: Option<&G>, b: Option<&G>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.contains_shape(b) || a.intersects_shape(b) || a.within_shape(b),
        _ => true,
    }
}

//! Eager input validation, performed before any matching begins.

use crate::error::{ColocError, Result};
use crate::types::Collection;
use geo::CoordsIter;

/// Validates every record interval in a collection.
///
/// Rejects intervals whose start lies after their end. Degenerate instants
/// (`start == end`) are legal; they simply never overlap anything.
///
/// # Examples
///
/// ```
/// use coloc::compute::validation::validate_collection;
/// use coloc::{Collection, Record, TimeInterval};
///
/// let mut collection: Collection = Collection::new();
/// collection.push(Record::new(1, TimeInterval::from_unix_seconds(0, 10)));
/// assert!(validate_collection(&collection).is_ok());
///
/// collection.push(Record::new(2, TimeInterval::from_unix_seconds(30, 20)));
/// assert!(validate_collection(&collection).is_err());
/// ```
pub fn validate_collection<G>(collection: &Collection<G>) -> Result<()> {
    for (index, record) in collection.iter().enumerate() {
        if !record.interval.is_well_formed() {
            return Err(ColocError::InvalidInterval { index });
        }
    }
    Ok(())
}

/// Validates footprint coordinates.
///
/// Collaborators are expected to supply footprints already normalized into a
/// single consistent reference, but non-finite coordinates would silently
/// poison the geometry predicates, so this helper lets callers reject them
/// up front. Works for any footprint shape exposing its coordinates
/// (polygons, multipolygons from antimeridian splitting, rects, dynamic
/// geometries).
pub fn validate_footprints<G>(collection: &Collection<G>) -> Result<()>
where
    G: CoordsIter<Scalar = f64>,
{
    for (index, record) in collection.iter().enumerate() {
        let Some(footprint) = &record.footprint else {
            continue;
        };

        for coord in footprint.coords_iter() {
            if !coord.x.is_finite() || !coord.y.is_finite() {
                return Err(ColocError::InvalidInput(format!(
                    "record {}: footprint has non-finite coordinate ({}, {})",
                    index, coord.x, coord.y
                )));
            }
        }
    }
    Ok(())
}

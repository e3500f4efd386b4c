//! Spatiotemporal colocation of record collections.
//!
//! Given two collections of records, each carrying a half-open time interval
//! and an optional spatial footprint, [`colocate`] returns every index pair
//! whose intervals overlap in time and whose footprints touch in space.
//!
//! Internally a linear merge-join sweep handles the common case of sorted,
//! non-self-overlapping inputs; collections with internally overlapping
//! intervals are resolved by a bounded recursive descent with a brute-force
//! fallback, and every strategy produces the same result as a set.
//!
//! ```rust
//! use coloc::{Collection, Record, TimeInterval, colocate};
//!
//! let mut products: Collection = Collection::new();
//! products.push(Record::new(1, TimeInterval::from_unix_seconds(0, 10)));
//!
//! let mut scenes: Collection = Collection::new();
//! scenes.push(Record::new("a", TimeInterval::from_unix_seconds(5, 15)));
//! scenes.push(Record::new("b", TimeInterval::from_unix_seconds(20, 30)));
//!
//! let matches = colocate(&products, &scenes)?;
//! assert_eq!(matches.pairs(), &[(0, 0)]);
//! # Ok::<(), coloc::ColocError>(())
//! ```

pub mod compute;
pub mod error;
pub mod spatial;
pub mod types;

pub use compute::{colocate, colocate_with, match_all};
pub use error::{ColocError, Result};
pub use spatial::{SpatialOverlap, footprint_test};
pub use types::{Collection, ColocOptions, IdPart, MatchSet, Record, RecordId, TimeInterval};

pub use geo::{MultiPolygon, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ColocError, Result};

    pub use crate::{colocate, colocate_with, match_all};

    pub use crate::{Collection, ColocOptions, MatchSet, Record, RecordId, TimeInterval};

    pub use crate::{SpatialOverlap, footprint_test};

    pub use geo::{MultiPolygon, Polygon, Rect};

    pub use std::time::{Duration, SystemTime, UNIX_EPOCH};
}

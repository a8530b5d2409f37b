//! Build Overpass API queries from tag filters and a target area, and
//! resolve place names to OSM boundary ids through Nominatim.

pub mod errors;
pub mod nominatim;
pub mod overpass;
pub mod types;

pub use errors::{NominatimError, QueryError};
pub use nominatim::{NominatimClient, Place};
pub use overpass::QueryFactory;
pub use types::{OsmType, OutputFormat, QueryType};

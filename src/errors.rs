use thiserror::Error;

/// Everything that can go wrong while checking or rendering a query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown query type: {0}")]
    InvalidQueryType(String),

    #[error("unknown OSM object type: {0}")]
    InvalidObjectType(String),

    #[error("no distance provided for an around query")]
    MissingDistance,

    #[error("invalid around distance: {0}")]
    InvalidDistance(String),

    #[error("a distance only makes sense for an around query")]
    IncompatibleDistance,

    #[error("a named area is required for in and around queries")]
    MissingArea,

    #[error("cannot query a value without a key")]
    ValueWithoutKey,

    #[error("missing values for some keys")]
    UnmatchedKeys,

    #[error("missing keys for some values")]
    UnmatchedValues,

    #[error("generated markup could not be re-read: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of the Nominatim lookup.
#[derive(Debug, Error)]
pub enum NominatimError {
    #[error("no boundary area found for {0:?}")]
    NoAreaFound(String),

    #[error("nominatim request failed: {0}")]
    Transport(#[from] ureq::Error),
}

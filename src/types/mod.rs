mod osm_types;

pub use osm_types::*;

use log::debug;
use serde::Deserialize;

use super::NominatimClient;
use crate::errors::NominatimError;

// https://nominatim.openstreetmap.org/search?format=json&q=Paris

//------------------------------------------------------------------------------
// Functions
//------------------------------------------------------------------------------

impl NominatimClient {
    /// Run a free-text search against the Nominatim endpoint. Polygon
    /// geometry is suppressed, only the ids matter here.
    pub fn search(&self, query: &str) -> Result<Vec<Place>, NominatimError> {
        let mut response = self
            .agent
            .get(&self.url)
            .query("q", query)
            .query("format", "json")
            .query("polygon_geojson", "0")
            .call()?;
        let places: Vec<Place> = response.body_mut().read_json()?;
        debug!("nominatim returned {} places for {:?}", places.len(), query);
        Ok(places)
    }

    /// Resolve a place name to the OSM id of its boundary relation.
    pub fn resolve_area_name(&self, query: &str) -> Result<i64, NominatimError> {
        let places = self.search(query)?;
        first_boundary_id(&places).ok_or_else(|| NominatimError::NoAreaFound(query.to_string()))
    }

    /// Resolve a `;` separated list of place names, one lookup per place.
    /// The first name that cannot be resolved fails the whole batch.
    pub fn resolve_area_names(&self, query: &str) -> Result<Vec<i64>, NominatimError> {
        query
            .split(';')
            .map(|name| self.resolve_area_name(name.trim()))
            .collect()
    }
}

/// Results come back in relevance order, the first relation is the boundary
/// we are after. Nodes and ways are skipped.
fn first_boundary_id(places: &[Place]) -> Option<i64> {
    places
        .iter()
        .find(|place| place.osm_type == "relation")
        .map(|place| place.osm_id)
}

//------------------------------------------------------------------------------
// Types
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub osm_type: String,
    pub osm_id: i64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"[
        {"osm_type": "node", "osm_id": 17807753, "display_name": "Paris, France", "class": "place", "type": "city"},
        {"osm_type": "way", "osm_id": 18775303, "display_name": "Paris, France"},
        {"osm_type": "relation", "osm_id": 7444, "display_name": "Paris, Ile-de-France, France", "class": "boundary", "type": "administrative"},
        {"osm_type": "relation", "osm_id": 71525, "display_name": "Paris, Texas, United States"}
    ]"#;

    #[test]
    fn first_relation_wins() {
        let places: Vec<Place> = serde_json::from_str(PARIS).unwrap();
        assert_eq!(first_boundary_id(&places), Some(7444));
    }

    #[test]
    fn no_relation_in_results() {
        let places: Vec<Place> = serde_json::from_str(
            r#"[{"osm_type": "node", "osm_id": 1}, {"osm_type": "way", "osm_id": 2}]"#,
        )
        .unwrap();
        assert_eq!(first_boundary_id(&places), None);
    }

    #[test]
    fn place_fields_decode() {
        let places: Vec<Place> = serde_json::from_str(PARIS).unwrap();
        assert_eq!(places[0].kind, "city");
        assert_eq!(places[2].class, "boundary");
        assert_eq!(places[1].class, "");
    }
}

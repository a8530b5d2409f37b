use std::fmt;
use std::str::FromStr;

use crate::errors::QueryError;

/// Which query shape to build: inside a named area, around it, or within
/// the current bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryType {
    InArea,
    AroundArea,
    BBox,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::InArea => "in",
            QueryType::AroundArea => "around",
            QueryType::BBox => "bbox",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(QueryType::InArea),
            "around" => Ok(QueryType::AroundArea),
            "bbox" => Ok(QueryType::BBox),
            other => Err(QueryError::InvalidQueryType(other.to_string())),
        }
    }
}

/// OSM element kinds a query can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl OsmType {
    pub const ALL: [OsmType; 3] = [OsmType::Node, OsmType::Way, OsmType::Relation];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsmType::Node => "node",
            OsmType::Way => "way",
            OsmType::Relation => "relation",
        }
    }
}

impl fmt::Display for OsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsmType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" => Ok(OsmType::Node),
            "way" => Ok(OsmType::Way),
            "relation" => Ok(OsmType::Relation),
            other => Err(QueryError::InvalidObjectType(other.to_string())),
        }
    }
}

/// Output of the Overpass server, passed through into the query header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_osm_types() {
        assert_eq!("way".parse::<OsmType>().unwrap(), OsmType::Way);
        assert_eq!(" Node ".parse::<OsmType>().unwrap(), OsmType::Node);
        assert!(matches!(
            "polygon".parse::<OsmType>(),
            Err(QueryError::InvalidObjectType(_))
        ));
    }

    #[test]
    fn parse_query_types() {
        assert_eq!("in".parse::<QueryType>().unwrap(), QueryType::InArea);
        assert_eq!("Around".parse::<QueryType>().unwrap(), QueryType::AroundArea);
        assert!(matches!(
            "nearby".parse::<QueryType>(),
            Err(QueryError::InvalidQueryType(_))
        ));
    }

    #[test]
    fn wire_names() {
        assert_eq!(OsmType::Relation.to_string(), "relation");
        assert_eq!(QueryType::BBox.to_string(), "bbox");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Xml);
    }
}

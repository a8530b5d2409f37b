use std::sync::LazyLock;

use log::debug;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;
use regex::Regex;

use crate::errors::QueryError;
use crate::types::{OsmType, OutputFormat, QueryType};

pub const SPACE_INDENT: &str = "    ";

static COORDS_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" area_coords="(.*?)""#).expect("hardcoded pattern"));
static AREA_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" area="(.*?)""#).expect("hardcoded pattern"));

/// Builds an Overpass XML query out of tag filters, a target area and a few
/// output knobs. Templates like `{{geocodeArea:..}}` stay in the output for
/// the executor to fill in later.
#[derive(Debug, Clone)]
pub struct QueryFactory {
    query_type: QueryType,
    keys: Vec<String>,
    values: Vec<String>,
    area: Option<String>,
    around_distance: Option<String>,
    osm_objects: Vec<OsmType>,
    output: OutputFormat,
    timeout: u32,
    print_mode: String,
    distance: Option<u32>,
    checked: bool,
}

impl QueryFactory {
    pub fn new(query_type: QueryType) -> Self {
        QueryFactory {
            query_type,
            keys: Vec::new(),
            values: Vec::new(),
            area: None,
            around_distance: None,
            osm_objects: OsmType::ALL.to_vec(),
            output: OutputFormat::Xml,
            timeout: 25,
            print_mode: "body".to_string(),
            distance: None,
            checked: false,
        }
    }

    /// Add a tag key to filter on. Empty keys are dropped.
    pub fn with_key(mut self, key: &str) -> Self {
        if !key.is_empty() {
            self.keys.push(key.to_string());
        }
        self
    }

    /// Add a tag value, paired positionally with the keys. A single key with
    /// several values means several filters on that key.
    pub fn with_value(mut self, value: &str) -> Self {
        if !value.is_empty() {
            self.values.push(value.to_string());
        }
        self
    }

    /// Target area. Several places can be joined with `;`.
    pub fn with_area(mut self, area: &str) -> Self {
        self.area = Some(area.to_string());
        self
    }

    /// Radius in meters for around queries, as typed by the user. Blank
    /// input counts as no distance at all.
    pub fn with_around_distance(mut self, distance: &str) -> Self {
        if distance.trim().is_empty() {
            self.around_distance = None;
        } else {
            self.around_distance = Some(distance.to_string());
        }
        self
    }

    pub fn with_osm_objects(mut self, objects: &[OsmType]) -> Self {
        self.osm_objects = objects.to_vec();
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_print_mode(mut self, print_mode: &str) -> Self {
        self.print_mode = print_mode.to_string();
        self
    }

    /// Check the parameters once, before any rendering. Fails on the first
    /// violation so the caller always gets the same error for the same input.
    pub fn validate(&mut self) -> Result<(), QueryError> {
        if self.checked {
            return Ok(());
        }

        if self.query_type == QueryType::AroundArea {
            let raw = self
                .around_distance
                .as_deref()
                .ok_or(QueryError::MissingDistance)?;
            match raw.trim().parse::<u32>() {
                Ok(distance) if distance > 0 => self.distance = Some(distance),
                _ => return Err(QueryError::InvalidDistance(raw.trim().to_string())),
            }
        }

        if self.around_distance.is_some() && self.query_type == QueryType::InArea {
            return Err(QueryError::IncompatibleDistance);
        }

        let needs_area = matches!(self.query_type, QueryType::InArea | QueryType::AroundArea);
        if needs_area && self.places().is_empty() {
            return Err(QueryError::MissingArea);
        }

        if self.keys.is_empty() && !self.values.is_empty() {
            return Err(QueryError::ValueWithoutKey);
        }

        if self.keys.len() > self.values.len() && self.keys.len() != 1 {
            return Err(QueryError::UnmatchedKeys);
        }

        if self.keys.len() < self.values.len() && self.keys.len() != 1 {
            return Err(QueryError::UnmatchedValues);
        }

        self.checked = true;
        Ok(())
    }

    /// Render the checked description. Pretty-print the structural pass,
    /// then swap the template stand-ins in, then settle the indentation.
    pub fn render(&self) -> Result<String, QueryError> {
        debug_assert!(self.checked, "render() called before validate()");

        let query = self.generate_xml();
        let query = pretty_xml(&query)?;
        let query = substitute_templates(&query);
        Ok(query.replace('\t', SPACE_INDENT))
    }

    /// Validate then render, the whole pipeline.
    pub fn make(&mut self) -> Result<String, QueryError> {
        self.validate()?;
        let query = self.render()?;
        debug!("overpass query built, {} bytes", query.len());
        Ok(query)
    }

    /// The `;` separated area list, trimmed, empty pieces removed.
    fn places(&self) -> Vec<&str> {
        match &self.area {
            Some(area) => area
                .split(';')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Key/value pairs in render order. A key without a value is an
    /// any-value filter; one key may fan out over several values.
    fn tag_filters(&self) -> Vec<(&str, Option<&str>)> {
        if self.keys.len() == 1 && self.values.len() > 1 {
            let key = self.keys[0].as_str();
            self.values
                .iter()
                .map(|value| (key, Some(value.as_str())))
                .collect()
        } else {
            self.keys
                .iter()
                .enumerate()
                .map(|(i, key)| (key.as_str(), self.values.get(i).map(String::as_str)))
                .collect()
        }
    }

    /// Structural pass. The template spots are rendered as fake attributes
    /// (`area=`, `area_coords=`, `bbox="custom"`) so the whole document
    /// stays well-formed for the pretty-printer.
    fn generate_xml(&self) -> String {
        let mut query = format!(
            r#"<osm-script output="{}" timeout="{}">"#,
            self.output, self.timeout
        );

        let places = self.places();

        if !places.is_empty() && self.query_type != QueryType::AroundArea {
            for (i, place) in places.iter().enumerate() {
                query.push_str(&format!(r#"<id-query area="{place}" into="area_{i}"/>"#));
            }
        }

        query.push_str("<union>");

        let rounds = places.len().max(1);
        for osm_object in &self.osm_objects {
            for i in 0..rounds {
                query.push_str(&format!(r#"<query type="{osm_object}">"#));

                for (key, value) in self.tag_filters() {
                    match value {
                        Some(value) => {
                            query.push_str(&format!(r#"<has-kv k="{key}" v="{value}"/>"#))
                        }
                        None => query.push_str(&format!(r#"<has-kv k="{key}"/>"#)),
                    }
                }

                if !places.is_empty() && self.query_type != QueryType::AroundArea {
                    query.push_str(&format!(r#"<area-query from="area_{i}"/>"#));
                } else if !places.is_empty() && self.query_type == QueryType::AroundArea {
                    query.push_str(&format!(
                        r#"<around area_coords="{}" radius="{}"/>"#,
                        places[i],
                        self.distance.unwrap_or_default()
                    ));
                } else if self.query_type == QueryType::BBox {
                    query.push_str(r#"<bbox-query bbox="custom"/>"#);
                }

                query.push_str("</query>");
            }
        }

        query.push_str("</union>");
        // Second union pulls in the children of everything matched above,
        // e.g. the member nodes of a matched way. The executor expects both.
        query.push_str(r#"<union><item/><recurse type="down"/></union>"#);
        query.push_str(&format!(r#"<print mode="{}"/>"#, self.print_mode));
        query.push_str("</osm-script>");

        query
    }
}

/// Re-indent a compact document, one tab per nesting level.
fn pretty_xml(query: &str) -> Result<String, QueryError> {
    let mut reader = Reader::from_str(query);
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Swap the fake attributes for the real `{{ }}` templates. Only possible
/// after pretty-printing: the templates themselves are not valid XML.
fn substitute_templates(query: &str) -> String {
    let query = COORDS_TEMPLATE.replace_all(query, " {{geocodeCoords:${1}}}");
    let query = AREA_TEMPLATE.replace_all(&query, " {{geocodeArea:${1}}}");
    query.replace(r#" bbox="custom""#, " {{bbox}}")
}

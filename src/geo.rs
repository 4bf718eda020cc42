//! Region boundary features from a GeoJSON `FeatureCollection`.

use serde::Deserialize;
use serde_json::Value;

/// One boundary feature; the raw GeoJSON is kept for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub name: String,
    pub raw: Value,
}

impl GeoFeature {
    /// Join key against record regions.
    pub fn label(&self) -> String {
        self.name.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geography {
    pub features: Vec<GeoFeature>,
    /// The whole collection, used as the map outline.
    pub outline: Value,
}

impl Geography {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<Value>,
}

/// Parse a feature collection, reading each region name from `property`.
///
/// A feature without a string `property` gets an empty name rather than
/// failing the whole collection.
pub fn parse_geography(bytes: &[u8], property: &str) -> Result<Geography, serde_json::Error> {
    let outline: Value = serde_json::from_slice(bytes)?;
    let raw: RawCollection = serde_json::from_value(outline.clone())?;
    let features = raw
        .features
        .into_iter()
        .map(|f| {
            let name = f
                .get("properties")
                .and_then(|p| p.get(property))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            GeoFeature { name, raw: f }
        })
        .collect();
    Ok(Geography { features, outline })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_region_property() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"VARNAME_2": "Bandung"}, "geometry": null},
                {"type": "Feature", "properties": {"NAME_2": "Other"}, "geometry": null}
            ]
        });
        let geo = parse_geography(doc.to_string().as_bytes(), "VARNAME_2").unwrap();
        assert_eq!(geo.features.len(), 2);
        assert_eq!(geo.features[0].label(), "BANDUNG");
        assert_eq!(geo.features[1].name, "");
        assert_eq!(geo.outline, doc);
    }

    #[test]
    fn rejects_non_collections() {
        assert!(parse_geography(b"[1,2,3]", "VARNAME_2").is_err());
        assert!(parse_geography(b"not json", "VARNAME_2").is_err());
    }
}

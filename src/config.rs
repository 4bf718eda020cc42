use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_base: String,
    pub data_file: String,
    pub geo_file: String,
    pub region_property: String,
    pub surface_dir: PathBuf,
    pub default_year: String,
    pub default_category: String,
    pub default_mode: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_base: std::env::var("DATA_BASE").unwrap_or_else(|_| ".".to_string()),
            data_file: std::env::var("DATA_FILE").unwrap_or_else(|_| "data.json".to_string()),
            geo_file: std::env::var("GEO_FILE").unwrap_or_else(|_| "jawa_barat.geojson".to_string()),
            region_property: std::env::var("REGION_PROPERTY").unwrap_or_else(|_| "VARNAME_2".to_string()),
            surface_dir: std::env::var("SURFACE_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("out/surfaces")),
            default_year: std::env::var("DEFAULT_YEAR").unwrap_or_else(|_| "2023".to_string()),
            default_category: std::env::var("DEFAULT_CATEGORY").unwrap_or_else(|_| "PPU".to_string()),
            default_mode: std::env::var("DEFAULT_MODE").unwrap_or_else(|_| "bar".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
        }
    }

    /// True when the data base points at an HTTP(S) origin rather than a directory.
    pub fn is_remote(&self) -> bool {
        self.data_base.starts_with("http://") || self.data_base.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(data_base: &str) -> Config {
        Config {
            data_base: data_base.to_string(),
            data_file: "data.json".to_string(),
            geo_file: "jawa_barat.geojson".to_string(),
            region_property: "VARNAME_2".to_string(),
            surface_dir: PathBuf::from("out/surfaces"),
            default_year: "2023".to_string(),
            default_category: "PPU".to_string(),
            default_mode: "bar".to_string(),
            http_timeout_secs: 10,
        }
    }

    #[test]
    fn remote_detection() {
        assert!(base("https://example.org/pbi/").is_remote());
        assert!(base("http://localhost:8080").is_remote());
        assert!(!base("./public").is_remote());
        assert!(!base(".").is_remote());
    }
}

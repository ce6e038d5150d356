//! YAML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from YAML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from YAML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
search:
  metric: cosine
  top_k: 5
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.search.metric, crate::DistanceMetric::Cosine);
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = parse("{}").unwrap();
        assert_eq!(config.search.top_k, 4);
        assert_eq!(config.chunking.chunk_size, 10_000);
    }

    #[test]
    fn test_parse_invalid_enum() {
        let yaml = r#"
chunking:
  sizer: paragraphs
"#;
        let err = parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::YamlError { .. }));
    }
}

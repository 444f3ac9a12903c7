use serde::{Deserialize, Serialize};

/// Application configuration, read from `taskflow.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[store]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding tasks.json and lists.json
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: default_data_dir(),
        }
    }
}

/// `[ui]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Color token assigned to new lists when none is given
    #[serde(default = "default_list_color")]
    pub default_list_color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_list_color: default_list_color(),
        }
    }
}

fn default_data_dir() -> String {
    ".taskflow".to_string()
}

fn default_list_color() -> String {
    crate::model::list::DEFAULT_LIST_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.data_dir, ".taskflow");
        assert_eq!(config.ui.default_list_color, "primary");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[store]
data_dir = "/tmp/tf-data"
"#,
        )
        .unwrap();
        assert_eq!(config.store.data_dir, "/tmp/tf-data");
        assert_eq!(config.ui.default_list_color, "primary");
    }
}

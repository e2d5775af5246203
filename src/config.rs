use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

use crate::links::LinkOptions;

pub const CONFIG_FILE: &str = "paginate.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaginateConfig {
    pub items_per_page: usize,
    pub items_per_first_page: Option<usize>,
    pub path_prefix: String,
    pub component: String,

    pub item_component: String,
    pub item_path_field: String,
    pub item_id_field: String,

    pub links: LinkOptions,
}

impl Default for PaginateConfig {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            items_per_first_page: None,
            path_prefix: "/".to_string(),
            component: "list.html".to_string(),
            item_component: "item.html".to_string(),
            item_path_field: "slug".to_string(),
            item_id_field: "slug".to_string(),
            links: LinkOptions::default(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(root: P) -> io::Result<PaginateConfig> {
    let path = root.as_ref().join(CONFIG_FILE);

    if !path.exists() {
        return Ok(PaginateConfig::default());
    }

    let text = fs::read_to_string(&path)?;

    toml::from_str(&text).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, PaginateConfig::default());
        assert_eq!(cfg.items_per_page, 10);
        assert_eq!(cfg.links.page_label, "Page: %d");
    }

    #[test]
    fn parses_and_layers_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
                items_per_page = 5
                items_per_first_page = 3
                path_prefix = "/blog"

                [links]
                previous_label = "Newer"
                # next_label omitted → default "next →"

                [links.inactive_style]
                opacity = "0.5"
            "#,
        )
        .unwrap();

        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.items_per_page, 5);
        assert_eq!(cfg.items_per_first_page, Some(3));
        assert_eq!(cfg.path_prefix, "/blog");
        assert_eq!(cfg.component, "list.html");
        assert_eq!(cfg.links.previous_label, "Newer");
        assert_eq!(cfg.links.next_label, "next →");
        assert_eq!(cfg.links.inactive_style.len(), 1);
    }

    #[test]
    fn invalid_toml_is_invalid_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "not = { valid = toml").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}

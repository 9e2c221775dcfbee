use serde::{Deserialize, Serialize};
use crate::item::CatalogItem;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_localized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_for_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for: Vec<CatalogItem>,
}

impl Person {
    pub fn display_name(&self) -> &str {
        self.name_localized
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub mod config;

/// Opaque catalog identifier. Only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Library item type. Anything that is not a movie collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Movie,
    #[serde(other)]
    Other,
}

/// One ranked title from the trending feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub title: String,
    pub release_date: Option<NaiveDate>,
}

impl TrendingEntry {
    pub fn new(title: impl Into<String>, release_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            release_date,
        }
    }

    /// Release year, or `0` when the feed had no usable date.
    pub fn release_year(&self) -> i32 {
        self.release_date.map(|date| date.year()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub production_year: Option<i32>,
}

impl CatalogItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, production_year: Option<i32>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            production_year,
        }
    }
}

// Catalog export read from disk
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogRoot {
    #[serde(default)]
    pub items: Vec<CatalogRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub is_virtual: bool,
}

impl CatalogRoot {
    /// Non-virtual movies, in file order.
    pub fn into_movies(self) -> Vec<CatalogItem> {
        self.items
            .into_iter()
            .filter(|record| record.kind == ItemKind::Movie && !record.is_virtual)
            .map(|record| CatalogItem {
                id: record.id,
                name: record.name,
                production_year: record.production_year,
            })
            .collect()
    }
}

/// Minimal record handed to the banner client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BannerItem {
    pub id: ItemId,
    pub name: String,
    pub server_id: String,
    #[serde(rename = "Type")]
    pub kind: ItemKind,
}

impl From<&CatalogItem> for BannerItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            server_id: item.id.to_string(),
            kind: ItemKind::Movie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_defaults_to_zero() {
        let dated = TrendingEntry::new("Dune", NaiveDate::from_ymd_opt(2021, 10, 1));
        assert_eq!(dated.release_year(), 2021);

        let undated = TrendingEntry::new("Dune", None);
        assert_eq!(undated.release_year(), 0);
    }

    #[test]
    fn catalog_root_keeps_only_physical_movies() {
        let json = r#"{
            "items": [
                { "id": "a", "name": "Dune", "production_year": 2021, "type": "Movie" },
                { "id": "b", "name": "Dune Trailer", "type": "Movie", "is_virtual": true },
                { "id": "c", "name": "Severance", "production_year": 2022, "type": "Series" },
                { "id": "d", "name": "Heat", "production_year": 1995, "type": "Movie", "is_virtual": false },
                { "id": "e", "name": "Mystery", "type": "BoxSet" }
            ]
        }"#;
        let root: CatalogRoot = serde_json::from_str(json).unwrap();
        let movies = root.into_movies();

        let ids = movies.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(movies[0].production_year, Some(2021));
    }

    #[test]
    fn unknown_item_kind_maps_to_other() {
        let kind: ItemKind = serde_json::from_str(r#""BoxSet""#).unwrap();
        assert_eq!(kind, ItemKind::Other);
        let kind: ItemKind = serde_json::from_str(r#""Series""#).unwrap();
        assert_eq!(kind, ItemKind::Other);
        let kind: ItemKind = serde_json::from_str(r#""Movie""#).unwrap();
        assert_eq!(kind, ItemKind::Movie);
    }

    #[test]
    fn banner_item_uses_pascal_case_fields() {
        let item = CatalogItem::new("42", "Heat", Some(1995));
        let value = serde_json::to_value(BannerItem::from(&item)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Id": "42",
                "Name": "Heat",
                "ServerId": "42",
                "Type": "Movie"
            })
        );
    }
}

//! Menu catalog types.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Stable identifier of a catalog entry. Order lines refer to menu items by this id.
///
/// Records carry it as a string (`"7"`), as the catalog always has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MenuItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl TryFrom<String> for MenuItemId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MenuItemId> for String {
    fn from(id: MenuItemId) -> Self {
        id.to_string()
    }
}

/// Menu section. Serialized with the labels shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cà Phê")]
    Coffee,
    #[serde(rename = "Món Đặc Biệt")]
    Specialty,
    #[serde(rename = "Trà Sữa")]
    MilkTea,
    #[serde(rename = "Sữa Hạt & Healthy")]
    Healthy,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Coffee,
        Category::Specialty,
        Category::MilkTea,
        Category::Healthy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Coffee => "Cà Phê",
            Category::Specialty => "Món Đặc Biệt",
            Category::MilkTea => "Trà Sữa",
            Category::Healthy => "Sữa Hạt & Healthy",
        }
    }
}

/// A catalog entry. Prices are whole currency units (đồng).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: u64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    pub fn new(id: u32, name: impl Into<String>, price: u64, category: Category) -> Self {
        Self {
            id: MenuItemId(id),
            name: name.into(),
            price,
            category,
            image: None,
        }
    }
}

/// Payload for adding an item to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: u64,
    pub category: Category,
    pub image: Option<String>,
}

impl MenuItemCreate {
    pub fn new(name: impl Into<String>, price: u64, category: Category) -> Self {
        Self {
            name: name.into(),
            price,
            category,
            image: None,
        }
    }
}

/// Payload for editing a catalog item; `None` fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub category: Option<Category>,
    pub image: Option<String>,
}

/// Case-insensitive name search, optionally restricted to one category.
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    query: &str,
    category: Option<Category>,
) -> Vec<&'a MenuItem> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .filter(|item| category.map_or(true, |c| item.category == c))
        .collect()
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable item belonging to exactly one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "isAvailable", default = "default_is_available")]
    pub is_available: bool,
    pub venue_id: u64,
}

/// Request model for creating a new menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuItemRequest {
    pub venue_id: u64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "isAvailable", default = "default_is_available")]
    pub is_available: bool,
}

impl MenuItem {
    /// Create a new MenuItem with an id assigned within the owning venue
    pub fn new(id: u64, venue_id: u64, request: CreateMenuItemRequest) -> Self {
        Self {
            id,
            name: request.name,
            price: request.price,
            description: request.description,
            category: request.category,
            image_url: request.image_url,
            is_available: request.is_available,
            venue_id,
        }
    }
}

fn default_is_available() -> bool {
    true
}

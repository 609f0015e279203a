use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A restaurant or cafe tenant exposing a public menu via its slug.
///
/// The slug is assigned at creation and never changes; it is the public
/// lookup key used in menu URLs and QR codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "themeColor", default = "default_theme_color")]
    pub theme_color: String,
    #[serde(rename = "telegramChatId", default)]
    pub telegram_chat_id: Option<String>,
    #[serde(rename = "menuItems", default)]
    pub menu_items: Vec<MenuItem>,
}

/// Request model for creating a new venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "themeColor", default = "default_theme_color")]
    pub theme_color: String,
    #[serde(rename = "telegramChatId", default)]
    pub telegram_chat_id: Option<String>,
}

impl Venue {
    /// Create a new Venue from a creation request with an assigned id and an
    /// empty menu
    pub fn new(id: u64, request: CreateVenueRequest) -> Self {
        Self {
            id,
            name: request.name,
            slug: request.slug,
            description: request.description,
            theme_color: request.theme_color,
            telegram_chat_id: request.telegram_chat_id,
            menu_items: Vec::new(),
        }
    }

    /// Next menu item id for this venue: max existing + 1, or 1 if the menu
    /// is empty
    pub fn next_item_id(&self) -> u64 {
        self.menu_items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

fn default_theme_color() -> String {
    "#FF6B6B".to_string()
}

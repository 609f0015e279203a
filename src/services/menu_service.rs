use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    CreateMenuItemRequest, CreateVenueRequest, MenuItem, OrderAcknowledgement, OrderPayload,
    RepositoryError, ServiceError, ServiceResult, Venue,
};
use crate::observability::Metrics;
use crate::repositories::VenueRepository;

/// Service owning the venue/menu collection and order acknowledgement
pub struct MenuService {
    repository: Arc<dyn VenueRepository>,
    metrics: Option<Arc<Metrics>>,
}

impl MenuService {
    /// Create a new MenuService
    pub fn new(repository: Arc<dyn VenueRepository>) -> Self {
        Self {
            repository,
            metrics: None,
        }
    }

    /// Create a MenuService that records business metrics
    pub fn new_with_metrics(repository: Arc<dyn VenueRepository>, metrics: Arc<Metrics>) -> Self {
        Self {
            repository,
            metrics: Some(metrics),
        }
    }

    fn record_operation(&self, operation: &str, success: bool) {
        if let Some(metrics) = &self.metrics {
            let status = if success { "success" } else { "error" };
            metrics.record_venue_operation(operation, status);
        }
    }

    /// List all venues with their nested menu items
    #[instrument(skip(self))]
    pub async fn list_venues(&self) -> ServiceResult<Vec<Venue>> {
        let venues = self.repository.find_all().await?;

        info!("Found {} venues", venues.len());
        Ok(venues)
    }

    /// Get a specific venue by its slug
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_venue(&self, slug: &str) -> ServiceResult<Venue> {
        match self.repository.find_by_slug(slug).await? {
            Some(venue) => {
                info!("Venue found");
                Ok(venue)
            }
            None => {
                warn!("Venue not found");
                Err(ServiceError::VenueNotFound {
                    slug: slug.to_string(),
                })
            }
        }
    }

    /// Get a venue's menu; an empty menu is not an error
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_menu(&self, slug: &str) -> ServiceResult<Vec<MenuItem>> {
        let venue = self.get_venue(slug).await?;

        info!("Found {} menu items", venue.menu_items.len());
        Ok(venue.menu_items)
    }

    /// Create a new venue
    #[instrument(skip(self, request), fields(slug = %request.slug))]
    pub async fn create_venue(&self, request: CreateVenueRequest) -> ServiceResult<Venue> {
        self.validate_create_venue_request(&request)?;

        // The repository enforces slug uniqueness under its write lock, so
        // concurrent creates of the same slug cannot both land
        match self.repository.create(request).await {
            Ok(venue) => {
                info!("Venue created with id {}", venue.id);
                self.record_operation("create_venue", true);
                Ok(venue)
            }
            Err(RepositoryError::DuplicateSlug { slug }) => {
                warn!("Venue slug already taken");
                self.record_operation("create_venue", false);
                Err(ServiceError::ValidationError {
                    message: format!("Venue slug already exists: {}", slug),
                })
            }
            Err(source) => {
                self.record_operation("create_venue", false);
                Err(ServiceError::Repository { source })
            }
        }
    }

    /// Delete a venue by id; an absent id is a no-op success
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_venue(&self, id: u64) -> ServiceResult<()> {
        let removed = self.repository.delete(id).await?;

        if removed {
            info!("Venue deleted");
        } else {
            info!("Venue already absent, nothing deleted");
        }
        self.record_operation("delete_venue", true);
        Ok(())
    }

    /// Create a menu item under a venue
    #[instrument(skip(self, request), fields(venue_id = %venue_id, name = %request.name))]
    pub async fn create_menu_item(
        &self,
        venue_id: u64,
        request: CreateMenuItemRequest,
    ) -> ServiceResult<MenuItem> {
        self.validate_create_menu_item_request(&request)?;

        match self.repository.create_item(venue_id, request).await {
            Ok(item) => {
                info!("Menu item created with id {}", item.id);
                self.record_operation("create_menu_item", true);
                Ok(item)
            }
            Err(RepositoryError::NotFound) => {
                warn!("Venue not found for menu item creation");
                self.record_operation("create_menu_item", false);
                Err(ServiceError::VenueIdNotFound { id: venue_id })
            }
            Err(source) => {
                self.record_operation("create_menu_item", false);
                Err(ServiceError::Repository { source })
            }
        }
    }

    /// Delete a menu item; an absent item is a no-op, an absent venue is an
    /// error
    #[instrument(skip(self), fields(venue_id = %venue_id, item_id = %item_id))]
    pub async fn delete_menu_item(&self, venue_id: u64, item_id: u64) -> ServiceResult<()> {
        match self.repository.delete_item(venue_id, item_id).await {
            Ok(removed) => {
                if removed {
                    info!("Menu item deleted");
                } else {
                    info!("Menu item already absent, nothing deleted");
                }
                self.record_operation("delete_menu_item", true);
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                warn!("Venue not found for menu item deletion");
                self.record_operation("delete_menu_item", false);
                Err(ServiceError::VenueIdNotFound { id: venue_id })
            }
            Err(source) => {
                self.record_operation("delete_menu_item", false);
                Err(ServiceError::Repository { source })
            }
        }
    }

    /// Acknowledge an order submission. The payload is accepted as-is and
    /// never stored; the acknowledgement is constant.
    #[instrument(skip(self, payload))]
    pub async fn submit_order(&self, payload: OrderPayload) -> ServiceResult<OrderAcknowledgement> {
        info!(payload = %payload, "Order received");
        if let Some(metrics) = &self.metrics {
            metrics.record_order_submission("received");
        }
        Ok(OrderAcknowledgement::received())
    }

    /// Validate venue creation input at the boundary
    fn validate_create_venue_request(&self, request: &CreateVenueRequest) -> ServiceResult<()> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::ValidationError {
                message: "Venue name cannot be empty".to_string(),
            });
        }

        if request.name.len() > 200 {
            return Err(ServiceError::ValidationError {
                message: "Venue name cannot exceed 200 characters".to_string(),
            });
        }

        if request.slug.is_empty() {
            return Err(ServiceError::ValidationError {
                message: "Venue slug cannot be empty".to_string(),
            });
        }

        if request.slug.len() > 100 {
            return Err(ServiceError::ValidationError {
                message: "Venue slug cannot exceed 100 characters".to_string(),
            });
        }

        // Slugs appear in URLs and QR codes
        if !request
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ServiceError::ValidationError {
                message: format!(
                    "Venue slug must be URL-safe (lowercase letters, digits, hyphens): {}",
                    request.slug
                ),
            });
        }

        Ok(())
    }

    /// Validate menu item creation input at the boundary
    fn validate_create_menu_item_request(
        &self,
        request: &CreateMenuItemRequest,
    ) -> ServiceResult<()> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::ValidationError {
                message: "Menu item name cannot be empty".to_string(),
            });
        }

        if request.name.len() > 200 {
            return Err(ServiceError::ValidationError {
                message: "Menu item name cannot exceed 200 characters".to_string(),
            });
        }

        if request.description.len() > 1000 {
            return Err(ServiceError::ValidationError {
                message: "Menu item description cannot exceed 1000 characters".to_string(),
            });
        }

        if request.price < rust_decimal::Decimal::ZERO {
            return Err(ServiceError::ValidationError {
                message: "Menu item price cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}

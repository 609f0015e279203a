use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::models::{
    CreateMenuItemRequest, CreateVenueRequest, MenuItem, RepositoryError, RepositoryResult, Venue,
};

/// Trait defining the interface for venue data access operations
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Find all venues with their nested menu items
    async fn find_all(&self) -> RepositoryResult<Vec<Venue>>;

    /// Find a venue by its slug
    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Venue>>;

    /// Find a venue by its id
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Venue>>;

    /// Create a new venue, assigning the next available id
    async fn create(&self, request: CreateVenueRequest) -> RepositoryResult<Venue>;

    /// Delete a venue by id; returns whether a venue was removed
    async fn delete(&self, id: u64) -> RepositoryResult<bool>;

    /// Create a menu item under a venue, assigning the next item id scoped
    /// to that venue; fails with NotFound if the venue is absent
    async fn create_item(
        &self,
        venue_id: u64,
        request: CreateMenuItemRequest,
    ) -> RepositoryResult<MenuItem>;

    /// Delete a menu item from a venue; returns whether an item was removed;
    /// fails with NotFound if the venue is absent
    async fn delete_item(&self, venue_id: u64, item_id: u64) -> RepositoryResult<bool>;

    /// Count venues in the store
    async fn count(&self) -> RepositoryResult<usize>;
}

/// In-memory implementation of the VenueRepository trait.
///
/// State is process-lifetime only. A single RwLock guards the store:
/// mutating operations take the write lock, reads the read lock. Lookups
/// are linear scans, which is adequate at this data volume.
pub struct InMemoryVenueRepository {
    store: RwLock<Vec<Venue>>,
}

impl InMemoryVenueRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository pre-populated with venues (for tests)
    pub fn with_venues(venues: Vec<Venue>) -> Self {
        Self {
            store: RwLock::new(venues),
        }
    }

    fn next_venue_id(venues: &[Venue]) -> u64 {
        venues.iter().map(|v| v.id).max().map_or(1, |max| max + 1)
    }
}

impl Default for InMemoryVenueRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Venue>> {
        let store = self.store.read().await;
        Ok(store.clone())
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Venue>> {
        let store = self.store.read().await;
        Ok(store.iter().find(|v| v.slug == slug).cloned())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Venue>> {
        let store = self.store.read().await;
        Ok(store.iter().find(|v| v.id == id).cloned())
    }

    #[instrument(skip(self, request), fields(slug = %request.slug))]
    async fn create(&self, request: CreateVenueRequest) -> RepositoryResult<Venue> {
        let mut store = self.store.write().await;

        // Uniqueness must be checked under the same write lock as the
        // insert, otherwise two concurrent creates can both pass the check
        if store.iter().any(|v| v.slug == request.slug) {
            warn!("Slug already taken");
            return Err(RepositoryError::DuplicateSlug { slug: request.slug });
        }

        let venue = Venue::new(Self::next_venue_id(&store), request);
        store.push(venue.clone());

        info!(venue_id = venue.id, "Venue created");
        Ok(venue)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: u64) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;

        let before = store.len();
        store.retain(|v| v.id != id);
        let removed = store.len() < before;

        info!(removed, "Venue delete completed");
        Ok(removed)
    }

    #[instrument(skip(self, request), fields(venue_id = %venue_id))]
    async fn create_item(
        &self,
        venue_id: u64,
        request: CreateMenuItemRequest,
    ) -> RepositoryResult<MenuItem> {
        let mut store = self.store.write().await;

        let venue = store
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(RepositoryError::NotFound)?;

        let item = MenuItem::new(venue.next_item_id(), venue_id, request);
        venue.menu_items.push(item.clone());

        info!(item_id = item.id, "Menu item created");
        Ok(item)
    }

    #[instrument(skip(self), fields(venue_id = %venue_id, item_id = %item_id))]
    async fn delete_item(&self, venue_id: u64, item_id: u64) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;

        let venue = store
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(RepositoryError::NotFound)?;

        let before = venue.menu_items.len();
        venue.menu_items.retain(|i| i.id != item_id);
        let removed = venue.menu_items.len() < before;

        info!(removed, "Menu item delete completed");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<usize> {
        let store = self.store.read().await;
        Ok(store.len())
    }
}

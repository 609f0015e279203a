// Repositories module - data access layer

pub mod venue_repository;

pub use venue_repository::{InMemoryVenueRepository, VenueRepository};

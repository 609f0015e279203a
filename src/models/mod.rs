// Re-export all model types
pub use self::errors::*;
pub use self::menu_item::*;
pub use self::order::*;
pub use self::venue::*;

mod errors;
mod menu_item;
mod order;
mod venue;

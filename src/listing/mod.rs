pub mod error;
pub mod query;
pub mod surface;

pub use error::ListingError;
pub use query::{ListingQuery, SortDirection};
pub use surface::Surface;

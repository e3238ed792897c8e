use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("Unknown filter field: {0}")]
    UnknownFilterField(String),
}

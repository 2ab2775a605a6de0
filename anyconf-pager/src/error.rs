use anyconf_model::ModelError;
use thiserror::Error;

use crate::page::PageId;

#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Failed to render item #{index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: ModelError,
    },

    #[error("Invalid pager configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown page: {0}")]
    UnknownPage(PageId),
}

pub type Result<T> = std::result::Result<T, PagerError>;

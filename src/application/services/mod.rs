pub mod admin;
pub mod assistant;
pub mod maintenance;
pub mod monitor;
pub mod reports;

use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::ports::store::StoreError;

/// Failure of an application operation: either the domain refused it or the
/// store could not serve it.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// The domain refusal behind this error, if any.
    #[must_use]
    pub const fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Store(_) => None,
        }
    }
}

/// Next numeric id after the largest numeric id in `ids`.
pub(crate) fn next_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let max = ids
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

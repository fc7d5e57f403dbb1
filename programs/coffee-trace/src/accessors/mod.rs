//! Read accessors.
//!
//! Every read comes in two forms. `try_*` reports what happened: a
//! [`Lookup`] for single records, a `Result` for lists and scalars.
//! `get_*` never fails: it logs the problem and returns `None`, an empty
//! list or the fallback value.

use std::fmt;

use crate::error::ContractError;

pub mod batch;
pub mod redemption;
pub mod shop;

/// Outcome of reading one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The contract answered and has no such record.
    NotFound,
    /// The chain could not be asked, or its answer could not be read.
    Unavailable(String),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
            Self::Unavailable(reason) => Lookup::Unavailable(reason),
        }
    }

    /// Collapses to an `Option`, logging why there is no value.
    pub(crate) fn or_log(self, what: impl fmt::Display) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => {
                log::debug!("{} not found", what);
                None
            }
            Self::Unavailable(reason) => {
                log::warn!("Error getting {}: {}", what, reason);
                None
            }
        }
    }
}

/// A zeroed record and a revert both mean the contract has no such record.
pub(crate) fn classify<T>(result: Result<Option<T>, ContractError>) -> Lookup<T> {
    match result {
        Ok(Some(value)) => Lookup::Found(value),
        Ok(None) => Lookup::NotFound,
        Err(error) if error.is_revert() => Lookup::NotFound,
        Err(error) => Lookup::Unavailable(error.to_string()),
    }
}

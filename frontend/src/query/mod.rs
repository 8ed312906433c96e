//! Keyed, cached fetches with a staleness window, a retry budget and
//! last-write-wins settling per key.

mod client;

pub use client::{Clock, FetchOutcome, QueryClient};

use crate::{api::ApiError, config};
use std::fmt;

/// Cache key: a resource scope plus discriminators, rendered as
/// `scope:part:part`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            parts: Vec::new(),
        }
    }

    pub fn with(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope)?;
        for part in &self.parts {
            write!(f, ":{}", part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub stale_time: chrono::Duration,
    /// Extra attempts after the first failure.
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: chrono::Duration::seconds(config::DEFAULT_STALE_TIME_SECS),
            retry: config::DEFAULT_RETRY,
        }
    }
}

/// What a query currently shows. `Idle` is the disabled state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Error(ApiError),
    Data(T),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> QueryState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Idle => QueryState::Idle,
            Self::Loading => QueryState::Loading,
            Self::Error(err) => QueryState::Error(err),
            Self::Data(data) => QueryState::Data(f(data)),
        }
    }
}

impl<T> From<Result<T, ApiError>> for QueryState<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(err) => Self::Error(err),
        }
    }
}

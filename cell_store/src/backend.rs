use crate::{Error, Result};
use sqlx::any::AnyPoolOptions;
use std::{borrow::Cow, time::Duration};

pub const POOL_RECYCLE: Duration = Duration::from_secs(3600);
pub const POOL_SIZE: u32 = 10;
pub const POOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Backing store family, derived from the scheme of a connection url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    MySql,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;

        match scheme {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(Error::UnsupportedUrl(url.to_string())),
        }
    }

    /// Bind placeholder for the 1-based parameter `n`.
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Self::Postgres | Self::Sqlite => format!("${n}"),
            Self::MySql => "?".to_string(),
        }
    }

    pub fn quote(self, identifier: &str) -> String {
        match self {
            Self::Postgres | Self::Sqlite => format!("\"{identifier}\""),
            Self::MySql => format!("`{identifier}`"),
        }
    }

    /// Url actually handed to the driver. Sqlite database files are created
    /// when missing unless the url already picks an open mode.
    pub fn connect_url(self, url: &str) -> Cow<'_, str> {
        if self != Self::Sqlite || is_sqlite_memory(url) || url.contains("mode=") {
            return Cow::Borrowed(url);
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        Cow::Owned(format!("{url}{separator}mode=rwc"))
    }

    pub fn supports_returning(self) -> bool {
        !matches!(self, Self::MySql)
    }

    pub fn supports_index_if_not_exists(self) -> bool {
        !matches!(self, Self::MySql)
    }
}

/// Every connection to an in-memory sqlite url opens its own empty database.
pub fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// Pool parameters for a backend family. Embedded stores have no meaningful
/// pool size or acquisition timeout so they only carry the recycle interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolConfig {
    Pooled {
        recycle: Duration,
        size: u32,
        timeout: Duration,
    },
    Embedded {
        recycle: Duration,
    },
}

impl PoolConfig {
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Postgres | Backend::MySql => Self::Pooled {
                recycle: POOL_RECYCLE,
                size: POOL_SIZE,
                timeout: POOL_TIMEOUT,
            },
            Backend::Sqlite => Self::Embedded {
                recycle: POOL_RECYCLE,
            },
        }
    }

    pub fn for_url(url: &str) -> Result<Self> {
        Backend::from_url(url).map(Self::for_backend)
    }

    pub fn recycle(&self) -> Duration {
        match self {
            Self::Pooled { recycle, .. } | Self::Embedded { recycle } => *recycle,
        }
    }

    /// Pool options for `url`. An in-memory sqlite database lives only as long
    /// as its single connection, so that pool holds exactly one connection
    /// which is never recycled.
    pub(crate) fn pool_options(&self, url: &str) -> AnyPoolOptions {
        if is_sqlite_memory(url) {
            return AnyPoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .max_lifetime(None)
                .idle_timeout(None);
        }

        match *self {
            Self::Pooled {
                recycle,
                size,
                timeout,
            } => AnyPoolOptions::new()
                .max_lifetime(recycle)
                .max_connections(size)
                .acquire_timeout(timeout),
            Self::Embedded { recycle } => AnyPoolOptions::new().max_lifetime(recycle),
        }
    }
}

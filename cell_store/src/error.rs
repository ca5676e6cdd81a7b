use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("connection error")]
    Connection(#[source] sqlx::Error),
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
    #[error("failed to create table {table}")]
    Schema {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("timed out acquiring a pooled connection")]
    PoolTimeout,
    #[error("sql error")]
    Sql(#[source] sqlx::Error),
    #[error("unknown radio type {0}")]
    InvalidRadioType(String),
    #[error("invalid stored radio code {0}")]
    InvalidRadioCode(i16),
    #[error("invalid stored timestamp {0}")]
    InvalidTimestamp(String),
    #[error("config error")]
    Config(#[from] config::ConfigError),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::PoolTimeout,
            other => Self::Sql(other),
        }
    }
}

impl Error {
    /// True for the errors raised while reaching the backing store, including
    /// urls that could not be understood.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::UnsupportedUrl(_))
    }
}

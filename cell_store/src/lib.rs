pub mod backend;
pub mod cell;
pub mod coordinate;
pub mod database;
mod error;
pub mod measure;
pub mod radio;
pub mod record;
pub mod schema;
mod settings;

pub use backend::{Backend, PoolConfig, POOL_RECYCLE, POOL_SIZE, POOL_TIMEOUT};
pub use cell::Cell;
pub use database::{Database, Session, DEFAULT_TABLES};
pub use error::{Error, Result};
pub use measure::Measure;
pub use radio::RadioType;
pub use record::Record;
pub use settings::Settings;

use crate::{schema::Table, Result};
use sqlx::{
    any::{AnyArguments, AnyRow},
    query::Query,
    Any,
};

pub type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// A row shape persisted through a [`crate::Session`].
pub trait Record: Sized + Send + Sync + Unpin {
    const TABLE: Table;

    /// Binds the values of every non primary key column, in the order the
    /// columns are declared in [`Record::TABLE`].
    fn bind<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q>;

    fn from_row(row: &AnyRow) -> Result<Self>;
}

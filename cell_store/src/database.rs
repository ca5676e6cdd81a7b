use crate::{cell, measure, record::Record, schema::Table, Backend, Error, PoolConfig, Result};
use sqlx::{Any, AnyConnection, AnyPool, Row, Transaction};
use std::fmt;

/// Tables created by [`Database::connect`].
pub const DEFAULT_TABLES: [Table; 2] = [cell::TABLE, measure::TABLE];

/// Owns the connection pool. Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    backend: Backend,
    pool_config: PoolConfig,
    tables: Vec<Table>,
    pool: AnyPool,
}

impl Database {
    /// Opens a pool for `url` with the pool parameters of its backend family
    /// and ensures the cell and measure tables exist.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool_config = PoolConfig::for_url(url)?;
        Self::open(url, pool_config, &DEFAULT_TABLES).await
    }

    /// Opens a pool for `url` and creates each of `tables`, in order, unless
    /// it already exists.
    pub async fn open(url: &str, pool_config: PoolConfig, tables: &[Table]) -> Result<Self> {
        let backend = Backend::from_url(url)?;
        sqlx::any::install_default_drivers();

        let url = backend.connect_url(url);
        let pool = pool_config
            .pool_options(&url)
            .connect(&url)
            .await
            .map_err(Error::Connection)?;

        // all statements on one connection, so each index sees its table
        let mut connection = pool.acquire().await.map_err(Error::Connection)?;
        for table in tables {
            create_table(&mut connection, backend, table).await?;
        }
        drop(connection);

        tracing::info!(?backend, ?pool_config, tables = tables.len(), "database ready");

        Ok(Self {
            backend,
            pool_config,
            tables: tables.to_vec(),
            pool,
        })
    }

    /// Checks out a connection and begins a transaction on it. Nothing is
    /// committed unless the caller commits the returned session.
    pub async fn session(&self) -> Result<Session> {
        let transaction = self.pool.begin().await?;
        Ok(Session {
            backend: self.backend,
            transaction,
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn pool_config(&self) -> &PoolConfig {
        &self.pool_config
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

async fn create_table(connection: &mut AnyConnection, backend: Backend, table: &Table) -> Result {
    for statement in table.create_statements(backend) {
        tracing::debug!(table = table.name, %statement, "ensuring table");
        sqlx::query(&statement)
            .execute(&mut *connection)
            .await
            .map_err(|source| Error::Schema {
                table: table.name,
                source,
            })?;
    }
    Ok(())
}

/// A unit of work bound to one pooled connection. The connection goes back to
/// the pool on commit, rollback or close; dropping an uncommitted session
/// rolls it back.
pub struct Session {
    backend: Backend,
    transaction: Transaction<'static, Any>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Inserts `record` and returns the id assigned to it.
    pub async fn add<R: Record>(&mut self, record: &R) -> Result<i64> {
        let statement = R::TABLE.insert_statement(self.backend);
        let query = record.bind(sqlx::query(&statement));

        if self.backend.supports_returning() {
            let row = query.fetch_one(&mut *self.transaction).await?;
            Ok(row.try_get::<i64, _>(0)?)
        } else {
            query
                .execute(&mut *self.transaction)
                .await?
                .last_insert_id()
                .ok_or_else(|| {
                    Error::Sql(sqlx::Error::Protocol(format!(
                        "no id returned for insert into {}",
                        R::TABLE.name
                    )))
                })
        }
    }

    pub async fn get<R: Record>(&mut self, id: i64) -> Result<Option<R>> {
        let Some(statement) = R::TABLE.select_by_key_statement(self.backend) else {
            return Ok(None);
        };

        sqlx::query(&statement)
            .bind(id)
            .fetch_optional(&mut *self.transaction)
            .await?
            .map(|row| R::from_row(&row))
            .transpose()
    }

    /// The underlying connection, inside this session's transaction.
    pub fn connection(&mut self) -> &mut AnyConnection {
        &mut self.transaction
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub async fn commit(self) -> Result {
        self.transaction.commit().await.map_err(Error::from)
    }

    pub async fn rollback(self) -> Result {
        self.transaction.rollback().await.map_err(Error::from)
    }

    /// Discards any uncommitted work and releases the connection.
    pub async fn close(self) -> Result {
        self.rollback().await
    }
}

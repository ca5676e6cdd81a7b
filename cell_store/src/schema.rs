//! Explicit table descriptions and the DDL rendered from them for each
//! backend. Every column other than the primary key is nullable.

use crate::Backend;

/// Text form in which timestamps cross the driver, as naive UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    SmallInt,
    Integer,
    /// Naive UTC date and time, microsecond precision.
    Timestamp,
    Blob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            primary_key: false,
            auto_increment: false,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
            primary_key: true,
            auto_increment: false,
        }
    }

    pub const fn auto_increment(self) -> Self {
        Self {
            auto_increment: true,
            ..self
        }
    }

    pub fn nullable(&self) -> bool {
        !self.primary_key
    }

    fn definition(&self, backend: Backend) -> String {
        if self.primary_key {
            let key = match (backend, self.auto_increment) {
                (Backend::Postgres, _) => "SERIAL PRIMARY KEY",
                (Backend::MySql, _) => "INTEGER NOT NULL AUTO_INCREMENT PRIMARY KEY",
                (Backend::Sqlite, true) => "INTEGER PRIMARY KEY AUTOINCREMENT",
                (Backend::Sqlite, false) => "INTEGER PRIMARY KEY",
            };
            return format!("{} {key}", backend.quote(self.name));
        }

        let sql_type = match (self.kind, backend) {
            (ColumnKind::SmallInt, _) => "SMALLINT",
            (ColumnKind::Integer, _) => "INTEGER",
            (ColumnKind::Timestamp, Backend::Postgres) => "TIMESTAMP",
            (ColumnKind::Timestamp, Backend::MySql) => "DATETIME(6)",
            (ColumnKind::Timestamp, Backend::Sqlite) => "DATETIME",
            (ColumnKind::Blob, Backend::Postgres) => "BYTEA",
            (ColumnKind::Blob, Backend::MySql) => "LONGBLOB",
            (ColumnKind::Blob, Backend::Sqlite) => "BLOB",
        };
        format!("{} {sql_type}", backend.quote(self.name))
    }

    /// Expression bound on insert. Timestamps are bound as text in
    /// [`TIMESTAMP_FORMAT`] and converted by the backend.
    fn insert_expression(&self, backend: Backend, n: usize) -> String {
        let placeholder = backend.placeholder(n);
        match (self.kind, backend) {
            (ColumnKind::Timestamp, Backend::Postgres) => {
                format!("CAST({placeholder} AS TIMESTAMP)")
            }
            (ColumnKind::Timestamp, Backend::MySql) => {
                format!("CAST({placeholder} AS DATETIME(6))")
            }
            _ => placeholder,
        }
    }

    /// Expression selected on read, aliased back to the column name.
    /// Timestamps come back as text in [`TIMESTAMP_FORMAT`].
    fn select_expression(&self, backend: Backend) -> String {
        let name = backend.quote(self.name);
        match (self.kind, backend) {
            (ColumnKind::Timestamp, Backend::Postgres) => {
                format!("to_char({name}, 'YYYY-MM-DD HH24:MI:SS.US') AS {name}")
            }
            (ColumnKind::Timestamp, Backend::MySql) => {
                format!("DATE_FORMAT({name}, '%Y-%m-%d %H:%i:%s.%f') AS {name}")
            }
            // the Any driver rejects sqlite's DATETIME column type
            (ColumnKind::Timestamp, Backend::Sqlite) => format!("CAST({name} AS TEXT) AS {name}"),
            _ => name,
        }
    }
}

/// Composite secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl Index {
    fn keyword(&self) -> &'static str {
        if self.unique {
            "UNIQUE INDEX"
        } else {
            "INDEX"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Compressed,
}

/// Storage engine hints. Only MySQL honours them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Storage {
    pub engine: &'static str,
    pub charset: &'static str,
    pub row_format: Option<RowFormat>,
    pub key_block_size: Option<u8>,
}

impl Storage {
    pub const TRANSACTIONAL: Storage = Storage {
        engine: "InnoDB",
        charset: "utf8",
        row_format: None,
        key_block_size: None,
    };

    pub const fn compressed(self, key_block_size: u8) -> Self {
        Self {
            row_format: Some(RowFormat::Compressed),
            key_block_size: Some(key_block_size),
            ..self
        }
    }

    fn table_options(&self) -> String {
        let mut options = format!("ENGINE={} DEFAULT CHARSET={}", self.engine, self.charset);
        if let Some(RowFormat::Compressed) = self.row_format {
            options.push_str(" ROW_FORMAT=COMPRESSED");
        }
        if let Some(size) = self.key_block_size {
            options.push_str(&format!(" KEY_BLOCK_SIZE={size}"));
        }
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
    pub storage: Storage,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary_key)
    }

    /// Columns written on insert, in declaration order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| !column.primary_key)
    }

    /// Statements that create the table and its indexes only when absent.
    pub fn create_statements(&self, backend: Backend) -> Vec<String> {
        let mut definitions: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.definition(backend))
            .collect();

        if !backend.supports_index_if_not_exists() {
            definitions.extend(self.indexes.iter().map(|index| {
                format!(
                    "{} {} ({})",
                    index.keyword(),
                    backend.quote(index.name),
                    quote_all(backend, index.columns.iter().copied())
                )
            }));
        }

        let mut create_table = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            backend.quote(self.name),
            definitions.join(", ")
        );
        if backend == Backend::MySql {
            create_table.push(' ');
            create_table.push_str(&self.storage.table_options());
        }

        let mut statements = vec![create_table];
        if backend.supports_index_if_not_exists() {
            statements.extend(self.indexes.iter().map(|index| {
                format!(
                    "CREATE {} IF NOT EXISTS {} ON {} ({})",
                    index.keyword(),
                    backend.quote(index.name),
                    backend.quote(self.name),
                    quote_all(backend, index.columns.iter().copied())
                )
            }));
        }
        statements
    }

    pub(crate) fn insert_statement(&self, backend: Backend) -> String {
        let values: Vec<String> = self
            .insertable_columns()
            .enumerate()
            .map(|(i, column)| column.insert_expression(backend, i + 1))
            .collect();

        let mut statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            backend.quote(self.name),
            quote_all(backend, self.insertable_columns().map(|column| column.name)),
            values.join(", ")
        );
        if let (true, Some(key)) = (backend.supports_returning(), self.primary_key()) {
            statement.push_str(&format!(" RETURNING {}", backend.quote(key.name)));
        }
        statement
    }

    pub(crate) fn select_by_key_statement(&self, backend: Backend) -> Option<String> {
        let key = self.primary_key()?;
        Some(format!(
            "SELECT {} FROM {} WHERE {} = {}",
            self.columns
                .iter()
                .map(|column| column.select_expression(backend))
                .collect::<Vec<_>>()
                .join(", "),
            backend.quote(self.name),
            backend.quote(key.name),
            backend.placeholder(1)
        ))
    }
}

fn quote_all<'a>(backend: Backend, names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|name| backend.quote(name))
        .collect::<Vec<_>>()
        .join(", ")
}

use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::users::{self, NewUser, UserRecord};

/// File name of the store the binary writes to, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "user_data.db";

/// Schema definition for the SQLite database
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Renders an idempotent `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
}

impl DataType {
    pub fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
            DataType::Blob => "BLOB",
        }
    }
}

/// Column constraints, rendered in declaration order.
///
/// `AutoIncrement` is only meaningful after `PrimaryKey` on an `INTEGER` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    Unique,
}

impl ColumnConstraint {
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Unique => "UNIQUE",
        }
    }
}

/// SQLite store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: String,
    /// Schema definition for the database
    pub schema: Schema,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH, users::users_schema())
    }
}

/// Result of a single insert.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Committed; `id` is the row id the store assigned.
    Saved { id: i64 },
    /// A record with the same email already exists (unique constraint). Nothing was written.
    DuplicateEmail,
    /// Any other store failure, other constraint violations included.
    /// The transaction was rolled back.
    Failed(Error),
}

/// Owns the one open connection for a run.
///
/// Dropping the store closes the connection; [`SqliteStore::close`] does the
/// same but reports close failures.
pub struct SqliteStore {
    config: SqliteConfig,
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if absent) the database file named by the config.
    pub fn open(config: SqliteConfig) -> Result<Self> {
        info!(path = %config.db_path, "opening sqlite store");
        let conn = Connection::open(&config.db_path)?;
        Ok(Self { config, conn })
    }

    /// Wraps an already open connection, e.g. an in-memory one.
    pub fn from_connection(config: SqliteConfig, conn: Connection) -> Self {
        Self { config, conn }
    }

    pub fn path(&self) -> &str {
        &self.config.db_path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates every configured table that does not exist yet.
    pub fn initialize_schema(&self) -> Result<()> {
        for table in &self.config.schema.tables {
            let sql = table.create_statement();
            debug!(table = %table.name, %sql, "ensuring table");
            self.conn.execute(&sql, [])?;
        }
        Ok(())
    }

    /// Inserts one user inside a transaction and commits it.
    pub fn insert_user(&mut self, user: &NewUser) -> SaveOutcome {
        match self.try_insert_user(user) {
            Ok(id) => {
                info!(id, "user saved");
                SaveOutcome::Saved { id }
            }
            Err(Error::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                warn!("duplicate email rejected");
                debug!(email = %user.email, "duplicate email");
                SaveOutcome::DuplicateEmail
            }
            Err(err) => {
                warn!(error = %err, "insert failed");
                SaveOutcome::Failed(err)
            }
        }
    }

    fn try_insert_user(&mut self, user: &NewUser) -> Result<i64> {
        // An error before commit drops `tx`, which rolls back.
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO users (name, age, email, other_data) VALUES (?1, ?2, ?3, ?4)",
            params![user.name, user.age, user.email, user.other_data],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, age, email, other_data FROM users WHERE email = ?1",
                [email],
                UserRecord::from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn count_users(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Closes the connection, consuming the store.
    pub fn close(self) -> Result<()> {
        let path = self.config.db_path;
        self.conn.close().map_err(|(_, err)| Error::from(err))?;
        info!(%path, "sqlite store closed");
        Ok(())
    }
}

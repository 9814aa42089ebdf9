//! Persistence store: connection setup, schema bootstrap and the owned
//! [`Store`] handle lent to repositories.
//!
//! Every connection handed out has `foreign_keys=ON` and carries the
//! current [`schema::SchemaStamp`].

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod store;

pub use open::{open_db, open_db_in_memory};
pub use schema::{SchemaStamp, SCHEMA_VERSION};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file is not a character sheet store of this layout.
    UnrecognizedSchema(SchemaStamp),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnrecognizedSchema(found) => write!(
                f,
                "not a character sheet store at schema version {} (application_id={:#x}, user_version={})",
                SCHEMA_VERSION, found.application_id, found.version
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnrecognizedSchema(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

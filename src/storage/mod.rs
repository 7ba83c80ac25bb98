pub mod directory;
pub mod postgres;

pub use directory::DirectoryStore;
pub use postgres::PostgresDirectory;

/// The [`DatabaseConnectionProvider`] trait provides a way to get a connection to the database.
/// This is implemented by the [`crate::Database`] and [`crate::TXMut`] types.
pub trait DatabaseConnectionProvider {
    /// The type of the connection.
    type Connection: sea_orm::ConnectionTrait + Send + Sync;

    /// Returns a reference to the database connection.
    fn get_connection(&self) -> &Self::Connection;
}

/// A marker trait for connections that can be used to read from the database.
pub trait ReadConnectionProvider: DatabaseConnectionProvider {}

/// A marker trait for connections that can be used to write to the database.
pub trait WriteConnectionProvider: DatabaseConnectionProvider {}

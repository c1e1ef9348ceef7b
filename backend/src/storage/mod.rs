pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::*;
pub use traits::AttendanceStorage;

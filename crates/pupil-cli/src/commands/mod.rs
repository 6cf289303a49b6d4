pub mod backup;
pub mod dispatch;
pub mod download;
pub mod migrate;
pub mod schema;
pub mod status;

/// Infrastructure module: database pool and bootstrap data

pub mod seed;
pub mod sqlite;

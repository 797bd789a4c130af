/// Middleware modules

pub mod logger;
pub mod request_id;

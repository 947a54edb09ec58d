pub mod constants;
pub mod debug_log;
pub mod http_client;
pub mod types;

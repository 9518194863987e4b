pub mod audit;
pub mod config;
pub mod init;

pub use audit::handle_audit;
pub use config::handle_config;
pub use init::handle_init;

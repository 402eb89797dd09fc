pub mod activity_log;
pub mod auth;
pub mod dao;
pub mod notify;
pub mod tenant;

pub use activity_log::ActivityLogger;
pub use auth::AuthService;
pub use notify::Notifier;
pub use tenant::TenantScope;

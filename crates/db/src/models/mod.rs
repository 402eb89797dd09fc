pub mod activity;
pub mod customer;
pub mod demo_request;
pub mod notification;
pub mod organization;
pub mod project;
pub mod task;
pub mod user;

pub use activity::{Activity, ActivityCategory};
pub use customer::{Customer, CustomerStatus};
pub use demo_request::{DemoRequest, DemoStatus};
pub use notification::{Notification, NotificationKind};
pub use organization::{Organization, OrgStatus, Plan};
pub use project::Project;
pub use task::{Task, TaskPriority};
pub use project::WorkStatus;
pub use user::{User, UserRole};

pub mod activity;
pub mod base;
pub mod customer;
pub mod demo_request;
pub mod notification;
pub mod organization;
pub mod project;
pub mod task;
pub mod user;

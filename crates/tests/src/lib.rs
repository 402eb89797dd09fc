pub mod fixtures;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod organization_tests;
#[cfg(test)]
mod tenant_isolation_tests;
#[cfg(test)]
mod activity_tests;
#[cfg(test)]
mod analytics_tests;

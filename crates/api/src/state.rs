use mongodb::Database;
use prisbo_config::Settings;
use prisbo_services::{
    ActivityLogger, AuthService, Notifier,
    dao::{
        activity::ActivityDao, customer::CustomerDao, demo_request::DemoRequestDao, notification::NotificationDao,
        organization::OrganizationDao, project::ProjectDao, task::TaskDao, user::UserDao,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub organizations: Arc<OrganizationDao>,
    pub users: Arc<UserDao>,
    pub customers: Arc<CustomerDao>,
    pub projects: Arc<ProjectDao>,
    pub tasks: Arc<TaskDao>,
    pub activities: Arc<ActivityDao>,
    pub notifications: Arc<NotificationDao>,
    pub demo_requests: Arc<DemoRequestDao>,
    pub activity_log: Arc<ActivityLogger>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let organizations = Arc::new(OrganizationDao::new(&db));
        let users = Arc::new(UserDao::new(&db));
        let customers = Arc::new(CustomerDao::new(&db));
        let projects = Arc::new(ProjectDao::new(&db));
        let tasks = Arc::new(TaskDao::new(&db));
        let activities = Arc::new(ActivityDao::new(&db));
        let notifications = Arc::new(NotificationDao::new(&db));
        let demo_requests = Arc::new(DemoRequestDao::new(&db));
        let activity_log = Arc::new(ActivityLogger::new(&db));
        let notifier = Arc::new(Notifier::new(&db));

        Self {
            db,
            settings,
            auth,
            organizations,
            users,
            customers,
            projects,
            tasks,
            activities,
            notifications,
            demo_requests,
            activity_log,
            notifier,
        }
    }
}

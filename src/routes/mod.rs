pub mod attendances;

pub mod auth;

pub mod behaviors;

pub mod courses;

pub mod grades;

pub mod holidays;

pub mod legacy;

pub mod messages;

pub mod schedules;

pub mod sessions;

pub mod stats;

pub mod students;

pub mod teachers;

pub mod websocket;

pub use attendances::configure_attendances_routes;
pub use auth::configure_auth_routes;
pub use behaviors::configure_behaviors_routes;
pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use holidays::configure_holidays_routes;
pub use legacy::configure_legacy_routes;
pub use messages::configure_messages_routes;
pub use schedules::configure_schedules_routes;
pub use sessions::configure_sessions_routes;
pub use stats::configure_stats_routes;
pub use students::configure_students_routes;
pub use teachers::configure_teachers_routes;
pub use websocket::configure_websocket_routes;

/// 注册全部路由
pub fn configure_all(cfg: &mut actix_web::web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_students_routes(cfg);
    configure_teachers_routes(cfg);
    configure_courses_routes(cfg);
    configure_sessions_routes(cfg);
    configure_attendances_routes(cfg);
    configure_behaviors_routes(cfg);
    configure_grades_routes(cfg);
    configure_stats_routes(cfg);
    configure_schedules_routes(cfg);
    configure_holidays_routes(cfg);
    configure_messages_routes(cfg);
    configure_websocket_routes(cfg);
    configure_legacy_routes(cfg);
}

//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendances;
mod behaviors;
mod courses;
mod grades;
mod holidays;
mod messages;
mod schedules;
mod sessions;
mod stats;
mod users;

use crate::config::AppConfig;
use crate::errors::{EdurootsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 使用已有连接创建存储实例并运行迁移（测试用内存数据库）
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EdurootsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EdurootsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EdurootsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EdurootsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. \
                 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendances::{
        entities::Attendance, requests::AttendanceRecordInput, responses::AttendanceListResponse,
    },
    behaviors::{entities::Behavior, requests::BehaviorRecordInput, responses::BehaviorListResponse},
    common::RecordListQuery,
    courses::{
        entities::{Course, CourseSession, SessionStatsSnapshot},
        requests::{CourseListQuery, SessionInput, UpdateCourseRequest, UpdateSessionRequest},
        responses::{CourseListResponse, EnrollStudentsResponse},
    },
    grades::{
        entities::{Grade, GradeType},
        requests::GradeRecordInput,
        responses::GradeListResponse,
    },
    holidays::entities::Holiday,
    messages::{
        entities::Message,
        requests::{MessageListQuery, SendMessageRequest},
        responses::MessageListResponse,
    },
    schedules::{entities::Schedule, requests::ScheduleInput},
    stats::entities::{AttendanceRow, BehaviorRow, GradeRow},
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::{RowScope, Storage};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_active_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.list_active_users_by_role_impl(role).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn soft_delete_user(&self, id: i64) -> Result<bool> {
        self.soft_delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_active_users_by_role(&self, role: UserRole) -> Result<i64> {
        self.count_active_users_by_role_impl(role).await
    }

    // 课程模块
    async fn create_course(
        &self,
        school_year: String,
        teacher_ids: Vec<i64>,
        sessions: Vec<SessionInput>,
    ) -> Result<Course> {
        self.create_course_impl(school_year, teacher_ids, sessions)
            .await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn soft_delete_course(&self, course_id: i64) -> Result<bool> {
        self.soft_delete_course_impl(course_id).await
    }

    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_teacher_courses_impl(teacher_id).await
    }

    async fn is_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        self.is_course_teacher_impl(course_id, teacher_id).await
    }

    async fn count_active_courses(&self) -> Result<i64> {
        self.count_active_courses_impl().await
    }

    // 课节模块
    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<CourseSession>> {
        self.get_session_by_id_impl(session_id).await
    }

    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<CourseSession>> {
        self.update_session_impl(session_id, update).await
    }

    async fn update_session_stats(
        &self,
        session_id: i64,
        stats: SessionStatsSnapshot,
    ) -> Result<bool> {
        self.update_session_stats_impl(session_id, stats).await
    }

    async fn enroll_students(
        &self,
        session_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<EnrollStudentsResponse> {
        self.enroll_students_impl(session_id, student_ids).await
    }

    async fn unenroll_student(&self, session_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(session_id, student_id).await
    }

    async fn list_session_students(&self, session_id: i64) -> Result<Vec<User>> {
        self.list_session_students_impl(session_id).await
    }

    async fn list_session_student_ids(&self, session_id: i64) -> Result<Vec<i64>> {
        self.list_session_student_ids_impl(session_id).await
    }

    async fn list_student_sessions(&self, student_id: i64) -> Result<Vec<CourseSession>> {
        self.list_student_sessions_impl(student_id).await
    }

    async fn list_teacher_student_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        self.list_teacher_student_ids_impl(teacher_id).await
    }

    async fn count_active_sessions(&self) -> Result<i64> {
        self.count_active_sessions_impl().await
    }

    // 出勤模块
    async fn create_attendance(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Attendance> {
        self.create_attendance_impl(session_id, date, created_by, records)
            .await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn attendance_exists(&self, session_id: i64, date: NaiveDate) -> Result<bool> {
        self.attendance_exists_impl(session_id, date).await
    }

    async fn list_attendances_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendances_with_pagination_impl(query).await
    }

    async fn replace_attendance_records(
        &self,
        id: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Option<Attendance>> {
        self.replace_attendance_records_impl(id, records).await
    }

    async fn soft_delete_attendance(&self, id: i64) -> Result<bool> {
        self.soft_delete_attendance_impl(id).await
    }

    // 行为模块
    async fn create_behavior(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Behavior> {
        self.create_behavior_impl(session_id, date, created_by, behavior_average, records)
            .await
    }

    async fn get_behavior_by_id(&self, id: i64) -> Result<Option<Behavior>> {
        self.get_behavior_by_id_impl(id).await
    }

    async fn behavior_exists(&self, session_id: i64, date: NaiveDate) -> Result<bool> {
        self.behavior_exists_impl(session_id, date).await
    }

    async fn list_behaviors_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<BehaviorListResponse> {
        self.list_behaviors_with_pagination_impl(query).await
    }

    async fn replace_behavior_records(
        &self,
        id: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Option<Behavior>> {
        self.replace_behavior_records_impl(id, behavior_average, records)
            .await
    }

    async fn soft_delete_behavior(&self, id: i64) -> Result<bool> {
        self.soft_delete_behavior_impl(id).await
    }

    // 成绩模块
    async fn create_grade(
        &self,
        session_id: i64,
        date: NaiveDate,
        grade_type: GradeType,
        is_draft: bool,
        created_by: i64,
        records: Vec<GradeRecordInput>,
    ) -> Result<Grade> {
        self.create_grade_impl(session_id, date, grade_type, is_draft, created_by, records)
            .await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(
        &self,
        id: i64,
        grade_type: Option<GradeType>,
        is_draft: Option<bool>,
        records: Option<Vec<GradeRecordInput>>,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(id, grade_type, is_draft, records)
            .await
    }

    async fn soft_delete_grade(&self, id: i64) -> Result<bool> {
        self.soft_delete_grade_impl(id).await
    }

    // 统计明细
    async fn list_attendance_rows(&self, scope: RowScope) -> Result<Vec<AttendanceRow>> {
        self.list_attendance_rows_impl(scope).await
    }

    async fn list_behavior_rows(&self, scope: RowScope) -> Result<Vec<BehaviorRow>> {
        self.list_behavior_rows_impl(scope).await
    }

    async fn list_grade_rows(&self, scope: RowScope) -> Result<Vec<GradeRow>> {
        self.list_grade_rows_impl(scope).await
    }

    // 假期模块
    async fn create_holiday(
        &self,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Holiday> {
        self.create_holiday_impl(name, start_date, end_date).await
    }

    async fn get_holiday_by_id(&self, id: i64) -> Result<Option<Holiday>> {
        self.get_holiday_by_id_impl(id).await
    }

    async fn list_holidays(&self, include_inactive: bool) -> Result<Vec<Holiday>> {
        self.list_holidays_impl(include_inactive).await
    }

    async fn update_holiday(&self, holiday: Holiday) -> Result<Option<Holiday>> {
        self.update_holiday_impl(holiday).await
    }

    async fn soft_delete_holiday(&self, id: i64) -> Result<bool> {
        self.soft_delete_holiday_impl(id).await
    }

    // 作息模块
    async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.list_schedules_impl().await
    }

    async fn replace_schedules(&self, schedules: Vec<ScheduleInput>) -> Result<Vec<Schedule>> {
        self.replace_schedules_impl(schedules).await
    }

    // 消息模块
    async fn create_message(
        &self,
        sender_id: i64,
        message: SendMessageRequest,
    ) -> Result<Message> {
        self.create_message_impl(sender_id, message).await
    }

    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        self.get_message_by_id_impl(id).await
    }

    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        self.list_messages_with_pagination_impl(query).await
    }

    async fn count_unread_messages(&self, user_id: i64) -> Result<i64> {
        self.count_unread_messages_impl(user_id).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<bool> {
        self.mark_message_read_impl(id).await
    }

    async fn hide_message_for(&self, id: i64, user_id: i64) -> Result<bool> {
        self.hide_message_for_impl(id, user_id).await
    }
}

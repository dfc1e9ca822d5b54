use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 统计明细的查询范围
#[derive(Debug, Clone, PartialEq)]
pub enum RowScope {
    /// 某个学生的全部明细
    Student(i64),
    /// 若干课节的全部明细
    Sessions(Vec<i64>),
    /// 全校
    All,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 列出某角色的全部活跃用户
    async fn list_active_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 软删除用户（学生同时退出所有课节）
    async fn soft_delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 某角色的活跃用户数
    async fn count_active_users_by_role(&self, role: UserRole) -> Result<i64>;

    /// 课程管理方法
    // 创建课程（含教师与课节，单事务）
    async fn create_course(
        &self,
        school_year: String,
        teacher_ids: Vec<i64>,
        sessions: Vec<SessionInput>,
    ) -> Result<Course>;
    // 通过ID获取课程（含教师与课节）
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 软删除课程及其课节
    async fn soft_delete_course(&self, course_id: i64) -> Result<bool>;
    // 教师任教的全部活跃课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 教师是否任教该课程
    async fn is_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool>;
    // 活跃课程数
    async fn count_active_courses(&self) -> Result<i64>;

    /// 课节管理方法
    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<CourseSession>>;
    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<CourseSession>>;
    // 写入课节缓存统计
    async fn update_session_stats(
        &self,
        session_id: i64,
        stats: SessionStatsSnapshot,
    ) -> Result<bool>;
    // 学生选课（已选则跳过）
    async fn enroll_students(
        &self,
        session_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<EnrollStudentsResponse>;
    // 学生退课
    async fn unenroll_student(&self, session_id: i64, student_id: i64) -> Result<bool>;
    // 课节内的活跃学生
    async fn list_session_students(&self, session_id: i64) -> Result<Vec<User>>;
    // 课节内的学生ID
    async fn list_session_student_ids(&self, session_id: i64) -> Result<Vec<i64>>;
    // 学生所在的活跃课节
    async fn list_student_sessions(&self, student_id: i64) -> Result<Vec<CourseSession>>;
    // 教师所教课节中的学生ID（去重）
    async fn list_teacher_student_ids(&self, teacher_id: i64) -> Result<Vec<i64>>;
    // 活跃课节数
    async fn count_active_sessions(&self) -> Result<i64>;

    /// 出勤管理方法
    async fn create_attendance(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    // 某课节某日是否已有活跃出勤表
    async fn attendance_exists(&self, session_id: i64, date: NaiveDate) -> Result<bool>;
    async fn list_attendances_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<AttendanceListResponse>;
    // 整体替换出勤明细
    async fn replace_attendance_records(
        &self,
        id: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Option<Attendance>>;
    async fn soft_delete_attendance(&self, id: i64) -> Result<bool>;

    /// 行为管理方法
    async fn create_behavior(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Behavior>;
    async fn get_behavior_by_id(&self, id: i64) -> Result<Option<Behavior>>;
    async fn behavior_exists(&self, session_id: i64, date: NaiveDate) -> Result<bool>;
    async fn list_behaviors_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<BehaviorListResponse>;
    async fn replace_behavior_records(
        &self,
        id: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Option<Behavior>>;
    async fn soft_delete_behavior(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_grade(
        &self,
        session_id: i64,
        date: NaiveDate,
        grade_type: GradeType,
        is_draft: bool,
        created_by: i64,
        records: Vec<GradeRecordInput>,
    ) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<GradeListResponse>;
    async fn update_grade(
        &self,
        id: i64,
        grade_type: Option<GradeType>,
        is_draft: Option<bool>,
        records: Option<Vec<GradeRecordInput>>,
    ) -> Result<Option<Grade>>;
    async fn soft_delete_grade(&self, id: i64) -> Result<bool>;

    /// 统计明细（仅活跃表头）
    async fn list_attendance_rows(&self, scope: RowScope) -> Result<Vec<AttendanceRow>>;
    async fn list_behavior_rows(&self, scope: RowScope) -> Result<Vec<BehaviorRow>>;
    async fn list_grade_rows(&self, scope: RowScope) -> Result<Vec<GradeRow>>;

    /// 假期管理方法
    async fn create_holiday(
        &self,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Holiday>;
    async fn get_holiday_by_id(&self, id: i64) -> Result<Option<Holiday>>;
    async fn list_holidays(&self, include_inactive: bool) -> Result<Vec<Holiday>>;
    async fn update_holiday(&self, holiday: Holiday) -> Result<Option<Holiday>>;
    async fn soft_delete_holiday(&self, id: i64) -> Result<bool>;

    /// 作息管理方法
    async fn list_schedules(&self) -> Result<Vec<Schedule>>;
    // 按时间段写入作息（不存在则插入）
    async fn replace_schedules(&self, schedules: Vec<ScheduleInput>) -> Result<Vec<Schedule>>;

    /// 消息管理方法
    async fn create_message(&self, sender_id: i64, message: SendMessageRequest)
    -> Result<Message>;
    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>>;
    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse>;
    async fn count_unread_messages(&self, user_id: i64) -> Result<i64>;
    async fn mark_message_read(&self, id: i64) -> Result<bool>;
    // 仅对该用户隐藏消息
    async fn hide_message_for(&self, id: i64, user_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

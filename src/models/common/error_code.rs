/// 业务错误码
///
/// 0 表示成功；按千位区分模块。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    InvalidData = 1001,
    NotFound = 1002,
    Conflict = 1003,
    RateLimitExceeded = 1004,
    InternalServerError = 1005,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2002,
    AccountDisabled = 2003,

    // 用户（学生 / 教师）
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserRoleMismatch = 3004,

    // 课程与课节
    CourseNotFound = 4000,
    SessionNotFound = 4001,
    SessionPermissionDenied = 4002,
    StudentNotEnrolled = 4003,

    // 出勤 / 行为 / 成绩
    AttendanceNotFound = 5000,
    AttendanceAlreadyExists = 5001,
    BehaviorNotFound = 5002,
    BehaviorAlreadyExists = 5003,
    GradeNotFound = 5004,
    DateIsHoliday = 5005,

    // 假期与作息
    HolidayNotFound = 6000,
    ScheduleInvalid = 6001,

    // 消息
    MessageNotFound = 7000,
    MessageRecipientInvalid = 7001,
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}

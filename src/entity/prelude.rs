//! 预导入模块，方便使用

pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::attendances::{
    ActiveModel as AttendanceActiveModel, Entity as Attendances, Model as AttendanceModel,
};
pub use super::behavior_records::{
    ActiveModel as BehaviorRecordActiveModel, Entity as BehaviorRecords,
    Model as BehaviorRecordModel,
};
pub use super::behaviors::{
    ActiveModel as BehaviorActiveModel, Entity as Behaviors, Model as BehaviorModel,
};
pub use super::course_session_students::{
    ActiveModel as CourseSessionStudentActiveModel, Entity as CourseSessionStudents,
    Model as CourseSessionStudentModel,
};
pub use super::course_sessions::{
    ActiveModel as CourseSessionActiveModel, Entity as CourseSessions,
    Model as CourseSessionModel,
};
pub use super::course_teachers::{
    ActiveModel as CourseTeacherActiveModel, Entity as CourseTeachers,
    Model as CourseTeacherModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::grade_records::{
    ActiveModel as GradeRecordActiveModel, Entity as GradeRecords, Model as GradeRecordModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::holidays::{
    ActiveModel as HolidayActiveModel, Entity as Holidays, Model as HolidayModel,
};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

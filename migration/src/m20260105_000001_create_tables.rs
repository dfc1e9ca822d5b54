use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键列
fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 课节 + 日期唯一索引，只约束有效记录
///
/// MySQL 不支持部分索引，退化为 `plain`，重复由存储层事务检查。
async fn create_active_date_index(
    manager: &SchemaManager<'_>,
    plain: IndexCreateStatement,
    name: &str,
    table: &str,
) -> Result<(), DbErr> {
    if manager.get_database_backend() == DbBackend::MySql {
        return manager.create_index(plain).await;
    }
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "{name}"
               ON "{table}" ("course_session_id", "date") WHERE "is_active""#
        ))
        .await
        .map(|_| ())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表（管理员、教师、学生共用）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_column(Users::Id))
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::Firstname).string().not_null())
                    .col(ColumnDef::new(Users::Lastname).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::Gender).string().null())
                    .col(ColumnDef::new(Users::DateOfBirth).string_len(10).null())
                    .col(ColumnDef::new(Users::ParentEmail).string().null())
                    .col(ColumnDef::new(Users::SchoolYear).string_len(9).null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::DeletedAt).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id_column(Courses::Id))
                    .col(ColumnDef::new(Courses::SchoolYear).string_len(9).not_null())
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Courses::DeletedAt).big_integer().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程教师关联表
        manager
            .create_table(
                Table::create()
                    .table(CourseTeachers::Table)
                    .if_not_exists()
                    .col(id_column(CourseTeachers::Id))
                    .col(
                        ColumnDef::new(CourseTeachers::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseTeachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTeachers::Table, CourseTeachers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTeachers::Table, CourseTeachers::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课节表（一个课程下的具体上课时段）
        manager
            .create_table(
                Table::create()
                    .table(CourseSessions::Table)
                    .if_not_exists()
                    .col(id_column(CourseSessions::Id))
                    .col(
                        ColumnDef::new(CourseSessions::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseSessions::Subject).string().not_null())
                    .col(ColumnDef::new(CourseSessions::Level).string().not_null())
                    .col(ColumnDef::new(CourseSessions::TimeSlot).string().not_null())
                    .col(
                        ColumnDef::new(CourseSessions::StartTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::EndTime)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::ClassroomNumber)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::StatsAverageAttendance)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::StatsAverageGrade)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::StatsAverageBehavior)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseSessions::Table, CourseSessions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课节学生关联表
        manager
            .create_table(
                Table::create()
                    .table(CourseSessionStudents::Table)
                    .if_not_exists()
                    .col(id_column(CourseSessionStudents::Id))
                    .col(
                        ColumnDef::new(CourseSessionStudents::CourseSessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessionStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSessionStudents::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CourseSessionStudents::Table,
                                CourseSessionStudents::CourseSessionId,
                            )
                            .to(CourseSessions::Table, CourseSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CourseSessionStudents::Table,
                                CourseSessionStudents::StudentId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 出勤表头
        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(id_column(Attendances::Id))
                    .col(
                        ColumnDef::new(Attendances::CourseSessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendances::Date).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Attendances::TotalStudents)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendances::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Attendances::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Attendances::DeletedAt).big_integer().null())
                    .col(ColumnDef::new(Attendances::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Attendances::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendances::Table, Attendances::CourseSessionId)
                            .to(CourseSessions::Table, CourseSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendances::Table, Attendances::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 出勤明细
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(id_column(AttendanceRecords::Id))
                    .col(
                        ColumnDef::new(AttendanceRecords::AttendanceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::IsPresent)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::IsJustified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Comment).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::AttendanceId)
                            .to(Attendances::Table, Attendances::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 行为表头
        manager
            .create_table(
                Table::create()
                    .table(Behaviors::Table)
                    .if_not_exists()
                    .col(id_column(Behaviors::Id))
                    .col(
                        ColumnDef::new(Behaviors::CourseSessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Behaviors::Date).string_len(10).not_null())
                    .col(ColumnDef::new(Behaviors::TotalStudents).integer().not_null())
                    .col(
                        ColumnDef::new(Behaviors::BehaviorAverage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Behaviors::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Behaviors::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Behaviors::DeletedAt).big_integer().null())
                    .col(ColumnDef::new(Behaviors::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Behaviors::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Behaviors::Table, Behaviors::CourseSessionId)
                            .to(CourseSessions::Table, CourseSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Behaviors::Table, Behaviors::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 行为明细
        manager
            .create_table(
                Table::create()
                    .table(BehaviorRecords::Table)
                    .if_not_exists()
                    .col(id_column(BehaviorRecords::Id))
                    .col(
                        ColumnDef::new(BehaviorRecords::BehaviorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BehaviorRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BehaviorRecords::Rating).integer().not_null())
                    .col(ColumnDef::new(BehaviorRecords::Comment).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(BehaviorRecords::Table, BehaviorRecords::BehaviorId)
                            .to(Behaviors::Table, Behaviors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BehaviorRecords::Table, BehaviorRecords::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩表头
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(id_column(Grades::Id))
                    .col(
                        ColumnDef::new(Grades::CourseSessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grades::Date).string_len(10).not_null())
                    .col(ColumnDef::new(Grades::GradeType).string().not_null())
                    .col(
                        ColumnDef::new(Grades::IsDraft)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Grades::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Grades::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Grades::DeletedAt).big_integer().null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::CourseSessionId)
                            .to(CourseSessions::Table, CourseSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩明细
        manager
            .create_table(
                Table::create()
                    .table(GradeRecords::Table)
                    .if_not_exists()
                    .col(id_column(GradeRecords::Id))
                    .col(ColumnDef::new(GradeRecords::GradeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GradeRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeRecords::Value).double().null())
                    .col(
                        ColumnDef::new(GradeRecords::IsAbsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GradeRecords::Comment).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeRecords::Table, GradeRecords::GradeId)
                            .to(Grades::Table, Grades::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeRecords::Table, GradeRecords::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 假期表
        manager
            .create_table(
                Table::create()
                    .table(Holidays::Table)
                    .if_not_exists()
                    .col(id_column(Holidays::Id))
                    .col(ColumnDef::new(Holidays::Name).string().not_null())
                    .col(ColumnDef::new(Holidays::StartDate).string_len(10).not_null())
                    .col(ColumnDef::new(Holidays::EndDate).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Holidays::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Holidays::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Holidays::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 时间段作息表
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(id_column(Schedules::Id))
                    .col(
                        ColumnDef::new(Schedules::TimeSlot)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Schedules::StartTime).string_len(5).not_null())
                    .col(ColumnDef::new(Schedules::MiddleTime).string_len(5).not_null())
                    .col(ColumnDef::new(Schedules::EndTime).string_len(5).not_null())
                    .col(ColumnDef::new(Schedules::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 站内消息表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(id_column(Messages::Id))
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(
                        ColumnDef::new(Messages::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::DeletedBySender)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::DeletedByRecipient)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_teachers_unique")
                    .table(CourseTeachers::Table)
                    .col(CourseTeachers::CourseId)
                    .col(CourseTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_session_students_unique")
                    .table(CourseSessionStudents::Table)
                    .col(CourseSessionStudents::CourseSessionId)
                    .col(CourseSessionStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        create_active_date_index(
            manager,
            Index::create()
                .if_not_exists()
                .name("idx_attendances_session_date")
                .table(Attendances::Table)
                .col(Attendances::CourseSessionId)
                .col(Attendances::Date)
                .to_owned(),
            "idx_attendances_session_date",
            "attendances",
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_student")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        create_active_date_index(
            manager,
            Index::create()
                .if_not_exists()
                .name("idx_behaviors_session_date")
                .table(Behaviors::Table)
                .col(Behaviors::CourseSessionId)
                .col(Behaviors::Date)
                .to_owned(),
            "idx_behaviors_session_date",
            "behaviors",
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_session_date")
                    .table(Grades::Table)
                    .col(Grades::CourseSessionId)
                    .col(Grades::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_recipient")
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .col(Messages::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Holidays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradeRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BehaviorRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Behaviors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseSessionStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    Status,
    Firstname,
    Lastname,
    Phone,
    Gender,
    DateOfBirth,
    ParentEmail,
    SchoolYear,
    LastLogin,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    SchoolYear,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseTeachers {
    #[sea_orm(iden = "course_teachers")]
    Table,
    Id,
    CourseId,
    TeacherId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseSessions {
    #[sea_orm(iden = "course_sessions")]
    Table,
    Id,
    CourseId,
    Subject,
    Level,
    TimeSlot,
    StartTime,
    EndTime,
    ClassroomNumber,
    StatsAverageAttendance,
    StatsAverageGrade,
    StatsAverageBehavior,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseSessionStudents {
    #[sea_orm(iden = "course_session_students")]
    Table,
    Id,
    CourseSessionId,
    StudentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Attendances {
    #[sea_orm(iden = "attendances")]
    Table,
    Id,
    CourseSessionId,
    Date,
    TotalStudents,
    CreatedBy,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    AttendanceId,
    StudentId,
    IsPresent,
    IsJustified,
    Comment,
}

#[derive(DeriveIden)]
enum Behaviors {
    #[sea_orm(iden = "behaviors")]
    Table,
    Id,
    CourseSessionId,
    Date,
    TotalStudents,
    BehaviorAverage,
    CreatedBy,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BehaviorRecords {
    #[sea_orm(iden = "behavior_records")]
    Table,
    Id,
    BehaviorId,
    StudentId,
    Rating,
    Comment,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    CourseSessionId,
    Date,
    GradeType,
    IsDraft,
    CreatedBy,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeRecords {
    #[sea_orm(iden = "grade_records")]
    Table,
    Id,
    GradeId,
    StudentId,
    Value,
    IsAbsent,
    Comment,
}

#[derive(DeriveIden)]
enum Holidays {
    #[sea_orm(iden = "holidays")]
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    TimeSlot,
    StartTime,
    MiddleTime,
    EndTime,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    SenderId,
    RecipientId,
    Subject,
    Body,
    IsRead,
    DeletedBySender,
    DeletedByRecipient,
    CreatedAt,
}

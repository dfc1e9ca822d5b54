//! 基于内存 SQLite 的存储层流程测试

use std::sync::Arc;

use chrono::NaiveDate;
use eduroots::cache::object_cache::moka::MokaCacheWrapper;
use eduroots::cache::{CacheResult, ObjectCache};
use eduroots::models::attendances::requests::AttendanceRecordInput;
use eduroots::models::behaviors::requests::BehaviorRecordInput;
use eduroots::models::courses::entities::{Subject, TimeSlot};
use eduroots::models::courses::requests::SessionInput;
use eduroots::models::users::entities::{User, UserRole};
use eduroots::models::users::requests::CreateUserRequest;
use eduroots::services::stats::refresh::recompute_session_stats;
use eduroots::services::stats::student::compute_student_stats;
use eduroots::services::stats::teacher_stats_key;
use eduroots::services::users::delete::delete_account;
use eduroots::storage::Storage;
use eduroots::storage::sea_orm_storage::SeaOrmStorage;

async fn memory_storage() -> Arc<dyn Storage> {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect sqlite memory");
    Arc::new(
        SeaOrmStorage::from_connection(db)
            .await
            .expect("run migrations"),
    )
}

async fn create_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password: "hash".to_string(),
            role,
            firstname: "Test".to_string(),
            lastname: email.to_string(),
            phone: None,
            gender: None,
            date_of_birth: None,
            parent_email: None,
            school_year: None,
        })
        .await
        .unwrap()
}

fn morning_session() -> SessionInput {
    SessionInput {
        subject: Subject::Arabic,
        level: "N1".to_string(),
        time_slot: TimeSlot::SaturdayMorning,
        start_time: "09:00".to_string(),
        end_time: "10:30".to_string(),
        classroom_number: Some("A1".to_string()),
    }
}

fn record(student_id: i64, is_present: bool, is_justified: bool) -> AttendanceRecordInput {
    AttendanceRecordInput {
        student_id,
        is_present,
        is_justified,
        comment: None,
    }
}

#[tokio::test]
async fn test_attendance_flow_feeds_student_stats() {
    let storage = memory_storage().await;
    let teacher = create_user(&storage, "prof@eduroots.test", UserRole::Teacher).await;
    let alice = create_user(&storage, "alice@eduroots.test", UserRole::Student).await;
    let bob = create_user(&storage, "bob@eduroots.test", UserRole::Student).await;

    let course = storage
        .create_course(
            "2025-2026".to_string(),
            vec![teacher.id],
            vec![morning_session()],
        )
        .await
        .unwrap();
    assert_eq!(course.teachers.len(), 1);
    let session_id = course.sessions[0].id;
    assert!(storage.is_course_teacher(course.id, teacher.id).await.unwrap());

    let enrolled = storage
        .enroll_students(session_id, vec![alice.id, bob.id])
        .await
        .unwrap();
    assert_eq!(enrolled.enrolled, 2);
    let again = storage
        .enroll_students(session_id, vec![alice.id])
        .await
        .unwrap();
    assert_eq!(again.enrolled, 0);
    assert_eq!(again.already_enrolled, 1);

    let mut teacher_students = storage.list_teacher_student_ids(teacher.id).await.unwrap();
    teacher_students.sort();
    assert_eq!(teacher_students, vec![alice.id, bob.id]);

    let first = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
    let second = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
    storage
        .create_attendance(
            session_id,
            first,
            teacher.id,
            vec![record(alice.id, true, false), record(bob.id, false, true)],
        )
        .await
        .unwrap();
    storage
        .create_attendance(
            session_id,
            second,
            teacher.id,
            vec![record(alice.id, false, false), record(bob.id, false, false)],
        )
        .await
        .unwrap();
    assert!(storage.attendance_exists(session_id, first).await.unwrap());

    let alice_stats = compute_student_stats(&storage, alice.id, 3).await.unwrap();
    assert_eq!(alice_stats.total_sessions_recorded, 2);
    assert_eq!(alice_stats.absences_count, 1);
    assert_eq!(alice_stats.attendance_rate, 50.0);
    assert!(!alice_stats.is_high_risk);
    assert_eq!(alice_stats.last_activity, Some(second));

    let bob_stats = compute_student_stats(&storage, bob.id, 2).await.unwrap();
    assert_eq!(bob_stats.absences_count, 2);
    assert_eq!(bob_stats.justified_absences_count, 1);
    assert!(bob_stats.is_high_risk);

    let snapshot = recompute_session_stats(&storage, session_id).await.unwrap();
    assert_eq!(snapshot.average_attendance, Some(25.0));
    let session = storage
        .get_session_by_id(session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.stats.average_attendance, Some(25.0));
}

#[tokio::test]
async fn test_soft_deleted_records_leave_stats() {
    let storage = memory_storage().await;
    let teacher = create_user(&storage, "prof2@eduroots.test", UserRole::Teacher).await;
    let student = create_user(&storage, "eleve@eduroots.test", UserRole::Student).await;
    let course = storage
        .create_course(
            "2025-2026".to_string(),
            vec![teacher.id],
            vec![morning_session()],
        )
        .await
        .unwrap();
    let session_id = course.sessions[0].id;
    storage
        .enroll_students(session_id, vec![student.id])
        .await
        .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 11, 8).unwrap();
    let behavior = storage
        .create_behavior(
            session_id,
            date,
            teacher.id,
            4.0,
            vec![BehaviorRecordInput {
                student_id: student.id,
                rating: 4,
                comment: None,
            }],
        )
        .await
        .unwrap();
    let stats = compute_student_stats(&storage, student.id, 3).await.unwrap();
    assert_eq!(stats.behavior_average, Some(4.0));

    assert!(storage.soft_delete_behavior(behavior.id).await.unwrap());
    assert!(!storage.behavior_exists(session_id, date).await.unwrap());
    let stats = compute_student_stats(&storage, student.id, 3).await.unwrap();
    assert_eq!(stats.behavior_average, None);
    // 已删除的表头不能再删一次
    assert!(!storage.soft_delete_behavior(behavior.id).await.unwrap());
}

#[tokio::test]
async fn test_deleting_student_removes_enrollments() {
    let storage = memory_storage().await;
    let teacher = create_user(&storage, "prof3@eduroots.test", UserRole::Teacher).await;
    let student = create_user(&storage, "parti@eduroots.test", UserRole::Student).await;
    let course = storage
        .create_course(
            "2025-2026".to_string(),
            vec![teacher.id],
            vec![morning_session()],
        )
        .await
        .unwrap();
    let session_id = course.sessions[0].id;
    storage
        .enroll_students(session_id, vec![student.id])
        .await
        .unwrap();

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
    let teacher_key = teacher_stats_key(teacher.id);
    cache
        .insert_raw(teacher_key.clone(), "{}".to_string(), 0)
        .await;

    delete_account(&storage, &cache, student.id, UserRole::Student)
        .await
        .expect("student deleted");
    assert!(
        storage
            .list_session_student_ids(session_id)
            .await
            .unwrap()
            .is_empty()
    );
    let deleted = storage.get_user_by_id(student.id).await.unwrap().unwrap();
    assert!(!deleted.can_login());
    // 教师统计里的学生数已过期
    assert_eq!(cache.get_raw(&teacher_key).await, CacheResult::NotFound);
}

#[tokio::test]
async fn test_one_active_attendance_per_session_date() {
    let storage = memory_storage().await;
    let teacher = create_user(&storage, "prof4@eduroots.test", UserRole::Teacher).await;
    let student = create_user(&storage, "double@eduroots.test", UserRole::Student).await;
    let course = storage
        .create_course(
            "2025-2026".to_string(),
            vec![teacher.id],
            vec![morning_session()],
        )
        .await
        .unwrap();
    let session_id = course.sessions[0].id;
    storage
        .enroll_students(session_id, vec![student.id])
        .await
        .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
    let first = storage
        .create_attendance(session_id, date, teacher.id, vec![record(student.id, true, false)])
        .await
        .unwrap();
    let second = storage
        .create_attendance(session_id, date, teacher.id, vec![record(student.id, false, false)])
        .await;
    assert!(second.is_err_and(|e| e.is_duplicate()));

    // 软删除后同一天可以重新登记
    assert!(storage.soft_delete_attendance(first.id).await.unwrap());
    storage
        .create_attendance(session_id, date, teacher.id, vec![record(student.id, false, true)])
        .await
        .unwrap();

    let rating = || BehaviorRecordInput {
        student_id: student.id,
        rating: 3,
        comment: None,
    };
    storage
        .create_behavior(session_id, date, teacher.id, 3.0, vec![rating()])
        .await
        .unwrap();
    let again = storage
        .create_behavior(session_id, date, teacher.id, 3.0, vec![rating()])
        .await;
    assert!(again.is_err_and(|e| e.is_duplicate()));
}

//! 路由层的鉴权与分发

use std::sync::Arc;

use actix_web::{App, test, web};
use chrono::NaiveDate;
use serde_json::{Value, json};

use eduroots::cache::ObjectCache;
use eduroots::cache::object_cache::moka::MokaCacheWrapper;
use eduroots::models::courses::entities::{Subject, TimeSlot};
use eduroots::models::courses::requests::SessionInput;
use eduroots::models::users::entities::{User, UserRole};
use eduroots::models::users::requests::CreateUserRequest;
use eduroots::routes;
use eduroots::storage::Storage;
use eduroots::storage::sea_orm_storage::SeaOrmStorage;
use eduroots::utils::jwt::JwtUtils;

/// 一门课、一个课节、一名已选课学生和一名未选课学生
struct School {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    admin: User,
    teacher: User,
    other_teacher: User,
    alice: User,
    outsider: User,
    course_id: i64,
    session_id: i64,
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

async fn school() -> School {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect sqlite memory");
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::from_connection(db)
            .await
            .expect("run migrations"),
    );
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1000, 60));

    let admin = create_user(&storage, "admin@eduroots.test", UserRole::Admin).await;
    let teacher = create_user(&storage, "prof@eduroots.test", UserRole::Teacher).await;
    let other_teacher = create_user(&storage, "autre@eduroots.test", UserRole::Teacher).await;
    let alice = create_user(&storage, "alice@eduroots.test", UserRole::Student).await;
    let outsider = create_user(&storage, "dehors@eduroots.test", UserRole::Student).await;

    let course = storage
        .create_course(
            "2025-2026".to_string(),
            vec![teacher.id],
            vec![SessionInput {
                subject: Subject::Arabic,
                level: "N1".to_string(),
                time_slot: TimeSlot::SaturdayMorning,
                start_time: "09:00".to_string(),
                end_time: "10:30".to_string(),
                classroom_number: Some("A1".to_string()),
            }],
        )
        .await
        .unwrap();
    let session_id = course.sessions[0].id;
    storage
        .enroll_students(session_id, vec![alice.id])
        .await
        .unwrap();

    School {
        storage,
        cache,
        admin,
        teacher,
        other_teacher,
        alice,
        outsider,
        course_id: course.id,
        session_id,
    }
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! init_app {
    ($school:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($school.storage.clone()))
                .app_data(web::Data::new($school.cache.clone()))
                .configure(routes::configure_all),
        )
        .await
    };
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = test::init_service(App::new().configure(routes::configure_all)).await;

    for (method, uri) in [
        ("GET", "/api/v1/students"),
        ("GET", "/api/v1/teachers/1"),
        ("GET", "/api/v1/courses"),
        ("GET", "/api/v1/sessions/1"),
        ("GET", "/api/v1/sessions/1/attendances"),
        ("POST", "/api/v1/sessions/1/behaviors"),
        ("PUT", "/api/v1/grades/1"),
        ("GET", "/api/v1/stats/dashboard"),
        ("GET", "/api/v1/holidays/upcoming"),
        ("GET", "/api/v1/messages/unread-count"),
        ("GET", "/api/v1/auth/me"),
        ("GET", "/api/users/teacher"),
    ] {
        let req = test::TestRequest::default()
            .method(method.parse().unwrap())
            .uri(uri)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{method} {uri}");
    }
}

#[actix_web::test]
async fn test_websocket_without_token_is_rejected() {
    let app = test::init_service(App::new().configure(routes::configure_all)).await;
    let req = test::TestRequest::get().uri("/api/v1/ws").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Jeton manquant");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let app = test::init_service(App::new().configure(routes::configure_all)).await;
    let req = test::TestRequest::get().uri("/api/v1/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_second_attendance_on_same_date_conflicts() {
    let school = school().await;
    let app = init_app!(school);
    let uri = format!("/api/v1/sessions/{}/attendances", school.session_id);
    let payload = json!({
        "date": "2025-10-04",
        "records": [{"student_id": school.alice.id, "is_present": true}],
    });

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&school.teacher))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_students"], 1);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&school.teacher))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 5001);
}

#[actix_web::test]
async fn test_attendance_rejects_holiday_and_unenrolled_student() {
    let school = school().await;
    school
        .storage
        .create_holiday(
            "Vacances de Noël".to_string(),
            NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
        )
        .await
        .unwrap();
    let app = init_app!(school);
    let uri = format!("/api/v1/sessions/{}/attendances", school.session_id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "date": "2025-12-27",
            "records": [{"student_id": school.alice.id, "is_present": true}],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 5005);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "date": "2025-10-11",
            "records": [
                {"student_id": school.alice.id, "is_present": true},
                {"student_id": school.outsider.id, "is_present": false},
            ],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4003);
}

#[actix_web::test]
async fn test_invalid_behavior_payload_answers_bare_message() {
    let school = school().await;
    let app = init_app!(school);
    let uri = format!("/api/v1/sessions/{}/behaviors", school.session_id);
    let alice = school.alice.id;

    for payload in [
        // 评分越界
        json!({"date": "2025-10-04", "records": [{"student_id": alice, "rating": 9}]}),
        // 字段类型错误
        json!({"date": 20251004, "records": []}),
        // 学生重复
        json!({
            "date": "2025-10-04",
            "records": [
                {"student_id": alice, "rating": 4},
                {"student_id": alice, "rating": 5},
            ],
        }),
        json!({"date": "04/10/2025", "records": [{"student_id": alice, "rating": 4}]}),
    ] {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&school.teacher))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{payload}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false, "{payload}");
        assert_eq!(body["message"], "Données invalides", "{payload}");
    }
}

#[actix_web::test]
async fn test_teacher_of_another_course_is_forbidden() {
    let school = school().await;
    let app = init_app!(school);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}/attendances", school.session_id))
        .insert_header(bearer(&school.other_teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4002);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}/attendances", school.session_id))
        .insert_header(bearer(&school.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_deleted_course_sessions_refuse_writes() {
    let school = school().await;
    assert!(school.storage.soft_delete_course(school.course_id).await.unwrap());
    let app = init_app!(school);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/grades", school.session_id))
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "date": "2025-10-04",
            "grade_type": "examen",
            "records": [{"student_id": school.alice.id, "value": 15.0}],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4001);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/students", school.session_id))
        .insert_header(bearer(&school.admin))
        .set_json(json!({"student_ids": [school.outsider.id]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // 历史数据仍可读
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}", school.session_id))
        .insert_header(bearer(&school.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_legacy_student_list_follows_teacher_scope() {
    let school = school().await;
    let app = init_app!(school);

    let req = test::TestRequest::get()
        .uri("/api/users/student")
        .insert_header(bearer(&school.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 200);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![school.alice.id]);

    let req = test::TestRequest::get()
        .uri("/api/users/student")
        .insert_header(bearer(&school.admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

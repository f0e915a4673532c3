//! Loading and submitting the student form against a mock backend.

mod common;

use common::{backend, failure, gateway_for, ok, student};
use jiff::civil::{Date, date};
use registrar::{
    controllers::form::{
        ADDED_MESSAGE, FormController, FormLoad, FormMode, INVALID_FORM_MESSAGE,
        LOAD_FAILED_MESSAGE, Submission, UPDATED_MESSAGE,
        fields::{Field, Mark, StudentFormInput},
    },
    data::student::{StudentId, StudentStatus},
    reply::{ToastKind, Toasts},
};
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TODAY: Date = date(2024, 6, 15);

fn filled() -> StudentFormInput {
    StudentFormInput {
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: "john.doe@example.com".into(),
        phone: "987-654-3210".into(),
        date_of_birth: "2002-05-15".into(),
        gender: "Male".into(),
        address: "123 Main St, New York, NY".into(),
        course: "Computer Science".into(),
        year: "2".into(),
        status: "Inactive".into(),
    }
}

async fn silent_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

mod loading {
    use super::*;

    #[tokio::test]
    async fn no_id_means_create() {
        let server = silent_backend().await;
        let controller = FormController::new(gateway_for(&server));
        let mut toasts = Toasts::default();

        assert_eq!(controller.load(None, &mut toasts).await, FormLoad::Create);
        assert_eq!(controller.load(Some(""), &mut toasts).await, FormLoad::Create);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn edit_prefills_from_the_backend() {
        let (server, gateway) = backend().await;
        Mock::given(method("GET"))
            .and(path("/api/students/7"))
            .respond_with(ok(student(7, "Sarah", "Inactive")))
            .expect(1)
            .mount(&server)
            .await;

        let controller = FormController::new(gateway);
        let mut toasts = Toasts::default();

        match controller.load(Some("7"), &mut toasts).await {
            FormLoad::Edit { id, input } => {
                assert_eq!(id, StudentId::parse("7").unwrap());
                assert_eq!(input.first_name, "Sarah");
                assert_eq!(input.date_of_birth, "2002-05-15");
                assert_eq!(input.year, "2");
                assert_eq!(input.status, "Inactive");
            }
            other => panic!("expected edit mode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_fetch_is_reported() {
        let (server, gateway) = backend().await;
        Mock::given(method("GET"))
            .and(path("/api/students/7"))
            .respond_with(failure(404, "Student not found with ID: 7"))
            .mount(&server)
            .await;

        let controller = FormController::new(gateway);
        let mut toasts = Toasts::default();

        assert_eq!(controller.load(Some("7"), &mut toasts).await, FormLoad::Failed);
        assert!(toasts.has(ToastKind::Error, "Student not found with ID: 7"));
        assert!(toasts.has(ToastKind::Error, LOAD_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn unparseable_id_never_hits_the_network() {
        let server = silent_backend().await;
        let controller = FormController::new(gateway_for(&server));
        let mut toasts = Toasts::default();

        assert_eq!(controller.load(Some("abc"), &mut toasts).await, FormLoad::Failed);
        assert!(toasts.has(ToastKind::Error, LOAD_FAILED_MESSAGE));
    }
}

mod submitting {
    use super::*;

    #[tokio::test]
    async fn missing_field_stops_before_the_network() {
        let server = silent_backend().await;
        let controller = FormController::new(gateway_for(&server));
        let mut toasts = Toasts::default();
        let input = StudentFormInput {
            address: String::new(),
            ..filled()
        };

        match controller
            .submit(FormMode::Create, &input, TODAY, &mut toasts)
            .await
        {
            Submission::Invalid(review) => {
                assert_eq!(review.feedback(Field::Address).mark, Mark::Invalid);
                assert_eq!(review.feedback(Field::Email).mark, Mark::Valid);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(toasts.has(ToastKind::Error, INVALID_FORM_MESSAGE));
    }

    #[tokio::test]
    async fn future_birthday_is_invalid() {
        let server = silent_backend().await;
        let controller = FormController::new(gateway_for(&server));
        let mut toasts = Toasts::default();
        let input = StudentFormInput {
            date_of_birth: "2024-06-16".into(),
            ..filled()
        };

        assert!(matches!(
            controller.submit(FormMode::Create, &input, TODAY, &mut toasts).await,
            Submission::Invalid(_)
        ));
    }

    #[tokio::test]
    async fn create_always_sends_active() {
        let (server, gateway) = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .and(body_partial_json(json!({
                "firstName": "John",
                "phone": "9876543210",
                "dateOfBirth": "2002-05-15",
                "year": 2,
                "status": "Active"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "message": "Student created successfully",
                "data": student(11, "John", "Active")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let controller = FormController::new(gateway);
        let mut toasts = Toasts::default();

        let outcome = controller
            .submit(FormMode::Create, &filled(), TODAY, &mut toasts)
            .await;

        assert!(matches!(outcome, Submission::Saved(s) if s.status == StudentStatus::Active));
        assert!(toasts.has(ToastKind::Success, ADDED_MESSAGE));
    }

    #[tokio::test]
    async fn edit_puts_the_chosen_status() {
        let (server, gateway) = backend().await;
        Mock::given(method("PUT"))
            .and(path("/api/students/7"))
            .and(body_partial_json(json!({"status": "Inactive"})))
            .respond_with(ok(student(7, "John", "Inactive")))
            .expect(1)
            .mount(&server)
            .await;

        let controller = FormController::new(gateway);
        let mut toasts = Toasts::default();
        let mode = FormMode::Edit(StudentId::parse("7").unwrap());

        assert!(matches!(
            controller.submit(mode, &filled(), TODAY, &mut toasts).await,
            Submission::Saved(_)
        ));
        assert!(toasts.has(ToastKind::Success, UPDATED_MESSAGE));
    }

    #[tokio::test]
    async fn backend_rejection_keeps_the_form() {
        let (server, gateway) = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .respond_with(failure(409, "Student with email john.doe@example.com already exists"))
            .expect(1)
            .mount(&server)
            .await;

        let controller = FormController::new(gateway);
        let mut toasts = Toasts::default();

        assert_eq!(
            controller
                .submit(FormMode::Create, &filled(), TODAY, &mut toasts)
                .await,
            Submission::Failed
        );
        assert!(toasts.has(
            ToastKind::Error,
            "Student with email john.doe@example.com already exists"
        ));
        assert!(!toasts.has(ToastKind::Success, ADDED_MESSAGE));
    }
}

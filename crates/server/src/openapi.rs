use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct NameRequest { pub name: Option<String> }

/// `Present`, `Absent`, or any other text, stored verbatim.
#[derive(ToSchema)]
pub struct StatusRequest { pub status: Option<String> }

#[derive(ToSchema)]
pub struct StudentDoc { pub id: u64, pub name: String, pub status: String }

#[derive(ToSchema)]
pub struct SubjectDoc { pub id: u64, pub name: String, pub students: Vec<StudentDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::subjects::list_subjects,
        crate::routes::subjects::get_subject,
        crate::routes::subjects::create_subject,
        crate::routes::subjects::delete_subject,
        crate::routes::subjects::create_student,
        crate::routes::subjects::delete_student,
        crate::routes::subjects::set_attendance,
    ),
    components(
        schemas(
            HealthResponse,
            NameRequest,
            StatusRequest,
            StudentDoc,
            SubjectDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "subjects"),
        (name = "students")
    )
)]
pub struct ApiDoc;

use super::api;
use super::exams;

use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        exams::create_exam,
        exams::list_exams,
        exams::get_exam,
        exams::update_exam,
        exams::delete_exam,
        exams::random_questions,
        exams::export_pdf,
    ),
    tags(
        (name = "exams", description = "Exams and random question draws"),
        (name = "util", description = "Health of the service"),
    )
)]
pub(crate) struct ApiDoc;

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // RapiDoc loads the document it renders from the url below
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

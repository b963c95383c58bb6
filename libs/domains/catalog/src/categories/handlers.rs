use super::models::{Category, CreateCategory, UpdateCategory};
use super::repository::CategoryRepository;
use super::service::CategoryService;
use crate::pagination::{Page, Pagination};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::audit::{extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use axum_helpers::{AppError, UuidPath, ValidatedJson};
use utoipa::OpenApi;
use uuid::Uuid;

const TAG: &str = "Categories";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category
    ),
    components(
        schemas(Category, CreateCategory, UpdateCategory, Page<Category>),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product category management"))
)]
pub struct ApiDoc;

/// Category routes, nested by the app under `/api/categories`.
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories::<R>).post(create_category::<R>))
        .route(
            "/{id}",
            get(get_category::<R>)
                .put(update_category::<R>)
                .delete(delete_category::<R>),
        )
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Page of categories", body = Page<Category>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<CategoryService<R>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<Category>>, AppError> {
    let page = service.list_categories(page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<CategoryService<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<impl IntoResponse, AppError> {
    let category = service.create_category(input).await?;

    AuditEvent::new(
        "category.create",
        Some(format!("category:{}", category.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<CategoryService<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<Category>, AppError> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<CategoryService<R>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, AppError> {
    let category = service.update_category(id, input).await?;

    AuditEvent::new(
        "category.update",
        Some(format!("category:{}", category.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<CategoryService<R>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service.delete_category(id).await?;

    AuditEvent::new(
        "category.delete",
        Some(format!("category:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

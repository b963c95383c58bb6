use super::models::{CreateProduct, ProductDto, UpdateProduct};
use super::repository::ProductRepository;
use super::service::ProductService;
use crate::categories::models::Category;
use crate::categories::repository::CategoryRepository;
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
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;
use validator::Validate;

const TAG: &str = "Products";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        search_products,
        discounted_products,
        new_products,
        products_by_category
    ),
    components(
        schemas(
            ProductDto,
            CreateProduct,
            CreateProductRequest,
            UpdateProduct,
            Category,
            Page<ProductDto>
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalog"))
)]
pub struct ApiDoc;

/// Payload for product creation; the category is referenced by id and must
/// exist.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Uuid,
    #[serde(flatten)]
    #[validate(nested)]
    pub product: CreateProduct,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Keyword matched case-insensitively against product names.
    pub q: String,
}

/// Product routes, nested by the app under `/api/products`.
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(list_products::<P, C>).post(create_product::<P, C>))
        .route(
            "/{id}",
            get(get_product::<P, C>)
                .put(update_product::<P, C>)
                .delete(delete_product::<P, C>),
        )
        .route("/search", get(search_products::<P, C>))
        .route("/discounted", get(discounted_products::<P, C>))
        .route("/new", get(new_products::<P, C>))
        .route("/by-category/{id}", get(products_by_category::<P, C>))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Page of products", body = Page<ProductDto>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<ProductDto>>, AppError> {
    let page = service.list_products(page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let product = service
        .create_product(request.product, request.category_id)
        .await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    UuidPath(id): UuidPath,
) -> Result<Json<ProductDto>, AppError> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<ProductDto>, AppError> {
    let product = service.update_product(id, input).await?;

    AuditEvent::new(
        "product.update",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    service.delete_product(id).await?;

    AuditEvent::new(
        "product.delete",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery, Pagination),
    responses(
        (status = 200, description = "Matching products", body = Page<ProductDto>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn search_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    Query(search): Query<SearchQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<ProductDto>>, AppError> {
    let page = service.search_products(&search.q, page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/discounted",
    tag = TAG,
    responses(
        (status = 200, description = "All discounted products", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn discounted_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
) -> Result<Json<Vec<ProductDto>>, AppError> {
    let products = service.discounted_products().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/new",
    tag = TAG,
    responses(
        (status = 200, description = "All products flagged as new", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn new_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
) -> Result<Json<Vec<ProductDto>>, AppError> {
    let products = service.new_products().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/by-category/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category id"), Pagination),
    responses(
        (status = 200, description = "Products in the category", body = Page<ProductDto>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn products_by_category<P: ProductRepository, C: CategoryRepository>(
    State(service): State<ProductService<P, C>>,
    UuidPath(id): UuidPath,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<ProductDto>>, AppError> {
    let page = service.products_by_category(id, page).await?;
    Ok(Json(page))
}

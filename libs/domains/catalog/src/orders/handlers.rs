use super::models::{CreateOrder, CreateOrderItem, OrderDto, OrderItemDto};
use super::repository::OrderRepository;
use super::service::OrderService;
use crate::pagination::{Page, Pagination};
use crate::products::repository::ProductRepository;
use crate::reviews::models::{CreateReview, ReviewDto};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_helpers::audit::{extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{AppError, UuidPath, ValidatedJson};
use utoipa::OpenApi;
use uuid::Uuid;

const TAG: &str = "Orders";

#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, review_order_item),
    components(
        schemas(
            OrderDto,
            OrderItemDto,
            CreateOrder,
            CreateOrderItem,
            CreateReview,
            ReviewDto,
            Page<OrderDto>
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Orders and item reviews"))
)]
pub struct ApiDoc;

/// Order routes, nested by the app under `/api/orders`.
pub fn router<O, P>(service: OrderService<O, P>) -> Router
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(list_orders::<O, P>).post(create_order::<O, P>))
        .route("/{id}", get(get_order::<O, P>))
        .route("/items/{id}/review", post(review_order_item::<O, P>))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Page of orders", body = Page<OrderDto>),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn list_orders<O: OrderRepository, P: ProductRepository>(
    State(service): State<OrderService<O, P>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Page<OrderDto>>, AppError> {
    let page = service.list_orders(page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn create_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<OrderService<O, P>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> Result<impl IntoResponse, AppError> {
    let order = service.create_order(input).await?;

    AuditEvent::new(
        "order.create",
        Some(format!("order:{}", order.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn get_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<OrderService<O, P>>,
    UuidPath(id): UuidPath,
) -> Result<Json<OrderDto>, AppError> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/items/{id}/review",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Order item id")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse),
    )
)]
async fn review_order_item<O: OrderRepository, P: ProductRepository>(
    State(service): State<OrderService<O, P>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> Result<impl IntoResponse, AppError> {
    let review = service.add_review(id, input).await?;

    AuditEvent::new(
        "review.create",
        Some(format!("order_item:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(review)))
}

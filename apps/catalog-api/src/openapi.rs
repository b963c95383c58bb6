use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "E-commerce catalog backend: products, categories, orders and reviews"
    ),
    nest(
        (path = "/api/products", api = domain_catalog::products::handlers::ApiDoc),
        (path = "/api/categories", api = domain_catalog::categories::handlers::ApiDoc),
        (path = "/api/orders", api = domain_catalog::orders::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

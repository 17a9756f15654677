//! HTTP handlers for the Products API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    admin_auth_middleware,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, AuthUser, JwtAuth, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CategoryInfo, CreateReview, FilterRequest, MessageResponse, Product, ProductInput, ProductPage,
    ProductWithCategory, Review, SearchQuery,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        fetch_products,
        add_product,
        fetch_all_products,
        top_products,
        new_products,
        filter_products,
        fetch_product,
        update_product,
        remove_product,
        add_review,
    ),
    components(
        schemas(
            Product, ProductInput, ProductPage, ProductWithCategory, CategoryInfo,
            Review, CreateReview, FilterRequest, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Catalog and review endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
///
/// Reads are public, reviews require authentication, mutations require the
/// admin role.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    jwt_auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let admin_routes = Router::new()
        .route("/", post(add_product))
        .route("/{id}", axum::routing::put(update_product).delete(remove_product))
        .layer(middleware::from_fn_with_state(
            jwt_auth.clone(),
            admin_auth_middleware,
        ))
        .with_state(Arc::clone(&shared_service));

    let review_routes = Router::new()
        .route("/{id}/reviews", post(add_review))
        .layer(middleware::from_fn_with_state(jwt_auth, jwt_auth_middleware))
        .with_state(Arc::clone(&shared_service));

    let public_routes = Router::new()
        .route("/", get(fetch_products))
        .route("/all", get(fetch_all_products))
        .route("/top", get(top_products))
        .route("/new", get(new_products))
        .route("/filter", post(filter_products))
        .route("/{id}", get(fetch_product))
        .with_state(shared_service);

    admin_routes.merge(review_routes).merge(public_routes)
}

/// Paged keyword listing
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fetch_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.fetch_products(query.keyword).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.add_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Storefront landing listing with categories expanded
#[utoipa::path(
    get,
    path = "/all",
    tag = "Products",
    responses(
        (status = 200, description = "Newest products with category detail", body = Vec<ProductWithCategory>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fetch_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductWithCategory>>> {
    let products = service.fetch_all_products().await?;
    Ok(Json(products))
}

/// Highest rated products
#[utoipa::path(
    get,
    path = "/top",
    tag = "Products",
    responses(
        (status = 200, description = "Top rated products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn top_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.top_products().await?;
    Ok(Json(products))
}

/// Most recently added products
#[utoipa::path(
    get,
    path = "/new",
    tag = "Products",
    responses(
        (status = 200, description = "Newest products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn new_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.new_products().await?;
    Ok(Json(products))
}

/// Filtered listing by categories and price range
#[utoipa::path(
    post,
    path = "/filter",
    tag = "Products",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Products matching the filter", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(request): Json<FilterRequest>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.filter_products(request).await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fetch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.fetch_product(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// Always responds 200 with the success message, whether or not the id
/// matched anything.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    service.remove_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Post a review on a product
#[utoipa::path(
    post,
    path = "/{id}/reviews",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review saved successfully", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> ProductResult<impl IntoResponse> {
    service.add_review(id, user.id, &user.name, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Review saved successfully")),
    ))
}

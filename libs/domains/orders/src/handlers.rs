//! HTTP handlers for the Orders API

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    admin_auth_middleware,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, AuthUser, JwtAuth, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{Order, OrderItem, PlaceOrder, ShippingAddress};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        place_order,
        list_orders,
        my_orders,
        get_order,
        mark_paid,
        mark_delivered,
    ),
    components(
        schemas(Order, OrderItem, ShippingAddress, PlaceOrder),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order placement and fulfilment endpoints")
    )
)]
pub struct ApiDoc;

/// Create the orders router
///
/// Every route requires authentication; listing and fulfilment updates
/// additionally require the admin role.
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>, jwt_auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let user_routes = Router::new()
        .route("/", post(place_order))
        .route("/mine", get(my_orders))
        .route("/{id}", get(get_order))
        .layer(middleware::from_fn_with_state(
            jwt_auth.clone(),
            jwt_auth_middleware,
        ))
        .with_state(Arc::clone(&shared_service));

    let admin_routes = Router::new()
        .route("/", get(list_orders))
        .route("/{id}/pay", put(mark_paid))
        .route("/{id}/deliver", put(mark_delivered))
        .layer(middleware::from_fn_with_state(jwt_auth, admin_auth_middleware))
        .with_state(shared_service);

    user_routes.merge(admin_routes)
}

/// Place a new order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = PlaceOrder,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn place_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<PlaceOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.place_order(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders, newest first", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> OrderResult<Json<Vec<Order>>> {
    let orders = service.list_orders().await?;
    Ok(Json(orders))
}

/// The caller's orders
#[utoipa::path(
    get,
    path = "/mine",
    tag = "Orders",
    responses(
        (status = 200, description = "The caller's orders, newest first", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn my_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: AuthUser,
) -> OrderResult<Json<Vec<Order>>> {
    let orders = service.my_orders(user.id).await?;
    Ok(Json(orders))
}

/// Get an order by ID (owner or admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<Order>> {
    let order = service.get_order(id, user.id, user.is_admin()).await?;
    Ok(Json(order))
}

/// Record payment on an order
#[utoipa::path(
    put,
    path = "/{id}/pay",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order marked as paid", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn mark_paid<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<Order>> {
    let order = service.mark_paid(id).await?;
    Ok(Json(order))
}

/// Record delivery on an order
#[utoipa::path(
    put,
    path = "/{id}/deliver",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order marked as delivered", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn mark_delivered<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<Order>> {
    let order = service.mark_delivered(id).await?;
    Ok(Json(order))
}

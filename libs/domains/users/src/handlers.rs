//! HTTP handlers for the Users API: profile and admin management.

use axum::{
    extract::State,
    middleware,
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
use utoipa::OpenApi;

use crate::auth_handlers::{self, AuthState};
use crate::error::UserResult;
use crate::models::{
    AdminUpdateUser, LoginRequest, MessageResponse, RegisterRequest, UpdateProfile, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::logout,
        get_profile,
        update_profile,
        list_users,
        get_user,
        update_user,
        delete_user,
    ),
    components(
        schemas(
            UserResponse, RegisterRequest, LoginRequest, UpdateProfile,
            AdminUpdateUser, MessageResponse
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
        (name = "Users", description = "Account, authentication and user administration endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router
///
/// Registration, login and logout are public; profile routes require
/// authentication; management routes require the admin role.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt_auth: JwtAuth) -> Router {
    let state = AuthState {
        service,
        jwt_auth: jwt_auth.clone(),
    };

    let public_routes = Router::new()
        .route("/", post(auth_handlers::register))
        .route("/auth", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .with_state(state.clone());

    let profile_routes = Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .layer(middleware::from_fn_with_state(
            jwt_auth.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/", get(list_users))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(middleware::from_fn_with_state(jwt_auth, admin_auth_middleware))
        .with_state(state);

    public_routes.merge(profile_routes).merge(admin_routes)
}

/// Get one's own profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Users",
    responses(
        (status = 200, description = "The caller's profile", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_profile<R: UserRepository>(
    State(state): State<AuthState<R>>,
    user: AuthUser,
) -> UserResult<Json<UserResponse>> {
    let profile = state.service.get_profile(user.id).await?;
    Ok(Json(profile))
}

/// Update one's own profile
#[utoipa::path(
    put,
    path = "/profile",
    tag = "Users",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_profile<R: UserRepository>(
    State(state): State<AuthState<R>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateProfile>,
) -> UserResult<Json<UserResponse>> {
    let profile = state.service.update_profile(user.id, input).await?;
    Ok(Json(profile))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All accounts", body = Vec<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(state): State<AuthState<R>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

/// Get any account by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(state): State<AuthState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.get_user(id).await?;
    Ok(Json(user))
}

/// Update any account
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = AdminUpdateUser,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(state): State<AuthState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<AdminUpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(state): State<AuthState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<MessageResponse>> {
    state.service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User removed")))
}

//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "MongoDB-based REST API for the storefront: catalog, accounts and orders",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/orders", api = domain_orders::ApiDoc)
    ),
    tags(
        (name = "Categories", description = "Catalog category management"),
        (name = "Products", description = "Catalog products and customer reviews"),
        (name = "Users", description = "Accounts, authentication and user administration"),
        (name = "Orders", description = "Order placement and fulfilment")
    )
)]
pub struct ApiDoc;

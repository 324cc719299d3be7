pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod requests;
pub mod responses;
pub mod routes;

pub use errors::ApiError;
pub use handlers::*;
pub use openapi::*;
pub use requests::*;
pub use responses::*;
pub use routes::create_router;

pub mod handlers;
pub mod mode;
pub mod response;
mod routes;

pub use mode::{CatalogTarget, RequestMode};
pub use response::AppError;
pub use routes::create_router;

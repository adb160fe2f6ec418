pub mod health;
pub mod podcast;
pub mod routes;

pub use routes::routes;

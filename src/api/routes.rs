use super::podcast;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/api").service(podcast::routes())
}

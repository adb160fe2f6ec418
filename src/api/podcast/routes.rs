use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/podcast").service(handlers::podcast_feed)
}

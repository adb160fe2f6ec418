use actix_web::{get, http::header, web, HttpResponse};

use super::types::FeedQuery;
use crate::{
    errors::{AppError, AppResult},
    feed::build_feed,
    RqState,
};

/// Render the RSS feed for `?slug=`, guarded by `?secret=`.
#[get("")]
pub async fn podcast_feed(
    state: RqState,
    pairs: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let query = FeedQuery::from_pairs(pairs.into_inner());

    // Nothing reaches PodMe before the secret checks out
    state.guard.check(query.secret.as_deref())?;

    let slug = query
        .slug()
        .ok_or_else(|| AppError::invalid_input("slug", "must not be empty"))?;

    let xml = build_feed(&state.client, slug, &state.config.channel).await?;

    let mut response = HttpResponse::Ok();
    response.content_type("text/xml");
    if let Some(cache_control) = state.config.cache_control() {
        response.insert_header((header::CACHE_CONTROL, cache_control));
    }
    Ok(response.body(xml))
}

use actix_web::{get, http::header::ContentType, web, HttpResponse};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/stats")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    let payload = state.stats.stats().await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(payload))
}

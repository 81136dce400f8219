//! HTTP handlers and route configuration.

mod authors;
mod comments;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::edit_post))
                        .route(web::patch().to(posts::publish_post))
                        .route(web::delete().to(posts::delete_post)),
                )
                .service(
                    web::resource("/{id}/comments")
                        .route(web::get().to(comments::list_post_comments))
                        .route(web::post().to(comments::create_post_comment)),
                ),
        )
        .service(
            web::scope("/comments")
                .service(
                    web::resource("")
                        .route(web::get().to(comments::list_comments))
                        .route(web::post().to(comments::create_comment)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(comments::get_comment))
                        .route(web::put().to(comments::edit_comment))
                        .route(web::delete().to(comments::delete_comment)),
                ),
        )
        .service(
            web::scope("/authors")
                .service(
                    web::resource("")
                        .route(web::get().to(authors::list_authors))
                        .route(web::post().to(authors::create_author)),
                )
                .service(web::resource("/{id}").route(web::get().to(authors::get_author))),
        );
}

/// Malformed JSON bodies get the same `{ message }` shape as every other error.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidQuery(err.to_string()).into()
}

/// The only path parameter is an entity id.
fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected path parameter: {}", err);
    AppError::InvalidId.into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidQuery(err.to_string()).into()
}

/// Parse an identifier given in the query string.
pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId)
}

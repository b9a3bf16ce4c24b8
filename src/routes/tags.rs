use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::{
    error::AppResult,
    models::tag::{TagDeleteForm, TagListQuery, TagPostForm, TagPutForm},
    services::tag::TagService,
    utils::location::{self, ResourcePath},
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(post_tag))
            .route(web::get().to(get_tags)),
    )
    .service(
        web::resource("/{tag_id}")
            .route(web::get().to(get_tag_by_id))
            .route(web::put().to(put_tag))
            .route(web::delete().to(delete_tag)),
    );
}

/// POST / - Create a tag, 201 with a Location header for the new resource
async fn post_tag(
    state: web::Data<AppState>,
    form: web::Json<TagPostForm>,
) -> AppResult<HttpResponse> {
    form.validate()?;

    let service = TagService::new(&state.db);
    let tag_id = service.create(&form.name).await?;

    let location = location::created(&state.config.public_url, ResourcePath::Tag, tag_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// GET /{tag_id} - Fetch one tag
async fn get_tag_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();

    let service = TagService::new(&state.db);
    let tag = service.get_by_id(tag_id).await?;

    Ok(HttpResponse::Ok().json(tag))
}

/// GET / - List tags, optionally filtered by name
async fn get_tags(
    state: web::Data<AppState>,
    query: web::Query<TagListQuery>,
) -> AppResult<HttpResponse> {
    let service = TagService::new(&state.db);
    let tags = service.list(&query).await?;

    Ok(HttpResponse::Ok().json(tags))
}

/// PUT /{tag_id} - Update under optimistic lock, 204 on success
async fn put_tag(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<TagPutForm>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();
    form.validate()?;

    let service = TagService::new(&state.db);
    service.update(tag_id, &form.name, form.version).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /{tag_id} - Delete under optimistic lock, 204 on success
async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<TagDeleteForm>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();

    let service = TagService::new(&state.db);
    service.delete(tag_id, form.version).await?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::todo::{TodoDeleteForm, TodoListQuery, TodoPostForm, TodoPutForm},
    services::todo::TodoService,
    utils::location::{self, ResourcePath},
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(post_todo))
            .route(web::get().to(get_todos)),
    )
    .service(
        web::resource("/{todo_id}")
            .route(web::get().to(get_todo_by_id))
            .route(web::put().to(put_todo))
            .route(web::delete().to(delete_todo)),
    );
}

/// The tag-reference cap is configuration, so it is checked here at the
/// boundary rather than by the derive on the form.
fn check_tag_count(tags: &[i64], max: usize) -> AppResult<()> {
    if tags.len() > max {
        return Err(AppError::Validation(format!(
            "tags: at most {max} entries allowed"
        )));
    }
    Ok(())
}

/// POST / - Create a todo, 201 with a Location header for the new resource
async fn post_todo(
    state: web::Data<AppState>,
    form: web::Json<TodoPostForm>,
) -> AppResult<HttpResponse> {
    form.validate()?;
    check_tag_count(&form.tags, state.config.max_todo_tags)?;

    let service = TodoService::new(&state.db);
    let todo_id = service
        .create(&form.title, &form.content, &form.tags)
        .await?;

    let location = location::created(&state.config.public_url, ResourcePath::Todo, todo_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// GET /{todo_id} - Fetch one todo with its tags
async fn get_todo_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let todo_id = path.into_inner();

    let service = TodoService::new(&state.db);
    let todo = service.get_by_id(todo_id).await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// GET / - List todos, optionally filtered by title substring and limited
async fn get_todos(
    state: web::Data<AppState>,
    query: web::Query<TodoListQuery>,
) -> AppResult<HttpResponse> {
    query.validate()?;

    let service = TodoService::new(&state.db);
    let todos = service.list(&query).await?;

    Ok(HttpResponse::Ok().json(todos))
}

/// PUT /{todo_id} - Update under optimistic lock, 204 on success
async fn put_todo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<TodoPutForm>,
) -> AppResult<HttpResponse> {
    let todo_id = path.into_inner();
    form.validate()?;
    check_tag_count(&form.tags, state.config.max_todo_tags)?;

    let service = TodoService::new(&state.db);
    service
        .update(todo_id, &form.title, &form.content, &form.tags, form.version)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /{todo_id} - Delete under optimistic lock, 204 on success
async fn delete_todo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<TodoDeleteForm>,
) -> AppResult<HttpResponse> {
    let todo_id = path.into_inner();

    let service = TodoService::new(&state.db);
    service.delete(todo_id, form.version).await?;

    Ok(HttpResponse::NoContent().finish())
}

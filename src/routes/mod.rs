pub mod tags;
pub mod todos;

use actix_web::web;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/tags").configure(tags::create_routes))
        .service(web::scope("/todos").configure(todos::create_routes));
}

use std::sync::Arc;

use actix_web::{middleware::from_fn, web};

use super::admin::admin_gate::{redirect_to_login, require_admin};
use super::admin::admin_handlers;
use super::comments::comments_handlers;
use super::common::{json_config, not_found, path_config, query_config};
use super::login::login_handlers;
use super::projects::projects_handlers;
use super::roles::roles_handlers;
use super::task_lists::task_lists_handlers;
use super::tasks::tasks_handlers;
use super::users::users_handlers;
use crate::store::Store;

/// Everything the app serves, backed by `store`.
pub fn app_configure(store: Arc<dyn Store>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(store))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .configure(pages_configure)
            .service(
                web::scope("/api")
                    .configure(login_configure)
                    .configure(admin_configure)
                    .configure(users_configure)
                    .configure(roles_configure)
                    .configure(projects_configure)
                    .configure(task_lists_configure)
                    .configure(tasks_configure)
                    .configure(comments_configure)
                    .default_service(web::to(not_found)),
            );
    }
}

pub fn pages_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(login_handlers::login_page))
        .service(
            web::scope("/admin")
                .wrap(from_fn(redirect_to_login))
                .route("/dashboard", web::get().to(admin_handlers::dashboard_page)),
        );
}

pub fn login_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login_handlers::login))
        .route("/logout", web::post().to(login_handlers::logout))
        .route("/auth/register", web::post().to(login_handlers::register));
}

pub fn admin_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(from_fn(require_admin))
            .route("/stats", web::get().to(admin_handlers::get_stats)),
    );
}

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(users_handlers::list_users))
                    .route(web::post().to(users_handlers::create_user)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(users_handlers::get_user))
                    .route(web::put().to(users_handlers::update_user))
                    .route(web::delete().to(users_handlers::delete_user)),
            ),
    );
}

pub fn roles_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(roles_handlers::list_roles))
                    .route(web::post().to(roles_handlers::create_role)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(roles_handlers::get_role))
                    .route(web::put().to(roles_handlers::update_role))
                    .route(web::delete().to(roles_handlers::delete_role)),
            ),
    );
}

pub fn projects_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(projects_handlers::list_projects))
                    .route(web::post().to(projects_handlers::create_project)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(projects_handlers::get_project))
                    .route(web::put().to(projects_handlers::update_project))
                    .route(web::delete().to(projects_handlers::delete_project)),
            ),
    );
}

pub fn task_lists_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasklists")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(task_lists_handlers::list_task_lists))
                    .route(web::post().to(task_lists_handlers::create_task_list)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(task_lists_handlers::get_task_list))
                    .route(web::put().to(task_lists_handlers::update_task_list))
                    .route(web::delete().to(task_lists_handlers::delete_task_list)),
            ),
    );
}

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(tasks_handlers::list_tasks))
                    .route(web::post().to(tasks_handlers::create_task)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(tasks_handlers::get_task))
                    .route(web::put().to(tasks_handlers::update_task))
                    .route(web::delete().to(tasks_handlers::delete_task)),
            ),
    );
}

pub fn comments_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taskcomments")
            .wrap(from_fn(require_admin))
            .service(
                web::resource("")
                    .route(web::get().to(comments_handlers::list_comments))
                    .route(web::post().to(comments_handlers::create_comment)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(comments_handlers::get_comment))
                    .route(web::put().to(comments_handlers::update_comment))
                    .route(web::delete().to(comments_handlers::delete_comment)),
            ),
    );
}

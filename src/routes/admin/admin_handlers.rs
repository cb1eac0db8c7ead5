use actix_web::{web, HttpResponse, Responder};
use log::info;

use super::admin_gate::AdminId;
use crate::error::AppResult;
use crate::store::Store;

// Placeholder page behind the page gate
pub async fn dashboard_page() -> impl Responder {
    HttpResponse::Ok().body("Hello, this is the Taskdesk admin dashboard.")
}

pub async fn get_stats(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
) -> AppResult<HttpResponse> {
    info!("Admin {} requested dashboard statistics", admin.into_inner());
    let stats = store.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

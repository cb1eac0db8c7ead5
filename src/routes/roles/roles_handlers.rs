use actix_web::{web, HttpResponse};
use log::info;

use super::roles_models::RoleRequest;
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_roles(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    let roles = store.list_roles().await?;
    Ok(HttpResponse::Ok().json(roles))
}

pub async fn get_role(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let role = store.get_role(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(role))
}

pub async fn create_role(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<RoleRequest>,
) -> AppResult<HttpResponse> {
    let role_name = req.into_inner().into_role_name()?;
    let role = store.create_role(role_name).await?;
    info!("Admin {} created role {} ({})", admin.into_inner(), role.role_id, role.role_name);
    Ok(HttpResponse::Created().json(role))
}

pub async fn update_role(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<RoleRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let role_name = req.into_inner().into_changes()?;
    let role = store.update_role(id, role_name).await?;
    info!("Admin {} updated role {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(role))
}

pub async fn delete_role(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_role(id).await?;
    info!("Admin {} deleted role {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Role deleted successfully")))
}

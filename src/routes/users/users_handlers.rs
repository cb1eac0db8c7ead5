use actix_web::{web, HttpResponse};
use log::info;

use super::users_models::UserRequest;
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_users(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    let users = store.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = store.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let new_user = req.into_inner().into_new_user().await?;
    let user = store.create_user(new_user).await?;
    info!("Admin {} created user {}", admin.into_inner(), user.user_id);
    Ok(HttpResponse::Created().json(user))
}

pub async fn update_user(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = req.into_inner().into_changes().await?;
    let user = store.update_user(id, changes).await?;
    info!("Admin {} updated user {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_user(id).await?;
    info!("Admin {} deleted user {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

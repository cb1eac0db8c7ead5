use actix_web::{web, HttpResponse};
use log::info;

use super::task_lists_models::{TaskListQuery, TaskListRequest};
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_task_lists(
    store: web::Data<dyn Store>,
    query: web::Query<TaskListQuery>,
) -> AppResult<HttpResponse> {
    let lists = store.list_task_lists(query.project_id).await?;
    Ok(HttpResponse::Ok().json(lists))
}

pub async fn get_task_list(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let list = store.get_task_list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

pub async fn create_task_list(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<TaskListRequest>,
) -> AppResult<HttpResponse> {
    let new_list = req.into_inner().into_new_list()?;
    let list = store.create_task_list(new_list).await?;
    info!(
        "Admin {} created task list {} in project {}",
        admin.into_inner(),
        list.list_id,
        list.project_id
    );
    Ok(HttpResponse::Created().json(list))
}

pub async fn update_task_list(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<TaskListRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = req.into_inner().into_changes()?;
    let list = store.update_task_list(id, changes).await?;
    info!("Admin {} updated task list {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(list))
}

pub async fn delete_task_list(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_task_list(id).await?;
    info!("Admin {} deleted task list {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Task list deleted successfully")))
}

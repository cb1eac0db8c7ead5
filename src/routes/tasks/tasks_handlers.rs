use actix_web::{web, HttpResponse};
use log::info;

use super::tasks_models::{TaskQuery, TaskRequest};
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_tasks(
    store: web::Data<dyn Store>,
    query: web::Query<TaskQuery>,
) -> AppResult<HttpResponse> {
    let tasks = store.list_tasks(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn get_task(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let task = store.get_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn create_task(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<TaskRequest>,
) -> AppResult<HttpResponse> {
    let new_task = req.into_inner().into_new_task()?;
    let task = store.create_task(new_task).await?;
    info!(
        "Admin {} created task {} in list {}",
        admin.into_inner(),
        task.item.task_id,
        task.item.list_id
    );
    Ok(HttpResponse::Created().json(task))
}

pub async fn update_task(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<TaskRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = req.into_inner().into_changes()?;
    let task = store.update_task(id, changes).await?;
    info!("Admin {} updated task {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_task(id).await?;
    info!("Admin {} deleted task {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Task deleted successfully")))
}

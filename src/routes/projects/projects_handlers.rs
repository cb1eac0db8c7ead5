use actix_web::{web, HttpResponse};
use log::info;

use super::projects_models::{ProjectQuery, ProjectRequest};
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_projects(
    store: web::Data<dyn Store>,
    query: web::Query<ProjectQuery>,
) -> AppResult<HttpResponse> {
    let projects = store.list_projects(query.user_id).await?;
    Ok(HttpResponse::Ok().json(projects))
}

pub async fn get_project(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project = store.get_project(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

pub async fn create_project(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let new_project = req.into_inner().into_new_project()?;
    let project = store.create_project(new_project).await?;
    info!("Admin {} created project {}", admin.into_inner(), project.project_id);
    Ok(HttpResponse::Created().json(project))
}

pub async fn update_project(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = req.into_inner().into_changes()?;
    let project = store.update_project(id, changes).await?;
    info!("Admin {} updated project {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(project))
}

pub async fn delete_project(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_project(id).await?;
    info!("Admin {} deleted project {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Project deleted successfully")))
}

use actix_web::{web, HttpResponse};
use log::info;

use super::comments_models::{CommentQuery, CommentRequest};
use crate::error::AppResult;
use crate::routes::admin::admin_gate::AdminId;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn list_comments(
    store: web::Data<dyn Store>,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    let comments = store.list_comments(query.task_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

pub async fn get_comment(
    store: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let comment = store.get_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn create_comment(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    req: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let new_comment = req.into_inner().into_new_comment()?;
    let comment = store.create_comment(new_comment).await?;
    info!(
        "Admin {} added comment {} to task {}",
        admin.into_inner(),
        comment.comment_id,
        comment.task_id
    );
    Ok(HttpResponse::Created().json(comment))
}

pub async fn update_comment(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
    req: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let text = req.into_inner().into_text()?;
    let comment = store.update_comment(id, text).await?;
    info!("Admin {} edited comment {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    store: web::Data<dyn Store>,
    admin: web::ReqData<AdminId>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    store.delete_comment(id).await?;
    info!("Admin {} deleted comment {}", admin.into_inner(), id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}

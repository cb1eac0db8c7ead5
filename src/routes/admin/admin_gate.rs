//! Admin gate: the `adminId` cookie check shared by every protected route.
//!
//! Admission only looks at cookie presence. There is no signature, expiry or
//! server-side session behind it.

use std::fmt;

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use log::info;

use crate::error::AppError;

pub const ADMIN_COOKIE: &str = "adminId";
pub const LOGIN_PATH: &str = "/login";

/// Value of the `adminId` cookie of an admitted request. Handlers behind the
/// API gate can take it as `web::ReqData<AdminId>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminId(pub String);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn admin_id(req: &HttpRequest) -> Option<AdminId> {
    req.cookie(ADMIN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .map(AdminId)
}

/// API gate: unadmitted requests get `401` with a JSON error body.
pub async fn require_admin<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    match admin_id(req.request()) {
        Some(admin) => {
            req.extensions_mut().insert(admin);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        None => {
            info!("Rejected unauthenticated request to {}", req.path());
            Ok(req
                .error_response(AppError::Unauthorized("Unauthorized".into()))
                .map_into_right_body())
        }
    }
}

/// Page gate: unadmitted browser navigation is sent to the login page.
pub async fn redirect_to_login<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if admin_id(req.request()).is_some() {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }

    info!("Redirecting unauthenticated visit to {} to {}", req.path(), LOGIN_PATH);
    let response = HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish();
    Ok(req.into_response(response).map_into_right_body())
}

use actix_web::{cookie::Cookie, web, HttpResponse, Responder};
use log::info;

use super::login_models::{LoginRequest, RegisterRequest, RegisterResponse};
use super::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::models::role::DEFAULT_ROLE;
use crate::models::user::NewUser;
use crate::routes::admin::admin_gate::ADMIN_COOKIE;
use crate::routes::common::MessageResponse;
use crate::store::Store;

pub async fn login_page() -> impl Responder {
    HttpResponse::Ok().body("Hello, this is the Taskdesk admin login page.")
}

fn admin_cookie(value: String) -> Cookie<'static> {
    Cookie::build(ADMIN_COOKIE, value)
        .path("/")
        .http_only(true)
        .finish()
}

pub async fn login(
    store: web::Data<dyn Store>,
    req: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let credentials = req.into_inner().into_credentials()?;
    info!("Received login request for {}", credentials.email);

    let record = match store.find_user_by_email(&credentials.email).await? {
        Some(record) => record,
        None => {
            info!("Login failed, unknown email: {}", credentials.email);
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(&credentials.password, &record.password_hash).await {
        info!("Login failed, wrong password for user {}", record.user_id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let user = store.get_user(record.user_id).await?;
    if !user.is_admin() {
        info!("Login refused for non-admin user {}", user.user_id);
        return Err(AppError::Forbidden("Access denied: Admin only".into()));
    }

    info!("Admin {} logged in", user.user_id);
    Ok(HttpResponse::Ok()
        .cookie(admin_cookie(user.user_id.to_string()))
        .json(MessageResponse::new("Login successful")))
}

pub async fn logout() -> impl Responder {
    let mut cookie = admin_cookie(String::new());
    cookie.make_removal();
    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("Logout successful"))
}

pub async fn register(
    store: web::Data<dyn Store>,
    req: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let registration = req.into_inner().validate()?;
    info!("Received request to register user: {}", registration.username);

    if store
        .user_exists(&registration.username, &registration.email)
        .await?
    {
        info!("Registration refused, {} or {} is taken", registration.username, registration.email);
        return Err(AppError::Conflict(
            "User with this email or username already exists".into(),
        ));
    }

    let role = store
        .find_role_by_name(DEFAULT_ROLE)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Default role {DEFAULT_ROLE} does not exist")))?;

    let user = store
        .create_user(NewUser {
            user_name: registration.username,
            email: registration.email,
            password_hash: hash_password(&registration.password).await?,
            role_id: Some(role.role_id),
        })
        .await?;

    info!("User {} registered successfully", user.user_id);
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user,
    }))
}

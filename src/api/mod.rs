use axum::{Extension, Json};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{self, repository};
use crate::error::AppError;
use crate::models::*;
use crate::services::{ExportedFile, PaymentService, ReportService, ResultsService, XLSX_CONTENT_TYPE};
use crate::state::AppState;

#[derive(Deserialize)]
struct PinQuery {
    #[serde(default)]
    pin: Option<String>,
}

/// Username resolved from the request's PIN.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub String);

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/students", get(list_students))
        .route("/students/new", post(add_student))
        .route("/students/export", get(export_students))
        .route("/students/{id}", get(get_student))
        .route("/students/edit/{id}", patch(update_student))
        .route("/students/delete/{id}", delete(delete_student))
        .route("/students/payment/{id}", patch(toggle_payment))
        .route("/students/due/reset/{id}", patch(reset_due_months))
        .route("/batches", get(list_batches))
        .route("/batches/new", post(add_batch))
        .route("/batches/delete/{id}", delete(delete_batch))
        .route("/results", post(submit_results))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_pin));

    Router::new()
        .route("/health", get(health))
        .route("/login", get(login))
        .merge(protected)
        .with_state(state)
}

async fn require_pin(
    State(state): State<AppState>,
    Query(query): Query<PinQuery>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let pin = query.pin.unwrap_or_default();
    let user = state
        .pins
        .authenticate(pin.trim())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    debug!("{} {} by {}", req.method(), req.uri().path(), user);
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

fn parse_id(raw: &str) -> Result<String, AppError> {
    Uuid::try_parse(raw.trim())
        .map(|id| id.simple().to_string())
        .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}

fn attachment(file: ExportedFile) -> Response {
    let disposition = file.content_disposition();
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    db::with_timeout(db::SHORT_TIMEOUT, sqlx::query("select 1").execute(&state.db)).await?;
    Ok(StatusCode::OK)
}

async fn login(
    State(state): State<AppState>,
    Query(query): Query<PinQuery>,
) -> Result<Response, AppError> {
    let pin = query.pin.unwrap_or_default();
    if pin.trim().is_empty() {
        return Err(AppError::BadRequest("PIN required".to_string()));
    }

    let response = match state.pins.authenticate(pin.trim()) {
        Some(user) => Json(json!({ "success": true, "user": user })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid PIN" })),
        )
            .into_response(),
    };
    Ok(response)
}

async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = db::with_timeout(db::LIST_TIMEOUT, repository::fetch_students(&state.db)).await?;
    Ok(Json(students))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id)?;
    let student = db::with_timeout(db::SHORT_TIMEOUT, repository::fetch_student(&state.db, &id))
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(student))
}

async fn add_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let Json(req) = payload?;
    let student = db::with_timeout(db::SHORT_TIMEOUT, repository::insert_student(&state.db, req)).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;

    let mut student = db::with_timeout(db::SHORT_TIMEOUT, repository::fetch_student(&state.db, &id))
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    student.apply_update(req);

    let saved = db::with_timeout(db::SHORT_TIMEOUT, repository::save_student(&state.db, &student)).await?;
    if !saved {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    Ok(Json(student))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let deleted = db::with_timeout(db::SHORT_TIMEOUT, repository::delete_student(&state.db, &id)).await?;
    if deleted {
        Ok(Json(json!({ "message": "Student deleted successfully" })))
    } else {
        Err(AppError::NotFound("Student not found".to_string()))
    }
}

async fn toggle_payment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id)?;
    let service = PaymentService::new(state.db.clone(), state.notifier.clone());
    let student = service.toggle_payment(&id).await?;
    info!("{} set payment of student {} to {}", user, student.id, student.payment_status);
    Ok(Json(student))
}

async fn reset_due_months(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id)?;
    let service = PaymentService::new(state.db.clone(), state.notifier.clone());
    let student = service.reset_due_months(&id).await?;
    info!("{} cleared due months of student {}", user, student.id);
    Ok(Json(student))
}

async fn export_students(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, AppError> {
    let service = ReportService::new(state.db.clone());
    let file = service.export().await?;
    info!("{} exported {}", user, file.filename);
    Ok(attachment(file))
}

async fn list_batches(State(state): State<AppState>) -> Result<Json<Vec<Batch>>, AppError> {
    let batches = db::with_timeout(db::LIST_TIMEOUT, repository::fetch_batches(&state.db)).await?;
    Ok(Json(batches))
}

async fn add_batch(
    State(state): State<AppState>,
    payload: Result<Json<NewBatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Batch>), AppError> {
    let Json(req) = payload?;
    let batch = db::with_timeout(db::SHORT_TIMEOUT, repository::insert_batch(&state.db, req)).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let deleted = db::with_timeout(db::SHORT_TIMEOUT, repository::delete_batch(&state.db, &id)).await?;
    if deleted {
        Ok(Json(json!({ "message": "Batch deleted successfully" })))
    } else {
        Err(AppError::NotFound("Batch not found".to_string()))
    }
}

async fn submit_results(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<Vec<ResultEntry>>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(entries) = payload?;
    let service = ResultsService::new(state.notifier.clone());
    let file = service.publish(entries).await?;
    info!("{} published {}", user, file.filename);
    Ok(attachment(file))
}

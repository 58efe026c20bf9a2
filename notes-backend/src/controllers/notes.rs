//! Notes REST API — CRUD over the file-backed note store.
//!
//! Request bodies are resolved into explicit payload shapes here, once,
//! before any store operation runs; the store itself only ever sees a
//! validated name and text. Responses are the short plain-text messages
//! the service has always sent.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{Either, HttpRequest, HttpResponse, Responder, guard, web};
use futures_util::StreamExt;
use serde::Deserialize;

use crate::AppState;
use crate::notes::StoreError;

/// The two body shapes PUT accepts: a raw text body taken verbatim, or
/// a JSON object carrying the text in a `text` field. A missing/empty
/// body, a JSON body without a non-empty `text`, or a non-UTF-8 raw
/// body all resolve to `None`.
enum ReplaceBody {
    Raw(String),
    Field { text: String },
}

impl ReplaceBody {
    fn from_request(req: &HttpRequest, body: &web::Bytes) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("application/json") {
            #[derive(Deserialize)]
            struct Fields {
                text: Option<String>,
            }
            let fields: Fields = serde_json::from_slice(body).ok()?;
            let text = fields.text.filter(|t| !t.is_empty())?;
            Some(ReplaceBody::Field { text })
        } else {
            let text = String::from_utf8(body.to_vec()).ok()?;
            Some(ReplaceBody::Raw(text))
        }
    }

    fn into_text(self) -> String {
        match self {
            ReplaceBody::Raw(text) => text,
            ReplaceBody::Field { text } => text,
        }
    }
}

/// Create request fields, from an urlencoded form, a JSON object, or a
/// multipart form. An empty string counts the same as a missing field.
#[derive(Debug, Deserialize)]
struct CreateForm {
    note_name: Option<String>,
    note: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// --- Read note ---

async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match data.store.get(&name).await {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(text),
        Err(_) => HttpResponse::NotFound().body("Not found"),
    }
}

// --- Replace note ---

async fn replace_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let name = path.into_inner();

    let text = match ReplaceBody::from_request(&req, &body) {
        Some(payload) => payload.into_text(),
        None => return HttpResponse::BadRequest().body("Missing text in request body"),
    };

    match data.store.replace(&name, &text).await {
        Ok(()) => HttpResponse::Ok().body("Updated successfully"),
        Err(StoreError::InvalidName) => HttpResponse::BadRequest().body("Invalid note name"),
        Err(e) => {
            log::error!("Failed to update note {}: {}", name, e);
            HttpResponse::InternalServerError().body("Error updating note")
        }
    }
}

// --- Delete note ---

async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match data.store.delete(&name).await {
        Ok(()) => HttpResponse::Ok().body("Deleted"),
        Err(_) => HttpResponse::NotFound().body("Not found"),
    }
}

// --- List notes ---

async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    match data.store.list().await {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => {
            log::error!("Failed to list notes: {}", e);
            HttpResponse::InternalServerError().body("Server error")
        }
    }
}

// --- Create note ---

async fn create_note(
    data: web::Data<AppState>,
    form: Either<web::Form<CreateForm>, web::Json<CreateForm>>,
) -> impl Responder {
    let CreateForm { note_name, note } = form.into_inner();
    finish_create(&data, note_name, note).await
}

/// Multipart variant of create — reads `note_name` and `note` fields
/// from the stream, then funnels into the same validation as the
/// urlencoded/JSON path.
async fn create_note_multipart(data: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut note_name: Option<String> = None;
    let mut note: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Failed to process multipart field: {}", e);
                return HttpResponse::BadRequest().body("Missing required fields");
            }
        };

        let field_name = field.name().to_string();

        let mut value = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => value.extend_from_slice(&bytes),
                Err(e) => {
                    log::warn!("Failed to read multipart field {}: {}", field_name, e);
                    return HttpResponse::BadRequest().body("Missing required fields");
                }
            }
        }

        let value = match String::from_utf8(value) {
            Ok(v) => v,
            Err(_) => return HttpResponse::BadRequest().body("Missing required fields"),
        };

        match field_name.as_str() {
            "note_name" => note_name = Some(value),
            "note" => note = Some(value),
            _ => {}
        }
    }

    finish_create(&data, note_name, note).await
}

async fn finish_create(
    data: &web::Data<AppState>,
    note_name: Option<String>,
    note: Option<String>,
) -> HttpResponse {
    let (name, text) = match (non_empty(note_name), non_empty(note)) {
        (Some(name), Some(text)) => (name, text),
        _ => return HttpResponse::BadRequest().body("Missing required fields"),
    };

    match data.store.create(&name, &text).await {
        Ok(()) => HttpResponse::Created().body("Created"),
        Err(StoreError::AlreadyExists) => HttpResponse::BadRequest().body("Note already exists"),
        Err(StoreError::InvalidName) => HttpResponse::BadRequest().body("Invalid note name"),
        Err(e) => {
            log::error!("Failed to create note {}: {}", name, e);
            HttpResponse::InternalServerError().body("Server error")
        }
    }
}

fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notes/{name}")
            .route(web::get().to(get_note))
            .route(web::put().to(replace_note))
            .route(web::delete().to(delete_note)),
    );
    cfg.service(web::resource("/notes").route(web::get().to(list_notes)));
    cfg.service(
        web::resource("/write")
            .route(
                web::post()
                    .guard(guard::fn_guard(is_multipart))
                    .to(create_note_multipart),
            )
            .route(web::post().to(create_note)),
    );
}

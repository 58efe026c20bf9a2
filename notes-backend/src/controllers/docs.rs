//! API documentation endpoint — serves a machine-readable OpenAPI
//! description of the notes routes. Rendering an interactive UI on top
//! of it is left to external tooling.

use actix_web::{HttpResponse, Responder, web};

use crate::controllers::health::VERSION;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/docs/openapi.json").route(web::get().to(openapi_spec)));
}

async fn openapi_spec() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Notes API",
            "version": VERSION,
            "description": "CRUD over text notes stored as files"
        },
        "paths": {
            "/notes/{name}": {
                "parameters": [{
                    "name": "name",
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" },
                    "description": "Note name"
                }],
                "get": {
                    "summary": "Read a note's text",
                    "responses": {
                        "200": {
                            "description": "Note text",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        },
                        "404": { "description": "Note not found" }
                    }
                },
                "put": {
                    "summary": "Replace a note's text, creating the note if absent",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "text/plain": { "schema": { "type": "string" } },
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": { "text": { "type": "string" } },
                                    "required": ["text"]
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Note updated" },
                        "400": { "description": "Missing text" },
                        "500": { "description": "Write error" }
                    }
                },
                "delete": {
                    "summary": "Delete a note",
                    "responses": {
                        "200": { "description": "Note deleted" },
                        "404": { "description": "Note not found" }
                    }
                }
            },
            "/notes": {
                "get": {
                    "summary": "List all notes with their text",
                    "responses": {
                        "200": {
                            "description": "All stored notes",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "name": { "type": "string" },
                                                "text": { "type": "string" }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "500": { "description": "Read error" }
                    }
                }
            },
            "/write": {
                "post": {
                    "summary": "Create a new note",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "note_name": { "type": "string" },
                                        "note": { "type": "string" }
                                    },
                                    "required": ["note_name", "note"]
                                }
                            },
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "note_name": { "type": "string" },
                                        "note": { "type": "string" }
                                    },
                                    "required": ["note_name", "note"]
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": { "description": "Note created" },
                        "400": { "description": "Missing field or note already exists" },
                        "500": { "description": "Write error" }
                    }
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_openapi_spec_lists_all_routes() {
        let app = test::init_service(App::new().configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/docs/openapi.json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let spec: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(spec["openapi"], "3.0.0");
        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/notes/{name}"));
        assert!(paths.contains_key("/notes"));
        assert!(paths.contains_key("/write"));
    }
}

use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;
use uuid::Uuid;

use crate::model::GenerationParams;
use crate::web::error::ChatError;
use crate::web::models::{ChatRequest, ChatResponse, Usage};
use crate::AppState;

// Liveness banner
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "AI Chatbot API is running!" }))
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<web::Json<ChatResponse>, ChatError> {
    let request_id = Uuid::new_v4();

    respond(&data, &req, request_id).await.map(web::Json).map_err(|e| {
        error!("Error in chat request {}: {}", request_id, e);
        e
    })
}

async fn respond(data: &AppState, req: &ChatRequest, request_id: Uuid) -> Result<ChatResponse, ChatError> {
    let prompt = req.last_user_message()?;
    let params = GenerationParams {
        model: req
            .model
            .clone()
            .unwrap_or_else(|| data.config.default_model.clone()),
        temperature: req.temperature()?,
        max_output_tokens: req.max_tokens()?,
    };

    info!(
        "Chat request {}: {} messages, model {} (max_tokens: {})",
        request_id,
        req.messages.len(),
        params.model,
        params.max_output_tokens
    );

    let completion = data.model.generate(prompt, &params).await?;
    let message = data.formatter.format(&completion);

    Ok(ChatResponse {
        message,
        usage: Some(Usage::estimate(prompt, &completion)),
    })
}

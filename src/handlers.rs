// handlers.rs
use std::sync::Arc;

use axum::{
    extract::{FromRequest, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, StoreError};
use crate::models::{Answers, Form, FormResponse, NewQuestion, Poll, PollResults};
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// `Json` body extractor whose rejections come back as `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollVoteRequest {
    pub option_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollVoteResponse {
    pub poll_id: String,
    pub option_id: String,
    pub votes: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub title: String,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub answers: Answers,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Created {
    pub id: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// List every poll
pub async fn list_polls(State(state): State<Arc<AppState>>) -> Json<Vec<Poll>> {
    Json(state.polls.lock().await.polls().to_vec())
}

/// Create a poll from a question and option texts
pub async fn create_poll(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreatePollRequest>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state
        .polls
        .lock()
        .await
        .create(&body.question, &body.options)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get_poll(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<String>,
) -> ApiResult<Json<Poll>> {
    let polls = state.polls.lock().await;
    let poll = polls
        .get(&poll_id)
        .cloned()
        .ok_or(StoreError::PollNotFound(poll_id))?;
    Ok(Json(poll))
}

/// Vote for one option of a poll
pub async fn vote(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<String>,
    ApiJson(body): ApiJson<PollVoteRequest>,
) -> ApiResult<Json<PollVoteResponse>> {
    let votes = state
        .polls
        .lock()
        .await
        .record_response(&poll_id, &body.option_id)?;
    Ok(Json(PollVoteResponse {
        poll_id,
        option_id: body.option_id,
        votes,
    }))
}

pub async fn get_poll_results(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<String>,
) -> ApiResult<Json<PollResults>> {
    let results = state.polls.lock().await.results(&poll_id);
    results
        .map(Json)
        .ok_or_else(|| StoreError::PollNotFound(poll_id).into())
}

pub async fn list_forms(State(state): State<Arc<AppState>>) -> Json<Vec<Form>> {
    Json(state.forms.lock().await.forms().to_vec())
}

pub async fn create_form(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateFormRequest>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state
        .forms
        .lock()
        .await
        .create(&body.title, body.questions)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
) -> ApiResult<Json<Form>> {
    let forms = state.forms.lock().await;
    let form = forms
        .get(&form_id)
        .cloned()
        .ok_or(StoreError::FormNotFound(form_id))?;
    Ok(Json(form))
}

/// Submit answers to a form
pub async fn submit_form_response(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    ApiJson(body): ApiJson<SubmitFormRequest>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state
        .forms
        .lock()
        .await
        .submit_response(&form_id, body.answers)?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Responses for a form, most recent first
pub async fn list_form_responses(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
) -> ApiResult<Json<Vec<FormResponse>>> {
    let forms = state.forms.lock().await;
    if forms.get(&form_id).is_none() {
        return Err(StoreError::FormNotFound(form_id).into());
    }
    let responses = forms.responses_for(&form_id).into_iter().cloned().collect();
    Ok(Json(responses))
}

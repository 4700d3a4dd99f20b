use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, NewQuestion},
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::ApiResponse,
        extractors::{ApiJson, ApiPath, ApiQuery},
        format::FormattedQuestion,
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::MessageResponse;

const QUESTIONS_PATH: &str = "/questions";
const SEARCH_PATH: &str = "/questions/search";

#[derive(Deserialize)]
struct QuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl From<QuestionBody> for NewQuestion {
    fn from(body: QuestionBody) -> Self {
        Self {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<FormattedQuestion>,
    next_url: Option<String>,
    prev_url: Option<String>,
    /// Every stored question, regardless of page.
    total_questions: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<FormattedQuestion>,
    next_url: Option<String>,
    prev_url: Option<String>,
    /// Hits on this page only.
    total_search_results: usize,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    question: FormattedQuestion,
    message: &'static str,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let page = questions::list_questions(&pool, query.page).await?;
    let total_questions = questions::count_questions(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        next_url: page.next_url(QUESTIONS_PATH),
        prev_url: page.prev_url(QUESTIONS_PATH),
        questions: page.map(FormattedQuestion::from).items,
        total_questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(question_id): ApiPath<i64>,
) -> ApiResponse<Json<MessageResponse>> {
    if !questions::delete_question(&pool, question_id).await? {
        return Ok(Json(MessageResponse::info("Question not found.")));
    }
    QUESTIONS_DELETED.inc();
    tracing::info!(question_id, "Question deleted");
    Ok(Json(MessageResponse::success("Question successfully deleted.")))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuestionBody>,
) -> ApiResponse<Response> {
    if questions::find_question_by_text(&pool, &body.question)
        .await?
        .is_some()
    {
        return Ok(Json(MessageResponse::info("Question already exists.")).into_response());
    }

    let question = questions::create_question(&pool, body.into()).await?;
    QUESTIONS_CREATED.inc();
    tracing::info!(question_id = question.id, "Question created");

    let body = CreatedQuestion {
        success: true,
        question: question.into(),
        message: "Question successfully created.",
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let page = questions::search_questions(&pool, &body.search_term, query.page).await?;
    let next_url = page.next_url(SEARCH_PATH);
    let prev_url = page.prev_url(SEARCH_PATH);
    let questions: Vec<FormattedQuestion> =
        page.items.into_iter().map(FormattedQuestion::from).collect();
    Ok(Json(SearchResults {
        success: true,
        next_url,
        prev_url,
        total_search_results: questions.len(),
        questions,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route(QUESTIONS_PATH, get(list_questions).post(create_question))
        .route(SEARCH_PATH, post(search_questions))
        .route("/questions/{question_id}", delete(delete_question))
}

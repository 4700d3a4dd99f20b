use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::quiz_candidates,
    server::{app::AppState, error::ApiResponse, extractors::ApiJson, format::FormattedQuestion},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

/// `quiz_category.id` value that stands for every category.
const ANY_CATEGORY: i64 = 0;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizBody {
    quiz_category: QuizCategory,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<FormattedQuestion>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = match body.quiz_category.id {
        ANY_CATEGORY => None,
        id => Some(id),
    };
    let candidates = quiz_candidates(&pool, category, &body.previous_questions).await?;
    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    match &question {
        Some(q) => {
            let label = q.category.to_string();
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
        }
        None => tracing::debug!(?category, "Quiz exhausted"),
    }

    Ok(Json(QuizResponse {
        success: true,
        question: question.map(FormattedQuestion::from),
    }))
}

pub fn quiz_router() -> Router<AppState> {
    Router::new().route("/quiz", post(next_question))
}

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories::get_all_categories, questions::questions_for_category},
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::ApiResponse,
        extractors::{ApiPath, ApiQuery},
        format::FormattedQuestion,
    },
};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: Vec<String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<FormattedQuestion>,
    /// Size of the returned page, not of the category.
    total_questions: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories.into_iter().map(|c| c.kind).collect(),
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let page = questions_for_category(&pool, category_id, query.page).await?;
    let questions: Vec<FormattedQuestion> =
        page.items.into_iter().map(FormattedQuestion::from).collect();
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{category_id}/questions",
            get(get_category_questions),
        )
}

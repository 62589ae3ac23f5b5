use super::query;
use super::types::{
    ActorStats, DirectorStats, MonthCount, TitleScore, TitleVotes, WeekdayCount, WelcomeResponse,
};
use crate::error::QueryError;
use crate::snapshot::Snapshot;
use axum::extract::Path;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_home() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Bienvenido a la API de Películas".to_string(),
    })
}

pub async fn handle_month_count(
    Path(month): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<MonthCount>, QueryError> {
    query::count_by_month(&snapshot.catalog, &month).map(Json)
}

pub async fn handle_weekday_count(
    Path(weekday): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<WeekdayCount>, QueryError> {
    query::count_by_weekday(&snapshot.catalog, &weekday).map(Json)
}

pub async fn handle_title_score(
    Path(title): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<TitleScore>, QueryError> {
    query::score_by_title(&snapshot.catalog, &title).map(Json)
}

pub async fn handle_title_votes(
    Path(title): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<TitleVotes>, QueryError> {
    query::votes_by_title(&snapshot.catalog, &title).map(Json)
}

pub async fn handle_actor(
    Path(name): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<ActorStats>, QueryError> {
    query::actor_stats(&snapshot.catalog, &name).map(Json)
}

pub async fn handle_director(
    Path(name): Path<String>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<DirectorStats>, QueryError> {
    query::director_stats(&snapshot.catalog, &name).map(Json)
}

//! Catalog Module Tests
//!
//! Validates the query service against a small in-memory catalog.
//!
//! ## Test Scopes
//! - **Calendar counts**: Month and weekday vocabularies, case folding, invalid names.
//! - **Title lookups**: First-match order, vote threshold.
//! - **Participants**: Actor aggregates and director filmographies.
//! - **Handlers**: Status codes and JSON field names over the Axum extractors.
//! - **Snapshot**: Write/load round trip.

#[cfg(test)]
mod tests {
    use crate::catalog::handlers::{handle_actor, handle_month_count, handle_title_votes};
    use crate::catalog::query::{
        actor_stats, count_by_month, count_by_weekday, director_stats, month_number,
        score_by_title, votes_by_title, weekday_number,
    };
    use crate::catalog::store::CatalogStore;
    use crate::catalog::types::CatalogRow;
    use crate::error::QueryError;
    use crate::snapshot::Snapshot;
    use axum::Extension;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::{Datelike, NaiveDate};
    use std::sync::Arc;

    fn row(title: &str, date: (i32, u32, u32), budget: f64, revenue: f64) -> CatalogRow {
        let release_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        CatalogRow {
            id: Some(1),
            title: title.to_string(),
            overview: String::new(),
            release_date,
            release_year: release_date.year(),
            budget,
            revenue,
            return_on_investment: if budget > 0.0 { revenue / budget } else { 0.0 },
            popularity: 10.0,
            vote_count: 100,
            vote_average: 6.0,
            original_language: Some("en".to_string()),
            runtime: None,
            status: None,
            tagline: None,
            genres: None,
            belongs_to_collection: None,
            production_companies: None,
            cast: None,
            crew: None,
        }
    }

    fn sample_catalog() -> CatalogStore {
        // 1995-10-30 is a Monday, 1995-12-15 a Friday, 2010-06-16 a Wednesday.
        let mut toy_story = row("Toy Story", (1995, 10, 30), 30_000_000.0, 373_554_033.0);
        toy_story.vote_count = 5415;
        toy_story.vote_average = 7.7;
        toy_story.popularity = 21.94;
        toy_story.cast = Some("[{'character': 'Woody', 'name': 'Tom Hanks'}]".to_string());
        toy_story.crew = Some("[{'job': 'Director', 'name': 'John Lasseter'}]".to_string());

        let mut jumanji = row("Jumanji", (1995, 12, 15), 65_000_000.0, 262_797_249.0);
        jumanji.cast = Some("[{'name': 'Robin Williams'}]".to_string());

        let mut toy_story_3 = row("Toy Story 3", (2010, 6, 16), 200_000_000.0, 1_066_969_703.0);
        toy_story_3.vote_count = 4710;
        toy_story_3.cast = Some("[{'name': 'Tom Hanks'}]".to_string());
        toy_story_3.crew = Some("[{'job': 'Director', 'name': 'Lee Unkrich'}]".to_string());

        let mut unbudgeted = row("Small Film", (2001, 1, 8), 0.0, 5_000.0);
        unbudgeted.cast = Some("[{'name': 'Tom Hanks'}]".to_string());
        unbudgeted.crew = Some("[{'job': 'Director', 'name': 'John Lasseter'}]".to_string());

        CatalogStore::from_rows(vec![toy_story, jumanji, toy_story_3, unbudgeted])
    }

    // ============================================================
    // CALENDAR COUNT TESTS
    // ============================================================

    #[test]
    fn test_month_vocabulary() {
        assert_eq!(month_number("enero"), Some(1));
        assert_eq!(month_number("DICIEMBRE"), Some(12));
        assert_eq!(month_number("january"), None);
    }

    #[test]
    fn test_count_by_month_is_case_insensitive() {
        let catalog = sample_catalog();

        let lower = count_by_month(&catalog, "enero").unwrap();
        let mixed = count_by_month(&catalog, "Enero").unwrap();

        assert_eq!(lower.count, 1);
        assert_eq!(mixed.count, lower.count);
        assert_eq!(mixed.month, "Enero");
    }

    #[test]
    fn test_count_by_month_invalid_name() {
        let catalog = sample_catalog();
        let err = count_by_month(&catalog, "foo").unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn test_count_by_month_with_no_films_is_zero() {
        let catalog = sample_catalog();
        assert_eq!(count_by_month(&catalog, "marzo").unwrap().count, 0);
    }

    #[test]
    fn test_weekday_vocabulary_monday_first() {
        assert_eq!(weekday_number("lunes"), Some(0));
        assert_eq!(weekday_number("Miércoles"), Some(2));
        assert_eq!(weekday_number("SÁBADO"), Some(5));
        assert_eq!(weekday_number("domingo"), Some(6));
        assert_eq!(weekday_number("monday"), None);
    }

    #[test]
    fn test_count_by_weekday() {
        let catalog = sample_catalog();

        assert_eq!(count_by_weekday(&catalog, "lunes").unwrap().count, 2);
        assert_eq!(count_by_weekday(&catalog, "viernes").unwrap().count, 1);
        assert_eq!(count_by_weekday(&catalog, "miércoles").unwrap().count, 1);
        assert!(matches!(
            count_by_weekday(&catalog, "someday"),
            Err(QueryError::InvalidInput(_))
        ));
    }

    // ============================================================
    // TITLE LOOKUP TESTS
    // ============================================================

    #[test]
    fn test_score_by_title_first_match_wins() {
        let catalog = sample_catalog();

        for _ in 0..3 {
            let score = score_by_title(&catalog, "toy story").unwrap();
            assert_eq!(score.title, "Toy Story");
            assert_eq!(score.release_year, 1995);
            assert_eq!(score.popularity, 21.94);
        }

        let score = score_by_title(&catalog, "STORY 3").unwrap();
        assert_eq!(score.title, "Toy Story 3");
    }

    #[test]
    fn test_score_by_title_not_found() {
        let catalog = sample_catalog();
        let err = score_by_title(&catalog, "Casablanca").unwrap_err();
        assert_eq!(err, QueryError::NotFound("Película no encontrada".to_string()));
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_match() {
        let catalog = CatalogStore::from_rows(vec![
            row("Toyland", (1961, 12, 14), 0.0, 0.0),
            row("Toy Story", (1995, 10, 30), 0.0, 0.0),
        ]);

        assert_eq!(score_by_title(&catalog, "Toy ").unwrap().title, "Toy Story");
        assert_eq!(score_by_title(&catalog, " story").unwrap().title, "Toy Story");
        assert_eq!(score_by_title(&catalog, "Toy").unwrap().title, "Toyland");
        assert!(matches!(
            score_by_title(&catalog, " Toyland"),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_blank_query_is_invalid() {
        let catalog = sample_catalog();
        assert!(matches!(
            score_by_title(&catalog, "  "),
            Err(QueryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_votes_by_title_threshold() {
        let catalog = sample_catalog();

        let votes = votes_by_title(&catalog, "toy story").unwrap();
        assert_eq!(votes.vote_count, 5415);
        assert_eq!(votes.vote_average, 7.7);

        let err = votes_by_title(&catalog, "jumanji").unwrap_err();
        assert_eq!(err.kind(), "insufficient_data");

        let err = votes_by_title(&catalog, "Casablanca").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    // ============================================================
    // PARTICIPANT TESTS
    // ============================================================

    #[test]
    fn test_actor_stats_aggregates_all_rows() {
        let catalog = sample_catalog();
        let stats = actor_stats(&catalog, "tom hanks").unwrap();

        let expected_total = 373_554_033.0 / 30_000_000.0 + 1_066_969_703.0 / 200_000_000.0;
        assert_eq!(stats.film_count, 3);
        assert!((stats.total_return - expected_total).abs() < 1e-9);
        assert!((stats.average_return - expected_total / 3.0).abs() < 1e-9);
        assert_eq!(stats.actor, "tom hanks");
    }

    #[test]
    fn test_actor_stats_not_found() {
        let catalog = sample_catalog();
        let err = actor_stats(&catalog, "Meryl Streep").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_director_stats_lists_films() {
        let catalog = sample_catalog();
        let stats = director_stats(&catalog, "John Lasseter").unwrap();

        assert_eq!(stats.films.len(), 2);
        assert_eq!(stats.films[0].title, "Toy Story");
        assert_eq!(stats.films[1].title, "Small Film");
        assert_eq!(stats.films[1].return_on_investment, 0.0);
        assert!((stats.total_return - 373_554_033.0 / 30_000_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_director_stats_not_found() {
        let catalog = sample_catalog();
        assert!(matches!(
            director_stats(&catalog, "Kubrick"),
            Err(QueryError::NotFound(_))
        ));
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_month_handler_serializes_original_field_names() {
        let snapshot = Arc::new(Snapshot::new(sample_catalog()));

        let response = handle_month_count(Path("octubre".to_string()), Extension(snapshot))
            .await
            .unwrap();

        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["mes"], "octubre");
        assert_eq!(json["cantidad"], 1);
    }

    #[tokio::test]
    async fn test_handler_errors_map_to_status_codes() {
        let snapshot = Arc::new(Snapshot::new(sample_catalog()));

        let err = handle_month_count(Path("foo".to_string()), Extension(snapshot.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = handle_title_votes(Path("jumanji".to_string()), Extension(snapshot.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = handle_actor(Path("nobody".to_string()), Extension(snapshot))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    // ============================================================
    // SNAPSHOT TESTS
    // ============================================================

    #[test]
    fn test_snapshot_write_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let mut catalog_rows = sample_catalog().rows().to_vec();
        catalog_rows[0].belongs_to_collection =
            Some(serde_json::json!({"id": 10194, "name": "Toy Story Collection"}));
        CatalogStore::from_rows(catalog_rows.clone())
            .write(&path)
            .unwrap();

        let loaded = CatalogStore::load(&path).unwrap();
        assert_eq!(loaded.rows(), catalog_rows.as_slice());
    }

    #[test]
    fn test_malformed_snapshot_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, "id,title,release_date\n1,Toy Story,not-a-date\n").unwrap();

        assert!(CatalogStore::load(&path).is_err());
    }
}

//! Calendar endpoints

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/calendar/{year}", get(year_calendar))
        .route("/calendar/{year}/{month}", get(month_calendar))
}

#[derive(Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

/// GET / - API info
async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the Nepali Calendar API. \
                  Use /calendar/{year} or /calendar/{year}/{month}.",
    })
}

/// The stored artifact, byte for byte.
fn json_file(content: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], content).into_response()
}

/// A path segment made only of digits. `None` when the number is too large
/// for `T`, so nothing can have been scraped for it.
fn number<T: FromStr>(segment: &str) -> Result<Option<T>, AppError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a valid number",
            segment
        )));
    }
    Ok(segment.parse().ok())
}

/// GET /calendar/:year - All twelve months of a year
async fn year_calendar(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Response, AppError> {
    let content = match number::<u16>(&year)? {
        Some(y) => state.store().read_year_json(y)?,
        None => None,
    };

    let content = content.ok_or_else(|| {
        AppError::NotFound(format!(
            "Calendar data for year {} not found. Please run the scraper for this year.",
            year
        ))
    })?;

    Ok(json_file(content))
}

/// GET /calendar/:year/:month - One month
async fn month_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let content = match (number::<u16>(&year)?, number::<u8>(&month)?) {
        (Some(y), Some(m)) => state.store().read_month_json(y, m)?,
        _ => None,
    };

    let content = content.ok_or_else(|| {
        AppError::NotFound(format!(
            "Calendar data for {}/{} not found. Please run the scraper for this year.",
            year, month
        ))
    })?;

    Ok(json_file(content))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use patro_core::store::Store;
    use patro_core::{MonthRecord, YearRecord};
    use tower::ServiceExt;

    use crate::routes::app;
    use crate::state::AppState;

    async fn get(dir: &tempfile::TempDir, uri: &str) -> (StatusCode, String) {
        let app = app(AppState::new(Store::new(dir.path())));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_returns_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(&dir, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome to the Nepali Calendar API"));
    }

    #[tokio::test]
    async fn year_returns_exact_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let year: YearRecord = (1..=12).map(|m| (m, MonthRecord::default())).collect();
        store.save_year(2085, &year).unwrap();
        let on_disk = std::fs::read_to_string(dir.path().join("2085.json")).unwrap();

        let (status, body) = get(&dir, "/calendar/2085").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, on_disk);
    }

    #[tokio::test]
    async fn missing_year_is_404_naming_the_year() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(&dir, "/calendar/2099").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["detail"].as_str().unwrap().contains("year 2099"));
    }

    #[tokio::test]
    async fn month_returns_exact_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let mut month = MonthRecord::default();
        month.metadata.np = "माघ २०८१".into();
        store.save_month(2081, 10, &month).unwrap();
        let on_disk = std::fs::read_to_string(dir.path().join("2081").join("10.json")).unwrap();

        let (status, body) = get(&dir, "/calendar/2081/10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, on_disk);
        assert!(body.contains("माघ २०८१"));
    }

    #[tokio::test]
    async fn missing_month_is_404_naming_year_and_month() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(&dir, "/calendar/2081/13").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("2081/13"));
    }

    #[tokio::test]
    async fn out_of_range_numbers_are_404_not_400() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = get(&dir, "/calendar/70000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("year 70000"));

        let (status, body) = get(&dir, "/calendar/2081/300").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("2081/300"));
    }

    #[tokio::test]
    async fn non_numeric_year_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = get(&dir, "/calendar/next").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

use nftdb_domain::{Nft, NftId};
use nftdb_shared::{messages, parse_id_list, routes as paths, BatchQuery, NftData};

use crate::app::App;
use crate::use_cases::nfts::NftError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route(paths::HEALTH, get(health))
        .nest(paths::RECORDS, record_routes())
        .nest(paths::LEGACY_RECORDS, record_routes())
}

fn record_routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(list_nfts).post(create_nfts).put(update_nfts))
        .route(paths::BATCH, get(get_nfts_batch))
        .route(paths::RESET, put(reset_nfts))
        .route("/{id}", get(get_nft))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Queries
// =============================================================================

async fn list_nfts(State(app): State<Arc<App>>) -> Result<Json<Vec<NftData>>, ApiError> {
    let nfts = app.use_cases.nfts.query.list().await?;
    Ok(Json(nfts.iter().map(NftData::from).collect()))
}

async fn get_nft(
    State(app): State<Arc<App>>,
    Path(raw_id): Path<String>,
) -> Result<Json<NftData>, ApiError> {
    let id: NftId = raw_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Error: Invalid Id {raw_id:?}")))?;

    let nft = app
        .use_cases
        .nfts
        .query
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Error: No NFT found with id {id}")))?;
    Ok(Json(NftData::from(nft)))
}

async fn get_nfts_batch(
    State(app): State<Arc<App>>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<Vec<NftData>>, ApiError> {
    let ids = parse_id_list(query.ids.as_deref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let nfts = app.use_cases.nfts.query.get_batch(&ids).await?;
    Ok(Json(nfts.iter().map(NftData::from).collect()))
}

// =============================================================================
// Batch Sync
// =============================================================================

async fn create_nfts(
    State(app): State<Arc<App>>,
    payload: Result<Json<Vec<NftData>>, JsonRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let nfts = decode_records(payload, messages::CREATE_FAILED)?;

    app.use_cases
        .nfts
        .sync
        .create(nfts)
        .await
        .map_err(|e| rejected("create", e, messages::CREATE_FAILED))?;
    Ok((StatusCode::CREATED, messages::CREATED))
}

async fn update_nfts(
    State(app): State<Arc<App>>,
    payload: Result<Json<Vec<NftData>>, JsonRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let nfts = decode_records(payload, messages::UPDATE_FAILED)?;

    app.use_cases
        .nfts
        .sync
        .update_or_insert(nfts)
        .await
        .map_err(|e| rejected("update", e, messages::UPDATE_FAILED))?;
    Ok((StatusCode::OK, messages::UPDATED))
}

async fn reset_nfts(
    State(app): State<Arc<App>>,
    payload: Result<Json<Vec<i32>>, JsonRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let Json(raw_ids) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected reset body");
        ApiError::BadRequest(messages::RESET_FAILED.to_string())
    })?;
    let ids: Vec<NftId> = raw_ids.into_iter().map(NftId::new).collect();

    app.use_cases
        .nfts
        .sync
        .reset(&ids)
        .await
        .map_err(|e| rejected("reset", e, messages::RESET_FAILED))?;
    Ok((StatusCode::OK, messages::RESET))
}

fn decode_records(
    payload: Result<Json<Vec<NftData>>, JsonRejection>,
    failure: &'static str,
) -> Result<Vec<Nft>, ApiError> {
    let Json(records) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected record body");
        ApiError::BadRequest(failure.to_string())
    })?;
    Ok(records.iter().map(NftData::to_domain).collect())
}

fn rejected(operation: &'static str, error: NftError, failure: &'static str) -> ApiError {
    tracing::warn!(operation, error = %error, "NFT sync failed");
    ApiError::BadRequest(failure.to_string())
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<NftError> for ApiError {
    fn from(e: NftError) -> Self {
        match e {
            NftError::NotFound { .. } => ApiError::NotFound(messages::BATCH_NOT_FOUND.to_string()),
            NftError::InvalidInput(msg) => ApiError::BadRequest(msg),
            NftError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request as HttpRequest},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::infrastructure::config::SeedConfig;
    use crate::infrastructure::persistence::InMemoryNftRepo;
    use crate::infrastructure::ports::{MockNftRepo, NftRepo, RepoError};
    use crate::infrastructure::random::SystemRandom;

    fn app_with(repo: Arc<dyn NftRepo>) -> Router {
        let app = App::new(repo, Arc::new(SystemRandom::new()), SeedConfig::default());
        routes().with_state(Arc::new(app))
    }

    /// Router over an in-memory store holding ids `0..count`.
    fn seeded_app(count: i32) -> (Router, Arc<InMemoryNftRepo>) {
        let repo = Arc::new(InMemoryNftRepo::with_records((0..count).map(|id| Nft {
            chp: 10 + id,
            nft_type: "2".to_string(),
            ..Nft::new(NftId::new(id))
        })));
        (app_with(repo.clone()), repo)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let mut builder = HttpRequest::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn body_records(response: Response) -> Vec<NftData> {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn record_ids(records: &[NftData]) -> Vec<i32> {
        records.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let (app, _) = seeded_app(0);
        let response = send(app, Method::GET, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn lists_every_record_under_both_mounts() {
        let (app, _) = seeded_app(4);

        let response = send(app.clone(), Method::GET, "/records", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(record_ids(&body_records(response).await), vec![0, 1, 2, 3]);

        let response = send(app, Method::GET, "/api/nfts", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_records(response).await.len(), 4);
    }

    #[tokio::test]
    async fn get_one_record() {
        let (app, _) = seeded_app(10);

        let response = send(app.clone(), Method::GET, "/records/5", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let record: NftData = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.chp, 15);

        let response = send(app.clone(), Method::GET, "/records/42", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(app, Method::GET, "/records/five", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn batch_lookup_is_all_or_nothing() {
        let (app, _) = seeded_app(10);

        let response = send(app.clone(), Method::GET, "/records/batch?ids=2,6,9", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(record_ids(&body_records(response).await), vec![2, 6, 9]);

        let response = send(app.clone(), Method::GET, "/records/batch?ids=2,60,9", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, messages::BATCH_NOT_FOUND);

        for uri in ["/records/batch", "/records/batch?ids=", "/records/batch?ids=2,x"] {
            let response = send(app.clone(), Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn create_returns_created_and_rejects_duplicates() {
        let (app, repo) = seeded_app(2);

        let response = send(
            app.clone(),
            Method::POST,
            "/records",
            Some(r#"[{"Id": 7, "CHP": 1000}, {"Id": 8, "CHP": 1000}]"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_text(response).await, messages::CREATED);
        assert_eq!(repo.count().await.unwrap(), 4);

        let response = send(
            app,
            Method::POST,
            "/records",
            Some(r#"[{"Id": 9}, {"Id": 1}]"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, messages::CREATE_FAILED);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn update_merges_into_stored_records() {
        let (app, repo) = seeded_app(10);

        let response = send(
            app,
            Method::PUT,
            "/records",
            Some(r#"[{"Id": 3, "CHP": 1000, "Type": "9", "SpriteSheetLink": "s3"}]"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, messages::UPDATED);

        let stored = repo.get(NftId::new(3)).await.unwrap().unwrap();
        assert_eq!(stored.chp, 1000);
        assert_eq!(stored.nft_type, "9");
        assert_eq!(stored.sprite_sheet_link, "s3");
        assert_eq!(repo.get(NftId::new(4)).await.unwrap().unwrap().chp, 14);
    }

    #[tokio::test]
    async fn reset_zeroes_requested_records() {
        let (app, repo) = seeded_app(10);

        let response = send(app.clone(), Method::PUT, "/records/reset", Some("[3, 5, 7, 99]")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, messages::RESET);

        for nft in repo.list_all().await.unwrap() {
            assert_eq!(nft.is_reset(), matches!(nft.id.get(), 3 | 5 | 7));
        }

        let response = send(app, Method::PUT, "/records/reset", Some(r#"["3"]"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, messages::RESET_FAILED);
    }

    #[tokio::test]
    async fn invalid_bodies_are_bad_requests() {
        let (app, _) = seeded_app(1);

        let response = send(app.clone(), Method::POST, "/records", Some(r#"[{"CHP": 5}]"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, messages::CREATE_FAILED);

        let response = send(app, Method::PUT, "/records", Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, messages::UPDATE_FAILED);
    }

    #[tokio::test]
    async fn store_failures_on_reads_do_not_leak_details() {
        let mut repo = MockNftRepo::new();
        repo.expect_list_all()
            .returning(|| Err(RepoError::database("list_all", "secret path /var/db")));

        let response = send(app_with(Arc::new(repo)), Method::GET, "/records", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal error");
    }
}

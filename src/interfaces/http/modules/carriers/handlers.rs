//! Carrier handlers

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};

use super::dto::{CarrierDto, CreateCarrierRequest, ListCarriersParams, UpdateCarrierRequest};
use crate::application::CarrierService;
use crate::interfaces::http::common::{ApiError, ApiResponse, BindQuery, ValidatedJson};
use crate::shared::PaginatedResult;

pub const CARRIERS_PATH: &str = "/api/v1/carriers";

#[derive(Clone)]
pub struct CarrierHandlerState {
    pub service: Arc<CarrierService>,
}

/// Routes mounted under [`CARRIERS_PATH`]
pub fn carrier_routes(state: CarrierHandlerState) -> Router {
    Router::new()
        .route("/", get(list_carriers).post(create_carrier))
        .route(
            "/{id}",
            get(get_carrier).put(update_carrier).delete(delete_carrier),
        )
        .with_state(state)
}

/// List carriers, one page at a time.
///
/// `next` / `previous` are built from the URL of this request with only the
/// `page` and `pageSize` values changed.
#[utoipa::path(
    get,
    path = "/api/v1/carriers",
    tag = "Carriers",
    params(ListCarriersParams),
    responses(
        (status = 200, description = "Page of carriers", body = PaginatedResult<CarrierDto>),
        (status = 400, description = "Malformed parameter or unsupported sortBy", body = ApiResponse<String>),
        (status = 500, description = "Storage failure", body = ApiResponse<String>)
    )
)]
pub async fn list_carriers(
    State(state): State<CarrierHandlerState>,
    OriginalUri(uri): OriginalUri,
    BindQuery(params): BindQuery<ListCarriersParams>,
) -> Result<Json<PaginatedResult<CarrierDto>>, ApiError> {
    let page = state
        .service
        .list(params.into(), &uri.to_string())
        .await?;
    Ok(Json(page.map(CarrierDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/carriers/{id}",
    tag = "Carriers",
    params(("id" = String, Path, description = "Carrier id")),
    responses(
        (status = 200, description = "Carrier details", body = ApiResponse<CarrierDto>),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_carrier(
    State(state): State<CarrierHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CarrierDto>>, ApiError> {
    let carrier = state.service.get(&id).await?;
    Ok(Json(ApiResponse::success(carrier.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/carriers",
    tag = "Carriers",
    request_body = CreateCarrierRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CarrierDto>),
        (status = 400, description = "Malformed JSON", body = ApiResponse<String>),
        (status = 422, description = "Validation error", body = ApiResponse<String>)
    )
)]
pub async fn create_carrier(
    State(state): State<CarrierHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCarrierRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<CarrierDto>>,
    ),
    ApiError,
> {
    let carrier = state.service.create(request.into()).await?;
    let location = format!("{}/{}", CARRIERS_PATH, carrier.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(carrier.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/carriers/{id}",
    tag = "Carriers",
    params(("id" = String, Path, description = "Carrier id")),
    request_body = UpdateCarrierRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CarrierDto>),
        (status = 404, description = "Not found", body = ApiResponse<String>),
        (status = 422, description = "Validation error", body = ApiResponse<String>)
    )
)]
pub async fn update_carrier(
    State(state): State<CarrierHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCarrierRequest>,
) -> Result<Json<ApiResponse<CarrierDto>>, ApiError> {
    let carrier = state.service.update(&id, request.into()).await?;
    Ok(Json(ApiResponse::success(carrier.into())))
}

/// Delete a carrier. Deleting an unknown id succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/carriers/{id}",
    tag = "Carriers",
    params(("id" = String, Path, description = "Carrier id")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<String>)
    )
)]
pub async fn delete_carrier(
    State(state): State<CarrierHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state.service.delete(&id).await?;
    Ok(Json(ApiResponse::success(format!("Carrier {} deleted", id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::carrier::model::fixtures;
    use crate::domain::{CarrierPage, ProjectedCarrier};
    use crate::infrastructure::storage::InMemoryCarrierRepository;
    use crate::test_support::StubCarrierRepository;
    use axum::body::Body;
    use axum::http::{HeaderMap, Request};
    use serde_json::{json, Value};
    use std::num::NonZeroU64;
    use tower::ServiceExt;

    fn app_with(repo: Arc<dyn crate::domain::CarrierRepository>) -> Router {
        let service = Arc::new(CarrierService::new(repo, NonZeroU64::new(100).unwrap()));
        Router::new().nest(CARRIERS_PATH, carrier_routes(CarrierHandlerState { service }))
    }

    fn stub_with(records: usize) -> Arc<StubCarrierRepository> {
        Arc::new(StubCarrierRepository::with_page(CarrierPage {
            records: (0..records)
                .map(|i| ProjectedCarrier {
                    id: format!("carrier-{i}"),
                    name: Some(format!("Carrier {i}")),
                    ..Default::default()
                })
                .collect(),
            total: records as u64,
        }))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, json)
    }

    fn create_body(name: &str) -> Value {
        json!({
            "name": name,
            "dba": "FH",
            "physicalAddress": {
                "line1": "100 Main St",
                "local": "Columbus",
                "region": "Ohio",
                "postalCode": "43215",
                "country": "US",
                "type": "work"
            },
            "mailingAddress": {
                "line1": "PO Box 42",
                "locality": "Columbus",
                "region": "Ohio",
                "postalCode": "43215",
                "country": "US",
                "type": "billing"
            },
            "insurance": [{
                "policyHolder": name,
                "policyNumber": "POL-1",
                "insurer": "Acme Mutual",
                "insuranceType": "Cargo",
                "amount": 250000.0,
                "effectiveDate": "2024-01-01",
                "expirationDate": "2025-01-01"
            }],
            "identificationCodes": [{ "type": "USDOT", "code": "1234567" }]
        })
    }

    #[tokio::test]
    async fn first_full_page_links_forward_only() {
        let stub = stub_with(2);
        let (status, _, body) = send(
            app_with(stub.clone()),
            "GET",
            "http://localhost:3000/api/v1/carriers?pageSize=2&page=0",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pageSize"], 2);
        assert_eq!(body["page"], 0);
        assert_eq!(body["next"], "http://localhost:3000/api/v1/carriers?pageSize=2&page=1");
        assert_eq!(body["previous"], "");
        assert_eq!(body["entities"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn full_middle_page_links_both_ways() {
        let (status, _, body) = send(
            app_with(stub_with(2)),
            "GET",
            "http://localhost:3000/api/v1/carriers?pageSize=2&page=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["pages"], 1);
        assert_eq!(body["next"], "http://localhost:3000/api/v1/carriers?pageSize=2&page=3");
        assert_eq!(body["previous"], "http://localhost:3000/api/v1/carriers?pageSize=2&page=1");
    }

    #[tokio::test]
    async fn short_page_has_empty_next() {
        let (_, _, body) = send(
            app_with(stub_with(1)),
            "GET",
            "http://localhost:3000/api/v1/carriers?pageSize=2&page=2",
            None,
        )
        .await;

        assert_eq!(body["next"], "");
        assert_eq!(body["previous"], "http://localhost:3000/api/v1/carriers?pageSize=2&page=1");
    }

    #[tokio::test]
    async fn default_page_size_and_untouched_query_layout() {
        let stub = stub_with(11);
        let (status, _, body) = send(
            app_with(stub.clone()),
            "GET",
            "http://localhost:3000/api/v1/carriers?&page=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["next"], "http://localhost:3000/api/v1/carriers?&page=3");
        assert_eq!(body["previous"], "http://localhost:3000/api/v1/carriers?&page=1");
        assert_eq!(stub.last_query().unwrap().page_size.get(), 10);
    }

    #[tokio::test]
    async fn non_numeric_page_is_rejected_before_storage() {
        let stub = stub_with(2);
        let (status, _, body) =
            send(app_with(stub.clone()), "GET", "/api/v1/carriers?page=two", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_sort_is_rejected_before_storage() {
        let stub = stub_with(2);
        let (status, _, body) =
            send(app_with(stub.clone()), "GET", "/api/v1/carriers?sortBy=insurer", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "insurer is not a valid sortBy option");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let stub = Arc::new(StubCarrierRepository::failing("connection refused"));
        let (status, _, body) = send(app_with(stub), "GET", "/api/v1/carriers", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Storage error: connection refused");
    }

    #[tokio::test]
    async fn projection_omits_unrequested_attributes() {
        let repo = Arc::new(InMemoryCarrierRepository::new());
        let app = app_with(repo.clone());
        for name in ["Bravo", "Alpha"] {
            let (status, _, _) = send(app.clone(), "POST", "/api/v1/carriers", Some(create_body(name))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _, body) = send(
            app,
            "GET",
            "/api/v1/carriers?sortBy=name&fields=name,password",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        let first = body["entities"][0].as_object().unwrap();
        assert_eq!(first["name"], "Alpha");
        assert!(first.contains_key("id"));
        assert!(!first.contains_key("dba"));
        assert!(!first.contains_key("password"));
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_carrier_is_404() {
        let (status, _, body) = send(app_with(stub_with(0)), "GET", "/api/v1/carriers/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn get_existing_carrier() {
        let carrier = fixtures::carrier("Swift Haulers");
        let stub = Arc::new(StubCarrierRepository::with_page(CarrierPage::default()).with_carrier(carrier.clone()));

        let (status, _, body) = send(
            app_with(stub),
            "GET",
            &format!("/api/v1/carriers/{}", carrier.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Swift Haulers");
        assert_eq!(body["data"]["identificationCodes"][0]["type"], "MC");
        assert_eq!(body["data"]["physicalAddress"]["type"], "work");
    }

    #[tokio::test]
    async fn create_update_delete_round_trip() {
        let app = app_with(Arc::new(InMemoryCarrierRepository::new()));

        let (status, headers, body) =
            send(app.clone(), "POST", "/api/v1/carriers", Some(create_body("Freight Hub"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(headers[header::LOCATION], format!("/api/v1/carriers/{id}"));
        assert_eq!(body["data"]["status"], "Active");
        assert_eq!(body["data"]["physicalAddress"]["locality"], "Columbus");

        let uri = format!("/api/v1/carriers/{id}");
        let (status, _, body) = send(app.clone(), "PUT", &uri, Some(json!({"status": "Suspended"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Suspended");
        assert_eq!(body["data"]["name"], "Freight Hub");

        let (status, _, _) = send(app.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = send(app.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_body_is_422_with_field_path() {
        let mut body = create_body("Freight Hub");
        body["insurance"][0]["amount"] = json!(0.0);
        body["identificationCodes"] = json!([]);

        let (status, _, resp) = send(
            app_with(Arc::new(InMemoryCarrierRepository::new())),
            "POST",
            "/api/v1/carriers",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = resp["error"].as_str().unwrap();
        assert!(message.contains("insurance[0].amount"), "{message}");
        assert!(message.contains(": length"), "{message}");
    }

    #[tokio::test]
    async fn expired_before_effective_is_422() {
        let mut body = create_body("Freight Hub");
        body["insurance"][0]["expirationDate"] = json!("2023-06-01");

        let (status, _, _) = send(
            app_with(Arc::new(InMemoryCarrierRepository::new())),
            "POST",
            "/api/v1/carriers",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_enum_value_is_400() {
        let mut body = create_body("Freight Hub");
        body["identificationCodes"][0]["type"] = json!("DUNS");

        let (status, _, _) = send(
            app_with(Arc::new(InMemoryCarrierRepository::new())),
            "POST",
            "/api/v1/carriers",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_positive_page_size_falls_back_to_ten_in_body_and_links() {
        let stub = stub_with(10);
        let (status, _, body) = send(
            app_with(stub.clone()),
            "GET",
            "/api/v1/carriers?pageSize=0&page=1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["next"], "/api/v1/carriers?pageSize=10&page=2");
        assert_eq!(body["previous"], "/api/v1/carriers?pageSize=10&page=0");
        assert_eq!(stub.last_query().unwrap().page_size.get(), 10);

        let (status, _, body) = send(
            app_with(stub_with(10)),
            "GET",
            "/api/v1/carriers?pageSize=-5&page=0",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["next"], "/api/v1/carriers?pageSize=10&page=1");
        assert_eq!(body["previous"], "");
    }

    #[tokio::test]
    async fn negative_page_is_served_as_first_page() {
        let stub = stub_with(2);
        let (status, _, body) = send(
            app_with(stub.clone()),
            "GET",
            "/api/v1/carriers?page=-3&pageSize=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 0);
        assert_eq!(body["previous"], "");
        assert_eq!(body["next"], "/api/v1/carriers?page=1&pageSize=2");
        assert_eq!(stub.last_query().unwrap().page, 0);
    }

    #[tokio::test]
    async fn include_is_an_alias_of_fields_and_merges_with_it() {
        let app = app_with(Arc::new(InMemoryCarrierRepository::new()));
        let (status, _, _) = send(app.clone(), "POST", "/api/v1/carriers", Some(create_body("Alpha"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _, body) = send(app.clone(), "GET", "/api/v1/carriers?include=dba", None).await;
        assert_eq!(status, StatusCode::OK);
        let record = body["entities"][0].as_object().unwrap();
        assert_eq!(record["dba"], "FH");
        assert!(record.contains_key("id"));
        assert_eq!(record.len(), 2);

        let (status, _, body) = send(app, "GET", "/api/v1/carriers?fields=name&include=status", None).await;
        assert_eq!(status, StatusCode::OK);
        let record = body["entities"][0].as_object().unwrap();
        assert_eq!(record["name"], "Alpha");
        assert_eq!(record["status"], "Active");
        assert!(!record.contains_key("dba"));
        assert_eq!(record.len(), 3);
    }

    #[tokio::test]
    async fn page_at_integer_limit_returns_empty_page() {
        let app = app_with(Arc::new(InMemoryCarrierRepository::new()));
        let (status, _, _) = send(app.clone(), "POST", "/api/v1/carriers", Some(create_body("Alpha"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _, body) = send(
            app,
            "GET",
            "/api/v1/carriers?page=9223372036854775807&pageSize=10",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert!(body["entities"].as_array().unwrap().is_empty());
        assert_eq!(body["next"], "");
        assert_eq!(
            body["previous"],
            "/api/v1/carriers?page=9223372036854775806&pageSize=10"
        );
    }

    #[tokio::test]
    async fn page_values_links_cannot_rewrite_are_rejected() {
        for uri in [
            "/api/v1/carriers?page=",
            "/api/v1/carriers?page=+1",
            "/api/v1/carriers?page=%201",
            "/api/v1/carriers?pageSize=+5",
            "/api/v1/carriers?page=-",
            "/api/v1/carriers?page=99999999999999999999",
        ] {
            let stub = stub_with(2);
            let (status, _, body) = send(app_with(stub.clone()), "GET", uri, None).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], false, "{uri}");
            assert_eq!(stub.calls(), 0, "{uri}");
        }
    }
}

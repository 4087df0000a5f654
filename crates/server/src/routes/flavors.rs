use axum::{extract::{Path, State}, Json};
use common::ids::parse_lenient_id;
use service::{DeletedFlavor, Flavor, FlavorInput, ServiceError};
use tracing::debug;

use crate::errors::ApiError;
use crate::extract::LenientJson;
use crate::metrics;
use crate::routes::AppState;

fn outcome<T, E>(op: &str, res: &Result<T, E>) {
    metrics::record(op, if res.is_ok() { "ok" } else { "not_found" });
}

/// Path ids with no leading digits cannot match any record.
fn lookup_id(raw: &str) -> Result<i64, ApiError> {
    parse_lenient_id(raw).ok_or_else(|| {
        debug!(raw_id = %raw, "path id is not numeric");
        ApiError::from(ServiceError::not_found("flavor"))
    })
}

/// GET /api/flavors
pub async fn list_flavors(State(state): State<AppState>) -> Json<Vec<Flavor>> {
    metrics::record("list", "ok");
    Json(state.store.list().await)
}

/// POST /api/flavors
pub async fn create_flavor(
    State(state): State<AppState>,
    LenientJson(input): LenientJson<FlavorInput>,
) -> Json<Flavor> {
    metrics::record("create", "ok");
    Json(state.store.create(input).await)
}

/// GET /api/flavors/:id
pub async fn get_flavor(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Flavor>, ApiError> {
    let res = match lookup_id(&raw) {
        Ok(id) => state.store.get(id).await.ok_or(ApiError::NotFound),
        Err(e) => Err(e),
    };
    outcome("get", &res);
    res.map(Json)
}

/// PUT /api/flavors/:id
pub async fn update_flavor(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    LenientJson(input): LenientJson<FlavorInput>,
) -> Result<Json<Flavor>, ApiError> {
    let res = match lookup_id(&raw) {
        Ok(id) => state.store.update(id, input).await.map_err(ApiError::from),
        Err(e) => Err(e),
    };
    outcome("update", &res);
    res.map(Json)
}

/// DELETE /api/flavors/:id
pub async fn delete_flavor(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DeletedFlavor>, ApiError> {
    let res = match lookup_id(&raw) {
        Ok(id) => state.store.delete(id).await.map_err(ApiError::from),
        Err(e) => Err(e),
    };
    outcome("delete", &res);
    res.map(|deleted| Json(DeletedFlavor::from(deleted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::MemoryFlavorStore;

    fn state() -> AppState {
        AppState::new(MemoryFlavorStore::seeded())
    }

    #[tokio::test]
    async fn list_returns_seed() {
        let Json(list) = list_flavors(State(state())).await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Flavor::new(1, "strawberry"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let res = update_flavor(State(state()), Path("abc".into()), LenientJson(FlavorInput::new("x"))).await;
        assert_eq!(res.unwrap_err(), ApiError::NotFound);
    }

    #[tokio::test]
    async fn numeric_prefix_is_used() {
        let st = state();
        let Json(updated) = update_flavor(State(st.clone()), Path("1abc".into()), LenientJson(FlavorInput::new("banana")))
            .await
            .unwrap();
        assert_eq!(updated, Flavor::new(1, "banana"));
    }

    #[tokio::test]
    async fn delete_wraps_record() {
        let Json(body) = delete_flavor(State(state()), Path("2".into())).await.unwrap();
        assert_eq!(body.message, "Flavor deleted successfully");
        assert_eq!(body.deleted, Flavor::new(2, "mint chocolate"));
    }
}

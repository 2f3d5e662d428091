//! # REST API Handlers
//!
//! Each handler runs its storage work inside one transaction and shapes the
//! result with the endpoint's projection.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Deserializer};

use crate::model::{Id, NewHeroPower};
use crate::serialize::{projections, Entity, Serializer, Shaped};
use crate::storage::{Relations, Store};
use crate::validation::ValidationError;

use super::errors::{ApiError, ApiResult};

/// State shared by all handlers
#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub serializer: Serializer,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            serializer: Serializer::new(),
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Body of `PATCH /powers/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePowerRequest {
    /// Absent: leave unchanged. `null`: rejected like an empty string.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Body of `POST /hero_powers`
#[derive(Debug, Deserialize)]
pub struct CreateHeroPowerRequest {
    pub strength: String,
    pub hero_id: Id,
    pub power_id: Id,
}

/// Maps a present field (even `null`) to `Some`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Only plain digit strings name a row; anything else reads as "not found"
fn parse_id(raw: &str, entity: &'static str) -> ApiResult<Id> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound(entity));
    }
    raw.parse().map_err(|_| ApiError::NotFound(entity))
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

pub async fn list_heroes(State(state): State<SharedState>) -> ApiResult<Json<Vec<Shaped>>> {
    let shaped = state.store.read(|tx| -> ApiResult<Vec<Shaped>> {
        Ok(state
            .serializer
            .serialize_all(tx.heroes()?, &projections::hero_list(), tx)?)
    })?;
    Ok(Json(shaped))
}

pub async fn get_hero(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shaped>> {
    let id = parse_id(&id, "Hero")?;
    let shaped = state.store.read(|tx| -> ApiResult<Shaped> {
        let hero = tx.hero(id)?.ok_or(ApiError::NotFound("Hero"))?;
        Ok(state
            .serializer
            .serialize(&Entity::from(hero), &projections::hero_detail(), tx)?)
    })?;
    Ok(Json(shaped))
}

pub async fn list_powers(State(state): State<SharedState>) -> ApiResult<Json<Vec<Shaped>>> {
    let shaped = state.store.read(|tx| -> ApiResult<Vec<Shaped>> {
        Ok(state
            .serializer
            .serialize_all(tx.powers()?, &projections::power_list(), tx)?)
    })?;
    Ok(Json(shaped))
}

pub async fn get_power(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shaped>> {
    let id = parse_id(&id, "Power")?;
    let shaped = state.store.read(|tx| -> ApiResult<Shaped> {
        let power = tx.power(id)?.ok_or(ApiError::NotFound("Power"))?;
        Ok(state
            .serializer
            .serialize(&Entity::from(power), &projections::power_detail(), tx)?)
    })?;
    Ok(Json(shaped))
}

pub async fn update_power(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePowerRequest>,
) -> ApiResult<Json<Shaped>> {
    let id = parse_id(&id, "Power")?;
    let shaped = state.store.write(|tx| -> ApiResult<Shaped> {
        let mut power = tx.power(id)?.ok_or(ApiError::NotFound("Power"))?;
        if let Some(description) = body.description {
            power.set_description(description.unwrap_or_default())?;
            tx.update_power(&power)?;
        }
        Ok(state
            .serializer
            .serialize(&Entity::from(power), &projections::power_updated(), tx)?)
    })?;
    Ok(Json(shaped))
}

pub async fn create_hero_power(
    State(state): State<SharedState>,
    Json(body): Json<CreateHeroPowerRequest>,
) -> ApiResult<Json<Shaped>> {
    let draft = NewHeroPower::new(&body.strength, body.hero_id, body.power_id)?;
    let shaped = state.store.write(|tx| -> ApiResult<Shaped> {
        if tx.hero(draft.hero_id())?.is_none() {
            return Err(ValidationError::missing_reference("hero_id", draft.hero_id()).into());
        }
        if tx.power(draft.power_id())?.is_none() {
            return Err(ValidationError::missing_reference("power_id", draft.power_id()).into());
        }
        let hero_power = tx.create_hero_power(&draft)?;
        Ok(state.serializer.serialize(
            &Entity::from(hero_power),
            &projections::hero_power_created(),
            tx,
        )?)
    })?;
    Ok(Json(shaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7", "Hero").unwrap(), 7);
        assert!(matches!(parse_id("abc", "Hero"), Err(ApiError::NotFound("Hero"))));
    }

    #[test]
    fn test_parse_id_rejects_signs_and_overflow() {
        for raw in ["+1", "-1", " 1", "1.0", "", "99999999999999999999"] {
            assert!(
                matches!(parse_id(raw, "Power"), Err(ApiError::NotFound("Power"))),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdatePowerRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: UpdatePowerRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: UpdatePowerRequest =
            serde_json::from_str(r#"{"description": "This is a valid description."}"#).unwrap();
        assert_eq!(
            set.description,
            Some(Some("This is a valid description.".to_string()))
        );
    }
}

use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use survey_instruments::{InstrumentDefinition, all_definitions, find_definition};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: &'static str,
    name: &'static str,
    title: &'static str,
    item_count: usize,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments = all_definitions()
        .iter()
        .map(|d| InstrumentSummary {
            id: d.id.as_str(),
            name: d.name,
            title: d.title,
            item_count: d.item_count(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<&'static InstrumentDefinition>, ApiError> {
    let definition = find_definition(&id)
        .map_err(|_| ApiError::NotFound(format!("instrument not found: {id}")))?;
    Ok(Json(definition))
}

//! Permission-less CRUD shared by every [`Record`] type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;

use crate::{
    app_state::{AppState, RecordStoreProvider},
    domain::{APIError, Record, RecordStoreError},
    DataResponse,
};

fn not_found<R: Record>() -> APIError {
    APIError::NotFound(Some(format!("{} not found", R::DISPLAY_NAME)))
}

fn record_store_error<R: Record>(e: RecordStoreError) -> APIError {
    match e {
        RecordStoreError::RecordNotFound => not_found::<R>(),
        e => APIError::UnexpectedError(eyre!(e)),
    }
}

fn parse_id<R: Record>(raw: &str) -> Result<R::Id, APIError> {
    R::parse_id(raw).map_err(|_| not_found::<R>())
}

#[tracing::instrument(name = "List records", skip_all)]
pub async fn list_records<R: Record>(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DataResponse<Vec<R>>>), APIError>
where
    AppState: RecordStoreProvider<R>,
{
    let records = RecordStoreProvider::<R>::record_store(&state)
        .read()
        .await
        .list()
        .await
        .map_err(record_store_error::<R>)?;

    Ok((StatusCode::OK, DataResponse::new(records)))
}

#[tracing::instrument(name = "Get record", skip_all)]
pub async fn get_record<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<R>>), APIError>
where
    AppState: RecordStoreProvider<R>,
{
    let id = parse_id::<R>(&id)?;

    let record = RecordStoreProvider::<R>::record_store(&state)
        .read()
        .await
        .get(&id)
        .await
        .map_err(record_store_error::<R>)?;

    Ok((StatusCode::OK, DataResponse::new(record)))
}

#[tracing::instrument(name = "Create record", skip_all)]
pub async fn create_record<R: Record>(
    State(state): State<AppState>,
    Json(input): Json<R::Input>,
) -> Result<(StatusCode, Json<DataResponse<R>>), APIError>
where
    AppState: RecordStoreProvider<R>,
{
    let record = R::from_input(R::Id::default(), input)?;

    RecordStoreProvider::<R>::record_store(&state)
        .write()
        .await
        .add(record.clone())
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::CREATED, DataResponse::new(record)))
}

#[tracing::instrument(name = "Update record", skip_all)]
pub async fn update_record<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<R::Input>,
) -> Result<(StatusCode, Json<DataResponse<R>>), APIError>
where
    AppState: RecordStoreProvider<R>,
{
    let id = parse_id::<R>(&id)?;
    let store = RecordStoreProvider::<R>::record_store(&state);

    store
        .read()
        .await
        .get(&id)
        .await
        .map_err(record_store_error::<R>)?;

    let record = R::from_input(id, input)?;

    store
        .write()
        .await
        .replace(record.clone())
        .await
        .map_err(record_store_error::<R>)?;

    Ok((StatusCode::OK, DataResponse::new(record)))
}

#[tracing::instrument(name = "Delete record", skip_all)]
pub async fn delete_record<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<R>>), APIError>
where
    AppState: RecordStoreProvider<R>,
{
    let id = parse_id::<R>(&id)?;

    let record = RecordStoreProvider::<R>::record_store(&state)
        .write()
        .await
        .delete(&id)
        .await
        .map_err(record_store_error::<R>)?;

    Ok((StatusCode::OK, DataResponse::new(record)))
}

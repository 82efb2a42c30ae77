use axum::{
    body::Body,
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use tracing::{info, warn};

use super::{ApiError, ApiResponse, ApiResult};
use crate::database::entities::{case_stats_batch, case_stats_detail};
use crate::errors::CaseStatsError;
use crate::server::app::AppState;
use crate::services::{BatchAnalysis, ImportSummary};

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const UPLOAD_FIELD: &str = "file";

pub async fn import_excel(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<ImportSummary> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("Invalid upload: {}", err)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(format!("Invalid upload: {}", err)))?;
        info!(
            "Received upload {} ({} bytes)",
            file_name.as_deref().unwrap_or("<unnamed>"),
            bytes.len()
        );
        upload = Some(bytes);
        break;
    }

    let bytes = upload.ok_or(CaseStatsError::EmptyFile)?;
    let summary = state.service.import_excel(bytes.to_vec()).await?;
    Ok(ApiResponse::success(summary))
}

pub async fn list_batches(State(state): State<AppState>) -> ApiResult<Vec<case_stats_batch::Model>> {
    Ok(ApiResponse::success(state.service.list_batches().await?))
}

pub async fn list_details(
    State(state): State<AppState>,
    batch_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<case_stats_detail::Model>> {
    let Path(batch_id) = batch_id?;
    Ok(ApiResponse::success(state.service.list_details(batch_id).await?))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    batch_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<BatchAnalysis> {
    let Path(batch_id) = batch_id?;
    Ok(ApiResponse::success(state.service.get_analysis(batch_id).await?))
}

pub async fn regenerate_report(
    State(state): State<AppState>,
    batch_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<BatchAnalysis> {
    let Path(batch_id) = batch_id?;
    Ok(ApiResponse::success(
        state.service.regenerate_report(batch_id).await?,
    ))
}

pub async fn download_report(
    State(state): State<AppState>,
    batch_id: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(batch_id) = batch_id?;
    let report = state.service.report_file(batch_id).await?;
    let bytes = match tokio::fs::read(&report.path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Report file for batch {} unreadable: {}", batch_id, err);
            return Err(CaseStatsError::ReportFileNotFound(batch_id).into());
        }
    };

    let disposition = HeaderValue::from_str(&content_disposition(&report.file_name))
        .map_err(|_| ApiError::from(CaseStatsError::ReportFileNotFound(batch_id)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PPTX_MIME)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|err| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        })
}

/// `attachment` disposition carrying both the plain and the RFC 5987 encoded name.
pub fn content_disposition(file_name: &str) -> String {
    let plain: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && !c.is_ascii_control() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        plain,
        encode_rfc5987(file_name)
    )
}

fn encode_rfc5987(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

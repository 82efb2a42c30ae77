//! API integration tests
//!
//! Tests for the case statistics REST endpoints and the response envelope

#![cfg(feature = "server")]

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use casestats::server::app::create_app;

use common::*;

/// Create a test server with an in-memory database and a temporary report root
async fn setup_test_server() -> Result<(TestServer, TempDir)> {
    let reports = tempfile::tempdir()?;
    let app = create_app(service(reports.path()).await, Some("http://localhost:5173"))?;
    let server = TestServer::new(app)?;
    Ok((server, reports))
}

fn upload(bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(bytes).file_name("cases.xlsx"))
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["service"], "casestats");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_import_and_browse_batch() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;
    let month = this_month_date();
    let bytes = workbook(&[
        ["1", "", "浦东", "花木街道", "热线", "邻里纠纷", &month, "已办结"],
        ["", "", "", "", "", "", "", ""],
        ["2", "", "闵行", "", "来访", "", &month, "在办"],
    ]);

    let response = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(bytes))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "success");
    let data = &body["data"];
    assert_eq!(data["recordCount"], 2);
    assert!(data["batchNo"].as_str().unwrap().starts_with("BATCH-"));
    assert_eq!(data["timeTrend"][current_month_key()], 2);
    assert_eq!(data["streetTop10"]["花木街道"], 1);
    assert!(data["streetTop10"].get("").is_none());
    assert_eq!(data["districtStatus"]["闵行"]["办理中"], 1);
    assert!(data["timeChartPath"].as_str().unwrap().ends_with("time-trend.png"));
    let batch_id = data["batchId"].as_i64().unwrap();

    // List batches
    let response = server.get("/api/case-stats/batches").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let batches = body["data"].as_array().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["id"], batch_id);
    assert_eq!(batches[0]["recordCount"], 2);
    assert_eq!(
        batches[0]["reportFileUrl"],
        format!("/api/case-stats/batches/{}/report-download", batch_id)
    );

    // Details keep spreadsheet order, blank rows skipped
    let response = server
        .get(&format!("/api/case-stats/batches/{}/details", batch_id))
        .await;
    let body: Value = response.json();
    let details = body["data"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["serialNo"], "1");
    assert_eq!(details[1]["district"], "闵行");
    assert_eq!(details[1]["currentStatus"], "在办");

    // Stored analysis
    let response = server
        .get(&format!("/api/case-stats/batches/{}/analysis", batch_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["typeTop10"]["邻里纠纷"], 1);
    assert_eq!(body["data"]["timeTrend"].as_object().unwrap().len(), 6);

    Ok(())
}

#[tokio::test]
async fn test_download_report() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;
    let bytes = workbook(&[["1", "", "浦东", "花木街道", "", "邻里纠纷", "", "已办结"]]);
    let body: Value = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(bytes))
        .await
        .json();
    let batch_id = body["data"]["batchId"].as_i64().unwrap();

    let response = server
        .get(&format!("/api/case-stats/batches/{}/report-download", batch_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-type"),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"case-stats-report.pptx\"; filename*=UTF-8''case-stats-report.pptx"
    );
    let deck = response.as_bytes();
    assert_eq!(&deck[..2], b"PK");
    assert!(read_zip_part(deck, "ppt/slides/slide1.xml").contains("数据分析洞察报告"));

    Ok(())
}

#[tokio::test]
async fn test_regenerate_report_endpoint() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;
    let bytes = workbook(&[["1", "", "浦东", "花木街道", "", "邻里纠纷", "", "已办结"]]);
    let body: Value = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(bytes))
        .await
        .json();
    let batch_id = body["data"]["batchId"].as_i64().unwrap();

    let response = server
        .post(&format!("/api/case-stats/batches/{}/report", batch_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["streetTop10"]["花木街道"], 1);

    let response = server.post("/api/case-stats/batches/77/report").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_validation_failures_use_envelope() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;

    let bytes = workbook_with_headers(&["序号", "时间", "区"], &[["1", "", "", "", "", "", "", ""]]);
    let response = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(bytes))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 1);
    assert!(body["message"].as_str().unwrap().contains("当前办理状态"));
    assert!(body["data"].is_null());

    let response = server
        .post("/api/case-stats/import-excel")
        .multipart(MultipartForm::new().add_text("other", "x"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Please upload an Excel file");

    let response = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(b"plain text".to_vec()))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().starts_with("Excel parsing failed"));

    // Nothing was persisted
    let body: Value = server.get("/api/case-stats/batches").await.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unknown_batch_is_not_found() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;

    let response = server.get("/api/case-stats/batches/999/report-download").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "Batch 999 not found");

    let response = server.get("/api/case-stats/batches/999/analysis").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get("/api/case-stats/batches/999/details").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_report_failure_is_server_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let blocked = dir.path().join("reports");
    std::fs::write(&blocked, b"not a directory")?;
    let server = TestServer::new(create_app(service(&blocked).await, None)?)?;
    let bytes = workbook(&[["1", "", "浦东", "花木街道", "", "邻里纠纷", "", "已办结"]]);

    let response = server
        .post("/api/case-stats/import-excel")
        .multipart(upload(bytes))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], 1);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Report generation failed"));
    assert!(body["data"].is_null());

    // The batch survives without report fields
    let body: Value = server.get("/api/case-stats/batches").await.json();
    let batches = body["data"].as_array().unwrap();
    assert_eq!(batches.len(), 1);
    assert!(batches[0]["reportFilePath"].is_null());
    assert!(batches[0]["reportFileUrl"].is_null());
    let batch_id = batches[0]["id"].as_i64().unwrap();

    let body: Value = server
        .get(&format!("/api/case-stats/batches/{}/details", batch_id))
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_malformed_batch_id_uses_envelope() -> Result<()> {
    let (server, _reports) = setup_test_server().await?;

    for path in [
        "/api/case-stats/batches/abc/details",
        "/api/case-stats/batches/abc/analysis",
        "/api/case-stats/batches/abc/report-download",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
        let body: Value = response.json();
        assert_eq!(body["code"], 1);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid batch id"));
        assert!(body["data"].is_null());
    }

    let response = server.post("/api/case-stats/batches/abc/report").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}

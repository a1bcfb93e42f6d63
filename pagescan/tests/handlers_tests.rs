use pagescan::handlers::*;
use pagescan_analyzer::{
    AnalysisResult, AnalyzeError, CancellationToken, Link, LinkSummary, LinkType, WorkerSizing,
};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn sample_result() -> AnalysisResult {
    let mut headings = BTreeMap::new();
    headings.insert("h1".to_string(), 1);
    headings.insert("h2".to_string(), 3);

    let links = vec![
        Link {
            link_type: LinkType::Internal,
            url: "https://example.com/about".to_string(),
            accessible: true,
        },
        Link {
            link_type: LinkType::External,
            url: "https://other.org/".to_string(),
            accessible: false,
        },
    ];

    AnalysisResult {
        html_version: "HTML5".to_string(),
        title: "Example Domain".to_string(),
        headings,
        link_summary: Some(LinkSummary::from_links(links)),
        has_login_form: true,
        errors: vec![],
    }
}

#[test]
fn test_report_format_parsing() {
    assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
    assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
    assert!("xml".parse::<ReportFormat>().is_err());
}

#[test]
fn test_worker_sizing_from_options() {
    assert_eq!(worker_sizing(None), WorkerSizing::SqrtScaled);
    assert_eq!(worker_sizing(Some(4)), WorkerSizing::Capped(4));
    assert_eq!(worker_sizing(Some(0)), WorkerSizing::Capped(1));
}

#[test]
fn test_build_analyzer_applies_options() {
    let mut options = AnalyzeOptions::new("https://example.com");
    options.fetch_timeout = Duration::from_secs(9);
    options.probe_timeout = Duration::from_secs(2);
    options.max_probe_workers = Some(8);

    let analyzer = build_analyzer(&options).unwrap();
    let config = analyzer.config();
    assert_eq!(config.fetch_timeout, Duration::from_secs(9));
    assert_eq!(config.probe_timeout, Duration::from_secs(2));
    assert_eq!(config.worker_sizing, WorkerSizing::Capped(8));
}

#[test]
fn test_text_report_contents() {
    colored::control::set_override(false);

    let report = generate_text_report(&sample_result(), "https://example.com");
    assert!(report.contains("# Page: https://example.com"));
    assert!(report.contains("HTML version: HTML5"));
    assert!(report.contains("Title: Example Domain"));
    assert!(report.contains("Login form: yes"));
    assert!(report.contains("h1: 1"));
    assert!(report.contains("h2: 3"));
    assert!(report.contains("Total: 2  Internal: 1  External: 1"));
    assert!(report.contains("Accessible: 1  Inaccessible: 1"));
    assert!(report.contains("https://other.org/"));
    assert!(!report.contains("# Errors:"));
}

#[test]
fn test_text_report_lists_errors_and_missing_links() {
    colored::control::set_override(false);

    let result = AnalysisResult {
        html_version: "Unknown".to_string(),
        errors: vec!["no links available".to_string()],
        ..AnalysisResult::default()
    };

    let report = generate_text_report(&result, "https://example.com");
    assert!(report.contains("# Headings:\n  (none)"));
    assert!(report.contains("# Links:\n  (none)"));
    assert!(report.contains("# Errors:"));
    assert!(report.contains("no links available"));
}

#[test]
fn test_json_report_shape() {
    let report = generate_report(&sample_result(), "https://example.com", ReportFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["HtmlVersion"], "HTML5");
    assert_eq!(value["PageTitle"], "Example Domain");
    assert_eq!(value["Headings"]["h2"], 3);
    assert_eq!(value["HasLoginForm"], true);
    assert_eq!(value["LinkSummary"]["InternalLinks"], 1);
    assert_eq!(value["LinkSummary"]["Links"][1]["LinkType"], "external");
    assert_eq!(value["Errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_execute_analysis_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    r#"<!DOCTYPE html><html><head><title>Home</title></head>
                    <body><h1>Hi</h1><a href="/next">next</a></body></html>"#,
                    "text/html",
                ),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/next"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut options = AnalyzeOptions::new(mock_server.uri());
    options.max_probe_workers = Some(2);

    let result = execute_analysis(&options, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.title, "Home");
    assert_eq!(result.headings.get("h1"), Some(&1));
    let summary = result.link_summary.unwrap();
    assert_eq!(summary.internal, 1);
    assert_eq!(summary.accessible, 1);
}

#[tokio::test]
async fn test_execute_analysis_reports_invalid_url() {
    let options = AnalyzeOptions::new("ftp://example.com/file");
    let err = execute_analysis(&options, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::InvalidUrl(_)));
}

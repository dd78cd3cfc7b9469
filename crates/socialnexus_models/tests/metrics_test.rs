//! Request metrics recorded by `GeminiClient`.
//!
//! Installs an in-memory meter provider before the client's instruments are
//! created, so this file holds a single test.

mod test_utils;

use opentelemetry_sdk::metrics::{InMemoryMetricExporter, PeriodicReader, SdkMeterProvider};
use socialnexus_interface::ContentGenerator;
use test_utils::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_failed_requests_are_counted_as_requests_and_errors() -> anyhow::Result<()> {
    let exporter = InMemoryMetricExporter::default();
    let provider = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(exporter.clone()).build())
        .build();
    opentelemetry::global::set_meter_provider(provider.clone());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.perform_research(&sample_brand()).await.is_err());

    provider.force_flush()?;
    let names: Vec<String> = exporter
        .get_finished_metrics()?
        .iter()
        .flat_map(|resource| resource.scope_metrics())
        .flat_map(|scope| scope.metrics())
        .map(|metric| metric.name().to_string())
        .collect();

    assert!(names.iter().any(|n| n == "llm.requests"), "got {:?}", names);
    assert!(names.iter().any(|n| n == "llm.errors"), "got {:?}", names);
    assert!(names.iter().any(|n| n == "llm.duration"), "got {:?}", names);

    provider.shutdown()?;
    Ok(())
}

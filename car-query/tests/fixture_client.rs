//! `FixtureClient` against the recorded responses in `tests/fixtures`.

use std::path::PathBuf;

use car_query::{Command, FixtureClient, QueryParams, TrimsFilter};

fn fixtures() -> FixtureClient {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    FixtureClient::new(dir).expect("Failed to load fixtures")
}

#[test]
fn loads_every_command() {
    assert_eq!(fixtures().available_commands(), Command::ALL.to_vec());
}

#[tokio::test]
async fn years() {
    let years = fixtures().years().await.unwrap();
    assert_eq!(years.min_year, "1940");
    assert_eq!(years.max_year, "2012");
}

#[tokio::test]
async fn makes_have_ids_and_names() {
    let makes = fixtures().makes(QueryParams::new()).await.unwrap();

    assert!(!makes.is_empty());
    for make in &makes {
        assert!(!make.make_id.is_empty());
        assert!(!make.make_display.is_empty());
    }
}

#[tokio::test]
async fn models_for_ford() {
    let models = fixtures().models([("make", "ford")]).await.unwrap();

    assert_eq!(models[0].model_name, "021 C");
    assert!(models.iter().all(|m| m.model_make_id == "ford"));
}

#[tokio::test]
async fn trims_keep_null_fields() {
    let trims = fixtures()
        .trims(TrimsFilter::new().year(2012).make("ford").model("f-350"))
        .await
        .unwrap();

    let first = &trims[0];
    assert_eq!(first["model_id"], "48922");
    assert_eq!(first["model_engine_power_ps"], "390");
    assert!(first["model_top_speed_kph"].is_null());
}

#[tokio::test]
async fn model_detail_is_a_flat_record() {
    let record = fixtures().model([("model", "48922")]).await.unwrap();

    assert_eq!(record["model_id"], "48922");
    assert_eq!(record["make_display"], "Ford");
}

#[tokio::test]
async fn repeated_queries_are_identical() {
    let client = fixtures();
    let first = client.trims(QueryParams::new()).await.unwrap();
    let second = client.trims(QueryParams::new()).await.unwrap();
    assert_eq!(first, second);
}

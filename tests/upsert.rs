// tests/upsert.rs
//
// The store uses reqwest's blocking client, so every call runs on a
// blocking thread while wiremock serves from the async runtime.

use standards_scrape::ScrapeError;
use standards_scrape::model::{Table, UsaStandard};
use standards_scrape::store::SupabaseStore;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn usa_row(nivel: &str, secs: f64) -> UsaStandard {
    UsaStandard {
        ciclo: "2024-2028".into(),
        genero: Some("F".into()),
        edad: Some("10&U".into()),
        estilo: "Freestyle".into(),
        distancia_m: 50,
        curso: "SCY".into(),
        nivel: nivel.into(),
        tiempo_s: secs,
        season_year: "2024-2028".into(),
        standard_type: "AGE_GROUP".into(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn upsert_posts_batches_with_merge_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/standards_usa"))
        .and(query_param("on_conflict", Table::StandardsUsa.on_conflict()))
        .and(header("apikey", "secret"))
        .and(header("authorization", "Bearer secret"))
        .and(header("prefer", "resolution=merge-duplicates"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let url = server.uri();
    let outcome = tokio::task::spawn_blocking(move || {
        let rows = vec![usa_row("B", 40.39), usa_row("BB", 36.69), usa_row("A", 33.09)];
        SupabaseStore::new(&url, "secret")?
            .with_batch_size(2)
            .upsert(Table::StandardsUsa, &rows)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.batches, 2);
    assert_eq!(outcome.status, 201);
}

#[tokio::test(flavor = "multi_thread")]
async fn upsert_body_is_a_json_array_of_rows() {
    let server = MockServer::start().await;
    let row = usa_row("AAAA", 28.29);
    Mock::given(method("POST"))
        .and(path("/rest/v1/standards_usa"))
        .and(body_json(vec![row.clone()]))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/", server.uri());
    let outcome = tokio::task::spawn_blocking(move || {
        SupabaseStore::new(&url, "secret")?.upsert(Table::StandardsUsa, &[row])
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(outcome.status, 204);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_batch_reports_status_and_truncated_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_string("x".repeat(2000)))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let rows = vec![usa_row("B", 40.39), usa_row("BB", 36.69)];
        SupabaseStore::new(&url, "secret")?.upsert(Table::StandardsUsa, &rows)
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        ScrapeError::Upsert { table, status, body } => {
            assert_eq!(table, "standards_usa");
            assert_eq!(status, 409);
            assert_eq!(body.len(), 800);
        }
        other => panic!("unexpected error: {other}"),
    }
}

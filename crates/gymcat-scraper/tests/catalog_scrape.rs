//! Integration tests for a full scrape run against a `wiremock` storefront.

use std::time::Duration;

use gymcat_core::{ProductType, ScraperConfig};
use rust_decimal::Decimal;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymcat_scraper::{
    scrape_products, scrape_products_with, transform_scraped_to_product, CatalogClient,
    ScraperError,
};

/// Config pointed at the mock collection page with no inter-item delay and
/// no backoff, so retries do not slow the suite down.
fn test_config(server: &MockServer) -> ScraperConfig {
    ScraperConfig {
        delay_between_requests_ms: 0,
        max_retries: 2,
        timeout_ms: 5_000,
        backoff_base_ms: 0,
        ..ScraperConfig::new(format!("{}/collections/protein", server.uri()))
    }
}

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/html; charset=utf-8")
}

fn collection_page(hrefs: &[String]) -> String {
    let tiles: String = hrefs
        .iter()
        .map(|href| format!(r#"<div class="productgrid--item"><a href="{href}">tile</a></div>"#))
        .collect();
    format!("<html><body><main>{tiles}</main></body></html>")
}

const VANILLA_PAGE: &str = r#"
<html><body>
  <h1 class="product__title">Vanilla Whey</h1>
  <span class="price-item--regular">$39.99</span>
  <div class="product__description">
    <p>Each scoop delivers 35g of protein.</p>
    <p>Supports lean muscle growth.</p>
  </div>
</body></html>
"#;

#[tokio::test]
async fn one_good_page_and_one_missing_page() {
    let server = MockServer::start().await;
    let missing = format!("{}/products/b", server.uri());

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(html_response(&collection_page(&[
            "/products/a".to_string(),
            missing.clone(),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/a"))
        .respond_with(html_response(VANILLA_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/b"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let result = scrape_products(&test_config(&server))
        .await
        .expect("run should succeed despite the 404");

    assert_eq!(result.total_scraped, 1);
    assert_eq!(result.products.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].url, missing);
    assert!(
        result.errors[0].error.contains("404"),
        "error should mention the status: {}",
        result.errors[0].error
    );

    let scraped = &result.products[0];
    assert_eq!(scraped.url, format!("{}/products/a", server.uri()));
    assert_eq!(scraped.price.as_deref(), Some("39.99"));

    let product = transform_scraped_to_product(scraped).expect("product should transform");
    assert_eq!(product.flavour, "Vanilla");
    assert_eq!(product.product_type, ProductType::ProteinPowder);
    assert_eq!(product.price, Decimal::new(3999, 2));
    let nutrition = product.nutrition.expect("nutrition should be extracted");
    assert_eq!(nutrition.protein, 35.0);
}

#[tokio::test]
async fn invalid_product_page_is_recorded_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(html_response(&collection_page(&["/products/free".to_string()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/free"))
        .respond_with(html_response(
            r#"<html><body><h1>Sample Scoop</h1><span class="price">Free</span></body></html>"#,
        ))
        .mount(&server)
        .await;

    let result = scrape_products(&test_config(&server)).await.unwrap();
    assert_eq!(result.total_scraped, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(
        result.errors[0].error.contains("invalid or missing price"),
        "got: {}",
        result.errors[0].error
    );
}

#[tokio::test]
async fn empty_collection_page_is_an_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(html_response("<html><body><p>Nothing here</p></body></html>"))
        .mount(&server)
        .await;

    let result = scrape_products(&test_config(&server)).await.unwrap();
    assert_eq!(result.total_scraped, 0);
    assert!(result.products.is_empty());
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn collection_page_failure_aborts_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = scrape_products(&test_config(&server)).await.unwrap_err();
    match err {
        ScraperError::FetchFailed {
            attempts,
            last_error,
            ..
        } => {
            assert_eq!(attempts, 2);
            assert!(last_error.contains("503"), "got: {last_error}");
        }
        other => panic!("expected FetchFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn flaky_product_page_succeeds_on_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(html_response(&collection_page(&["/products/a".to_string()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/a"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/a"))
        .respond_with(html_response(VANILLA_PAGE))
        .mount(&server)
        .await;

    let config = test_config(&server);
    let client = CatalogClient::from_config(&config).unwrap();
    let result = scrape_products_with(&client, &config).await.unwrap();
    assert_eq!(result.total_scraped, 1);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn invalid_grid_selector_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/protein"))
        .respond_with(html_response("<html></html>"))
        .mount(&server)
        .await;

    let config = ScraperConfig {
        product_grid_selector: "div[".to_string(),
        ..test_config(&server)
    };
    let err = scrape_products(&config).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidSelector { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn requests_carry_the_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/a"))
        .and(header("user-agent", "gymcat-test/1.0"))
        .respond_with(html_response(VANILLA_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(5_000, "gymcat-test/1.0", 1, 0).unwrap();
    let body = client
        .fetch_html(&format!("{}/products/a", server.uri()))
        .await
        .expect("request with the configured user agent should match");
    assert!(body.contains("Vanilla Whey"));
}

#[tokio::test]
async fn slow_page_times_out_once_per_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/slow"))
        .respond_with(html_response(VANILLA_PAGE).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = CatalogClient::new(200, "gymcat-test/1.0", 2, 0).unwrap();
    let url = format!("{}/products/slow", server.uri());
    let started = std::time::Instant::now();
    let err = client.fetch_html(&url).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::FetchFailed { attempts: 2, .. }),
        "expected FetchFailed after 2 attempts, got: {err:?}"
    );
    let message = err.to_string();
    assert!(message.contains(&url), "message should name the URL: {message}");
    assert!(message.contains("timed out"), "message should say why: {message}");
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "attempts should be cut off at the timeout"
    );
}

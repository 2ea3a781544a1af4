use miqat_network::{reverse_geocode_or_fallback, reverse_geocode_with};
use miqat_types::{GeoCoordinate, MiqatError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn yogyakarta() -> GeoCoordinate {
    GeoCoordinate::new(-7.8195, 110.361).unwrap()
}

#[tokio::test]
async fn resolves_labels_from_nominatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .and(query_param("zoom", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Gondokusuman, Yogyakarta, Indonesia",
            "address": {
                "suburb": "Gondokusuman",
                "city": "Yogyakarta",
                "state": "Daerah Istimewa Yogyakarta",
                "country": "Indonesia"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = reverse_geocode_with(&server.uri(), yogyakarta()).await.unwrap();
    assert_eq!(info.sub_district.as_deref(), Some("Gondokusuman"));
    assert_eq!(info.region.as_deref(), Some("Daerah Istimewa Yogyakarta"));
    assert_eq!(info.country.as_deref(), Some("Indonesia"));
    assert_eq!(info.coords, yogyakarta());
}

#[tokio::test]
async fn sparse_address_gets_placeholder_labels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": {} })))
        .mount(&server)
        .await;

    let info = reverse_geocode_with(&server.uri(), yogyakarta()).await.unwrap();
    assert_eq!(info.display_name(), "Current Location, Unknown Region, Unknown Country");
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = reverse_geocode_with(&server.uri(), yogyakarta()).await.unwrap_err();
    assert!(matches!(err, MiqatError::NetworkError(_)));
}

#[tokio::test]
async fn malformed_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = reverse_geocode_with(&server.uri(), yogyakarta()).await.unwrap_err();
    assert!(matches!(err, MiqatError::NetworkError(_)));
}

#[tokio::test]
async fn fallback_keeps_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let info = reverse_geocode_or_fallback(&server.uri(), yogyakarta()).await;
    assert_eq!(info.coords, yogyakarta());
    assert_eq!(info.region.as_deref(), Some("GPS Detected"));
    assert_eq!(info.sub_district.as_deref(), Some("Current Location"));
}

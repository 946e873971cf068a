//! Tests for the Planetary Computer client against a loopback server

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use chrono::NaiveDate;

use crate::acquisition::{
    DateRange, ImageryCatalog, MapTileProvider, PlanetaryComputerCatalog, SceneQuery,
};
use crate::config::CatalogConfig;
use crate::coordinate::RegionOfInterest;
use crate::errors::SrError;

/// Read one request, headers and body, from the stream
fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buffer.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end].lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Answer a single request with `body` and hand the request text back
fn serve_once(status: &'static str, body: &'static str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let request = read_request(&mut stream);
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body.as_bytes());
            let _ = stream.flush();
            let _ = sender.send(request);
        }
    });

    (format!("http://{}", addr), receiver)
}

fn catalog_at(base: &str) -> PlanetaryComputerCatalog {
    let config = CatalogConfig {
        stac_url: base.to_string(),
        data_url: base.to_string(),
        request_timeout_secs: 5,
        ..CatalogConfig::default()
    };
    PlanetaryComputerCatalog::new(&config).unwrap()
}

fn region() -> RegionOfInterest {
    RegionOfInterest::from_bounds([[10.0, 77.0], [10.05, 77.05]]).unwrap()
}

fn query() -> SceneQuery {
    SceneQuery {
        bbox: region().bbox(),
        dates: DateRange::around(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(), 60).unwrap(),
        max_cloud_cover: 20.0,
        limit: 100,
    }
}

#[test]
fn test_search_sorts_and_fills_missing_properties() {
    let (base, requests) = serve_once("200 OK", r#"{
        "type": "FeatureCollection",
        "context": {"returned": 2, "matched": 42},
        "features": [
            {"id": "a", "properties": {"datetime": "2023-06-10T05:20:00Z"}},
            {"id": "b", "collection": "sentinel-2-l2a", "properties": {"eo:cloud_cover": 9.0}}
        ]
    }"#);

    let collection = catalog_at(&base).search(&query()).unwrap();

    assert_eq!(collection.total, 42);
    assert_eq!(collection.count(), 42);
    let ids: Vec<&str> = collection.scenes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    let clouds: Vec<f64> = collection.scenes.iter().map(|s| s.cloud_cover).collect();
    assert_eq!(clouds, vec![9.0, 100.0]);
    assert_eq!(collection.scenes[1].collection, "sentinel-2-l2a");
    assert!(collection.scenes[1].acquired.is_some());
    assert!(collection.scenes[0].acquired.is_none());

    let request = requests.recv().unwrap();
    assert!(request.starts_with("POST /search "));
    assert!(request.contains(r#""eo:cloud_cover":{"lt":20.0}"#));
    assert!(request.contains("2023-06-01T00:00:00Z/2023-07-31T00:00:00Z"));
}

#[test]
fn test_search_prefers_number_matched_over_context() {
    let (base, _requests) = serve_once("200 OK", r#"{
        "numberMatched": 7,
        "context": {"matched": 42},
        "features": [{"id": "a", "properties": {"eo:cloud_cover": 1.0}}]
    }"#);

    let collection = catalog_at(&base).search(&query()).unwrap();

    assert_eq!(collection.total, 7);
}

#[test]
fn test_search_counts_page_without_match_totals() {
    let (base, _requests) = serve_once("200 OK", r#"{
        "features": [
            {"id": "a", "properties": {"eo:cloud_cover": 1.0}},
            {"id": "b", "properties": {"eo:cloud_cover": 2.0}},
            {"id": "c", "properties": {"eo:cloud_cover": 3.0}}
        ]
    }"#);

    let collection = catalog_at(&base).search(&query()).unwrap();

    assert_eq!(collection.total, 3);
    assert_eq!(collection.count(), 3);
}

#[test]
fn test_search_server_error_is_acquisition_error() {
    let (base, _requests) = serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#);

    let err = catalog_at(&base).search(&query()).unwrap_err();

    assert!(matches!(err, SrError::Acquisition(_)));
    assert!(err.to_string().contains("/search"));
}

#[test]
fn test_composite_tile_url_registers_mosaic() {
    let (base, requests) = serve_once("200 OK", r#"{"searchid": "abc123", "links": []}"#);

    let url = catalog_at(&base).composite_tile_url(&region().bbox(), 2023).unwrap();

    assert_eq!(
        url,
        format!(
            "{}/mosaic/abc123/tiles/WebMercatorQuad/{{z}}/{{x}}/{{y}}@1x?collection=sentinel-2-l2a\
             &assets=B04&assets=B03&assets=B02&rescale=0%2C3000&pixel_selection=median",
            base
        )
    );

    let request = requests.recv().unwrap();
    assert!(request.starts_with("POST /mosaic/register "));
    assert!(request.contains("2023-01-01T00:00:00Z/2023-12-31T23:59:59Z"));
    assert!(request.contains(r#""filter-lang":"cql2-json""#));
}

#[test]
fn test_composite_tile_url_rejects_malformed_register_response() {
    let (base, _requests) = serve_once("200 OK", r#"{"links": []}"#);

    let err = catalog_at(&base).composite_tile_url(&region().bbox(), 2023).unwrap_err();

    assert!(matches!(err, SrError::Acquisition(_)));
}

#[test]
fn test_cloned_catalog_talks_to_same_endpoints() {
    let (base, requests) = serve_once("200 OK", r#"{"searchid": "shared"}"#);
    let catalog = catalog_at(&base);
    let tiles = catalog.clone();
    drop(catalog);

    let url = tiles.composite_tile_url(&region().bbox(), 2022).unwrap();

    assert!(url.starts_with(&format!("{}/mosaic/shared/tiles/", base)));
    assert!(requests.recv().unwrap().contains("2022-01-01T00:00:00Z/2022-12-31T23:59:59Z"));
}

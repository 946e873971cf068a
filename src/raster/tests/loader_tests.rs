//! Tests for the HTTP loader against a loopback server

use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::errors::SrError;
use crate::raster::{HttpImageLoader, ImageSource};

/// Serve a single canned HTTP response and return the URL to request
fn serve_once(status: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        }
    });

    format!("http://{}/thumb.png", addr)
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 100, 50]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image).write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[test]
fn test_loader_downloads_and_resizes() {
    let url = serve_once("200 OK", png(100, 80));
    let loader = HttpImageLoader::new(64, 5).unwrap();

    let array = loader.load(&url).unwrap();

    assert_eq!(array.dim(), (64, 64, 3));
    // Resampling a flat image may be off by one from rounding
    assert!((array[[32, 32, 0]] as i32 - 200).abs() <= 1);
    assert!((array[[32, 32, 2]] as i32 - 50).abs() <= 1);
}

#[test]
fn test_loader_reports_http_status() {
    let url = serve_once("404 Not Found", Vec::new());
    let loader = HttpImageLoader::new(64, 5).unwrap();

    match loader.load(&url) {
        Err(SrError::Load { url: failed, reason }) => {
            assert_eq!(failed, url);
            assert!(reason.contains("404"));
        }
        other => panic!("expected load error, got {:?}", other.map(|a| a.dim())),
    }
}

#[test]
fn test_loader_rejects_non_image_body() {
    let url = serve_once("200 OK", b"<html>rate limited</html>".to_vec());
    let loader = HttpImageLoader::new(64, 5).unwrap();

    let err = loader.load(&url).unwrap_err();

    assert!(matches!(err, SrError::Load { .. }));
    assert!(err.to_string().contains("cannot decode image"));
}

#[test]
fn test_loader_reports_unreachable_host() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let loader = HttpImageLoader::new(64, 2).unwrap();

    let err = loader.load(&format!("http://127.0.0.1:{}/x.png", port)).unwrap_err();

    assert!(matches!(err, SrError::Load { .. }));
}

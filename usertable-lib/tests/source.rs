mod common;

use std::time::Duration;

use common::{MemoryView, names};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use usertable_lib::search::SearchField;
use usertable_lib::source::{FileSource, HttpSource, RecordSource};
use usertable_lib::view::TableView;
use usertable_lib::{Application, Error, LoadError, RecordId};

const PAYLOAD: &str = r#"[
    {"name":"Anna","rating":3,"stories":6,"comments":7,"date":"2014-04-21T12:30:00Z","avatar":"a.png"},
    {"name":"Joe","rating":1,"stories":2,"comments":9,"date":"2015-02-11T08:00:00Z","avatar":"j.png"},
    {"name":"Joanna","rating":2,"stories":4,"comments":8,"date":"2016-06-01T17:45:00Z","avatar":"jo.png"}
]"#;

/// Serve a single canned HTTP response on a local port.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}/users.json", addr)
}

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("usertable-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_http_source_loads_records() {
    let url = serve_once("HTTP/1.1 200 OK", PAYLOAD).await;
    let source = HttpSource::new(&url).unwrap().timeout(Duration::from_secs(5));
    let records = source.load().await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].name, "Joanna");
}

#[tokio::test]
async fn test_http_error_status_is_load_failure() {
    let url = serve_once("HTTP/1.1 503 Service Unavailable", "").await;
    let source = HttpSource::new(&url).unwrap();
    let err = source.load().await.unwrap_err();
    match err {
        LoadError::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_unparsable_body() {
    let url = serve_once("HTTP/1.1 200 OK", "<html>oops</html>").await;
    let source = HttpSource::new(&url).unwrap();
    assert!(matches!(source.load().await, Err(LoadError::Parse(_))));
}

#[tokio::test]
async fn test_file_source() {
    let path = temp_file("users.json", PAYLOAD);
    let source = FileSource::new(&path);
    let records = source.load().await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(source.describe().ends_with("users.json"));
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let source = FileSource::new(std::env::temp_dir().join("usertable-does-not-exist.json"));
    assert!(matches!(source.load().await, Err(LoadError::Io(_))));
}

#[tokio::test]
async fn test_application_init_renders_table() {
    let path = temp_file("app.json", PAYLOAD);
    let app = Application::init(&FileSource::new(&path), MemoryView::default())
        .await
        .unwrap();
    assert_eq!(names(app.table().view().rows()), vec!["Anna", "Joe", "Joanna"]);
    assert!(app.search().is_empty());
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_application_init_load_failure() {
    let path = temp_file("broken.json", "{");
    let result = Application::init(&FileSource::new(&path), MemoryView::default()).await;
    let err = result.unwrap_err();
    assert!(err.is_load_failure());
    assert!(matches!(err, Error::Load(LoadError::Parse(_))));
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_search_edits_filter_table() {
    let path = temp_file("search.json", PAYLOAD);
    let mut app = Application::init(&FileSource::new(&path), MemoryView::default())
        .await
        .unwrap();

    for c in "*ann".chars() {
        app.edit_search(|s| s.push(c)).unwrap();
    }
    assert_eq!(app.search().query(), "*ann");
    assert_eq!(names(app.table().view().rows()), vec!["Anna", "Joanna"]);

    app.edit_search(SearchField::clear).unwrap();
    assert_eq!(names(app.table().view().rows()), vec!["Anna", "Joe", "Joanna"]);

    app.reload_elements("users", &[RecordId(2), RecordId(1), RecordId(0)])
        .unwrap();
    assert_eq!(names(app.table().view().rows()), vec!["Joanna", "Joe", "Anna"]);
    assert!(matches!(
        app.reload_elements("comments", &[]),
        Err(Error::UnknownCollection(_))
    ));
    let _ = std::fs::remove_file(path);
}

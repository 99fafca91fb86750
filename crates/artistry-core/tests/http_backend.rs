use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use artistry_core::{
    ImageFile, ImageSelection, MemoryObjectUrls, SlotKind, StyleTransferClient, TransferError,
    TransferOrchestrator, TransferState, UploadZone,
};
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone, Default)]
struct Backend {
    hits: Arc<AtomicUsize>,
    fields: Arc<Mutex<Vec<ReceivedField>>>,
}

async fn record(backend: &Backend, mut multipart: Multipart) {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let mut received = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.expect("field bytes").to_vec();
        received.push(ReceivedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    *backend.fields.lock().expect("fields lock") = received;
}

async fn image_handler(State(backend): State<Backend>, multipart: Multipart) -> Response {
    record(&backend, multipart).await;
    ([(header::CONTENT_TYPE, "image/jpeg")], JPEG.to_vec()).into_response()
}

async fn failing_handler(State(backend): State<Backend>, multipart: Multipart) -> Response {
    record(&backend, multipart).await;
    (StatusCode::INTERNAL_SERVER_ERROR, "bad input").into_response()
}

async fn json_handler(State(backend): State<Backend>, multipart: Multipart) -> Response {
    record(&backend, multipart).await;
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"error": "No style image provided"}"#,
    )
        .into_response()
}

async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let router = Router::new()
        .route("/style-transfer/", post(image_handler))
        .route("/failing/", post(failing_handler))
        .route("/json/", post(json_handler))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    (format!("http://{addr}"), backend)
}

fn ready_orchestrator() -> (Arc<MemoryObjectUrls>, TransferOrchestrator) {
    let memory = Arc::new(MemoryObjectUrls::new());
    let mut orchestrator = TransferOrchestrator::new(memory.clone());

    let mut content_zone = UploadZone::new(SlotKind::Content);
    let mut style_zone = UploadZone::new(SlotKind::Style);

    content_zone.pick_file(
        ImageFile::new("content.png", "image/png", vec![0x89u8, b'P', b'N', b'G']),
        &mut |selection| orchestrator.select(SlotKind::Content, selection),
    );
    style_zone.open_url_form();
    style_zone
        .url_input_mut()
        .push_str(" https://example.com/starry-night.jpg ");
    style_zone.submit_url(&mut |selection| orchestrator.select(SlotKind::Style, selection));

    (memory, orchestrator)
}

#[tokio::test]
async fn transfer_success_posts_expected_fields() {
    let (base, backend) = spawn_backend().await;
    let client =
        StyleTransferClient::new(&format!("{base}/style-transfer/"), None).expect("client");
    let (memory, mut orchestrator) = ready_orchestrator();

    let note = orchestrator
        .run_transfer(&client)
        .await
        .expect("notification");

    assert!(!note.is_error(), "{note:?}");
    assert_eq!(orchestrator.state(), &TransferState::Succeeded);
    let result = orchestrator.result().expect("result image");
    assert_eq!(&*result.image.bytes, JPEG);
    assert_eq!(memory.get(result.uri()).as_deref(), Some(JPEG));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);

    let fields = backend.fields.lock().expect("fields lock").clone();
    let names: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, vec!["content_file", "style_url"]);

    let content = &fields[0];
    assert_eq!(content.file_name.as_deref(), Some("content.png"));
    assert_eq!(content.content_type.as_deref(), Some("image/png"));
    assert_eq!(content.data, vec![0x89u8, b'P', b'N', b'G']);

    let style = &fields[1];
    assert_eq!(style.file_name, None);
    assert_eq!(style.data, b"https://example.com/starry-night.jpg".to_vec());
}

#[tokio::test]
async fn server_error_text_reaches_failed_state() {
    let (base, backend) = spawn_backend().await;
    let client = StyleTransferClient::new(&format!("{base}/failing/"), None).expect("client");
    let (_memory, mut orchestrator) = ready_orchestrator();

    let note = orchestrator
        .run_transfer(&client)
        .await
        .expect("notification");

    assert!(note.is_error());
    assert!(note.description.contains("bad input"), "{}", note.description);
    match orchestrator.state() {
        TransferState::Failed { message } => assert!(message.contains("bad input")),
        other => panic!("unexpected state {other:?}"),
    }
    assert!(orchestrator.result().is_none());
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn json_response_fails_despite_success_status() {
    let (base, backend) = spawn_backend().await;
    let client = StyleTransferClient::new(&format!("{base}/json/"), None).expect("client");
    let (_memory, mut orchestrator) = ready_orchestrator();

    let note = orchestrator
        .run_transfer(&client)
        .await
        .expect("notification");

    assert!(note.is_error());
    assert!(
        note.description.contains("No style image provided"),
        "{}",
        note.description
    );
    match orchestrator.state() {
        TransferState::Failed { message } => {
            assert!(message.starts_with("Response is not an image"), "{message}")
        }
        other => panic!("unexpected state {other:?}"),
    }
    assert!(orchestrator.result().is_none());
    assert!(orchestrator.is_ready());
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn json_error_detail_is_kept() {
    let (base, _backend) = spawn_backend().await;
    let client = StyleTransferClient::new(&format!("{base}/json/"), None).expect("client");

    let request = {
        let (_memory, mut orchestrator) = ready_orchestrator();
        orchestrator.begin_transfer().expect("ready")
    };

    let err = client.transfer(request).await.unwrap_err();
    match err {
        TransferError::NotAnImage {
            content_type,
            detail,
        } => {
            assert_eq!(content_type.as_deref(), Some("application/json"));
            assert_eq!(detail.as_deref(), Some("No style image provided"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn retry_after_failure_replaces_state() {
    let (base, backend) = spawn_backend().await;
    let failing = StyleTransferClient::new(&format!("{base}/failing/"), None).expect("client");
    let working =
        StyleTransferClient::new(&format!("{base}/style-transfer/"), None).expect("client");
    let (memory, mut orchestrator) = ready_orchestrator();

    orchestrator.run_transfer(&failing).await;
    assert!(matches!(orchestrator.state(), TransferState::Failed { .. }));
    assert!(orchestrator.is_ready());

    orchestrator.run_transfer(&working).await;
    assert_eq!(orchestrator.state(), &TransferState::Succeeded);
    assert_eq!(backend.hits.load(Ordering::SeqCst), 2);

    // content preview + result
    assert_eq!(memory.live_count(), 2);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client =
        StyleTransferClient::new(&format!("http://{addr}/style-transfer/"), None).expect("client");
    let (_memory, mut orchestrator) = ready_orchestrator();

    let note = orchestrator
        .run_transfer(&client)
        .await
        .expect("notification");
    assert!(note.is_error());
    assert!(note.description.starts_with("Failed to process style transfer"));
    assert!(matches!(orchestrator.state(), TransferState::Failed { .. }));
}

#[test]
fn dropped_text_file_never_reaches_orchestrator() {
    let memory = Arc::new(MemoryObjectUrls::new());
    let mut orchestrator = TransferOrchestrator::new(memory.clone());
    let mut zone = UploadZone::new(SlotKind::Content);

    let accepted = zone.drop_files(
        vec![ImageFile::new("readme.txt", "text/plain", vec![b'x'])],
        &mut |selection| orchestrator.select(SlotKind::Content, selection),
    );

    assert!(!accepted);
    assert_eq!(orchestrator.selection(SlotKind::Content), &ImageSelection::None);
    assert_eq!(memory.created_count(), 0);
}

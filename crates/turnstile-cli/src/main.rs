use std::sync::Arc;
use std::time::Duration;

use turnstile_core::app::{AppBuilder, QrVerdict, ReservationRequest};
use turnstile_core::impls::{
    InMemoryArtifactStore, InMemoryNotificationQueue, InMemoryTicketStore,
};
use turnstile_core::ports::NotificationQueue;
use turnstile_core::qr::QrPayload;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // (A) in-memory のアダプタでアプリを組み立てる
    //     キューは consumer 側でも読みたいので Arc を共有する
    let queue = Arc::new(InMemoryNotificationQueue::new());
    let app = AppBuilder::new()
        .ticket_store(InMemoryTicketStore::new())
        .artifact_store(InMemoryArtifactStore::new())
        .notification_queue(Arc::clone(&queue))
        .build()
        .expect("both stores are wired");

    // (B) 予約を 1 件流す
    let receipt = app
        .reservations
        .reserve(ReservationRequest {
            event_id: "550e8400-e29b-41d4-a716-446655440003".to_string(),
            email: Some("ada@example.com".to_string()),
            name: Some("Ada".to_string()),
            ..Default::default()
        })
        .await
        .expect("reservation succeeds");
    println!(
        "reserved: {}",
        serde_json::to_string_pretty(&receipt).unwrap()
    );

    // (C) 正本とアーティファクトを読み戻す
    let ticket = app
        .tickets
        .get(receipt.ticket_id)
        .await
        .expect("ticket exists");
    println!(
        "stored ticket: id={} code={} status={}",
        ticket.id, ticket.ticket_code, ticket.status
    );
    let png = app
        .qr
        .stored_qr_png(ticket.id)
        .await
        .expect("artifact exists");
    println!(
        "stored qr artifact: {} bytes at {}",
        png.len(),
        receipt.qr_code
    );

    // (D) QR ペイロードを検証する（本物と改竄版）
    let content = QrPayload::for_ticket(&ticket).encode_canonical();
    match app.qr.validate(&content).await.expect("store reachable") {
        QrVerdict::Valid { ticket } => println!("qr valid for ticket {}", ticket.id),
        other => println!("unexpected verdict: {other:?}"),
    }
    let tampered = content.replace("ada@example.com", "mallory@example.com");
    println!(
        "tampered verdict: {:?}",
        app.qr.validate(&tampered).await.expect("store reachable")
    );

    // (E) キューに積まれた予約イベントを取り出す
    let events = queue
        .receive(10, Duration::from_millis(100))
        .await
        .expect("in-memory receive");
    println!("queued events: {events:?}");

    // (F) 検証エラーは副作用なしで返る
    let err = app
        .reservations
        .reserve(ReservationRequest {
            event_id: "not-a-uuid".to_string(),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    println!("rejected as expected: {err}");
}

//! Integration tests for the order-status poller against a mocked backend.

use std::time::Duration;

use tokio::sync::watch;
use vitrine_api::ShopClient;
use vitrine_checkout::{poll_order_status, spawn_poller, PollHandle, PollOutcome, PollUpdate};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn order_json(status: &str) -> serde_json::Value {
    serde_json::json!({
        "orderId": 42,
        "status": status,
        "totalAmount": 120.0,
        "currency": "EUR",
        "paymentType": "STRIPE",
        "shippingAddress": {
            "firstName": "Awa", "lastName": "Diop", "email": "awa@example.com",
            "address": "12 rue des Lilas", "city": "Paris",
            "postalCode": "75011", "country": "France"
        }
    })
}

fn client(server: &MockServer) -> ShopClient {
    ShopClient::with_base_url(&server.uri(), 10).expect("client should build")
}

#[tokio::test]
async fn polling_stops_on_the_first_paid_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("EN_ATTENTE")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("PAYEE")))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, rx) = watch::channel(PollUpdate::Checking);
    let handle = PollHandle::new();
    let outcome = poll_order_status(
        &client(&server),
        42,
        Duration::from_millis(5),
        &handle,
        &tx,
    )
    .await;

    assert_eq!(outcome, PollOutcome::Paid);
    assert_eq!(*rx.borrow(), PollUpdate::Paid);
    // Exactly three fetches: two pending, one paid, none after the terminal
    // status. The mock expectations verify the count on drop.
}

#[tokio::test]
async fn pending_statuses_are_published_while_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("EN_ATTENTE")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("PAYEE")))
        .mount(&server)
        .await;

    let (tx, mut rx) = watch::channel(PollUpdate::Checking);
    let handle = PollHandle::new();
    let client = client(&server);
    let poll = poll_order_status(
        &client,
        42,
        Duration::from_millis(5),
        &handle,
        &tx,
    );
    let watcher = async {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let update = rx.borrow_and_update().clone();
            let done = update == PollUpdate::Paid;
            seen.push(update);
            if done {
                break;
            }
        }
        seen
    };

    let (outcome, seen) = tokio::join!(poll, watcher);
    assert_eq!(outcome, PollOutcome::Paid);
    // The watch channel only holds the latest value, so assert on the
    // milestones rather than an exact sequence.
    assert!(seen.contains(&PollUpdate::Pending("EN_ATTENTE".to_owned())));
    assert_eq!(seen.last(), Some(&PollUpdate::Paid));
}

#[tokio::test]
async fn cancellation_stops_the_loop_without_further_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("EN_ATTENTE")))
        .expect(1)
        .mount(&server)
        .await;

    // Long enough that the cancel below always lands mid-sleep, short
    // enough to keep the test fast.
    let (handle, rx, task) = spawn_poller(client(&server), 42, Duration::from_millis(500));

    // Wait for the first pending update, then tear down mid-sleep.
    let mut rx = rx;
    loop {
        rx.changed().await.expect("poller publishes before sleeping");
        if *rx.borrow_and_update() == PollUpdate::Pending("EN_ATTENTE".to_owned()) {
            break;
        }
    }
    handle.cancel();

    let outcome = task.await.expect("poll task should not panic");
    assert_eq!(outcome, PollOutcome::Cancelled);
    // expect(1) on the mock proves cancellation prevented a second fetch.
}

#[tokio::test]
async fn transient_errors_keep_the_loop_alive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("PAYEE")))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, _rx) = watch::channel(PollUpdate::Checking);
    let handle = PollHandle::new();
    let outcome = poll_order_status(
        &client(&server),
        42,
        Duration::from_millis(5),
        &handle,
        &tx,
    )
    .await;

    assert_eq!(outcome, PollOutcome::Paid);
}

#[tokio::test]
async fn unknown_order_is_terminal_after_one_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, rx) = watch::channel(PollUpdate::Checking);
    let handle = PollHandle::new();
    let outcome = poll_order_status(
        &client(&server),
        999,
        Duration::from_millis(5),
        &handle,
        &tx,
    )
    .await;

    assert_eq!(outcome, PollOutcome::NotFound);
    assert_eq!(*rx.borrow(), PollUpdate::NotFound);
}

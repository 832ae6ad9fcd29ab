use super::*;
use crate::http::Api;
use crate::test_server::TestServer;
use crate::{AmieConfig, ErrorCode, Timeouts};
use packets::{PacketError, PacketType};
use serde_json::json;
use time::macros::datetime;

fn data_account_create(rec_id: Option<i64>) -> Packet {
    let mut packet = Packet::new(PacketType::DataAccountCreate)
        .with("PersonID", "jdoe")
        .unwrap()
        .with("ProjectID", "mcb200001p")
        .unwrap();
    packet.packet_rec_id = rec_id;
    packet.trans_rec_id = Some(4_512_009);
    packet
}

fn packet_json(kind: &str, rec_id: i64) -> serde_json::Value {
    json!({
        "DATA_TYPE": "Packet",
        "type": kind,
        "header": {"packet_rec_id": rec_id, "trans_rec_id": 4_512_009},
        "body": {"PersonID": "jdoe", "ProjectID": "mcb200001p"}
    })
}

fn client(server: &TestServer) -> AmieClient {
    AmieClient::from_config(&server.config()).unwrap()
}

// =============================================================================
// FILTER
// =============================================================================

#[test]
fn empty_filter_has_no_query() {
    assert!(PacketFilter::default().query_pairs().unwrap().is_empty());
}

#[test]
fn filter_joins_lists_and_renders_window() {
    let filter = PacketFilter {
        trans_rec_ids: vec![1, 2, 3],
        outgoing: Some(false),
        update_time_start: Some(datetime!(2021-03-01 00:00 UTC)),
        states: vec!["in-progress".into(), "failed".into()],
        client_states: vec![],
        ..PacketFilter::incoming()
    };
    let pairs = filter.query_pairs().unwrap();
    assert_eq!(
        pairs,
        vec![
            ("trans_rec_id", "1,2,3".to_string()),
            ("outgoing", "false".to_string()),
            ("update_time", "2021-03-01T00:00:00Z,".to_string()),
            ("states", "in-progress,failed".to_string()),
            ("incoming", "true".to_string()),
        ]
    );
}

#[test]
fn filter_window_may_be_open_at_start() {
    let filter = PacketFilter {
        update_time_until: Some(datetime!(2021-03-02 12:30 UTC)),
        ..PacketFilter::default()
    };
    assert_eq!(filter.query_pairs().unwrap(), vec![("update_time", ",2021-03-02T12:30:00Z".to_string())]);
}

// =============================================================================
// URLS
// =============================================================================

#[test]
fn url_keeps_base_path_and_encodes_segments() {
    let api = Api::new("https://example.org/amie/v0.10", "NCSA", "secret", Timeouts::default()).unwrap();
    assert_eq!(api.base_url(), "https://example.org/amie/v0.10/");
    assert_eq!(
        api.url(&["packets", "NC SA", "needs/review?x=1#top"]).unwrap().as_str(),
        "https://example.org/amie/v0.10/packets/NC%20SA/needs%2Freview%3Fx=1%23top"
    );
    assert_eq!(api.url(&["usage", ""]).unwrap().as_str(), "https://example.org/amie/v0.10/usage/");
}

#[test]
fn url_rejects_unparseable_base() {
    let err = Api::new("not a url", "NCSA", "secret", Timeouts::default()).err().unwrap();
    assert!(matches!(err, ClientError::ConfigParse(_)));
}

// =============================================================================
// REQUESTS
// =============================================================================

#[test]
fn new_uses_production_url() {
    let client = AmieClient::new("NCSA", "secret").unwrap();
    assert_eq!(client.amie_url(), crate::DEFAULT_AMIE_URL);
    assert_eq!(client.site_name(), "NCSA");
}

#[test]
fn new_rejects_unsendable_api_key() {
    let err = AmieClient::new("NCSA", "bad\nkey").err().unwrap();
    assert!(matches!(err, ClientError::InvalidHeader(_)));
}

#[tokio::test]
async fn send_packet_posts_json_with_auth_headers() {
    let server = TestServer::start().await;
    server.reply("POST", "/packets/NCSA", 200, r#"{"message": "ok"}"#);
    let packet = data_account_create(None);

    let ack = client(&server).send_packet(&packet, false).await.unwrap();
    assert_eq!(ack, json!({"message": "ok"}));

    let seen = server.last();
    assert_eq!(seen.method, axum::http::Method::POST);
    assert_eq!(seen.header("XA-API-KEY"), Some("secret"));
    assert_eq!(seen.header("XA-SITE"), Some("NCSA"));
    let body = seen.json();
    assert_eq!(body["type"], "data_account_create");
    assert_eq!(body["body"]["PersonID"], "jdoe");
}

#[tokio::test]
async fn send_packet_validates_before_sending() {
    let server = TestServer::start().await;
    let packet = Packet::new(PacketType::DataAccountCreate).with("PersonID", "jdoe").unwrap();

    let err = client(&server).send_packet(&packet, false).await.unwrap_err();
    assert!(matches!(err, ClientError::Packet(PacketError::MissingField { ref field, .. }) if field == "ProjectID"));
    assert!(server.seen().is_empty());
}

#[tokio::test]
async fn send_packet_can_skip_validation() {
    let server = TestServer::start().await;
    server.reply("POST", "/packets/NCSA", 200, "");
    let packet = Packet::new(PacketType::DataAccountCreate);

    let ack = client(&server).send_packet(&packet, true).await.unwrap();
    assert!(ack.is_null());
    assert_eq!(server.seen().len(), 1);
}

#[tokio::test]
async fn get_packet_parses_response() {
    let server = TestServer::start().await;
    server.reply("GET", "/packets/NCSA/181", 200, packet_json("data_account_create", 181).to_string());

    let packet = client(&server).get_packet(181).await.unwrap();
    assert_eq!(packet.packet_type(), PacketType::DataAccountCreate);
    assert_eq!(packet.packet_rec_id, Some(181));
}

#[tokio::test]
async fn get_transaction_hits_transaction_path() {
    let server = TestServer::start().await;
    let body = json!({
        "DATA_TYPE": "transaction",
        "transaction_id": 77,
        "state": "in-progress",
        "DATA": [packet_json("request_account_create", 1), packet_json("notify_account_create", 2)]
    });
    server.reply("GET", "/transactions/NCSA/4512009/packets", 200, body.to_string());

    let transaction = client(&server).get_transaction(4_512_009, None, None).await.unwrap();
    assert_eq!(transaction.transaction_id, Some(77));
    assert_eq!(transaction.packets.len(), 2);
    assert!(server.last().query.is_empty());
}

#[tokio::test]
async fn get_transaction_sends_update_window() {
    let server = TestServer::start().await;
    let body = json!({"DATA_TYPE": "transaction", "DATA": [packet_json("request_account_create", 1)]});
    server.reply("GET", "/transactions/NCSA/4512009/packets", 200, body.to_string());
    let client = client(&server);

    client
        .get_transaction(
            4_512_009,
            Some(datetime!(2021-03-01 00:00 UTC)),
            Some(datetime!(2021-03-02 12:30 UTC)),
        )
        .await
        .unwrap();
    assert_eq!(
        server.last().query.get("update_time").map(String::as_str),
        Some("2021-03-01T00:00:00Z,2021-03-02T12:30:00Z")
    );

    client
        .get_transaction(4_512_009, None, Some(datetime!(2021-03-02 12:30 UTC)))
        .await
        .unwrap();
    assert_eq!(server.last().query.get("update_time").map(String::as_str), Some(",2021-03-02T12:30:00Z"));
}

#[tokio::test]
async fn list_packets_sends_filter_as_query() {
    let server = TestServer::start().await;
    let body = json!({"message": "1 packet", "result": [packet_json("data_account_create", 5)]});
    server.reply("GET", "/packets/NCSA", 200, body.to_string());

    let filter = PacketFilter {
        trans_rec_ids: vec![10, 11],
        client_states: vec!["seen".into()],
        ..PacketFilter::incoming()
    };
    let list = client(&server).list_packets(&filter).await.unwrap();
    assert_eq!(list.len(), 1);

    let seen = server.last();
    assert_eq!(seen.query.get("trans_rec_id").map(String::as_str), Some("10,11"));
    assert_eq!(seen.query.get("client_states").map(String::as_str), Some("seen"));
    assert_eq!(seen.query.get("incoming").map(String::as_str), Some("true"));
    assert!(!seen.query.contains_key("states"));
    assert!(!seen.query.contains_key("update_time"));
}

#[tokio::test]
async fn non_success_status_surfaces_body() {
    let server = TestServer::start().await;
    server.reply("GET", "/packets/NCSA/9", 503, "maintenance");

    let err = client(&server).get_packet(9).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiResponse { status: 503, ref body } if body == "maintenance"));
    assert!(err.retryable());
}

#[tokio::test]
async fn unknown_route_is_not_retryable() {
    let server = TestServer::start().await;
    let err = client(&server).get_packet(404).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiResponse { status: 404, .. }));
    assert!(!err.retryable());
}

// =============================================================================
// CLIENT STATE
// =============================================================================

#[tokio::test]
async fn client_state_round_trip() {
    let server = TestServer::start().await;
    server.reply("PUT", "/packets/NCSA/181/client_state/processed", 200, "");
    server.reply("DELETE", "/packets/NCSA/181/client_state", 204, "");
    let client = client(&server);
    let packet = data_account_create(Some(181));

    client.set_packet_client_state(&packet, "processed").await.unwrap();
    client.clear_packet_client_state(&packet).await.unwrap();

    let paths: Vec<String> = server.seen().into_iter().map(|seen| seen.path).collect();
    assert_eq!(paths, vec!["/packets/NCSA/181/client_state/processed", "/packets/NCSA/181/client_state"]);
}

#[tokio::test]
async fn client_json_is_sent_as_body() {
    let server = TestServer::start().await;
    server.reply("PUT", "/packets/NCSA/181/client_json", 200, "");
    server.reply("DELETE", "/packets/NCSA/181/client_json", 200, "");
    let client = client(&server);
    let packet = data_account_create(Some(181));

    client
        .set_packet_client_json(&packet, &json!({"ticket": "HELP-42"}))
        .await
        .unwrap();
    assert_eq!(server.last().json(), json!({"ticket": "HELP-42"}));

    client.clear_packet_client_json(&packet).await.unwrap();
    assert_eq!(server.last().method, axum::http::Method::DELETE);
}

#[tokio::test]
async fn client_state_needs_record_id() {
    let server = TestServer::start().await;
    let packet = data_account_create(None);

    let err = client(&server)
        .set_packet_client_state(&packet, "processed")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingRecordId));
    assert!(server.seen().is_empty());
}

#[tokio::test]
async fn client_state_is_sent_as_one_path_segment() {
    let server = TestServer::start().await;
    server.reply("PUT", "/packets/NCSA/181/client_state/needs%2Freview%3Fx=1", 200, "");
    let packet = data_account_create(Some(181));

    client(&server)
        .set_packet_client_state(&packet, "needs/review?x=1")
        .await
        .unwrap();

    let seen = server.last();
    assert_eq!(seen.path, "/packets/NCSA/181/client_state/needs%2Freview%3Fx=1");
    assert!(seen.query.is_empty());
}

#[tokio::test]
async fn site_name_is_escaped_in_path() {
    let server = TestServer::start().await;
    server.reply("GET", "/packets/NC%20SA%2FWest/181", 200, packet_json("data_account_create", 181).to_string());
    let config = AmieConfig {
        site_name: "NC SA/West".into(),
        ..server.config()
    };

    let packet = AmieClient::from_config(&config).unwrap().get_packet(181).await.unwrap();
    assert_eq!(packet.packet_rec_id, Some(181));
    assert_eq!(server.last().header("XA-SITE"), Some("NC SA/West"));
}

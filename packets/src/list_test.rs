use super::*;
use crate::PacketType;
use serde_json::json;

fn packet_value(kind: &str, rec_id: i64) -> serde_json::Value {
    json!({
        "DATA_TYPE": "Packet",
        "type": kind,
        "header": {"packet_rec_id": rec_id, "trans_rec_id": 7},
        "body": {"PersonID": "p-1", "ProjectID": "proj-1"}
    })
}

#[test]
fn from_dict_parses_result_packets() {
    let list = PacketList::from_dict(json!({
        "message": "2 packets",
        "result": [
            packet_value("data_project_create", 1),
            packet_value("data_account_create", 2),
        ]
    }))
    .unwrap();

    assert_eq!(list.message.as_deref(), Some("2 packets"));
    assert_eq!(list.len(), 2);
    let kinds: Vec<PacketType> = list.iter().map(Packet::packet_type).collect();
    assert_eq!(kinds, vec![PacketType::DataProjectCreate, PacketType::DataAccountCreate]);
}

#[test]
fn from_dict_tolerates_missing_message_and_result() {
    let list = PacketList::from_dict(json!({})).unwrap();
    assert!(list.is_empty());
    assert!(list.message.is_none());
}

#[test]
fn from_dict_propagates_bad_packet() {
    let err = PacketList::from_dict(json!({"result": [{"type": "bogus", "header": {}, "body": {}}]}))
        .unwrap_err();
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn json_round_trip() {
    let list = PacketList::from_dict(json!({
        "message": null,
        "result": [packet_value("data_project_create", 11)]
    }))
    .unwrap();
    let parsed = PacketList::from_json(&list.json()).unwrap();
    assert_eq!(parsed, list);
}

#[test]
fn into_iterator_yields_owned_packets() {
    let list = PacketList::from_dict(json!({
        "result": [packet_value("data_project_create", 1), packet_value("data_project_create", 2)]
    }))
    .unwrap();
    let ids: Vec<Option<i64>> = list.into_iter().map(|packet| packet.packet_rec_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

use super::*;

#[test]
fn wire_tags_round_trip_through_from_str() {
    for kind in PacketType::ALL {
        assert_eq!(kind.as_str().parse::<PacketType>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn from_str_rejects_unknown_tag() {
    let err = "notify_everyone".parse::<PacketType>().unwrap_err();
    assert!(matches!(err, PacketError::UnknownPacketType(tag) if tag == "notify_everyone"));
}

#[test]
fn serde_uses_wire_tags() {
    assert_eq!(
        serde_json::to_value(PacketType::NotifyPersonIds).unwrap(),
        serde_json::json!("notify_person_ids")
    );
    for kind in PacketType::ALL {
        let value = serde_json::to_value(kind).unwrap();
        assert_eq!(value, serde_json::json!(kind.as_str()));
        assert_eq!(serde_json::from_value::<PacketType>(value).unwrap(), kind);
    }
}

#[test]
fn project_create_reply_chain() {
    let mut chain = vec![PacketType::RequestProjectCreate];
    while let Some(next) = chain.last().and_then(|kind| kind.expected_replies().first()) {
        chain.push(next.packet_type);
    }
    assert_eq!(
        chain,
        vec![
            PacketType::RequestProjectCreate,
            PacketType::NotifyProjectCreate,
            PacketType::DataProjectCreate,
            PacketType::InformTransactionComplete,
        ]
    );
}

#[test]
fn account_create_reply_chain() {
    assert!(PacketType::RequestAccountCreate.expects(PacketType::NotifyAccountCreate));
    assert!(PacketType::NotifyAccountCreate.expects(PacketType::DataAccountCreate));
    assert!(PacketType::DataAccountCreate.expects(PacketType::InformTransactionComplete));
}

#[test]
fn inform_transaction_complete_expects_nothing() {
    assert!(PacketType::InformTransactionComplete.expected_replies().is_empty());
}

#[test]
fn expected_replies_use_protocol_timeout() {
    for kind in PacketType::ALL {
        for expected in kind.expected_replies() {
            assert_eq!(expected.timeout, REPLY_TIMEOUT_MINUTES, "{kind}");
        }
    }
}

#[test]
fn is_request_matches_tag_prefix() {
    assert!(PacketType::RequestUserModify.is_request());
    assert!(!PacketType::NotifyUserModify.is_request());
    assert!(!PacketType::InformTransactionComplete.is_request());
}

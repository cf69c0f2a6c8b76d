use super::*;

#[test]
fn chat_request_serializes_message_field() {
    let req = ChatRequest { message: "Hi".to_owned() };
    assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"Hi"}"#);
}

#[test]
fn chat_reply_reads_reply_field() {
    let reply = ChatReply::from_body(r#"{"reply":"Hello!"}"#).unwrap();
    assert_eq!(reply.reply, "Hello!");
}

#[test]
fn chat_reply_ignores_extra_fields() {
    let reply = ChatReply::from_body(r#"{"reply":"ok","model":"llama3","done":true}"#).unwrap();
    assert_eq!(reply.reply, "ok");
}

#[test]
fn chat_reply_rejects_non_json() {
    let err = ChatReply::from_body("<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, DeliveryError::Parse(_)));
}

#[test]
fn chat_reply_rejects_missing_reply() {
    let err = ChatReply::from_body(r#"{"error":"boom"}"#).unwrap_err();
    assert!(matches!(err, DeliveryError::Parse(_)));
}

#[test]
fn chat_reply_rejects_non_string_reply() {
    assert!(ChatReply::from_body(r#"{"reply":42}"#).is_err());
    assert!(ChatReply::from_body(r#"{"reply":null}"#).is_err());
}

#[test]
fn delivery_error_messages() {
    assert_eq!(DeliveryError::Status(500).to_string(), "unexpected status 500");
    assert_eq!(DeliveryError::Network("offline".into()).to_string(), "network error: offline");
}

#[test]
fn endpoint_is_relative() {
    assert_eq!(CHATBOT_ENDPOINT, "/chatbot");
}

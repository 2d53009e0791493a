//! Wire format of the exchange REST API.

use serde::{Deserialize, Deserializer};

use crate::exchange::types::{ExchangeError, ExchangeResult};
use crate::submission::client::LedgerResponse;

/// Envelope shared by every exchange reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct WireReply<T> {
    /// `"0"` on success; nodes send it either as a string or a number.
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> WireReply<T> {
    pub fn is_success(&self) -> bool {
        self.code == LedgerResponse::SUCCESS_CODE
    }

    /// Remote message, or a generic one naming the code.
    pub fn message_or_code(&self) -> String {
        self.msg
            .clone()
            .unwrap_or_else(|| format!("Request failed with code {}", self.code))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SequenceData {
    /// Validated by [`parse_sequence`]; nodes have been seen sending strings.
    pub sequence: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitData {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl WireReply<SubmitData> {
    pub fn into_ledger_response(self) -> LedgerResponse {
        let data = self.data.unwrap_or_default();
        LedgerResponse {
            code: self.code,
            message: self.msg,
            hash: data.hash,
            result: data.result,
        }
    }
}

/// Accept a non-negative integer, as a JSON number or a numeric string.
pub fn parse_sequence(value: &serde_json::Value) -> ExchangeResult<u64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ExchangeError::Validation("Value is not a number (Sequence)".to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawCode::deserialize(deserializer)? {
        RawCode::Text(s) => s,
        RawCode::Integer(n) => n.to_string(),
        RawCode::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_code_accepts_string_and_number() {
        let from_str: WireReply<SubmitData> = serde_json::from_value(json!({"code": "0"})).unwrap();
        let from_num: WireReply<SubmitData> = serde_json::from_value(json!({"code": 0})).unwrap();
        assert!(from_str.is_success());
        assert!(from_num.is_success());

        let failure: WireReply<SubmitData> = serde_json::from_value(json!({"code": 109})).unwrap();
        assert_eq!(failure.code, "109");
    }

    #[test]
    fn test_missing_code_is_rejected() {
        let parsed = serde_json::from_value::<WireReply<SubmitData>>(json!({"msg": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_submit_reply_lowering() {
        let reply: WireReply<SubmitData> = serde_json::from_value(json!({
            "code": "100",
            "msg": "This sequence number has already past.",
            "data": {"result": "tefPAST_SEQ"}
        }))
        .unwrap();

        let response = reply.into_ledger_response();
        assert_eq!(response.code, "100");
        assert_eq!(response.result.as_deref(), Some("tefPAST_SEQ"));
        assert_eq!(response.hash, None);
    }

    #[test]
    fn test_message_fallback_names_code() {
        let reply: WireReply<SequenceData> = serde_json::from_value(json!({"code": 7})).unwrap();
        assert_eq!(reply.message_or_code(), "Request failed with code 7");
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence(&json!(200)).unwrap(), 200);
        assert_eq!(parse_sequence(&json!("201")).unwrap(), 201);

        for bad in [json!("abc"), json!(-1), json!(1.5), json!(null)] {
            let err = parse_sequence(&bad).unwrap_err();
            assert_eq!(err.to_string(), "Value is not a number (Sequence)");
        }
    }
}

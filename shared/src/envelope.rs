use serde::{Deserialize, Serialize};

/// 标准响应信封
///
/// 后端所有接口都返回 `{success, message, data, timestamp, errorCode?}`，
/// 客户端解包后只把 `data` 交给调用方。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// 失败响应以及 `DELETE` 等空响应中该字段为 null
    #[serde(default)]
    pub data: Option<T>,
    /// 服务端生成时间，客户端不解析，原样保留
    #[serde(default)]
    pub timestamp: String,
    /// 仅失败响应携带
    #[serde(default)]
    pub error_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_carries_data() {
        let raw = json!({
            "success": true,
            "message": "Poem retrieved successfully",
            "data": {"value": 42},
            "timestamp": "2024-01-16T10:00:00"
        });

        #[derive(Deserialize, Debug)]
        struct Payload {
            value: i32,
        }

        let env: ApiEnvelope<Payload> = serde_json::from_value(raw).unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().value, 42);
        assert!(env.error_code.is_none());
    }

    #[test]
    fn error_envelope_exposes_error_code() {
        let raw = json!({
            "success": false,
            "message": "Poem not found",
            "data": null,
            "timestamp": "2024-01-16T10:00:00",
            "errorCode": "RESOURCE_NOT_FOUND"
        });

        let env: ApiEnvelope<serde_json::Value> = serde_json::from_value(raw).unwrap();
        assert!(!env.success);
        assert_eq!(env.error_code.as_deref(), Some("RESOURCE_NOT_FOUND"));
        assert!(env.data.is_none());
    }
}

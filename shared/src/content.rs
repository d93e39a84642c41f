//! 内容领域模型
//!
//! 三类内容（诗、随想、歌曲）共享同一组基础字段：服务端分配的 id、
//! 创建时间、发布状态以及浏览/点赞计数。计数由服务端维护，客户端
//! 视为单调递增的只读值。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 发布状态
///
/// 线上传输使用 SCREAMING_SNAKE_CASE（`DRAFT` / `PUBLISHED`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    Draft,
    Published,
}

impl PublicationStatus {
    /// 查询参数中使用的字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "DRAFT",
            PublicationStatus::Published => "PUBLISHED",
        }
    }
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    pub id: i64,
    pub title: String,
    pub content: String,
    // 服务端序列化 LocalDateTime，不带时区偏移
    pub created_at: NaiveDateTime,
    pub status: PublicationStatus,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    pub view_count: u64,
    pub like_count: u64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub status: PublicationStatus,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    pub view_count: u64,
    pub like_count: u64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub lyrics: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub status: PublicationStatus,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
    pub view_count: u64,
    pub like_count: u64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// =========================================================
// 创建请求
// =========================================================

/// `status` 为 None 时整个字段从请求体中省略，服务端默认存为 DRAFT。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoemRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongRequest {
    pub title: String,
    pub lyrics: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_uses_wire_names() {
        assert_eq!(
            serde_json::to_value(PublicationStatus::Draft).unwrap(),
            json!("DRAFT")
        );
        let parsed: PublicationStatus = serde_json::from_value(json!("PUBLISHED")).unwrap();
        assert_eq!(parsed, PublicationStatus::Published);
    }

    #[test]
    fn poem_parses_server_shape() {
        let raw = json!({
            "id": 7,
            "title": "Night",
            "content": "words",
            "createdAt": "2024-01-16T10:00:00",
            "status": "PUBLISHED",
            "publishedAt": "2024-01-17T08:30:00",
            "viewCount": 12,
            "likeCount": 3,
            "userId": 1
        });

        let poem: Poem = serde_json::from_value(raw).unwrap();
        assert_eq!(poem.id, 7);
        assert_eq!(poem.status, PublicationStatus::Published);
        assert_eq!(poem.view_count, 12);
        assert!(poem.published_at.is_some());
    }

    #[test]
    fn create_request_omits_missing_status() {
        let req = CreatePoemRequest {
            title: "t".into(),
            content: "c".into(),
            status: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("status").is_none());

        let req = CreateThoughtRequest {
            content: "c".into(),
            status: Some(PublicationStatus::Published),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value.get("status").unwrap(), &json!("PUBLISHED"));
    }
}

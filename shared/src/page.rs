use serde::{Deserialize, Serialize};

/// 分页结果切片
///
/// 对应后端 `PageResponse<T>`，页码从 0 开始。`last` 为 true 表示当前
/// 查询条件下这是最后一页。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_metadata() {
        let raw = json!({
            "content": ["a", "b"],
            "pageNumber": 1,
            "pageSize": 2,
            "totalElements": 5,
            "totalPages": 3,
            "last": false
        });

        let page: Page<String> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.len(), 2);
        assert!(!page.last);
    }
}

//! 无限滚动信息流状态机
//!
//! 累积式加载：第 0 页替换整个序列，之后的页按到达顺序追加（不按 id
//! 去重，服务端保证跨页不重复）。哨兵元素进入视口触发下一页，但在途
//! 请求未结束或已经到底时触发被忽略。

use after_midnight_shared::{Page, PublicationStatus};

#[derive(Debug)]
pub struct Feed<T> {
    items: Vec<T>,
    next_page: u32,
    has_more: bool,
    loading: bool,
    /// 信息流的状态过滤配置。None = 给所有者展示全部状态。
    status_filter: Option<PublicationStatus>,
}

impl<T> Feed<T> {
    pub fn new() -> Self {
        Self::with_filter(None)
    }

    pub fn with_filter(status_filter: Option<PublicationStatus>) -> Self {
        Self {
            items: Vec::new(),
            next_page: 0,
            has_more: true,
            loading: false,
            status_filter,
        }
    }

    /// 请求开始下一页拉取。
    ///
    /// 返回要拉取的页码；在途请求未结束（重入保护）或没有更多数据时
    /// 返回 None，此时不允许发起网络调用。
    pub fn try_begin(&mut self) -> Option<u32> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.next_page)
    }

    /// 应用一页结果：第 0 页替换序列，其余追加。
    ///
    /// `last=true` 或空页都意味着到底（空页兜底服务端的边界误差），
    /// 此后 `try_begin` 永远返回 None。
    pub fn apply(&mut self, page: Page<T>) {
        self.loading = false;
        self.has_more = !page.last && !page.content.is_empty();
        self.next_page = page.page_number + 1;
        if page.page_number == 0 {
            self.items = page.content;
        } else {
            self.items.extend(page.content);
        }
    }

    /// 拉取失败：结束 loading，到底标记不变，等待用户重新触发
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// 过滤配置变化时回到初始状态，重新从第 0 页加载
    pub fn reset(&mut self, status_filter: Option<PublicationStatus>) {
        self.items.clear();
        self.next_page = 0;
        self.has_more = true;
        self.loading = false;
        self.status_filter = status_filter;
    }

    pub fn status_filter(&self) -> Option<PublicationStatus> {
        self.status_filter
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(values: Vec<i32>, number: u32, last: bool) -> Page<i32> {
        Page {
            content: values,
            page_number: number,
            page_size: 10,
            total_elements: 0,
            total_pages: 0,
            last,
        }
    }

    #[test]
    fn accumulates_pages_in_arrival_order() {
        let mut feed = Feed::new();

        assert_eq!(feed.try_begin(), Some(0));
        feed.apply(page_of(vec![1, 2], 0, false));

        assert_eq!(feed.try_begin(), Some(1));
        feed.apply(page_of(vec![3, 4], 1, false));

        assert_eq!(feed.try_begin(), Some(2));
        feed.apply(page_of(vec![5], 2, true));

        // 序列恰好等于各页 content 的顺序拼接
        assert_eq!(feed.items(), &[1, 2, 3, 4, 5]);
        assert!(!feed.has_more());
    }

    #[test]
    fn page_zero_replaces_accumulated_sequence() {
        let mut feed = Feed::new();
        feed.try_begin();
        feed.apply(page_of(vec![1, 2], 0, false));
        feed.try_begin();
        feed.apply(page_of(vec![3], 1, false));

        // 重新从第 0 页加载（例如刷新）时替换而非追加
        feed.reset(None);
        feed.try_begin();
        feed.apply(page_of(vec![7, 8], 0, false));
        assert_eq!(feed.items(), &[7, 8]);
    }

    #[test]
    fn reentrant_trigger_is_ignored_while_loading() {
        let mut feed = Feed::<i32>::new();

        assert_eq!(feed.try_begin(), Some(0));
        // 哨兵在同一次在途请求期间再次可见：不允许第二次网络调用
        assert_eq!(feed.try_begin(), None);

        feed.apply(page_of(vec![1], 0, false));
        assert_eq!(feed.try_begin(), Some(1));
    }

    #[test]
    fn last_flag_stops_further_fetches() {
        let mut feed = Feed::new();
        feed.try_begin();
        feed.apply(page_of(vec![1], 0, true));

        assert!(!feed.has_more());
        assert_eq!(feed.try_begin(), None);
    }

    #[test]
    fn empty_page_stops_further_fetches() {
        let mut feed = Feed::<i32>::new();
        feed.try_begin();
        // 服务端报 last=false 但返回空页：兜底判定到底
        feed.apply(page_of(vec![], 0, false));

        assert!(!feed.has_more());
        assert_eq!(feed.try_begin(), None);
    }

    #[test]
    fn failure_keeps_has_more_for_retry() {
        let mut feed = Feed::<i32>::new();
        assert_eq!(feed.try_begin(), Some(0));
        feed.fail();

        assert!(feed.has_more());
        // 失败后用户重新触发，仍然拉同一页
        assert_eq!(feed.try_begin(), Some(0));
    }

    #[test]
    fn filter_reset_returns_to_page_zero() {
        let mut feed = Feed::new();
        feed.try_begin();
        feed.apply(page_of(vec![1, 2], 0, false));

        feed.reset(Some(PublicationStatus::Published));
        assert!(feed.is_empty());
        assert_eq!(feed.status_filter(), Some(PublicationStatus::Published));
        assert_eq!(feed.try_begin(), Some(0));
    }
}

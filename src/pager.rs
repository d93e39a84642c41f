//! 分页列表状态机
//!
//! 持有一页数据与分页元信息。并发的换页请求用单调递增的请求代次标记，
//! 迟到的旧结果直接丢弃：最后发出的请求赢。

use after_midnight_shared::Page;

/// 一次列表拉取的代次凭证
///
/// `begin` 每调用一次代次加一；只有携带最新代次的结果会被应用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct PagedList<T> {
    items: Vec<T>,
    page: u32,
    total_pages: u32,
    loading: bool,
    latest: u64,
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            loading: false,
            latest: 0,
        }
    }

    /// 宣告一次新的拉取，旧的在途请求从此刻起全部作废
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket(self.latest)
    }

    /// 应用一页结果；整页替换，不做累积。
    ///
    /// 过期代次返回 false 且不改动任何状态。
    pub fn apply(&mut self, ticket: FetchTicket, page: Page<T>) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.page = page.page_number;
        self.total_pages = page.total_pages;
        self.items = page.content;
        self.loading = false;
        true
    }

    /// 拉取失败：只有最新代次的失败才结束 loading
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.loading = false;
        true
    }

    /// 把请求页码夹到合法区间 [0, total_pages - 1]，
    /// UI 层绝不发出越界页码的请求
    pub fn clamp(&self, requested: u32) -> u32 {
        if self.total_pages == 0 {
            0
        } else {
            requested.min(self.total_pages - 1)
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(values: Vec<i32>, number: u32, total_pages: u32) -> Page<i32> {
        Page {
            content: values,
            page_number: number,
            page_size: 9,
            total_elements: (total_pages as u64) * 9,
            total_pages,
            last: number + 1 >= total_pages,
        }
    }

    #[test]
    fn apply_replaces_items_without_accumulation() {
        let mut list = PagedList::new();
        let t = list.begin();
        assert!(list.apply(t, page_of(vec![1, 2, 3], 0, 2)));

        let t = list.begin();
        assert!(list.apply(t, page_of(vec![4, 5], 1, 2)));

        assert_eq!(list.items(), &[4, 5]);
        assert_eq!(list.page(), 1);
        assert!(!list.is_loading());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut list = PagedList::new();

        // 先后发出两次拉取：旧的 A，随后新的 B
        let a = list.begin();
        let b = list.begin();

        // B 先回来并被应用
        assert!(list.apply(b, page_of(vec![9], 1, 3)));
        // A 迟到，必须被丢弃，不能覆盖 B 的结果
        assert!(!list.apply(a, page_of(vec![1], 0, 3)));

        assert_eq!(list.items(), &[9]);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn stale_failure_does_not_clear_loading() {
        let mut list = PagedList::<i32>::new();
        let a = list.begin();
        let _b = list.begin();

        assert!(!list.fail(a));
        assert!(list.is_loading());
    }

    #[test]
    fn clamp_bounds_page_index() {
        let mut list = PagedList::new();
        let t = list.begin();
        list.apply(t, page_of(vec![1], 0, 3));

        assert_eq!(list.clamp(0), 0);
        assert_eq!(list.clamp(2), 2);
        assert_eq!(list.clamp(7), 2);
    }

    #[test]
    fn clamp_on_empty_result_set_is_zero() {
        let list = PagedList::<i32>::new();
        assert_eq!(list.clamp(5), 0);
    }

    #[test]
    fn prev_next_follow_bounds() {
        let mut list = PagedList::new();
        let t = list.begin();
        list.apply(t, page_of(vec![1], 1, 3));

        assert!(list.has_prev());
        assert!(list.has_next());

        let t = list.begin();
        list.apply(t, page_of(vec![1], 2, 3));
        assert!(!list.has_next());
    }
}

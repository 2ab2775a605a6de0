use crate::page::PageId;

/// The {previous, current, next} view into the page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub previous: Option<PageId>,
    pub current: PageId,
    pub next: Option<PageId>,
}

impl PageWindow {
    /// Window centred on `current` in a sequence of `page_count` pages, or
    /// `None` if `current` is out of range.
    pub fn around(current: PageId, page_count: usize) -> Option<Self> {
        let index = current.index();
        if index >= page_count {
            return None;
        }
        Some(Self {
            previous: index.checked_sub(1).map(PageId),
            current,
            next: (index + 1 < page_count).then_some(PageId(index + 1)),
        })
    }

    pub fn is_previous(&self, page: Option<PageId>) -> bool {
        page.is_some() && page == self.previous
    }

    pub fn is_next(&self, page: Option<PageId>) -> bool {
        page.is_some() && page == self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_immediate_or_absent() {
        for count in 1..6 {
            for i in 0..count {
                let window = PageWindow::around(PageId(i), count).unwrap();
                assert_eq!(window.previous.is_none(), i == 0);
                assert_eq!(window.next.is_none(), i == count - 1);
                if let Some(prev) = window.previous {
                    assert_eq!(prev.index() + 1, i);
                }
                if let Some(next) = window.next {
                    assert_eq!(next.index(), i + 1);
                }
            }
        }
    }

    #[test]
    fn out_of_range_has_no_window() {
        assert_eq!(PageWindow::around(PageId(3), 3), None);
        assert_eq!(PageWindow::around(PageId(0), 0), None);
    }

    #[test]
    fn absent_pages_never_match() {
        let first = PageWindow::around(PageId(0), 1).unwrap();
        assert!(!first.is_previous(None));
        assert!(!first.is_next(None));
    }
}

use crate::error::{MatchError, Result};

/// Fixed-size pages over a ranked result. Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(MatchError::InvalidArg("page size must be > 0".to_string()));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn has_next(&self, page: usize, total: usize) -> bool {
        self.page_start(page.saturating_add(1))
            .is_some_and(|start| start < total)
    }

    pub fn has_prev(&self, page: usize) -> bool {
        page > 0
    }

    /// Items on `page`. Page 0 of an empty result is an empty slice; any
    /// other page past the end is rejected.
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> Result<&'a [T]> {
        let start = match self.page_start(page) {
            Some(start) if page == 0 || start < items.len() => start,
            _ => {
                return Err(MatchError::InvalidArg(format!(
                    "page {} out of range (of {})",
                    page.saturating_add(1),
                    self.page_count(items.len())
                )));
            }
        };
        let end = start.saturating_add(self.page_size).min(items.len());
        Ok(&items[start.min(end)..end])
    }

    /// Index of the first item on `page`, or `None` when it does not fit in
    /// `usize`.
    pub fn page_start(&self, page: usize) -> Option<usize> {
        page.checked_mul(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_partial_last_page() {
        let pager = Pager::new(3).expect("pager");
        assert_eq!(pager.page_count(0), 0);
        assert_eq!(pager.page_count(3), 1);
        assert_eq!(pager.page_count(7), 3);
    }

    #[test]
    fn slices_pages() {
        let pager = Pager::new(3).expect("pager");
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(pager.slice(&items, 0).expect("page"), &[1, 2, 3]);
        assert_eq!(pager.slice(&items, 2).expect("page"), &[7]);
        assert!(pager.slice(&items, 3).is_err());
    }

    #[test]
    fn navigation_bounds() {
        let pager = Pager::new(3).expect("pager");
        assert!(pager.has_next(0, 4));
        assert!(!pager.has_next(1, 4));
        assert!(!pager.has_next(0, 3));
        assert!(!pager.has_prev(0));
        assert!(pager.has_prev(1));
    }

    #[test]
    fn empty_result_has_an_empty_first_page() {
        let pager = Pager::new(3).expect("pager");
        let items: Vec<u32> = Vec::new();
        assert!(pager.slice(&items, 0).expect("page").is_empty());
    }

    #[test]
    fn huge_page_numbers_are_out_of_range() {
        let pager = Pager::new(3).expect("pager");
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(pager.page_start(usize::MAX), None);
        assert!(matches!(
            pager.slice(&items, usize::MAX),
            Err(MatchError::InvalidArg(_))
        ));
        assert!(matches!(
            pager.slice(&items, usize::MAX / 3 + 1),
            Err(MatchError::InvalidArg(_))
        ));
        assert!(!pager.has_next(usize::MAX, 7));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Pager::new(0).is_err());
    }
}

/// Number of pages needed for `total` items at `limit` per page
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Items `(page-1)*limit .. page*limit`; pages start at 1 and a page past
/// the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Vec<T> {
    if page == 0 || limit == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(limit);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(limit).min(items.len());
    items[start..end].to_vec()
}

/// Page bookkeeping reported alongside a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_pages: usize,
    pub has_next_page: bool,
}

impl PageInfo {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        let total_pages = total_pages(total, limit);
        Self {
            total_pages,
            has_next_page: page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_pages_concatenate_to_full_set() {
        let items: Vec<u32> = (0..23).collect();
        for limit in 1..=25 {
            let pages = total_pages(items.len(), limit);
            let joined: Vec<u32> = (1..=pages)
                .flat_map(|page| paginate(&items, page, limit))
                .collect();
            assert_eq!(joined, items, "limit {}", limit);
            assert!(paginate(&items, pages + 1, limit).is_empty());
        }
    }

    #[test]
    fn test_page_info() {
        assert_eq!(
            PageInfo::new(23, 2, 10),
            PageInfo {
                total_pages: 3,
                has_next_page: true
            }
        );
        assert!(!PageInfo::new(23, 3, 10).has_next_page);
        assert!(!PageInfo::new(0, 1, 10).has_next_page);
    }

    #[test]
    fn test_invalid_page() {
        assert!(paginate(&[1, 2, 3], 0, 2).is_empty());
    }
}

//! Page window computation for the pagination bar

use serde::Serialize;

/// Most page numbers shown between the first and last buttons
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One control of the pagination bar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageControl {
    Previous { disabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { disabled: bool },
}

/// Number of pages for `total_items`; zero items means zero pages
pub fn total_pages(total_items: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(rows_per_page)
}

/// Controls for the given position, empty when there is at most one page
pub fn paginate(total_items: usize, rows_per_page: usize, current_page: usize) -> Vec<PageControl> {
    let total = total_pages(total_items, rows_per_page);
    if total <= 1 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total);

    let (start, end) = if current <= 3 {
        (2, (total - 1).min(MAX_VISIBLE_PAGES))
    } else if current + 3 >= total {
        (2.max(total.saturating_sub(4)), total - 1)
    } else {
        (2.max(current - 2), (total - 1).min(current + 2))
    };

    let page = |number: usize| PageControl::Page {
        number,
        active: number == current,
    };

    let mut controls = vec![PageControl::Previous { disabled: current == 1 }, page(1)];
    if start > 2 {
        controls.push(PageControl::Ellipsis);
    }
    controls.extend((start..=end).map(page));
    if end < total - 1 {
        controls.push(PageControl::Ellipsis);
    }
    if end < total {
        controls.push(page(total));
    }
    controls.push(PageControl::Next {
        disabled: current == total,
    });
    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(controls: &[PageControl]) -> Vec<Option<usize>> {
        controls
            .iter()
            .filter_map(|c| match c {
                PageControl::Page { number, .. } => Some(Some(*number)),
                PageControl::Ellipsis => Some(None),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert!(paginate(0, 10, 1).is_empty());
        assert!(paginate(10, 10, 1).is_empty());
    }

    #[test]
    fn test_three_pages_middle() {
        let controls = paginate(25, 10, 2);
        assert_eq!(numbers(&controls), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(controls.first(), Some(&PageControl::Previous { disabled: false }));
        assert_eq!(controls.last(), Some(&PageControl::Next { disabled: false }));
    }

    #[test]
    fn test_window_near_start() {
        let controls = paginate(200, 10, 1);
        assert_eq!(
            numbers(&controls),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]
        );
        assert_eq!(controls.first(), Some(&PageControl::Previous { disabled: true }));
    }

    #[test]
    fn test_window_in_middle() {
        let controls = paginate(200, 10, 10);
        assert_eq!(
            numbers(&controls),
            vec![Some(1), None, Some(8), Some(9), Some(10), Some(11), Some(12), None, Some(20)]
        );
    }

    #[test]
    fn test_window_near_end() {
        let controls = paginate(200, 10, 20);
        assert_eq!(
            numbers(&controls),
            vec![Some(1), None, Some(16), Some(17), Some(18), Some(19), Some(20)]
        );
        assert_eq!(controls.last(), Some(&PageControl::Next { disabled: true }));
    }

    #[test]
    fn test_exactly_one_active_page() {
        for total_items in [11, 25, 47, 60, 95, 200] {
            let pages = total_pages(total_items, 10);
            for current in 1..=pages {
                let controls = paginate(total_items, 10, current);
                let active: Vec<usize> = controls
                    .iter()
                    .filter_map(|c| match c {
                        PageControl::Page { number, active: true } => Some(*number),
                        _ => None,
                    })
                    .collect();
                assert_eq!(active, vec![current], "items={} page={}", total_items, current);

                let mut seen: Vec<usize> = numbers(&controls).into_iter().flatten().collect();
                let len = seen.len();
                seen.dedup();
                assert_eq!(seen.len(), len, "duplicate page button");
                assert!(seen.windows(2).all(|w| w[0] < w[1]));

                assert_eq!(
                    controls.first(),
                    Some(&PageControl::Previous { disabled: current == 1 })
                );
                assert_eq!(
                    controls.last(),
                    Some(&PageControl::Next { disabled: current == pages })
                );
            }
        }
    }
}

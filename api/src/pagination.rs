use serde::Serialize;

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn empty(page_size: usize) -> Self {
        Paginator::new(Vec::new(), page_size).get_page(1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Splits an already-ordered sequence into fixed-size pages.
///
/// Page numbers are 1-based. A request past the last page gets the last
/// page; page 0 gets the first. An empty sequence has zero pages but still
/// yields page 1 with no items.
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }

    pub fn num_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn get_page(self, number: usize) -> Page<T> {
        let total_items = self.items.len();
        let total_pages = self.num_pages();
        let page_number = number.clamp(1, total_pages.max(1));
        let start = (page_number - 1) * self.page_size;

        let items = self
            .items
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        Page {
            items,
            page_number,
            page_size: self.page_size,
            total_items,
            total_pages,
            has_next: page_number < total_pages,
            has_previous: page_number > 1,
        }
    }
}

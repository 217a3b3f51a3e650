//! Windowing over the filtered/sorted view: fixed pages or an
//! incrementally revealed prefix.

/// Read-only window description for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Paged {
        page: usize,
        total_pages: usize,
        page_size: usize,
    },
    Reveal {
        shown: usize,
        available: usize,
        batch: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Paged { page: usize, page_size: usize },
    Reveal { revealed: usize, batch: usize },
}

impl Window {
    pub fn paged(page_size: usize) -> Self {
        Window::Paged {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn reveal(batch: usize) -> Self {
        let batch = batch.max(1);
        Window::Reveal {
            revealed: batch,
            batch,
        }
    }

    /// Back to the start. Invoked on every state-replacing event (new
    /// dataset, new search term, new sort spec).
    pub fn reset(&mut self) {
        match self {
            Window::Paged { page, .. } => *page = 1,
            Window::Reveal { revealed, batch } => *revealed = *batch,
        }
    }

    /// Visible range `start..end` of the filtered/sorted view.
    pub fn range(&self, filtered: usize) -> (usize, usize) {
        match *self {
            Window::Paged { page, page_size } => {
                let start = (page - 1) * page_size;
                let start = start.min(filtered);
                (start, (start + page_size).min(filtered))
            }
            Window::Reveal { revealed, .. } => (0, revealed.min(filtered)),
        }
    }

    /// Jump to a page, clamped to `[1, total_pages]`. Paged mode only.
    pub fn request_page(&mut self, n: usize, filtered: usize) {
        if let Window::Paged { page, page_size } = self {
            let total = total_pages(filtered, *page_size);
            *page = n.clamp(1, total.max(1));
        }
    }

    /// Grow the revealed prefix by one batch. Reveal mode only; growth is
    /// idempotent at the end and never shrinks.
    pub fn request_more(&mut self, filtered: usize) {
        if let Window::Reveal { revealed, batch } = self {
            if *revealed < filtered {
                *revealed = (*revealed + *batch).min(filtered);
            }
        }
    }

    pub fn can_reveal_more(&self, filtered: usize) -> bool {
        match *self {
            Window::Reveal { revealed, .. } => revealed < filtered,
            Window::Paged { .. } => false,
        }
    }

    /// Reconcile with a filtered count that may have shrunk (after a
    /// delete or an edit that drops a row out of the filter).
    pub fn clamp(&mut self, filtered: usize) {
        match self {
            Window::Paged { page, page_size } => {
                let total = total_pages(filtered, *page_size);
                *page = (*page).min(total.max(1));
            }
            Window::Reveal { revealed, batch } => {
                *revealed = (*revealed).min(filtered.max(*batch));
            }
        }
    }

    pub fn state(&self, filtered: usize) -> WindowState {
        match *self {
            Window::Paged { page, page_size } => WindowState::Paged {
                page,
                total_pages: total_pages(filtered, page_size),
                page_size,
            },
            Window::Reveal { revealed, batch } => WindowState::Reveal {
                shown: revealed.min(filtered),
                available: filtered,
                batch,
            },
        }
    }
}

fn total_pages(filtered: usize, page_size: usize) -> usize {
    filtered.div_ceil(page_size)
}

//! Page slicing and the compact page-number window for navigation controls.

use serde::{Serialize, Serializer};

use bazaar_core::ValueObject;

/// One slot of the page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageEntry::Page(n) => serializer.serialize_u64(*n as u64),
            PageEntry::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

impl core::fmt::Display for PageEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PageEntry::Page(n) => write!(f, "{n}"),
            PageEntry::Ellipsis => f.write_str("..."),
        }
    }
}

/// Ordered page numbers and ellipsis markers, always starting at page 1 and
/// ending at the last page when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageWindow(Vec<PageEntry>);

impl PageWindow {
    pub fn entries(&self) -> &[PageEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The page numbers in the window, skipping ellipses.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter_map(|e| match e {
            PageEntry::Page(n) => Some(*n),
            PageEntry::Ellipsis => None,
        })
    }
}

impl FromIterator<PageEntry> for PageWindow {
    fn from_iter<I: IntoIterator<Item = PageEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl core::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl ValueObject for PageWindow {}

/// One page of a list plus what the navigation controls need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub window: PageWindow,
}

/// Fixed-size pagination.
///
/// The paginator never clamps `current_page`; callers keep it within
/// `1..=max(total_pages, 1)`. Out-of-range pages yield an empty slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    max_visible: usize,
}

impl Paginator {
    pub const DEFAULT_PAGE_SIZE: usize = 20;
    pub const DEFAULT_MAX_VISIBLE: usize = 5;
    pub const MIN_VISIBLE: usize = 5;

    /// `page_size` is raised to 1 and `max_visible` to 5 if smaller.
    pub fn new(page_size: usize, max_visible: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            max_visible: max_visible.max(Self::MIN_VISIBLE),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Items of the 1-based `current_page`.
    pub fn slice<'a, T>(&self, items: &'a [T], current_page: usize) -> &'a [T] {
        if current_page == 0 {
            return &[];
        }
        let start = (current_page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Page numbers to show for `current_page` out of `total_pages`.
    ///
    /// With the default of 5 visible pages:
    /// - up to 5 pages: all of them
    /// - near the start: `1 2 3 4 ... N`
    /// - near the end: `1 ... N-3 N-2 N-1 N`
    /// - otherwise: `1 ... c-1 c c+1 ... N`
    pub fn window(&self, current_page: usize, total_pages: usize) -> PageWindow {
        if total_pages <= self.max_visible {
            return (1..=total_pages).map(PageEntry::Page).collect();
        }

        let edge_run = self.max_visible - 2;
        let radius = (self.max_visible - 3) / 2;

        let (start, end) = if current_page <= edge_run {
            (2, edge_run + 1)
        } else if current_page > total_pages - edge_run {
            (total_pages - edge_run, total_pages - 1)
        } else {
            (current_page - radius, current_page + radius)
        };

        let mut entries = Vec::with_capacity(self.max_visible + 2);
        entries.push(PageEntry::Page(1));
        if start > 2 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.extend((start..=end).map(PageEntry::Page));
        if end < total_pages - 1 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page(total_pages));
        PageWindow(entries)
    }

    pub fn paginate<T: Clone>(&self, items: &[T], current_page: usize) -> Page<T> {
        let total_pages = self.total_pages(items.len());
        Page {
            items: self.slice(items, current_page).to_vec(),
            current_page,
            total_pages,
            window: self.window(current_page, total_pages),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, Self::DEFAULT_MAX_VISIBLE)
    }
}

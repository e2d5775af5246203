//! Splits a list of items into numbered pages.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::{
    context::{Context, merge},
    error::{Error, Result},
    routing::{PathPrefix, calculate_skip, paginated_path, sibling_path},
};

/// A page handed to the host for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub component: String,
    pub context: Context,
}

#[derive(Debug, Default)]
pub struct PaginateOptions {
    pub items_per_page: usize,
    /// Size of page 0; falls back to `items_per_page`.
    pub items_per_first_page: Option<usize>,
    pub path_prefix: PathPrefix,
    pub component: String,
    /// Caller data copied into every page's context.
    pub context: Context,
}

impl PaginateOptions {
    pub fn first_page_count(&self) -> usize {
        self.items_per_first_page.unwrap_or(self.items_per_page)
    }
}

/// One page of a paginated listing.
///
/// `limit` is never clamped to the number of remaining items, so the last
/// page may ask for more than exists. Use [`PageDescriptor::window`] when
/// slicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    #[serde(skip)]
    pub path: String,
    pub page_number: usize,
    pub human_page_number: usize,
    pub skip: usize,
    pub limit: usize,
    pub number_of_pages: usize,
    pub previous_page_path: String,
    pub next_page_path: String,
}

impl PageDescriptor {
    pub fn window(&self, total_items: usize) -> Range<usize> {
        let start = self.skip.min(total_items);
        let end = self.skip.saturating_add(self.limit).min(total_items);
        start..end
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last(&self) -> bool {
        self.page_number + 1 == self.number_of_pages
    }
}

pub fn number_of_pages(
    total_items: usize,
    first_page_count: usize,
    items_per_page: usize,
) -> usize {
    if total_items <= first_page_count {
        1
    } else {
        (total_items - first_page_count).div_ceil(items_per_page) + 1
    }
}

/// Computes every page descriptor for `total_items` without registering
/// anything.
pub fn plan_pages(total_items: usize, opts: &PaginateOptions) -> Result<Vec<PageDescriptor>> {
    if opts.items_per_page == 0 {
        return Err(Error::InvalidConfiguration(
            "items_per_page must be greater than zero".into(),
        ));
    }

    let first_page_count = opts.first_page_count();
    let total_pages = number_of_pages(total_items, first_page_count, opts.items_per_page);
    let prefix = &opts.path_prefix;

    let pages = (0..total_pages)
        .map(|page_number| PageDescriptor {
            path: paginated_path(prefix, page_number, total_pages),
            page_number,
            human_page_number: page_number + 1,
            skip: calculate_skip(page_number, first_page_count, opts.items_per_page),
            limit: if page_number == 0 {
                first_page_count
            } else {
                opts.items_per_page
            },
            number_of_pages: total_pages,
            previous_page_path: sibling_path(prefix, page_number, -1, total_pages),
            next_page_path: sibling_path(prefix, page_number, 1, total_pages),
        })
        .collect();

    Ok(pages)
}

/// Registers one page per slice of `items` through `create_page`, in page
/// order.
pub fn paginate<T>(
    items: &[T],
    opts: &PaginateOptions,
    mut create_page: impl FnMut(Page),
) -> Result<Vec<PageDescriptor>> {
    let pages = plan_pages(items.len(), opts)?;

    for page in &pages {
        let context = merge(opts.context.clone(), page)?;
        debug!(
            "page {}/{} -> {} (skip {}, limit {})",
            page.human_page_number, page.number_of_pages, page.path, page.skip, page.limit
        );
        create_page(Page {
            path: page.path.clone(),
            component: opts.component.clone(),
            context,
        });
    }

    info!("paginated {} items into {} pages", items.len(), pages.len());
    Ok(pages)
}

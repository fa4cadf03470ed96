//! Room list presentation: sorting and pagination.
//!
//! The service layer returns the full filtered list; paging happens here,
//! on the caller's side.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::Room;

/// Sort order for the room list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Cheapest first; ties broken by name.
    Price,
}

/// Case-insensitive name order, with exact text as the tiebreak.
#[must_use]
pub fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort rooms in place.
pub fn sort_rooms(rooms: &mut [Room], order: RoomSort) {
    match order {
        RoomSort::Name => rooms.sort_by(|a, b| name_order(&a.name, &b.name)),
        RoomSort::Price => {
            rooms.sort_by(|a, b| {
                a.price
                    .cmp(&b.price)
                    .then_with(|| name_order(&a.name, &b.name))
            });
        }
    }
}

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Items across all pages.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Whether a later page has items.
    pub has_next: bool,
    /// Whether this is not the first page.
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items; at least 1.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit).max(1)
    }
}

/// Cut `items` into the requested 1-based page.
///
/// Page 0 is treated as page 1. A page past the end is empty but still
/// reports `total` and `has_prev`. A zero `limit` puts everything on one page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();

    if limit == 0 {
        return Page {
            items,
            total,
            page: 1,
            limit: total,
            has_next: false,
            has_prev: false,
        };
    }

    let start = (page - 1).saturating_mul(limit);
    let items: Vec<T> = items.into_iter().skip(start).take(limit).collect();

    Page {
        items,
        total,
        page,
        limit,
        has_next: start.saturating_add(limit) < total,
        has_prev: page > 1,
    }
}

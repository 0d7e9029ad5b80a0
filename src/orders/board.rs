//! Derived views for the order boards. Pure functions of the order list and the clock.

use crate::model::{Order, OrderKey, OrderStatus, OrderType};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Minutes after which an unfinished order counts as delayed.
pub const DELAY_THRESHOLD_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTab {
    /// Pending and preparing orders.
    Active,
    Completed,
}

impl BoardTab {
    pub fn includes(self, status: OrderStatus) -> bool {
        match self {
            BoardTab::Active => status.is_active(),
            BoardTab::Completed => status == OrderStatus::Completed,
        }
    }
}

/// Per-type counts shown on the filter buttons of a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCounts {
    pub all: usize,
    pub dine_in: usize,
    pub takeaway: usize,
}

fn active_rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Preparing => 0,
        _ => 1,
    }
}

/// Sorts orders for a tab.
///
/// Active: `preparing` before `pending`, oldest first within each. Completed: newest first.
pub fn sort_orders(orders: &mut [&Order], tab: BoardTab) {
    match tab {
        BoardTab::Active => orders.sort_by(|a, b| {
            active_rank(a.status)
                .cmp(&active_rank(b.status))
                .then(a.timestamp.cmp(&b.timestamp))
        }),
        BoardTab::Completed => orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
    }
}

/// The orders of one tab, optionally limited to one order type, in display order.
pub fn board(orders: &[Order], tab: BoardTab, order_type: Option<OrderType>) -> Vec<&Order> {
    let mut shown: Vec<&Order> = orders
        .iter()
        .filter(|o| tab.includes(o.status))
        .filter(|o| order_type.map_or(true, |t| o.order_type == t))
        .collect();
    sort_orders(&mut shown, tab);
    shown
}

/// The order the kitchen should handle next: the head of the sorted active board.
pub fn priority_order<'a>(active_board: &[&'a Order]) -> Option<&'a Order> {
    active_board.first().copied().filter(|o| o.is_active())
}

pub fn board_counts(orders: &[Order], tab: BoardTab) -> BoardCounts {
    orders
        .iter()
        .filter(|o| tab.includes(o.status))
        .fold(BoardCounts::default(), |mut counts, o| {
            counts.all += 1;
            match o.order_type {
                OrderType::DineIn => counts.dine_in += 1,
                OrderType::Takeaway => counts.takeaway += 1,
            }
            counts
        })
}

/// True when an unfinished order is more than [`DELAY_THRESHOLD_MINUTES`] whole minutes old.
/// Completed orders are never delayed.
pub fn is_order_delayed(timestamp: DateTime<Utc>, status: OrderStatus, now: DateTime<Utc>) -> bool {
    if status == OrderStatus::Completed {
        return false;
    }
    (now - timestamp).num_minutes() > DELAY_THRESHOLD_MINUTES
}

/// Relative age label as shown on order cards.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    if minutes < 1 {
        return "Vừa xong".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} phút trước");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} giờ trước");
    }
    format!("{} ngày trước", hours / 24)
}

/// Add-on orders whose parent is no longer in `orders`.
pub fn orphaned_additions(orders: &[Order]) -> Vec<&Order> {
    let keys: HashSet<OrderKey> = orders.iter().map(|o| o.key).collect();
    orders
        .iter()
        .filter(|o| o.parent_order_key.is_some_and(|parent| !keys.contains(&parent)))
        .collect()
}

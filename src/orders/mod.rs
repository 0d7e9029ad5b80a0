//! Order lifecycle, add-on reconciliation and the derived board views.

pub mod board;
pub mod reconcile;
pub mod workflow;

pub use board::{
    board, board_counts, is_order_delayed, orphaned_additions, priority_order, sort_orders,
    time_ago, BoardCounts, BoardTab, DELAY_THRESHOLD_MINUTES,
};
pub use reconcile::{merge_lines, Reconciler, MERGE_ATTEMPTS};
pub use workflow::{OrderDesk, StatusChange};

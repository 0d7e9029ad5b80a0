//! Revenue reports.
//!
//! Everything here is a fold over the order list; nothing is stored or cached. Only
//! `completed` orders count as revenue. Calendar boundaries (day, Sunday-based week, month,
//! hour of day) are taken in the time zone of the `now` passed in.

use crate::model::{MenuItemId, Order, OrderStatus, OrderType};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Order count and revenue of a set of orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub order_count: usize,
    pub revenue: u64,
}

impl WindowStats {
    pub fn of<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut stats, order| {
            stats.order_count += 1;
            stats.revenue += order.total;
            stats
        })
    }

    /// Average order value, rounded down. Zero for an empty window.
    pub fn average(&self) -> u64 {
        match self.order_count {
            0 => 0,
            n => self.revenue / n as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub id: MenuItemId,
    pub name: String,
    pub quantity: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    pub today: WindowStats,
    pub week: WindowStats,
    pub month: WindowStats,
    pub total: WindowStats,
    pub top_items: Vec<TopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    pub order_type: OrderType,
    pub stats: WindowStats,
    /// Share of the revenue in percent; 0 when there is no revenue at all.
    pub share_percent: f64,
    pub average: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBreakdown {
    /// Hour of day (0-23) to stats, hours without orders omitted.
    pub hours: BTreeMap<u32, WindowStats>,
    /// Hour with the highest revenue; the earliest such hour on ties.
    pub peak_hour: Option<u32>,
}

/// Everything the day view shows for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: NaiveDate,
    pub stats: WindowStats,
    /// Drinks sold, counting quantities.
    pub cups: u64,
    pub top_items: Vec<TopItem>,
    pub by_type: Vec<TypeShare>,
    pub hourly: HourlyBreakdown,
}

pub fn completed_orders(orders: &[Order]) -> impl Iterator<Item = &Order> + Clone {
    orders.iter().filter(|o| o.status == OrderStatus::Completed)
}

fn local_time<Tz: TimeZone>(order: &Order, tz: &Tz) -> NaiveDateTime {
    order.timestamp.with_timezone(tz).naive_local()
}

/// Today, this week (from Sunday), this month and all time, over completed orders.
/// Top items are taken over all completed orders.
pub fn revenue_stats<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> RevenueStats {
    let tz = now.timezone();
    let today = now.date_naive();
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let month_start = today - Duration::days(i64::from(today.day0()));

    let since = |start: NaiveDate| {
        let start = start.and_time(chrono::NaiveTime::MIN);
        WindowStats::of(completed_orders(orders).filter(|o| local_time(o, &tz) >= start))
    };

    RevenueStats {
        today: since(today),
        week: since(week_start),
        month: since(month_start),
        total: WindowStats::of(completed_orders(orders)),
        top_items: top_items(completed_orders(orders)),
    }
}

/// Quantity and revenue per menu item, most sold first. Items sold equally often keep the
/// order in which they were first encountered.
pub fn top_items<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();
    let mut index: HashMap<MenuItemId, usize> = HashMap::new();

    for line in orders.into_iter().flat_map(|o| o.items.iter()) {
        let pos = *index.entry(line.item.id).or_insert_with(|| {
            items.push(TopItem {
                id: line.item.id,
                name: line.item.name.clone(),
                quantity: 0,
                revenue: 0,
            });
            items.len() - 1
        });
        items[pos].quantity += u64::from(line.quantity);
        items[pos].revenue += line.line_total();
    }

    items.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    items
}

pub fn order_type_breakdown<'a>(orders: impl IntoIterator<Item = &'a Order> + Clone) -> Vec<TypeShare> {
    let total = WindowStats::of(orders.clone()).revenue;
    OrderType::ALL
        .iter()
        .map(|&order_type| {
            let stats = WindowStats::of(orders.clone().into_iter().filter(|o| o.order_type == order_type));
            let share_percent = if total > 0 {
                stats.revenue as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            TypeShare {
                order_type,
                average: stats.average(),
                stats,
                share_percent,
            }
        })
        .collect()
}

pub fn hourly_breakdown<'a, Tz: TimeZone>(
    orders: impl IntoIterator<Item = &'a Order>,
    tz: &Tz,
) -> HourlyBreakdown {
    let mut hours: BTreeMap<u32, WindowStats> = BTreeMap::new();
    for order in orders {
        let slot = hours.entry(local_time(order, tz).hour()).or_default();
        slot.order_count += 1;
        slot.revenue += order.total;
    }

    let mut peak_hour: Option<(u32, u64)> = None;
    for (&hour, stats) in &hours {
        if peak_hour.map_or(true, |(_, best)| stats.revenue > best) {
            peak_hour = Some((hour, stats.revenue));
        }
    }

    HourlyBreakdown {
        hours,
        peak_hour: peak_hour.map(|(hour, _)| hour),
    }
}

/// Orders placed in `[start, end)`. Without `end`, up to now.
pub fn filter_orders_by_date(
    orders: &[Order],
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Vec<&Order> {
    let end = end.unwrap_or_else(Utc::now);
    orders
        .iter()
        .filter(|o| o.timestamp >= start && o.timestamp < end)
        .collect()
}

/// Completed orders of one local calendar day, newest first.
pub fn day_orders<'a, Tz: TimeZone>(orders: &'a [Order], day: NaiveDate, tz: &Tz) -> Vec<&'a Order> {
    let mut picked: Vec<&Order> = completed_orders(orders)
        .filter(|o| local_time(o, tz).date() == day)
        .collect();
    picked.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    picked
}

pub fn day_summary<Tz: TimeZone>(orders: &[Order], day: NaiveDate, tz: &Tz) -> DaySummary {
    let picked = day_orders(orders, day, tz);
    DaySummary {
        day,
        stats: WindowStats::of(picked.iter().copied()),
        cups: picked
            .iter()
            .flat_map(|o| o.items.iter())
            .map(|line| u64::from(line.quantity))
            .sum(),
        top_items: top_items(picked.iter().copied()),
        by_type: order_type_breakdown(picked.iter().copied()),
        hourly: hourly_breakdown(picked.iter().copied(), tz),
    }
}

/// Day picker of the revenue view. Never moves past today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNavigator {
    selected: NaiveDate,
}

impl DayNavigator {
    pub fn new(today: NaiveDate) -> Self {
        Self { selected: today }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Moves the selection by `days`. Returns false (and stays put) if that would land
    /// after `today` or outside the calendar.
    pub fn step(&mut self, days: i64, today: NaiveDate) -> bool {
        let next = Duration::try_days(days).and_then(|delta| self.selected.checked_add_signed(delta));
        match next {
            Some(next) if next <= today => {
                self.selected = next;
                true
            }
            _ => false,
        }
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.selected == today
    }
}

/// `"CN, 05/01/2026"` style label.
pub fn format_day_label(day: NaiveDate) -> String {
    const WEEKDAYS: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];
    let weekday = WEEKDAYS[day.weekday().num_days_from_sunday() as usize];
    format!("{weekday}, {:02}/{:02}/{}", day.day(), day.month(), day.year())
}

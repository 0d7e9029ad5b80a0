//! # Brew POS demo
//!
//! Runs one shift in miniature against in-process stores:
//! 1. Seeds the starter menu.
//! 2. Places a dine-in order and walks it through the kitchen.
//! 3. Adds a drink to the served order and completes the add-on, which merges it back.
//! 4. Prints the board and the revenue summary.

use brew_pos::cart::Cart;
use brew_pos::config::PosConfig;
use brew_pos::lifecycle::{setup_tracing, PosSystem};
use brew_pos::model::{Category, MenuItemCreate, Order, OrderItem, OrderStatus, OrderType};
use brew_pos::orders::{board, priority_order, time_ago, BoardTab};
use brew_pos::revenue::{day_summary, format_day_label, revenue_stats};
use brew_pos::store::record::order_to_record;
use brew_pos::store::{MenuStore, OrderStore};
use chrono::{Local, Utc};
use std::error::Error;
use tracing::{info, warn, Instrument};

fn starter_menu() -> Vec<MenuItemCreate> {
    vec![
        MenuItemCreate::new("Cà Phê Đen", 18_000, Category::Coffee),
        MenuItemCreate::new("Cà Phê Sữa", 20_000, Category::Coffee),
        MenuItemCreate::new("Bạc Xỉu", 25_000, Category::Coffee),
        MenuItemCreate::new("Cà Phê Muối", 30_000, Category::Specialty),
        MenuItemCreate::new("Matcha Latte", 35_000, Category::Specialty),
        MenuItemCreate::new("Trà Sữa Trân Châu", 30_000, Category::MilkTea),
        MenuItemCreate::new("Trà Đào Cam Sả", 35_000, Category::MilkTea),
        MenuItemCreate::new("Sữa Hạt Óc Chó", 40_000, Category::Healthy),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = PosConfig::from_env()?;
    setup_tracing(&config);

    info!(shop = %config.shop_name, "Starting");
    let system = PosSystem::new(&config);

    if config.seed_menu {
        let seeded = system.menu_client.seed_if_empty(starter_menu()).await?;
        info!(seeded, "Menu ready");
    }
    let menu = system.menu_client.menu_once().await?;

    let board_feed = system
        .order_client
        .subscribe_orders(Box::new(|orders: Vec<Order>| {
            let active = orders.iter().filter(|o| o.is_active()).count();
            info!(orders = orders.len(), active, "Board refreshed");
        }))
        .await?;

    let desk = system.order_desk();

    let span = tracing::info_span!("counter");
    let first = async {
        let mut cart = Cart::new();
        for item in menu.iter().take(2) {
            cart.add(item);
        }
        if let Some(first_line) = menu.first() {
            cart.add(first_line);
        }
        desk.place_order(&mut cart, "Bàn 3", OrderType::DineIn, Utc::now())
            .await
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("kitchen");
    async {
        desk.update_status(first, OrderStatus::Preparing).await?;
        desk.update_status(first, OrderStatus::Completed).await
    }
    .instrument(span)
    .await?;

    if let Some(extra) = menu.iter().find(|item| item.category == Category::Specialty) {
        let add_on = desk
            .add_to_order(first, vec![OrderItem::new(extra.clone(), 1, "ít ngọt")], Utc::now())
            .await?;
        match desk.update_status(add_on, OrderStatus::Completed).await {
            Ok(change) => info!(?change, "Add-on completed"),
            Err(e) => warn!(error = %e, kind = ?e.kind(), "Add-on could not be merged"),
        }
    }

    desk.toggle_payment(first, true).await?;

    let orders = system.order_client.all_orders_once().await?;
    let now = Utc::now();
    let active = board(&orders, BoardTab::Active, None);
    if let Some(next) = priority_order(&active) {
        info!(key = %next.key, age = %time_ago(next.timestamp, now), "Next up");
    }
    for order in board(&orders, BoardTab::Completed, None) {
        println!("{}", serde_json::to_string_pretty(&order_to_record(order)?)?);
    }

    let local_now = Local::now();
    let stats = revenue_stats(&orders, &local_now);
    let today = day_summary(&orders, local_now.date_naive(), &Local);
    println!(
        "{}: {} orders, {}đ today; top item: {}",
        format_day_label(today.day),
        stats.today.order_count,
        stats.today.revenue,
        stats
            .top_items
            .first()
            .map(|item| item.name.as_str())
            .unwrap_or("-"),
    );

    board_feed.unsubscribe();
    drop(desk);
    system.shutdown().await?;

    info!("Done");
    Ok(())
}

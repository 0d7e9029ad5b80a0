use brew_pos::cart::{Cart, QuantityChange};
use brew_pos::config::PosConfig;
use brew_pos::lifecycle::PosSystem;
use brew_pos::model::{
    Category, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Order, OrderItem, OrderStatus,
    OrderType,
};
use brew_pos::order_actor::ErrorKind;
use brew_pos::orders::{OrderDesk, StatusChange};
use brew_pos::store::{MenuStore, OrderStore};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

fn starter_menu() -> Vec<MenuItemCreate> {
    vec![
        MenuItemCreate::new("Cà Phê Đen", 18_000, Category::Coffee),
        MenuItemCreate::new("Bạc Xỉu", 25_000, Category::Coffee),
        MenuItemCreate::new("Trà Đào Cam Sả", 35_000, Category::MilkTea),
    ]
}

async fn item(system: &PosSystem, id: u32) -> MenuItem {
    system
        .menu_client
        .menu_once()
        .await
        .expect("Failed to read menu")
        .into_iter()
        .find(|item| item.id == MenuItemId(id))
        .expect("Menu item not found")
}

async fn completed_order(desk: &OrderDesk<brew_pos::clients::OrderClient>, items: Vec<OrderItem>) -> brew_pos::model::OrderKey {
    let mut cart = Cart::new();
    for line in &items {
        cart.add(&line.item);
        let last = cart.lines().len() - 1;
        cart.update_quantity(last, line.quantity as i32 - 1).unwrap();
        cart.update_note(last, line.note.clone()).unwrap();
    }
    let key = desk
        .place_order(&mut cart, "Bàn 1", OrderType::DineIn, Utc::now())
        .await
        .expect("Failed to place order");
    desk.update_status(key, OrderStatus::Completed)
        .await
        .expect("Failed to complete order");
    key
}

/// Full end-to-end test with real store actors.
#[tokio::test]
async fn test_full_shift() {
    let system = PosSystem::new(&PosConfig::default());

    // Menu seeding happens once
    let seeded = system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    assert_eq!(seeded, 3);
    assert_eq!(system.menu_client.seed_if_empty(starter_menu()).await.unwrap(), 0);

    let coffee = item(&system, 1).await;
    let tea = item(&system, 3).await;

    // Live board
    let (tx, mut snapshots) = mpsc::unbounded_channel::<Vec<Order>>();
    let feed = system
        .order_client
        .subscribe_orders(Box::new(move |orders: Vec<Order>| {
            let _ = tx.send(orders);
        }))
        .await
        .unwrap();
    assert!(snapshots.recv().await.unwrap().is_empty());

    let desk = system.order_desk();

    // Takeaway order: two coffees (merged line) and a tea with a note
    let mut cart = Cart::new();
    cart.add(&coffee);
    cart.add(&coffee);
    cart.add(&tea);
    cart.update_note(1, "ít đường").unwrap();
    assert_eq!(cart.total(), 71_000);

    let key = desk
        .place_order(&mut cart, "", OrderType::Takeaway, Utc::now())
        .await
        .unwrap();
    assert!(cart.is_empty());

    let pushed = tokio::time::timeout(std::time::Duration::from_secs(1), async {
        loop {
            let orders = snapshots.recv().await.unwrap();
            if !orders.is_empty() {
                return orders;
            }
        }
    })
    .await
    .expect("No snapshot after placing the order");
    assert_eq!(pushed[0].key, key);
    assert!(pushed[0].is_paid);
    assert_eq!(pushed[0].customer_name, "Khách vãng lai");
    assert_eq!(pushed[0].total, 71_000);

    desk.update_status(key, OrderStatus::Preparing).await.unwrap();
    desk.update_status(key, OrderStatus::Completed).await.unwrap();

    // Menu edits do not touch existing orders
    system
        .menu_client
        .update_item(
            coffee.id,
            MenuItemUpdate {
                price: Some(19_000),
                ..MenuItemUpdate::default()
            },
        )
        .await
        .unwrap();
    let order = system.order_client.fetch_order(key).await.unwrap().unwrap();
    assert_eq!(order.items[0].item.price, 18_000);

    feed.unsubscribe();
    drop(desk);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_add_on_is_merged_into_parent() {
    let system = PosSystem::new(&PosConfig::default());
    system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    let coffee = item(&system, 1).await;
    let bac_xiu = item(&system, 2).await;
    let desk = system.order_desk();

    let parent = completed_order(&desk, vec![OrderItem::new(coffee.clone(), 2, "")]).await;
    let child = desk
        .add_to_order(
            parent,
            vec![
                OrderItem::new(coffee.clone(), 1, ""),
                OrderItem::new(bac_xiu.clone(), 1, "ít đường"),
            ],
            Utc::now(),
        )
        .await
        .unwrap();

    let change = desk.update_status(child, OrderStatus::Completed).await.unwrap();
    let StatusChange::Merged(merged) = change else {
        panic!("Completing an add-on should merge it");
    };

    assert_eq!(
        merged.items,
        vec![
            OrderItem::new(coffee, 3, ""),
            OrderItem::new(bac_xiu, 1, "ít đường"),
        ]
    );
    assert_eq!(merged.total, 3 * 18_000 + 25_000);
    assert_eq!(merged.status, OrderStatus::Completed);
    assert!(system.order_client.fetch_order(child).await.unwrap().is_none());

    let all = system.order_client.all_orders_once().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all.iter().all(|o| o.total_matches_items()));
}

#[tokio::test]
async fn test_concurrent_add_ons_all_land_in_parent() {
    let system = PosSystem::new(&PosConfig::default());
    system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    let coffee = item(&system, 1).await;
    let desk = Arc::new(system.order_desk());

    let parent = completed_order(&desk, vec![OrderItem::new(coffee.clone(), 2, "")]).await;
    let mut children = Vec::new();
    for _ in 0..5 {
        let child = desk
            .add_to_order(parent, vec![OrderItem::new(coffee.clone(), 1, "")], Utc::now())
            .await
            .unwrap();
        children.push(child);
    }

    let tasks: Vec<_> = children
        .iter()
        .map(|&child| {
            let desk = desk.clone();
            tokio::spawn(async move { desk.update_status(child, OrderStatus::Completed).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().expect("Merge failed");
    }

    let merged = system.order_client.fetch_order(parent).await.unwrap().unwrap();
    assert_eq!(merged.items.len(), 1);
    assert_eq!(merged.items[0].quantity, 7);
    assert_eq!(merged.total, 7 * 18_000);
    for child in children {
        assert!(system.order_client.fetch_order(child).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_add_on_completed_twice_is_merged_once() {
    let system = PosSystem::new(&PosConfig::default());
    system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    let coffee = item(&system, 1).await;
    let desk = Arc::new(system.order_desk());

    let parent = completed_order(&desk, vec![OrderItem::new(coffee.clone(), 2, "")]).await;
    let child = desk
        .add_to_order(parent, vec![OrderItem::new(coffee, 1, "")], Utc::now())
        .await
        .unwrap();

    let tasks: Vec<_> = (0..2)
        .map(|_| {
            let desk = desk.clone();
            tokio::spawn(async move { desk.update_status(child, OrderStatus::Completed).await })
        })
        .collect();
    let mut merged = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(StatusChange::Merged(_)) => merged += 1,
            Ok(other) => panic!("Unexpected status change: {other:?}"),
            Err(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        }
    }
    assert_eq!(merged, 1);

    let parent = system.order_client.fetch_order(parent).await.unwrap().unwrap();
    assert_eq!(parent.items[0].quantity, 3);
    assert_eq!(parent.total, 3 * 18_000);
    assert!(system.order_client.fetch_order(child).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_on_for_deleted_parent_is_kept() {
    let system = PosSystem::new(&PosConfig::default());
    system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    let tea = item(&system, 3).await;
    let desk = system.order_desk();

    let parent = completed_order(&desk, vec![OrderItem::new(tea.clone(), 1, "")]).await;
    let child = desk
        .add_to_order(parent, vec![OrderItem::new(tea, 1, "")], Utc::now())
        .await
        .unwrap();
    system.order_client.delete_order(parent).await.unwrap();

    let err = desk.update_status(child, OrderStatus::Completed).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let kept = system.order_client.fetch_order(child).await.unwrap().unwrap();
    assert_eq!(kept.status, OrderStatus::Completed);
    assert_eq!(kept.parent_order_key, Some(parent));
}

#[tokio::test]
async fn test_cart_and_orders_reject_emptiness() {
    let system = PosSystem::new(&PosConfig::default());
    system.menu_client.seed_if_empty(starter_menu()).await.unwrap();
    let coffee = item(&system, 1).await;
    let desk = system.order_desk();

    let mut cart = Cart::new();
    cart.add(&coffee);
    assert_eq!(cart.update_quantity(0, -1).unwrap(), QuantityChange::Emptied);
    let err = desk
        .place_order(&mut cart, "Bàn 2", OrderType::DineIn, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    cart.add(&coffee);
    let key = desk
        .place_order(&mut cart, "Bàn 2", OrderType::DineIn, Utc::now() - Duration::minutes(20))
        .await
        .unwrap();
    let before = system.order_client.fetch_order(key).await.unwrap().unwrap();
    assert!(!before.is_paid);
    assert!(brew_pos::orders::is_order_delayed(before.timestamp, before.status, Utc::now()));

    assert!(desk.update_items(key, vec![]).await.is_err());
    assert_eq!(system.order_client.fetch_order(key).await.unwrap().unwrap(), before);
}

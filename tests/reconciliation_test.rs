use brew_pos::clients::OrderClient;
use brew_pos::framework::mock::MockClient;
use brew_pos::framework::FrameworkError;
use brew_pos::model::{
    items_total, Category, MenuItem, Order, OrderItem, OrderKey, OrderStatus, OrderType,
};
use brew_pos::order_actor::{ErrorKind, OrderError};
use brew_pos::orders::{merge_lines, Reconciler, MERGE_ATTEMPTS};
use chrono::Utc;
use std::sync::Arc;

// Real reconciliation logic against a scripted order store. The mock answers requests in
// the scripted order and records anything else, so `verify()` also proves that no delete
// was issued where none was expected. Every merge attempt reads the add-on before the parent.

const PARENT: OrderKey = OrderKey(1);
const CHILD: OrderKey = OrderKey(2);

fn coffee(quantity: u32) -> OrderItem {
    OrderItem::new(MenuItem::new(1, "Cà Phê Sữa", 20_000, Category::Coffee), quantity, "")
}

fn order(key: OrderKey, items: Vec<OrderItem>, status: OrderStatus, parent: Option<OrderKey>) -> Order {
    Order {
        key,
        id: format!("T{}", key.0),
        total: items_total(&items),
        items,
        status,
        timestamp: Utc::now(),
        customer_name: "Bàn 7".into(),
        order_type: OrderType::DineIn,
        is_paid: false,
        parent_order_key: parent,
    }
}

fn parent() -> Order {
    order(PARENT, vec![coffee(2)], OrderStatus::Completed, None)
}

fn child() -> Order {
    order(CHILD, vec![coffee(1)], OrderStatus::Preparing, Some(PARENT))
}

fn merged_parent() -> Order {
    order(PARENT, merge_lines(&[coffee(2)], &[coffee(1)]), OrderStatus::Completed, None)
}

fn reconciler(mock: &MockClient<Order>) -> Reconciler<OrderClient> {
    Reconciler::new(Arc::new(OrderClient::new(mock.client())))
}

#[tokio::test]
async fn test_failed_parent_update_keeps_child() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_err(FrameworkError::ActorClosed);

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    mock.verify();
}

#[tokio::test]
async fn test_successful_merge_deletes_child_last() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_ok(merged_parent());
    mock.expect_delete(CHILD).return_ok(());

    let merged = reconciler(&mock).reconcile(&child()).await.unwrap();

    assert_eq!(merged.items, vec![coffee(3)]);
    assert_eq!(merged.total, 60_000);
    mock.verify();
}

#[tokio::test]
async fn test_conflict_rereads_parent() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_err(FrameworkError::EntityError(Box::new(
        OrderError::Conflict(PARENT.to_string()),
    )));
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_ok(merged_parent());
    mock.expect_delete(CHILD).return_ok(());

    assert!(reconciler(&mock).reconcile(&child()).await.is_ok());
    mock.verify();
}

#[tokio::test]
async fn test_persistent_conflict_gives_up_without_delete() {
    let mut mock = MockClient::<Order>::new();
    for _ in 0..MERGE_ATTEMPTS {
        mock.expect_get(CHILD).return_ok(Some(child()));
        mock.expect_get(PARENT).return_ok(Some(parent()));
        mock.expect_action(PARENT).return_err(FrameworkError::EntityError(Box::new(
            OrderError::Conflict(PARENT.to_string()),
        )));
    }

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    mock.verify();
}

#[tokio::test]
async fn test_missing_parent_completes_child_without_delete() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(None);
    let mut orphan = child();
    orphan.status = OrderStatus::Completed;
    mock.expect_update(CHILD).return_ok(orphan);

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err, OrderError::NotFound(PARENT.to_string()));
    mock.verify();
}

#[tokio::test]
async fn test_failed_child_delete_is_reported() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_ok(merged_parent());
    mock.expect_delete(CHILD).return_err(FrameworkError::ActorDropped);

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    mock.verify();
}

#[tokio::test]
async fn test_already_merged_child_leaves_parent_alone() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(None);

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err, OrderError::NotFound(CHILD.to_string()));
    mock.verify();
}

#[tokio::test]
async fn test_conflict_rereads_child_and_stops_once_it_is_gone() {
    let mut mock = MockClient::<Order>::new();
    mock.expect_get(CHILD).return_ok(Some(child()));
    mock.expect_get(PARENT).return_ok(Some(parent()));
    mock.expect_action(PARENT).return_err(FrameworkError::EntityError(Box::new(
        OrderError::Conflict(PARENT.to_string()),
    )));
    mock.expect_get(CHILD).return_ok(None);

    let err = reconciler(&mock).reconcile(&child()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    mock.verify();
}

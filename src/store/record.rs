//! Plain key-value records for orders and menu items.
//!
//! Records are JSON objects with camelCase keys. The store key is the record's address,
//! not part of its body. Timestamps are ISO-8601 strings with millisecond precision.

use crate::model::{MenuItem, Order, OrderKey, OrderType};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn order_to_record(order: &Order) -> Result<Value, RecordError> {
    Ok(serde_json::to_value(order)?)
}

/// Reads the order stored under `key`.
///
/// Older records may lack `isPaid`; they get the default for their order type.
pub fn order_from_record(key: OrderKey, mut record: Value) -> Result<Order, RecordError> {
    let fields = record.as_object_mut().ok_or(RecordError::NotAnObject)?;
    if !fields.contains_key("isPaid") {
        let order_type: OrderType = serde_json::from_value(
            fields.get("orderType").cloned().unwrap_or(Value::Null),
        )?;
        fields.insert("isPaid".into(), Value::Bool(order_type.default_paid()));
    }
    let mut order: Order = serde_json::from_value(record)?;
    order.key = key;
    Ok(order)
}

pub fn menu_item_to_record(item: &MenuItem) -> Result<Value, RecordError> {
    Ok(serde_json::to_value(item)?)
}

pub fn menu_item_from_record(record: Value) -> Result<MenuItem, RecordError> {
    if !record.is_object() {
        return Err(RecordError::NotAnObject);
    }
    Ok(serde_json::from_value(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, OrderItem, OrderStatus};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> Order {
        let latte = MenuItem::new(4, "Matcha Latte", 30_000, Category::Specialty);
        Order {
            key: OrderKey(9),
            id: "K3ZQ".into(),
            items: vec![OrderItem::new(latte, 2, "ít đá")],
            status: OrderStatus::Preparing,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 7, 5, 9).unwrap(),
            customer_name: "Minh".into(),
            total: 60_000,
            order_type: OrderType::DineIn,
            is_paid: false,
            parent_order_key: Some(OrderKey(3)),
        }
    }

    #[test]
    fn test_order_record_layout() {
        let record = order_to_record(&sample()).unwrap();
        assert_eq!(
            record,
            json!({
                "id": "K3ZQ",
                "items": [{
                    "id": "4",
                    "name": "Matcha Latte",
                    "price": 30000,
                    "category": "Món Đặc Biệt",
                    "quantity": 2,
                    "note": "ít đá"
                }],
                "status": "preparing",
                "timestamp": "2026-01-15T07:05:09.000Z",
                "customerName": "Minh",
                "total": 60000,
                "orderType": "dine-in",
                "isPaid": false,
                "parentOrderKey": "order_3"
            })
        );
    }

    #[test]
    fn test_order_record_reads_back_under_its_key() {
        let order = sample();
        let record = order_to_record(&order).unwrap();
        assert_eq!(order_from_record(OrderKey(9), record).unwrap(), order);
    }

    #[test]
    fn test_missing_payment_flag_defaults_by_type() {
        let record = json!({
            "id": "AB12",
            "items": [{ "id": "1", "name": "Cà Phê Đen", "price": 18000, "category": "Cà Phê", "quantity": 1 }],
            "status": "pending",
            "timestamp": "2026-01-15T07:05:09.120Z",
            "customerName": "Khách vãng lai",
            "total": 18000,
            "orderType": "takeaway",
            "parentOrderId": "order_2"
        });
        let order = order_from_record(OrderKey(5), record).unwrap();
        assert!(order.is_paid);
        assert_eq!(order.items[0].note, "");
        assert_eq!(order.parent_order_key, Some(OrderKey(2)));
        assert_eq!(order.timestamp.timestamp_subsec_millis(), 120);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            order_from_record(OrderKey(1), json!([1, 2])),
            Err(RecordError::NotAnObject)
        ));
        assert!(matches!(menu_item_from_record(json!("x")), Err(RecordError::NotAnObject)));
    }
}

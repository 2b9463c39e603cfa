use crate::api::AuthorizedClient;
use crate::error::ApiError;
use crate::types::{Order, OrderList, OrderStatus};

impl AuthorizedClient<'_> {
    /// All orders of the signed-in restaurant, in backend order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.get("orders").await?;
        Ok(list.orders)
    }

    /// Orders still waiting on the kitchen or the floor.
    pub async fn open_orders(&self) -> Result<Vec<Order>, ApiError> {
        let mut orders = self.list_orders().await?;
        orders.retain(|order| order.status.is_open());
        Ok(orders)
    }
}

/// Number of orders per status, in kitchen order.
pub fn count_by_status(orders: &[Order]) -> Vec<(OrderStatus, usize)> {
    [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ]
    .into_iter()
    .map(|status| (status, orders.iter().filter(|o| o.status == status).count()))
    .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn order(id: &str, status: OrderStatus, minute: u32) -> Order {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 18, minute, 0).unwrap();
        Order {
            id: id.parse().unwrap(),
            table: "4".to_string(),
            status,
            items: Vec::new(),
            total: 0.0,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn counts_every_status() {
        let orders = vec![
            order("a", OrderStatus::Pending, 1),
            order("b", OrderStatus::Pending, 2),
            order("c", OrderStatus::Delivered, 3),
        ];
        assert_eq!(
            count_by_status(&orders),
            vec![
                (OrderStatus::Pending, 2),
                (OrderStatus::Preparing, 0),
                (OrderStatus::Ready, 0),
                (OrderStatus::Delivered, 1),
            ]
        );
    }
}

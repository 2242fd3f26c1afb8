use chrono::{DateTime, FixedOffset};

use crate::engine::ordering::sort_orders;
use crate::engine::stock::check_stock;
use crate::engine::urgency::classify;
use crate::models::board::{BoardEntry, DriverBoard, UrgencyCounts};
use crate::models::driver::Driver;
use crate::models::order::Order;

pub fn build_board(driver: &Driver, orders: Vec<Order>, now: DateTime<FixedOffset>) -> DriverBoard {
    let active: Vec<Order> = orders
        .into_iter()
        .filter(|order| order.driver_id == Some(driver.id) && !order.status.is_terminal())
        .collect();

    let mut counts = UrgencyCounts::default();
    let entries = sort_orders(active, now)
        .into_iter()
        .map(|order| {
            let urgency = classify(&order, now);
            counts.record(urgency.level);
            let stock = check_stock(&order, &driver.stock);
            BoardEntry {
                order,
                urgency,
                stock,
            }
        })
        .collect();

    DriverBoard {
        driver_id: driver.id,
        generated_at: now,
        entries,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::build_board;
    use crate::engine::ordering::tests::{at, order, scheduled, today};
    use crate::models::driver::{Driver, DriverStatus, Stock};
    use crate::models::order::{DeliveryType, OrderItem, OrderStatus};
    use crate::models::urgency::UrgencyLevel;

    fn driver(stock: Stock) -> Driver {
        Driver {
            id: Uuid::from_u128(42),
            name: "test-driver".to_string(),
            status: DriverStatus::Available,
            stock,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn board_keeps_only_this_drivers_active_orders_in_sequence() {
        let d = driver(Stock::from([("cubes-5kg".to_string(), 2)]));
        let mine = Some(d.id);

        let mut standard = scheduled(
            order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(9, 0))),
            today(),
            18,
            0,
        );
        standard.items = vec![OrderItem {
            product: "cubes-5kg".to_string(),
            quantity: 3,
        }];
        let mut express = order(2, OrderStatus::Confirmed, DeliveryType::Express, Some(at(9, 10)));
        let mut delivering = order(3, OrderStatus::Delivering, DeliveryType::Express, Some(at(8, 0)));
        let mut done = order(4, OrderStatus::Delivered, DeliveryType::Express, Some(at(7, 0)));
        let other_driver = order(5, OrderStatus::Confirmed, DeliveryType::Express, Some(at(7, 0)));

        standard.driver_id = mine;
        express.driver_id = mine;
        delivering.driver_id = mine;
        done.driver_id = mine;

        let board = build_board(
            &d,
            vec![standard, express, delivering, done, other_driver],
            at(9, 20),
        );

        let sequence: Vec<u128> = board.entries.iter().map(|e| e.order.id.as_u128()).collect();
        assert_eq!(sequence, vec![3, 2, 1]);

        assert_eq!(board.entries[0].urgency.level, UrgencyLevel::Critical);
        assert_eq!(board.entries[1].urgency.level, UrgencyLevel::Medium);
        assert_eq!(board.entries[2].urgency.level, UrgencyLevel::Low);
        assert!(!board.entries[2].stock.sufficient);

        assert_eq!(board.counts.critical, 1);
        assert_eq!(board.counts.medium, 1);
        assert_eq!(board.counts.low, 1);
        assert_eq!(board.counts.high, 0);
        assert_eq!(board.generated_at, at(9, 20));
    }
}

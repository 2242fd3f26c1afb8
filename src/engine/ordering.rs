use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::models::order::{DeliveryType, Order, OrderStatus};

// Insertion sort: the comparator is not transitive once dated and undated
// standard orders mix, and the std sorts may panic on that.
pub fn sort_orders(mut orders: Vec<Order>, now: DateTime<FixedOffset>) -> Vec<Order> {
    for i in 1..orders.len() {
        let mut j = i;
        while j > 0 && compare_orders(&orders[j - 1], &orders[j], now) == Ordering::Greater {
            orders.swap(j - 1, j);
            j -= 1;
        }
    }
    orders
}

pub fn compare_orders(a: &Order, b: &Order, now: DateTime<FixedOffset>) -> Ordering {
    let not_delivering = |order: &Order| order.status != OrderStatus::Delivering;
    let not_express = |order: &Order| !order.is_express();

    not_delivering(a)
        .cmp(&not_delivering(b))
        .then_with(|| not_express(a).cmp(&not_express(b)))
        .then_with(|| match (a.delivery_type, b.delivery_type) {
            (DeliveryType::Standard, DeliveryType::Standard) => {
                compare_slots(a, b, now.date_naive()).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        })
        .then_with(|| compare_created(a, b))
}

fn compare_slots(a: &Order, b: &Order, today: NaiveDate) -> Option<Ordering> {
    let (date_a, date_b) = (a.delivery_date?, b.delivery_date?);
    let not_today = |date: NaiveDate| date != today;

    Some(
        not_today(date_a)
            .cmp(&not_today(date_b))
            .then_with(|| a.scheduled_slot().cmp(&b.scheduled_slot())),
    )
}

// Missing timestamps sort last.
fn compare_created(a: &Order, b: &Order) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
    use uuid::Uuid;

    use super::sort_orders;
    use crate::models::order::{DeliveryType, Order, OrderStatus};

    pub(crate) fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .and_then(|tz| tz.with_ymd_and_hms(2026, 7, 14, hour, minute, 0).single())
            .unwrap()
    }

    pub(crate) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()
    }

    pub(crate) fn order(
        seed: u128,
        status: OrderStatus,
        delivery_type: DeliveryType,
        created_at: Option<DateTime<FixedOffset>>,
    ) -> Order {
        Order {
            id: Uuid::from_u128(seed),
            customer_name: "test-customer".to_string(),
            driver_id: None,
            status,
            delivery_type,
            created_at: created_at.map(|t| t.with_timezone(&Utc)),
            delivery_date: None,
            delivery_time: None,
            items: Vec::new(),
            updated_at: Utc::now(),
            delivered_at: None,
        }
    }

    pub(crate) fn scheduled(mut order: Order, date: NaiveDate, hour: u32, minute: u32) -> Order {
        order.delivery_date = Some(date);
        order.delivery_time = NaiveTime::from_hms_opt(hour, minute, 0);
        order
    }

    fn ids(orders: &[Order]) -> Vec<u128> {
        orders.iter().map(|o| o.id.as_u128()).collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(sort_orders(Vec::new(), at(9, 20)).is_empty());
    }

    #[test]
    fn delivering_wins_then_express_fifo_then_standard() {
        let a = scheduled(
            order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(9, 0))),
            today(),
            18,
            0,
        );
        let b = order(2, OrderStatus::Confirmed, DeliveryType::Express, Some(at(9, 10)));
        let c = order(3, OrderStatus::Delivering, DeliveryType::Express, Some(at(8, 0)));

        let sorted = sort_orders(vec![a, b, c], at(9, 20));
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn delivering_standard_beats_fresh_express() {
        let standard = order(1, OrderStatus::Delivering, DeliveryType::Standard, Some(at(7, 0)));
        let express = order(2, OrderStatus::Confirmed, DeliveryType::Express, Some(at(9, 0)));

        let sorted = sort_orders(vec![express, standard], at(9, 20));
        assert_eq!(ids(&sorted), vec![1, 2]);
    }

    #[test]
    fn older_express_goes_first() {
        let later = order(1, OrderStatus::Confirmed, DeliveryType::Express, Some(at(9, 5)));
        let earlier = order(2, OrderStatus::Confirmed, DeliveryType::Express, Some(at(8, 50)));

        let sorted = sort_orders(vec![later, earlier], at(9, 20));
        assert_eq!(ids(&sorted), vec![2, 1]);
    }

    #[test]
    fn todays_slot_beats_earlier_slot_on_another_day() {
        let tomorrow = today().succ_opt().unwrap();
        let yesterday = today().pred_opt().unwrap();
        let tonight = scheduled(
            order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(8, 0))),
            today(),
            23,
            0,
        );
        let tomorrow_morning = scheduled(
            order(2, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(7, 0))),
            tomorrow,
            6,
            0,
        );
        let overdue = scheduled(
            order(3, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(6, 0))),
            yesterday,
            10,
            0,
        );

        let sorted = sort_orders(vec![tomorrow_morning, overdue, tonight], at(9, 20));
        assert_eq!(ids(&sorted), vec![1, 3, 2]);
    }

    #[test]
    fn same_day_slots_sort_by_time_and_missing_time_is_midnight() {
        let noon = scheduled(
            order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(6, 0))),
            today(),
            12,
            0,
        );
        let mut no_time = order(2, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(8, 0)));
        no_time.delivery_date = Some(today());
        let morning = scheduled(
            order(3, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(7, 0))),
            today(),
            10,
            30,
        );

        let sorted = sort_orders(vec![noon, no_time, morning], at(9, 20));
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn undated_standard_orders_fall_back_to_creation_time() {
        let newer = order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(9, 0)));
        let older = order(2, OrderStatus::Pending, DeliveryType::Standard, Some(at(8, 0)));
        let unknown = order(3, OrderStatus::Confirmed, DeliveryType::Standard, None);

        let sorted = sort_orders(vec![unknown, newer, older], at(9, 20));
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn indistinguishable_orders_keep_input_order() {
        let orders: Vec<Order> = (1..=6)
            .map(|seed| order(seed, OrderStatus::Confirmed, DeliveryType::Express, Some(at(9, 0))))
            .collect();

        let sorted = sort_orders(orders, at(9, 20));
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sorting_twice_gives_the_same_sequence() {
        let orders = vec![
            order(1, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(9, 0))),
            order(2, OrderStatus::Delivering, DeliveryType::Standard, None),
            scheduled(
                order(3, OrderStatus::Confirmed, DeliveryType::Standard, Some(at(7, 0))),
                today(),
                15,
                0,
            ),
            order(4, OrderStatus::Confirmed, DeliveryType::Express, Some(at(8, 30))),
            order(5, OrderStatus::Pending, DeliveryType::Express, None),
        ];

        let once = sort_orders(orders.clone(), at(9, 20));
        let twice = sort_orders(once.clone(), at(9, 20));
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(ids(&sort_orders(orders, at(9, 20))), ids(&once));
        assert_eq!(ids(&once)[..2], [2, 4]);
    }
}

use std::collections::BTreeMap;

use crate::models::board::{StockCheck, StockShortfall};
use crate::models::driver::Stock;
use crate::models::order::{Order, OrderItem};

pub fn check_stock(order: &Order, stock: &Stock) -> StockCheck {
    let shortfalls: Vec<StockShortfall> = requested_quantities(&order.items)
        .into_iter()
        .filter_map(|(product, requested)| {
            let available = stock.get(product).copied().unwrap_or(0);
            (available < requested).then(|| StockShortfall {
                product: product.to_string(),
                requested,
                available,
            })
        })
        .collect();

    StockCheck {
        sufficient: shortfalls.is_empty(),
        shortfalls,
    }
}

pub fn consume_stock(stock: &mut Stock, items: &[OrderItem]) {
    for (product, requested) in requested_quantities(items) {
        if let Some(available) = stock.get_mut(product) {
            *available = available.saturating_sub(requested);
        }
    }
}

fn requested_quantities(items: &[OrderItem]) -> BTreeMap<&str, u32> {
    let mut totals = BTreeMap::new();
    for item in items {
        let total = totals.entry(item.product.as_str()).or_insert(0u32);
        *total = total.saturating_add(item.quantity);
    }
    totals
}

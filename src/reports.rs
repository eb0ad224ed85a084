// src/reports.rs
//
// Revenue reporting over paid orders. Loading and aggregation are split so
// the aggregation can be tested without a database: `load_paid_orders` does
// the one fetch, `monthly_revenue` / `total_revenue` are pure folds.
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::dashboard::MonthlyRevenue;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A paid order reduced to what revenue reporting needs: when it was placed
/// and the current price of each item on it.
#[derive(Debug, Clone)]
pub struct PaidOrder {
    pub created_at: DateTime<Utc>,
    pub item_prices: Vec<Decimal>,
}

// Prices are read from products at query time, so revenue always reflects
// the current price, not the price at purchase.
const PAID_ORDERS_SQL: &str = r#"SELECT o.id AS order_id, o.created_at, p.price
    FROM orders o
    JOIN order_items oi ON oi.order_id = o.id
    JOIN products p ON p.id = oi.product_id
    WHERE o.store_id = $1 AND o.is_paid = TRUE
    ORDER BY o.id"#;

#[derive(sqlx::FromRow)]
struct PaidOrderRow {
    order_id: Uuid,
    created_at: DateTime<Utc>,
    price: Decimal,
}

/// Fetches every paid order for the store with its item prices. An unknown
/// store simply yields no rows, so callers get an empty slice, not an error.
pub async fn load_paid_orders(
    pool: &PgPool,
    store_id: Uuid,
) -> Result<Vec<PaidOrder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PaidOrderRow>(PAID_ORDERS_SQL)
        .bind(store_id)
        .fetch_all(pool)
        .await?;
    Ok(group_rows(rows))
}

// Rows are ordered by order id, so all items of one order are adjacent.
fn group_rows(rows: Vec<PaidOrderRow>) -> Vec<PaidOrder> {
    let mut orders: Vec<PaidOrder> = Vec::new();
    let mut last_id: Option<Uuid> = None;
    for row in rows {
        if last_id != Some(row.order_id) {
            last_id = Some(row.order_id);
            orders.push(PaidOrder {
                created_at: row.created_at,
                item_prices: Vec::new(),
            });
        }
        if let Some(order) = orders.last_mut() {
            order.item_prices.push(row.price);
        }
    }
    orders
}

/// Buckets paid-order revenue by calendar month of `created_at` in UTC and
/// returns exactly twelve entries, January through December, with months
/// that saw no revenue at zero. Decimal arithmetic throughout; totals never
/// pass through floating point.
pub fn monthly_revenue(orders: &[PaidOrder]) -> Vec<MonthlyRevenue> {
    let mut totals = [Decimal::ZERO; 12];
    for order in orders {
        let month = order.created_at.month0() as usize;
        let order_total: Decimal = order.item_prices.iter().sum();
        totals[month] += order_total;
    }
    MONTH_NAMES
        .iter()
        .zip(totals)
        .map(|(name, total)| MonthlyRevenue {
            name: name.to_string(),
            total,
        })
        .collect()
}

/// Sum of all paid-order revenue across every month.
pub fn total_revenue(orders: &[PaidOrder]) -> Decimal {
    orders
        .iter()
        .map(|order| order.item_prices.iter().sum::<Decimal>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn utc(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn order(ts: &str, prices: &[Decimal]) -> PaidOrder {
        PaidOrder {
            created_at: utc(ts),
            item_prices: prices.to_vec(),
        }
    }

    #[test]
    fn empty_input_yields_twelve_zero_months_in_calendar_order() {
        let report = monthly_revenue(&[]);
        assert_eq!(report.len(), 12);
        for (entry, name) in report.iter().zip(MONTH_NAMES) {
            assert_eq!(entry.name, name);
            assert_eq!(entry.total, Decimal::ZERO);
        }
        assert_eq!(report[0].name, "January");
        assert_eq!(report[11].name, "December");
    }

    #[test]
    fn orders_accumulate_into_their_month() {
        let orders = vec![
            order("2024-03-05T10:00:00Z", &[dec!(10.00)]),
            order("2024-03-20T18:00:00Z", &[dec!(15.50)]),
        ];
        let report = monthly_revenue(&orders);
        assert_eq!(report[2].total, dec!(25.50));
        for (i, entry) in report.iter().enumerate() {
            if i != 2 {
                assert_eq!(entry.total, Decimal::ZERO, "{} should be zero", entry.name);
            }
        }
    }

    #[test]
    fn multi_item_order_sums_every_item_price() {
        let orders = vec![order(
            "2024-07-01T00:00:00Z",
            &[dec!(5.00), dec!(5.00), dec!(5.00)],
        )];
        let report = monthly_revenue(&orders);
        assert_eq!(report[6].total, dec!(15.00));
    }

    #[test]
    fn input_order_does_not_change_the_report() {
        let a = order("2024-01-10T00:00:00Z", &[dec!(1.00)]);
        let b = order("2024-06-15T00:00:00Z", &[dec!(2.00), dec!(3.00)]);
        let c = order("2024-06-20T00:00:00Z", &[dec!(4.00)]);
        let forward = monthly_revenue(&[a.clone(), b.clone(), c.clone()]);
        let backward = monthly_revenue(&[c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn months_bucket_by_utc_not_local_offset() {
        // 23:30 on Jan 31 at UTC-5 is already Feb 1 in UTC
        let orders = vec![order("2024-01-31T23:30:00-05:00", &[dec!(9.99)])];
        let report = monthly_revenue(&orders);
        assert_eq!(report[0].total, Decimal::ZERO);
        assert_eq!(report[1].total, dec!(9.99));
    }

    #[test]
    fn decimal_accumulation_is_exact() {
        // 0.1 + 0.1 + 0.1 drifts under f64; it must not here
        let orders = vec![
            order("2024-05-01T00:00:00Z", &[dec!(0.10)]),
            order("2024-05-02T00:00:00Z", &[dec!(0.10)]),
            order("2024-05-03T00:00:00Z", &[dec!(0.10)]),
        ];
        let report = monthly_revenue(&orders);
        assert_eq!(report[4].total, dec!(0.30));
    }

    #[test]
    fn total_revenue_matches_sum_of_monthly_totals() {
        let orders = vec![
            order("2024-02-01T00:00:00Z", &[dec!(12.25), dec!(0.75)]),
            order("2024-02-14T00:00:00Z", &[dec!(7.00)]),
            order("2024-11-30T23:59:59Z", &[dec!(100.00)]),
        ];
        let total = total_revenue(&orders);
        let monthly_sum: Decimal = monthly_revenue(&orders).iter().map(|e| e.total).sum();
        assert_eq!(total, dec!(120.00));
        assert_eq!(total, monthly_sum);
    }

    #[test]
    fn paid_orders_query_is_paid_only_and_store_scoped() {
        assert!(PAID_ORDERS_SQL.contains("o.is_paid = TRUE"));
        assert!(PAID_ORDERS_SQL.contains("o.store_id = $1"));
    }

    #[test]
    fn rows_group_by_order_id_into_item_price_lists() {
        let shared = Uuid::new_v4();
        let other = Uuid::new_v4();
        let at = utc("2024-09-09T09:00:00Z");
        let rows = vec![
            PaidOrderRow {
                order_id: shared,
                created_at: at,
                price: dec!(1.00),
            },
            PaidOrderRow {
                order_id: shared,
                created_at: at,
                price: dec!(2.00),
            },
            PaidOrderRow {
                order_id: other,
                created_at: at,
                price: dec!(3.00),
            },
        ];
        let orders = group_rows(rows);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].item_prices, vec![dec!(1.00), dec!(2.00)]);
        assert_eq!(orders[1].item_prices, vec![dec!(3.00)]);
    }
}

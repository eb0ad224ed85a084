// src/dtos/dashboard.rs
use rust_decimal::Decimal;
use serde::Serialize;

/// One calendar month of revenue for the dashboard chart. The chart
/// library on the frontend expects `total` as a JSON number.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub sales_count: i64,
    pub stock_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn monthly_revenue_serializes_total_as_number() {
        let entry = MonthlyRevenue {
            name: "March".to_string(),
            total: dec!(25.50),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "March");
        assert!(value["total"].is_number());
        assert_eq!(value["total"].as_f64().unwrap(), 25.5);
    }
}

//! Report rows and summaries for export.
//!
//! The exporters (CSV, spreadsheet, PDF) live in the presentation layer and
//! consume the flat [`ReportRow`] shape built here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockpulse_core::{Money, OrderId};
use stockpulse_sales::{EnrichedOrder, OrderStatus};

use crate::store::OrderFilter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no orders found for the selected date range")]
    NoOrders,

    #[error("unknown report type: {0}")]
    UnknownReportType(String),

    #[error("unknown date range: {0}")]
    UnknownDateRange(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Sales,
    Orders,
    Summary,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Sales => "sales",
            ReportType::Orders => "orders",
            ReportType::Summary => "summary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Sales => "Sales Report",
            ReportType::Orders => "Order Report",
            ReportType::Summary => "Summary Report",
        }
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportType::Sales),
            "orders" => Ok(ReportType::Orders),
            "summary" => Ok(ReportType::Summary),
            other => Err(ReportError::UnknownReportType(other.to_string())),
        }
    }
}

/// Reporting window, relative to "now" in the reporting time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    /// Same local calendar date.
    Today,
    /// The last 7 days.
    Week,
    /// Since the same day one month ago.
    Month,
    /// Since the same day three months ago.
    Quarter,
    /// Since the same day one year ago.
    Year,
    All,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Quarter => "quarter",
            DateRange::Year => "year",
            DateRange::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Today => "Today",
            DateRange::Week => "This Week",
            DateRange::Month => "This Month",
            DateRange::Quarter => "This Quarter",
            DateRange::Year => "This Year",
            DateRange::All => "All Time",
        }
    }

    /// Store filter selecting this range as seen at `now` in `offset`.
    ///
    /// Month arithmetic clamps to the last day of shorter months
    /// (31 March minus one month is 29 February in a leap year).
    pub fn order_filter(&self, now: DateTime<Utc>, offset: FixedOffset) -> OrderFilter {
        let local_now = now.with_timezone(&offset);
        let months_back = |n: u32| {
            local_now
                .checked_sub_months(Months::new(n))
                .map(|t| OrderFilter::since(t.with_timezone(&Utc)))
                .unwrap_or_default()
        };

        match self {
            DateRange::Today => {
                let today = local_now.date_naive();
                let start = local_midnight(today, offset);
                OrderFilter::between(start, start + Duration::days(1))
            }
            DateRange::Week => OrderFilter::since(now - Duration::days(7)),
            DateRange::Month => months_back(1),
            DateRange::Quarter => months_back(3),
            DateRange::Year => months_back(12),
            DateRange::All => OrderFilter::all(),
        }
    }
}

impl FromStr for DateRange {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "quarter" => Ok(DateRange::Quarter),
            "year" => Ok(DateRange::Year),
            "all" => Ok(DateRange::All),
            other => Err(ReportError::UnknownDateRange(other.to_string())),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub range: DateRange,
    pub format: ExportFormat,
}

/// One exported order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub order_id: OrderId,
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    /// Order date in the reporting time zone.
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: Money,
}

impl ReportRow {
    /// Column headings, in field order.
    pub const COLUMNS: [&'static str; 7] = [
        "Order ID",
        "Product Name",
        "SKU",
        "Quantity",
        "Date",
        "Status",
        "Total",
    ];

    fn from_order(order: &EnrichedOrder, offset: FixedOffset) -> Self {
        Self {
            order_id: order.order.id,
            product_name: order.product_name().to_string(),
            sku: order.sku().to_string(),
            quantity: order.quantity(),
            date: order.created_at().with_timezone(&offset).date_naive(),
            status: order.order.status,
            total: order.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_orders: usize,
    pub total_revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub report_type: ReportType,
    pub range: DateRange,
    pub format: ExportFormat,
    pub file_name: String,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

/// `{type}_report_{range label}_{YYYY-MM-DD}.{ext}`, label in snake case.
pub fn report_file_name(request: &ReportRequest, on: NaiveDate) -> String {
    let range = request
        .range
        .label()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    format!(
        "{}_report_{}_{}.{}",
        request.report_type.as_str(),
        range,
        on.format("%Y-%m-%d"),
        request.format.extension()
    )
}

/// Build the report for `orders` as of `now`.
///
/// Orders outside the requested range are dropped, so callers may pass an
/// unfiltered list. Row order follows `orders`.
pub fn build_report(
    request: &ReportRequest,
    orders: &[EnrichedOrder],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<Report, ReportError> {
    let filter = request.range.order_filter(now, offset);
    let rows: Vec<ReportRow> = orders
        .iter()
        .filter(|o| filter.matches(o.created_at()))
        .map(|o| ReportRow::from_order(o, offset))
        .collect();

    if rows.is_empty() {
        return Err(ReportError::NoOrders);
    }

    let summary = ReportSummary {
        total_orders: rows.len(),
        total_revenue: rows.iter().map(|r| r.total).sum(),
    };
    let today = now.with_timezone(&offset).date_naive();

    Ok(Report {
        title: format!("{} - {}", request.report_type.label(), request.range.label()),
        report_type: request.report_type,
        range: request.range,
        format: request.format,
        file_name: report_file_name(request, today),
        rows,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpulse_core::{OwnerId, ProductId};
    use stockpulse_sales::{OrderRecord, ProductSnapshot};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 15, 0, 0).unwrap()
    }

    fn order(created_at: DateTime<Utc>, quantity: u32, total: Option<Money>) -> EnrichedOrder {
        let record = OrderRecord {
            id: OrderId::new(),
            product_id: ProductId::new(),
            owner_id: OwnerId::new(),
            quantity,
            created_at,
            status: OrderStatus::Completed,
            total,
        };
        let snapshot = ProductSnapshot {
            name: "Widget".to_string(),
            sku: "WID-1".to_string(),
            unit_price: Money::from_units(25),
            stock_quantity: 3,
        };
        EnrichedOrder::new(record, Some(snapshot))
    }

    fn request(range: DateRange) -> ReportRequest {
        ReportRequest {
            report_type: ReportType::Sales,
            range,
            format: ExportFormat::Csv,
        }
    }

    #[test]
    fn file_name_uses_snake_case_label() {
        let on = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let req = ReportRequest {
            report_type: ReportType::Summary,
            range: DateRange::Week,
            format: ExportFormat::Excel,
        };
        assert_eq!(
            report_file_name(&req, on),
            "summary_report_this_week_2024-03-31.xlsx"
        );
        assert_eq!(
            report_file_name(&request(DateRange::All), on),
            "sales_report_all_time_2024-03-31.csv"
        );
    }

    #[test]
    fn today_follows_the_reporting_zone() {
        // 23:30 UTC on the 30th is already the 31st at UTC+2.
        let late = Utc.with_ymd_and_hms(2024, 3, 30, 23, 30, 0).unwrap();
        let orders = vec![order(late, 1, None)];

        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            build_report(&request(DateRange::Today), &orders, now(), utc),
            Err(ReportError::NoOrders)
        );

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let report = build_report(&request(DateRange::Today), &orders, now(), plus_two).unwrap();
        assert_eq!(report.rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn month_back_clamps_to_end_of_february() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let filter = DateRange::Month.order_filter(now(), utc);
        assert_eq!(
            filter.from,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 15, 0, 0).unwrap())
        );
        assert_eq!(filter.to, None);
    }

    #[test]
    fn week_is_the_last_seven_days() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let orders = vec![
            order(now() - Duration::days(8), 1, None),
            order(now() - Duration::days(6), 2, None),
            order(now() - Duration::hours(1), 3, None),
        ];
        let report = build_report(&request(DateRange::Week), &orders, now(), utc).unwrap();
        assert_eq!(report.summary.total_orders, 2);
        assert_eq!(report.rows[0].quantity, 2);
    }

    #[test]
    fn summary_sums_row_totals() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let orders = vec![
            order(now() - Duration::days(400), 2, Some(Money::from_units(40))),
            order(now() - Duration::days(2), 1, None),
        ];
        let report = build_report(&request(DateRange::All), &orders, now(), utc).unwrap();
        assert_eq!(report.title, "Sales Report - All Time");
        assert_eq!(report.summary.total_orders, 2);
        assert_eq!(report.summary.total_revenue, Money::from_units(65));
        assert_eq!(report.rows[0].total, Money::from_units(40));
        assert_eq!(report.rows[1].total, Money::from_units(25));
    }

    #[test]
    fn empty_range_is_an_error() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            build_report(&request(DateRange::Year), &[], now(), utc),
            Err(ReportError::NoOrders)
        );
    }

    #[test]
    fn parses_query_values() {
        assert_eq!("quarter".parse::<DateRange>(), Ok(DateRange::Quarter));
        assert_eq!("orders".parse::<ReportType>(), Ok(ReportType::Orders));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert!(matches!(
            "fortnight".parse::<DateRange>(),
            Err(ReportError::UnknownDateRange(_))
        ));
    }

    #[test]
    fn rows_serialize_camel_case() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let report = build_report(&request(DateRange::All), &[order(now(), 1, None)], now(), utc)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"][0]["productName"], "Widget");
        assert_eq!(json["reportType"], "sales");
        assert_eq!(json["summary"]["totalOrders"], 1);
    }
}

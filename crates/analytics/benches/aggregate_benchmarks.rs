use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use stockpulse_analytics::{DemandForecast, MetricsAggregator};
use stockpulse_core::{Money, OrderId, OwnerId, ProductId};
use stockpulse_sales::{EnrichedOrder, OrderRecord, OrderStatus, ProductSnapshot};

const PRODUCT_NAMES: [&str; 8] = [
    "Widget", "Gadget", "Sprocket", "Bolt", "Nut", "Washer", "Bracket", "Hinge",
];

/// Deterministic batch: orders spread over 90 days and 8 products, every
/// tenth order without a joined product.
fn make_orders(n: usize) -> Vec<EnrichedOrder> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let owner_id = OwnerId::new();
    let product_ids: Vec<ProductId> = PRODUCT_NAMES.iter().map(|_| ProductId::new()).collect();

    (0..n)
        .map(|i| {
            let slot = i % PRODUCT_NAMES.len();
            let record = OrderRecord {
                id: OrderId::new(),
                product_id: product_ids[slot],
                owner_id,
                quantity: (i % 17) as u32 + 1,
                created_at: base + Duration::minutes((i as i64 * 37) % (90 * 24 * 60)),
                status: OrderStatus::Completed,
                total: None,
            };
            let snapshot = (i % 10 != 0).then(|| ProductSnapshot {
                name: PRODUCT_NAMES[slot].to_string(),
                sku: format!("SKU-{slot}"),
                unit_price: Money::from_cents(499 + slot as u64 * 100),
                stock_quantity: (i % 250) as u32,
            });
            EnrichedOrder::new(record, snapshot)
        })
        .collect()
}

fn bench_metrics_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_aggregation");
    let aggregator = MetricsAggregator::utc();

    for size in [100usize, 1_000, 10_000] {
        let orders = make_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| aggregator.aggregate(black_box(orders)));
        });
    }

    group.finish();
}

fn bench_demand_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("demand_forecast");

    for size in [1_000usize, 10_000] {
        let orders = make_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| DemandForecast::from_orders(black_box(orders)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics_aggregation, bench_demand_forecast);
criterion_main!(benches);

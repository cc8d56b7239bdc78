// Small dev utility: run the full allocation pipeline against a seeded
// in-memory fleet and print the resulting daily plan as JSON.
//
// Usage:
//   cargo run --bin plan_fleet_demo -- [plan_date]
//
// This is intentionally lightweight and does not persist anything.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

use cylinder_fleet_aps::{
    CylinderVariant, FleetApi, FleetSnapshot, Order, OrderLine, OrderStatus, OrderWeight, Product,
    ProductCatalog, Truck, TruckInventoryItem, TruckStatus,
};

fn seed_catalog() -> ProductCatalog {
    let mut catalog = HashMap::new();
    for (capacity, tare) in [(6.0, 8.0), (13.0, 14.0), (48.0, 40.0)] {
        let parent_id = format!("P{}", capacity as i32);
        catalog.insert(
            parent_id.clone(),
            Product {
                product_id: parent_id.clone(),
                product_name: format!("{}kg 气瓶", capacity as i32),
                parent_product_id: None,
                variant: None,
                capacity_kg: Some(capacity),
                tare_weight_kg: Some(tare),
                is_active: true,
            },
        );
        for variant in [CylinderVariant::Full, CylinderVariant::Empty] {
            let id = format!("{}-{}", parent_id, variant);
            catalog.insert(
                id.clone(),
                Product {
                    product_id: id,
                    product_name: format!("{}kg {}", capacity as i32, variant),
                    parent_product_id: Some(parent_id.clone()),
                    variant: Some(variant),
                    capacity_kg: None,
                    tare_weight_kg: None,
                    is_active: true,
                },
            );
        }
    }
    catalog
}

fn seed_trucks() -> Vec<Truck> {
    vec![
        Truck {
            truck_id: "T001".to_string(),
            plate_no: Some("沪A·10001".to_string()),
            is_active: true,
            status: TruckStatus::Active,
            capacity_cylinders: 40,
            capacity_kg: Some(1000.0),
            next_maintenance_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            fuel_tank_l: Some(70.0),
            avg_consumption_l_per_100km: Some(11.5),
            inventory: vec![TruckInventoryItem {
                product_id: "P13-EMPTY".to_string(),
                qty_full: 0,
                qty_empty: 6,
                weight_kg: None,
            }],
        },
        Truck {
            truck_id: "T002".to_string(),
            plate_no: Some("沪A·10002".to_string()),
            is_active: true,
            status: TruckStatus::Active,
            capacity_cylinders: 60,
            capacity_kg: Some(1600.0),
            next_maintenance_date: None,
            fuel_tank_l: Some(90.0),
            avg_consumption_l_per_100km: None,
            inventory: vec![],
        },
        Truck {
            truck_id: "T003".to_string(),
            plate_no: Some("沪A·10003".to_string()),
            is_active: true,
            status: TruckStatus::Maintenance,
            capacity_cylinders: 40,
            capacity_kg: Some(1000.0),
            next_maintenance_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            fuel_tank_l: Some(70.0),
            avg_consumption_l_per_100km: Some(12.5),
            inventory: vec![],
        },
    ]
}

fn seed_orders(date: NaiveDate) -> Vec<Order> {
    let line = |no: i32, product: &str, qty: i32, price: f64| OrderLine {
        line_no: no,
        product_id: product.to_string(),
        quantity: qty,
        unit_price: price,
    };
    let order = |id: &str, customer: &str, lines: Vec<OrderLine>| Order {
        order_id: id.to_string(),
        customer_id: customer.to_string(),
        status: OrderStatus::Confirmed,
        delivery_date: Some(date),
        total_amount: lines.iter().map(|l| l.quantity as f64 * l.unit_price).sum(),
        lines,
        created_at: chrono::Utc::now(),
    };

    vec![
        order("O-1001", "C-301", vec![line(1, "P13-FULL", 12, 118.0)]),
        order("O-1002", "C-302", vec![line(1, "P48-FULL", 6, 420.0)]),
        order(
            "O-1003",
            "C-303",
            vec![line(1, "P13-FULL", 8, 118.0), line(2, "P6-FULL", 4, 65.0)],
        ),
        order("O-1004", "C-304", vec![line(1, "P13-FULL", 30, 115.0)]),
        order("O-1005", "C-305", vec![line(1, "P48-FULL", 20, 415.0)]),
    ]
}

fn main() -> Result<()> {
    cylinder_fleet_aps::logging::init();

    let plan_date = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<NaiveDate>()
            .with_context(|| format!("无法解析日期参数: {}", arg))?,
        None => NaiveDate::from_ymd_opt(2026, 3, 2).expect("固定演示日期合法"),
    };

    tracing::info!("==================================================");
    tracing::info!("{} - 配载演示", cylinder_fleet_aps::APP_NAME);
    tracing::info!("系统版本: {}", cylinder_fleet_aps::VERSION);
    tracing::info!("排程日期: {}", plan_date);
    tracing::info!("==================================================");

    let api = FleetApi::with_defaults();
    let catalog = seed_catalog();
    let trucks = seed_trucks();
    let orders = seed_orders(plan_date);

    // 1. 逐单估算重量
    let mut order_weights = Vec::new();
    for order in &orders {
        let estimate = api.estimate_order_weight(order, &catalog)?;
        tracing::info!(
            order_id = %order.order_id,
            weight_kg = estimate.total_weight_kg,
            "订单重量估算完成"
        );
        order_weights.push(OrderWeight {
            order_id: order.order_id.clone(),
            weight_kg: estimate.total_weight_kg,
        });
    }

    // 2. 批量配载优化
    let snapshot = FleetSnapshot::new(trucks.clone(), vec![]);
    let result = api.optimize_allocations(&orders, &order_weights, &snapshot, plan_date)?;
    tracing::info!(
        allocated = result.summary.allocated_orders,
        unallocated = result.unallocated_orders.len(),
        fleet_utilization_pct = result.summary.fleet_utilization_pct,
        "配载优化完成"
    );

    // 3. 以优化结果组装单日日程并汇总
    let planned: Vec<_> = result
        .optimized_allocations
        .iter()
        .map(|a| a.allocation.clone())
        .collect();
    let planned_snapshot = FleetSnapshot::new(trucks, planned);
    let schedules = api.build_daily_schedule(&planned_snapshot, plan_date)?;
    let fleet = api.compute_fleet_utilization(&schedules)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    println!("{}", serde_json::to_string_pretty(&schedules)?);
    println!("{}", serde_json::to_string_pretty(&fleet)?);

    Ok(())
}

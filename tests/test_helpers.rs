// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的产品目录、车辆、订单等固定数据
// ==========================================

use chrono::{NaiveDate, Utc};
use std::collections::HashMap;

use cylinder_fleet_aps::{
    Allocation, AllocationStatus, CylinderVariant, Order, OrderLine, OrderStatus, Product,
    ProductCatalog, Truck, TruckInventoryItem, TruckStatus,
};

/// 统一的测试排程日期
pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// 标准产品目录: 6/13/48kg 母品 + 满/空变体
pub fn create_test_catalog() -> ProductCatalog {
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

/// 创建测试车辆 (默认启用、ACTIVE、空车)
pub fn create_test_truck(truck_id: &str, capacity_cylinders: i32, capacity_kg: f64) -> Truck {
    Truck {
        truck_id: truck_id.to_string(),
        plate_no: None,
        is_active: true,
        status: TruckStatus::Active,
        capacity_cylinders,
        capacity_kg: Some(capacity_kg),
        next_maintenance_date: None,
        fuel_tank_l: Some(70.0),
        avg_consumption_l_per_100km: Some(12.0),
        inventory: vec![],
    }
}

/// 创建车载库存项
pub fn create_inventory_item(
    product_id: &str,
    qty_full: i32,
    qty_empty: i32,
    weight_kg: Option<f64>,
) -> TruckInventoryItem {
    TruckInventoryItem {
        product_id: product_id.to_string(),
        qty_full,
        qty_empty,
        weight_kg,
    }
}

/// 创建单行订单
pub fn create_test_order(order_id: &str, product_id: &str, quantity: i32) -> Order {
    Order {
        order_id: order_id.to_string(),
        customer_id: format!("C-{}", order_id),
        status: OrderStatus::Confirmed,
        delivery_date: Some(plan_date()),
        total_amount: quantity as f64 * 118.0,
        lines: vec![OrderLine {
            line_no: 1,
            product_id: product_id.to_string(),
            quantity,
            unit_price: 118.0,
        }],
        created_at: Utc::now(),
    }
}

/// 创建 PLANNED 配载
pub fn create_planned_allocation(truck_id: &str, order_id: &str, weight_kg: f64) -> Allocation {
    Allocation {
        allocation_id: format!("A-{}", order_id),
        order_id: order_id.to_string(),
        truck_id: truck_id.to_string(),
        alloc_date: plan_date(),
        weight_kg,
        status: AllocationStatus::Planned,
        assign_reason: None,
        created_at: Utc::now().naive_utc(),
    }
}

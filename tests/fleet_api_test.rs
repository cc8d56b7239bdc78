// ==========================================
// FleetApi 集成测试
// ==========================================
// 职责: 验证 API 层输入形态校验与七个操作的对外行为
// ==========================================

mod test_helpers;

use cylinder_fleet_aps::{
    AllocationStatus, ApiError, FleetApi, FleetSnapshot, OrderStatus, OrderWeight,
};
use test_helpers::*;

// ==========================================
// 输入形态校验
// ==========================================

#[test]
fn test_unknown_truck_is_not_found() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(vec![create_test_truck("T001", 40, 1000.0)], vec![]);

    let err = api
        .compute_truck_capacity(&snapshot, "T-MISSING", plan_date())
        .unwrap_err();
    match err {
        ApiError::NotFound(msg) => assert!(msg.contains("T-MISSING")),
        other => panic!("期望 NotFound,实际 {:?}", other),
    }
}

#[test]
fn test_duplicate_truck_ids_rejected() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(
        vec![
            create_test_truck("T001", 40, 1000.0),
            create_test_truck("T001", 40, 800.0),
        ],
        vec![],
    );

    let err = api
        .select_best_truck("O-1", 100.0, &snapshot, plan_date())
        .unwrap_err();
    match err {
        ApiError::InvalidInput(msg) => assert!(msg.contains("重复的车辆ID")),
        other => panic!("期望 InvalidInput,实际 {:?}", other),
    }
}

#[test]
fn test_negative_line_quantity_rejected() {
    let api = FleetApi::with_defaults();
    let catalog = create_test_catalog();
    let mut order = create_test_order("O-NEG", "P13-FULL", 5);
    order.lines[0].quantity = -5;

    let err = api.estimate_order_weight(&order, &catalog).unwrap_err();
    match err {
        ApiError::InvalidInput(msg) => assert!(msg.contains("数量为负")),
        other => panic!("期望 InvalidInput,实际 {:?}", other),
    }
}

#[test]
fn test_nan_order_weight_rejected() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(vec![create_test_truck("T001", 40, 1000.0)], vec![]);

    let err = api
        .select_best_truck("O-NAN", f64::NAN, &snapshot, plan_date())
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_optimize_requires_weight_for_every_order() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(vec![create_test_truck("T001", 40, 1000.0)], vec![]);
    let orders = vec![create_test_order("O-1", "P13-FULL", 10)];

    let err = api
        .optimize_allocations(&orders, &[], &snapshot, plan_date())
        .unwrap_err();
    match err {
        ApiError::InvalidInput(msg) => assert!(msg.contains("缺少估算重量")),
        other => panic!("期望 InvalidInput,实际 {:?}", other),
    }
}

#[test]
fn test_optimize_rejects_non_allocatable_order() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(vec![create_test_truck("T001", 40, 1000.0)], vec![]);
    let mut order = create_test_order("O-DONE", "P13-FULL", 10);
    order.status = OrderStatus::Delivered;
    let weights = vec![OrderWeight { order_id: "O-DONE".to_string(), weight_kg: 270.0 }];

    let err = api
        .optimize_allocations(&[order], &weights, &snapshot, plan_date())
        .unwrap_err();
    match err {
        ApiError::InvalidInput(msg) => {
            assert!(msg.contains("状态不可配载"));
            assert!(msg.contains("DELIVERED"));
        }
        other => panic!("期望 InvalidInput,实际 {:?}", other),
    }
}

#[test]
fn test_negative_proposed_item_rejected() {
    let api = FleetApi::with_defaults();
    let snapshot = FleetSnapshot::new(vec![create_test_truck("T001", 40, 1000.0)], vec![]);

    let err = api
        .validate_loading(
            &snapshot,
            "T001",
            &[create_inventory_item("P13-FULL", -1, 0, None)],
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

// ==========================================
// 操作行为
// ==========================================

#[test]
fn test_estimate_order_weight_happy_path() {
    let api = FleetApi::with_defaults();
    let catalog = create_test_catalog();
    let order = create_test_order("O-270", "P13-FULL", 10);

    let estimate = api.estimate_order_weight(&order, &catalog).unwrap();
    assert_eq!(estimate.total_weight_kg, 270.0);
    assert_eq!(estimate.lines.len(), 1);
}

#[test]
fn test_validate_loading_blocks_cylinder_overflow() {
    let api = FleetApi::with_defaults();
    let mut truck = create_test_truck("T001", 40, 2000.0);
    truck.inventory = vec![create_inventory_item("P13-FULL", 38, 0, None)];
    let snapshot = FleetSnapshot::new(vec![truck], vec![]);

    let validation = api
        .validate_loading(
            &snapshot,
            "T001",
            &[create_inventory_item("P13-FULL", 3, 0, None)],
        )
        .unwrap();
    assert!(!validation.is_valid);
    assert!(validation.errors.iter().any(|e| e.contains("超出 1 瓶")));
}

#[test]
fn test_select_best_truck_uses_snapshot_allocations() {
    let api = FleetApi::with_defaults();
    let trucks = vec![
        create_test_truck("T001", 40, 1000.0),
        create_test_truck("T002", 40, 1000.0),
    ];
    // T001 已占 900kg: 200kg 订单只能落 T002
    let allocations = vec![create_planned_allocation("T001", "O-PRIOR", 900.0)];
    let snapshot = FleetSnapshot::new(trucks, allocations);

    let selection = api
        .select_best_truck("O-NEW", 200.0, &snapshot, plan_date())
        .unwrap();
    assert_eq!(selection.best.unwrap().truck_id, "T002");
}

#[test]
fn test_full_pipeline_via_api() {
    let api = FleetApi::with_defaults();
    let catalog = create_test_catalog();
    let trucks = vec![
        create_test_truck("T001", 40, 1000.0),
        create_test_truck("T002", 60, 1600.0),
    ];

    let orders = vec![
        create_test_order("O-1", "P13-FULL", 12),  // 324kg
        create_test_order("O-2", "P48-FULL", 6),   // 528kg
        create_test_order("O-3", "P13-FULL", 8),   // 216kg
    ];

    // 1. 估算
    let mut weights = Vec::new();
    for order in &orders {
        let estimate = api.estimate_order_weight(order, &catalog).unwrap();
        weights.push(OrderWeight {
            order_id: order.order_id.clone(),
            weight_kg: estimate.total_weight_kg,
        });
    }
    assert_eq!(weights[1].weight_kg, 528.0); // 6 × 88

    // 2. 优化
    let snapshot = FleetSnapshot::new(trucks.clone(), vec![]);
    let result = api
        .optimize_allocations(&orders, &weights, &snapshot, plan_date())
        .unwrap();
    assert_eq!(result.summary.allocated_orders, 3);
    assert!(result.unallocated_orders.is_empty());

    // 3. 日程 + 汇总
    let planned: Vec<_> = result
        .optimized_allocations
        .iter()
        .map(|a| a.allocation.clone())
        .collect();
    let planned_snapshot = FleetSnapshot::new(trucks, planned);
    let schedules = api
        .build_daily_schedule(&planned_snapshot, plan_date())
        .unwrap();
    let fleet = api.compute_fleet_utilization(&schedules).unwrap();

    assert_eq!(fleet.active_trucks, 2);
    // (324 + 528 + 216) / (1000 + 1600) ≈ 41.08%
    assert!((fleet.utilization_pct - 1068.0 / 2600.0 * 100.0).abs() < 1e-9);
}

// ==========================================
// 配载状态迁移
// ==========================================

#[test]
fn test_allocation_transition_lifecycle() {
    let api = FleetApi::with_defaults();
    let planned = create_planned_allocation("T001", "O-1", 300.0);

    let loaded = api
        .transition_allocation(&planned, AllocationStatus::Loaded)
        .unwrap();
    assert_eq!(loaded.status, AllocationStatus::Loaded);

    let delivered = api
        .transition_allocation(&loaded, AllocationStatus::Delivered)
        .unwrap();
    assert_eq!(delivered.status, AllocationStatus::Delivered);

    // 终态不可再迁移
    let err = api
        .transition_allocation(&delivered, AllocationStatus::Cancelled)
        .unwrap_err();
    match err {
        ApiError::InvalidStateTransition { from, to } => {
            assert_eq!(from, "DELIVERED");
            assert_eq!(to, "CANCELLED");
        }
        other => panic!("期望 InvalidStateTransition,实际 {:?}", other),
    }

    // PLANNED 不可直接 DELIVERED
    let err = api
        .transition_allocation(&planned, AllocationStatus::Delivered)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidStateTransition { .. }));
}

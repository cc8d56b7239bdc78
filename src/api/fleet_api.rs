// ==========================================
// 瓶装燃气配送调度系统 - 车队调度 API
// ==========================================
// 职责: 对外暴露配载核心的七个操作,
//       校验输入形态后委派给引擎层
// 红线: 引擎永不失败;只有输入形态问题才返回错误;
//       本层不落库,提交配载由调用方串行化完成
// ==========================================

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::config::strategy_profile::{FleetProfile, LoadingProfile, SelectorProfile};
use crate::config::weight_table::CylinderWeightTable;
use crate::domain::allocation::{Allocation, CapacityInfo};
use crate::domain::product::{Order, ProductCatalog};
use crate::domain::schedule::{DailySchedule, FleetUtilizationSummary};
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::truck::{Truck, TruckInventoryItem};
use crate::domain::types::AllocationStatus;
use crate::engine::allocation_optimizer::{AllocationOptimizer, OptimizationResult, OrderWeight};
use crate::engine::capacity::CapacityCalculator;
use crate::engine::fleet_scheduler::FleetScheduler;
use crate::engine::loading_validator::{LoadingValidation, LoadingValidator};
use crate::engine::truck_selector::{TruckSelection, TruckSelector};
use crate::engine::weight_estimator::{WeightEstimate, WeightEstimator};

// ==========================================
// FleetApi - 车队调度接口
// ==========================================
// 持有注入配置组装的全部引擎;自身无可变状态
pub struct FleetApi {
    estimator: WeightEstimator,
    calculator: CapacityCalculator,
    validator: LoadingValidator,
    selector: TruckSelector,
    optimizer: AllocationOptimizer,
    scheduler: FleetScheduler,
}

impl FleetApi {
    /// 以注入配置构造 (参考表/策略参数可在测试中整体替换)
    pub fn new(
        weight_table: CylinderWeightTable,
        selector_profile: SelectorProfile,
        loading_profile: LoadingProfile,
        fleet_profile: FleetProfile,
    ) -> Self {
        let defaults = weight_table.defaults.clone();
        Self {
            estimator: WeightEstimator::new(weight_table),
            calculator: CapacityCalculator::new(defaults.clone()),
            validator: LoadingValidator::new(defaults.clone(), loading_profile),
            selector: TruckSelector::new(selector_profile.clone(), defaults.clone()),
            optimizer: AllocationOptimizer::new(
                selector_profile,
                fleet_profile.clone(),
                defaults.clone(),
            ),
            scheduler: FleetScheduler::new(fleet_profile, defaults),
        }
    }

    /// 全默认配置构造
    pub fn with_defaults() -> Self {
        Self::new(
            CylinderWeightTable::standard(),
            SelectorProfile::default(),
            LoadingProfile::default(),
            FleetProfile::default(),
        )
    }

    // ==========================================
    // 操作 1: 订单重量估算
    // ==========================================

    #[instrument(skip(self, order, products), fields(order_id = %order.order_id))]
    pub fn estimate_order_weight(
        &self,
        order: &Order,
        products: &ProductCatalog,
    ) -> ApiResult<WeightEstimate> {
        for line in &order.lines {
            if line.quantity < 0 {
                return Err(ApiError::InvalidInput(format!(
                    "订单行数量为负: order_id={}, line_no={}, quantity={}",
                    order.order_id, line.line_no, line.quantity
                )));
            }
        }
        Ok(self.estimator.estimate(&order.lines, products))
    }

    // ==========================================
    // 操作 2: 单车运力快照
    // ==========================================

    #[instrument(skip(self, snapshot), fields(truck_id = %truck_id, date = %date))]
    pub fn compute_truck_capacity(
        &self,
        snapshot: &FleetSnapshot,
        truck_id: &str,
        date: NaiveDate,
    ) -> ApiResult<CapacityInfo> {
        let truck = snapshot
            .find_truck(truck_id)
            .ok_or_else(|| ApiError::NotFound(format!("车辆(truck_id={})不存在", truck_id)))?;

        Ok(self.calculator.compute(truck, &snapshot.allocations, date))
    }

    // ==========================================
    // 操作 3: 装车校验
    // ==========================================

    #[instrument(skip(self, snapshot, proposed), fields(truck_id = %truck_id))]
    pub fn validate_loading(
        &self,
        snapshot: &FleetSnapshot,
        truck_id: &str,
        proposed: &[TruckInventoryItem],
    ) -> ApiResult<LoadingValidation> {
        let truck = snapshot
            .find_truck(truck_id)
            .ok_or_else(|| ApiError::NotFound(format!("车辆(truck_id={})不存在", truck_id)))?;

        Self::ensure_items_well_formed(proposed)?;
        Ok(self.validator.validate(truck, proposed))
    }

    // ==========================================
    // 操作 4: 选车
    // ==========================================

    #[instrument(skip(self, snapshot), fields(order_id = %order_id, order_weight_kg = order_weight_kg))]
    pub fn select_best_truck(
        &self,
        order_id: &str,
        order_weight_kg: f64,
        snapshot: &FleetSnapshot,
        date: NaiveDate,
    ) -> ApiResult<TruckSelection> {
        Self::ensure_weight_well_formed(order_id, order_weight_kg)?;
        Self::ensure_unique_truck_ids(&snapshot.trucks)?;

        Ok(self.selector.select(
            order_id,
            order_weight_kg,
            &snapshot.trucks,
            &snapshot.allocations,
            date,
        ))
    }

    // ==========================================
    // 操作 5: 批量配载优化
    // ==========================================

    /// 批量配载优化
    ///
    /// 注: 优化从空的运行配载起步 (车载库存仍经由运力计算托底);
    /// snapshot.allocations 不参与本操作。
    #[instrument(skip(self, orders, order_weights, snapshot), fields(
        date = %date,
        orders_count = orders.len(),
    ))]
    pub fn optimize_allocations(
        &self,
        orders: &[Order],
        order_weights: &[OrderWeight],
        snapshot: &FleetSnapshot,
        date: NaiveDate,
    ) -> ApiResult<OptimizationResult> {
        Self::ensure_unique_truck_ids(&snapshot.trucks)?;

        let mut seen = HashSet::new();
        for order in orders {
            if !seen.insert(order.order_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "重复的订单ID: {}",
                    order.order_id
                )));
            }
            if !order.is_allocatable() {
                return Err(ApiError::InvalidInput(format!(
                    "订单状态不可配载: order_id={}, status={}",
                    order.order_id, order.status
                )));
            }
        }

        let weight_by_order: HashMap<&str, f64> = order_weights
            .iter()
            .map(|w| (w.order_id.as_str(), w.weight_kg))
            .collect();

        // 按订单传入顺序取权重,保持同重订单的确定性顺位
        let mut weights = Vec::with_capacity(orders.len());
        for order in orders {
            let weight = *weight_by_order.get(order.order_id.as_str()).ok_or_else(|| {
                ApiError::InvalidInput(format!("订单缺少估算重量: order_id={}", order.order_id))
            })?;
            Self::ensure_weight_well_formed(&order.order_id, weight)?;
            weights.push(OrderWeight {
                order_id: order.order_id.clone(),
                weight_kg: weight,
            });
        }

        Ok(self.optimizer.optimize(&weights, &snapshot.trucks, date))
    }

    // ==========================================
    // 操作 6: 车队单日日程
    // ==========================================

    #[instrument(skip(self, snapshot), fields(date = %date))]
    pub fn build_daily_schedule(
        &self,
        snapshot: &FleetSnapshot,
        date: NaiveDate,
    ) -> ApiResult<Vec<DailySchedule>> {
        Self::ensure_unique_truck_ids(&snapshot.trucks)?;
        Ok(self
            .scheduler
            .build_daily_schedule(&snapshot.trucks, &snapshot.allocations, date))
    }

    // ==========================================
    // 操作 7: 车队利用率汇总
    // ==========================================

    pub fn compute_fleet_utilization(
        &self,
        schedules: &[DailySchedule],
    ) -> ApiResult<FleetUtilizationSummary> {
        Ok(self.scheduler.compute_fleet_utilization(schedules))
    }

    // ==========================================
    // 辅助: 配载状态迁移 (供调用方提交前校验)
    // ==========================================

    pub fn transition_allocation(
        &self,
        allocation: &Allocation,
        next: AllocationStatus,
    ) -> ApiResult<Allocation> {
        if !allocation.status.can_transition_to(next) {
            return Err(ApiError::InvalidStateTransition {
                from: allocation.status.to_string(),
                to: next.to_string(),
            });
        }
        let mut updated = allocation.clone();
        updated.status = next;
        Ok(updated)
    }

    // ==========================================
    // 输入形态校验
    // ==========================================

    fn ensure_weight_well_formed(order_id: &str, weight_kg: f64) -> ApiResult<()> {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "订单重量非法: order_id={}, weight_kg={}",
                order_id, weight_kg
            )));
        }
        Ok(())
    }

    fn ensure_unique_truck_ids(trucks: &[Truck]) -> ApiResult<()> {
        let mut seen = HashSet::new();
        for truck in trucks {
            if truck.truck_id.trim().is_empty() {
                return Err(ApiError::InvalidInput("车辆ID为空".to_string()));
            }
            if !seen.insert(truck.truck_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "重复的车辆ID: {}",
                    truck.truck_id
                )));
            }
        }
        Ok(())
    }

    fn ensure_items_well_formed(items: &[TruckInventoryItem]) -> ApiResult<()> {
        for item in items {
            if item.qty_full < 0 || item.qty_empty < 0 {
                return Err(ApiError::InvalidInput(format!(
                    "装载项数量为负: product_id={}, qty_full={}, qty_empty={}",
                    item.product_id, item.qty_full, item.qty_empty
                )));
            }
            if let Some(w) = item.weight_kg {
                if !w.is_finite() || w < 0.0 {
                    return Err(ApiError::InvalidInput(format!(
                        "装载项重量非法: product_id={}, weight_kg={}",
                        item.product_id, w
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for FleetApi {
    fn default() -> Self {
        Self::with_defaults()
    }
}

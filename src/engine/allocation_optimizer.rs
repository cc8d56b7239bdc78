// ==========================================
// 瓶装燃气配送调度系统 - 配载优化引擎
// ==========================================
// 职责: 单日批量订单→车辆配载 (重量降序贪心装箱)
// 输入: 订单重量列表 + 车辆清单 + 目标日期
// 输出: 建议配载列表 + 未配订单 + 车队汇总
// 红线: 运力约束优先于订单顺序;
//       输出是建议方案,落库提交由调用方负责
// ==========================================

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::strategy_profile::{FleetProfile, SelectorProfile};
use crate::config::weight_table::CylinderWeightDefaults;
use crate::domain::allocation::Allocation;
use crate::domain::truck::Truck;
use crate::domain::types::AllocationStatus;
use crate::engine::fleet_scheduler::FleetScheduler;
use crate::engine::truck_selector::TruckSelector;

// ==========================================
// OrderWeight - 待配订单重量
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWeight {
    pub order_id: String,  // 订单ID
    pub weight_kg: f64,    // 估算重量 (kg)
}

// ==========================================
// OptimizedAllocation - 单笔配载建议
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedAllocation {
    pub allocation: Allocation,   // 生成的 PLANNED 配载 (含落位原因)
    pub fit_score: f64,           // 选车适配度评分
    pub confidence_score: f64,    // 置信度 = 适配度截断到 [0,100] 后取整
}

// ==========================================
// OptimizationSummary - 批量结果汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub total_orders: i32,          // 输入订单数
    pub allocated_orders: i32,      // 成功配载数
    pub fleet_utilization_pct: f64, // 以最终配载重算的车队利用率 (%)
}

// ==========================================
// OptimizationResult - 优化结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimized_allocations: Vec<OptimizedAllocation>,
    pub unallocated_orders: Vec<String>,
    pub summary: OptimizationSummary,
}

// ==========================================
// AllocationOptimizer - 配载优化引擎
// ==========================================
pub struct AllocationOptimizer {
    selector: TruckSelector,
    scheduler: FleetScheduler,
}

impl AllocationOptimizer {
    pub fn new(
        selector_profile: SelectorProfile,
        fleet_profile: FleetProfile,
        defaults: CylinderWeightDefaults,
    ) -> Self {
        Self {
            selector: TruckSelector::new(selector_profile, defaults.clone()),
            scheduler: FleetScheduler::new(fleet_profile, defaults),
        }
    }

    /// 批量配载优化 (单日)
    ///
    /// # 规则
    /// 1) 订单按估算重量降序处理 (重单先落位,减少碎片)
    /// 2) 逐单对"当前运行配载"调用选车引擎,
    ///    每个决策都叠加在此前所有决策之上
    /// 3) 有最优车: 追加一条 PLANNED 配载并记录评分;
    ///    无车可承接: 订单进入未配清单
    /// 4) 全部处理完后按最终配载重算车队利用率
    ///
    /// # 返回
    /// 建议配载 + 未配订单 + 汇总;本引擎不落库
    #[instrument(skip(self, order_weights, trucks), fields(
        plan_date = %date,
        orders_count = order_weights.len(),
        trucks_count = trucks.len(),
    ))]
    pub fn optimize(
        &self,
        order_weights: &[OrderWeight],
        trucks: &[Truck],
        date: NaiveDate,
    ) -> OptimizationResult {
        // 1. 重量降序 (稳定排序: 同重保持传入顺序)
        let mut sorted: Vec<OrderWeight> = order_weights.to_vec();
        sorted.sort_by(|a, b| {
            b.weight_kg
                .partial_cmp(&a.weight_kg)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // 2. 逐单落位,运行配载从空清单起步
        let mut running_allocations: Vec<Allocation> = Vec::new();
        let mut optimized = Vec::new();
        let mut unallocated = Vec::new();

        for order in &sorted {
            let selection = self.selector.select(
                &order.order_id,
                order.weight_kg,
                trucks,
                &running_allocations,
                date,
            );

            match selection.best {
                Some(best) => {
                    let allocation = Allocation {
                        allocation_id: Uuid::new_v4().to_string(),
                        order_id: order.order_id.clone(),
                        truck_id: best.truck_id.clone(),
                        alloc_date: date,
                        weight_kg: order.weight_kg,
                        status: AllocationStatus::Planned,
                        assign_reason: Some(best.score_reason.clone()),
                        created_at: Utc::now().naive_utc(),
                    };
                    running_allocations.push(allocation.clone());

                    optimized.push(OptimizedAllocation {
                        allocation,
                        fit_score: best.fit_score,
                        confidence_score: best.fit_score.clamp(0.0, 100.0).round(),
                    });
                }
                None => {
                    debug!(
                        order_id = %order.order_id,
                        weight_kg = order.weight_kg,
                        "无车可承接,订单进入未配清单"
                    );
                    unallocated.push(order.order_id.clone());
                }
            }
        }

        // 3. 按最终配载重算车队利用率
        let schedules = self
            .scheduler
            .build_daily_schedule(trucks, &running_allocations, date);
        let fleet = self.scheduler.compute_fleet_utilization(&schedules);

        OptimizationResult {
            summary: OptimizationSummary {
                total_orders: order_weights.len() as i32,
                allocated_orders: optimized.len() as i32,
                fleet_utilization_pct: fleet.utilization_pct,
            },
            optimized_allocations: optimized,
            unallocated_orders: unallocated,
        }
    }
}

impl Default for AllocationOptimizer {
    fn default() -> Self {
        Self::new(
            SelectorProfile::default(),
            FleetProfile::default(),
            CylinderWeightDefaults::default(),
        )
    }
}

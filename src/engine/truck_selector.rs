// ==========================================
// 瓶装燃气配送调度系统 - 选车引擎
// ==========================================
// 职责: 为单笔订单对可用车辆按适配度评分排序
// 输入: 订单重量 + 车辆清单 + 全量配载 + 目标日期
// 输出: 降序候选列表 + 最优可承接车辆 (可空)
// 红线: 停用/维保车辆不进入候选池;
//       不可承接车辆评 0 分且不得成为最优
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::strategy_profile::SelectorProfile;
use crate::config::weight_table::CylinderWeightDefaults;
use crate::domain::allocation::{Allocation, CapacityInfo};
use crate::domain::truck::Truck;
use crate::engine::capacity::CapacityCalculator;

// ==========================================
// TruckCandidate - 候选车辆
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckCandidate {
    pub truck_id: String,              // 车辆ID
    pub capacity: CapacityInfo,        // 运力快照
    pub can_accommodate: bool,         // 能否承接本单
    pub utilization_after_pct: f64,    // 承接后利用率 (%)
    pub fit_score: f64,                // 适配度评分
    pub score_reason: String,          // 评分解释 (可解释性)
}

// ==========================================
// TruckSelection - 选车结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckSelection {
    pub ranked: Vec<TruckCandidate>,       // 按适配度降序 (同分保持原始顺序)
    pub best: Option<TruckCandidate>,      // 最优可承接车辆
}

// ==========================================
// TruckSelector - 选车引擎
// ==========================================
pub struct TruckSelector {
    profile: SelectorProfile,
    calculator: CapacityCalculator,
}

impl TruckSelector {
    pub fn new(profile: SelectorProfile, defaults: CylinderWeightDefaults) -> Self {
        Self {
            profile,
            calculator: CapacityCalculator::new(defaults),
        }
    }

    /// 为订单选车
    ///
    /// # 评分规则
    /// - 承接后利用率 ≤ 截断阈值(85%): 基础分 = 100 − |利用率 − 目标(75%)|,
    ///   在目标利用率处达到峰值,两侧线性衰减
    /// - 超过截断阈值: 固定低分 (20)
    /// - 线路简化奖励: max(0, 上限(10) − 当日已配订单数)
    /// - 不可承接: 0 分,且不参与最优判定
    ///
    /// # 返回
    /// 完整降序候选列表与最优车辆;输入相同则输出确定
    #[instrument(skip(self, trucks, allocations), fields(
        order_id = %order_id,
        order_weight_kg = order_weight_kg,
        trucks_count = trucks.len(),
    ))]
    pub fn select(
        &self,
        order_id: &str,
        order_weight_kg: f64,
        trucks: &[Truck],
        allocations: &[Allocation],
        date: NaiveDate,
    ) -> TruckSelection {
        let mut ranked: Vec<TruckCandidate> = trucks
            .iter()
            .filter(|t| t.is_operational())
            .map(|t| self.score_candidate(order_weight_kg, t, allocations, date))
            .collect();

        // 稳定排序: 同分车辆保持传入顺序
        ranked.sort_by(|a, b| {
            b.fit_score
                .partial_cmp(&a.fit_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let best = ranked.iter().find(|c| c.can_accommodate).cloned();

        TruckSelection { ranked, best }
    }

    // ==========================================
    // 单车评分
    // ==========================================

    fn score_candidate(
        &self,
        order_weight_kg: f64,
        truck: &Truck,
        allocations: &[Allocation],
        date: NaiveDate,
    ) -> TruckCandidate {
        let capacity = self.calculator.compute(truck, allocations, date);
        let can_accommodate = capacity.can_accommodate(order_weight_kg);
        let utilization_after = capacity.utilization_after(order_weight_kg);

        let (fit_score, score_reason) = if !can_accommodate {
            (
                0.0,
                format!(
                    "CANNOT_ACCOMMODATE: available={:.1}kg < order={:.1}kg",
                    capacity.available_weight_kg, order_weight_kg
                ),
            )
        } else {
            let p = &self.profile;
            let bonus = (p.routing_bonus_cap - capacity.orders_count as f64).max(0.0);

            if utilization_after <= p.utilization_cutoff_pct {
                let base = 100.0 - (utilization_after - p.target_utilization_pct).abs();
                (
                    base + bonus,
                    format!(
                        "TARGET_BAND: utilization_after={:.1}%, base={:.1}, routing_bonus={:.1}",
                        utilization_after, base, bonus
                    ),
                )
            } else {
                (
                    p.over_cutoff_score + bonus,
                    format!(
                        "OVER_CUTOFF: utilization_after={:.1}% > {:.0}%, base={:.1}, routing_bonus={:.1}",
                        utilization_after, p.utilization_cutoff_pct, p.over_cutoff_score, bonus
                    ),
                )
            }
        };

        TruckCandidate {
            truck_id: truck.truck_id.clone(),
            capacity,
            can_accommodate,
            utilization_after_pct: utilization_after,
            fit_score,
            score_reason,
        }
    }
}

impl Default for TruckSelector {
    fn default() -> Self {
        Self::new(SelectorProfile::default(), CylinderWeightDefaults::default())
    }
}

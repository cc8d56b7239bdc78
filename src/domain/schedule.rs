// ==========================================
// 瓶装燃气配送调度系统 - 日程与车队汇总领域模型
// ==========================================
// 职责: (车辆, 日期) 日程视图与车队级汇总,驾驶舱只读数据源
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::allocation::{Allocation, CapacityInfo};
use crate::domain::types::{FleetLoadLevel, TruckStatus};

// ==========================================
// DailySchedule - 单车日程
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    pub truck_id: String,              // 车辆ID
    pub schedule_date: NaiveDate,      // 日程日期

    // ===== 车辆状态快照 (车队汇总口径依赖) =====
    pub truck_active: bool,            // 启用标志快照
    pub truck_status: TruckStatus,     // 运行状态快照

    pub allocations: Vec<Allocation>,  // 当日未取消配载
    pub capacity: CapacityInfo,        // 运力快照
    pub maintenance_due: bool,         // 维保到期 (下次维保日 ≤ 目标日)
    pub fuel_sufficient: bool,         // 按粗略里程模型估算油量是否充足
}

impl DailySchedule {
    /// 判断是否计入车队汇总 (启用且非维保)
    pub fn counts_in_fleet_rollup(&self) -> bool {
        self.truck_active && self.truck_status == TruckStatus::Active
    }
}

// ==========================================
// FleetUtilizationSummary - 车队利用率汇总
// ==========================================
// 口径: 只统计启用且非维保车辆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetUtilizationSummary {
    // ===== 运力指标 =====
    pub total_capacity_kg: f64,        // 车队总载重
    pub total_allocated_kg: f64,       // 车队已占用
    pub utilization_pct: f64,          // 整体利用率 (%)

    // ===== 车辆计数 =====
    pub active_trucks: i32,            // 参与统计的车辆数
    pub overallocated_trucks: i32,     // 超配车辆数
    pub maintenance_due_trucks: i32,   // 维保到期车辆数

    // ===== 负载等级 =====
    pub load_level: FleetLoadLevel,    // 负载等级
    pub load_reason: String,           // 等级判定原因 (可解释性)
}

// ==========================================
// Trait: FleetAssessment
// ==========================================
// 用途: 车队汇总的评估逻辑接口
pub trait FleetAssessment {
    /// 整体利用率 (0.0 - 1.0+)
    fn utilization_ratio(&self) -> f64;

    /// 判断是否存在再平衡空间
    fn has_rebalancing_opportunity(&self) -> bool;
}

impl FleetAssessment for FleetUtilizationSummary {
    fn utilization_ratio(&self) -> f64 {
        if self.total_capacity_kg <= 0.0 {
            return 0.0;
        }
        self.total_allocated_kg / self.total_capacity_kg
    }

    /// 判断是否存在再平衡空间
    ///
    /// # 规则
    /// - 存在超配车辆但整体利用率 < 85%: 负载不均,可再平衡
    fn has_rebalancing_opportunity(&self) -> bool {
        self.overallocated_trucks > 0 && self.utilization_ratio() < 0.85
    }
}

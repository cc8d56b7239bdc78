// ==========================================
// 瓶装燃气配送调度系统 - 配载领域模型
// ==========================================
// 职责: 配载计划(订单→车辆→日期)与运力快照
// 红线: CapacityInfo 永远按需重算,不缓存不落库
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::AllocationStatus;

// ==========================================
// Allocation - 配载计划
// ==========================================
// 一笔订单重量在某日对某车的计划性占用;是建议,不是实际装载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub allocation_id: String,         // 配载ID
    pub order_id: String,              // 订单ID
    pub truck_id: String,              // 车辆ID
    pub alloc_date: NaiveDate,         // 配载日期
    pub weight_kg: f64,                // 计划重量 (kg)
    pub status: AllocationStatus,      // 生命周期状态

    // ===== 快照字段 (可解释性) =====
    pub assign_reason: Option<String>, // 落位原因 (优化器生成)
    pub created_at: NaiveDateTime,     // 创建时间
}

impl Allocation {
    /// 判断是否属于指定车辆与日期
    pub fn is_for(&self, truck_id: &str, date: NaiveDate) -> bool {
        self.truck_id == truck_id && self.alloc_date == date
    }

    /// 判断是否计入运力占用
    pub fn counts_toward_capacity(&self) -> bool {
        self.status.counts_toward_capacity()
    }
}

// ==========================================
// CapacityInfo - 运力快照
// ==========================================
// (车辆, 日期) 的派生视图;每次查询重新计算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityInfo {
    pub truck_id: String,            // 车辆ID
    pub capacity_date: NaiveDate,    // 目标日期

    // ===== 两条占用来源 (可解释性: 分别暴露) =====
    pub allocation_weight_kg: f64,   // 当日未取消配载重量合计
    pub onboard_weight_kg: f64,      // 车载库存实测重量合计

    // ===== 派生指标 =====
    pub total_capacity_kg: f64,      // 载重上限
    pub allocated_weight_kg: f64,    // 已占用 = max(配载合计, 车载实测)
    pub available_weight_kg: f64,    // 剩余 = max(0, 上限 - 已占用)
    pub utilization_pct: f64,        // 利用率 (%)
    pub orders_count: i32,           // 当日配载订单数
    pub is_overallocated: bool,      // 超配标志
}

impl CapacityInfo {
    /// 判断还能否再承接指定重量
    pub fn can_accommodate(&self, weight_kg: f64) -> bool {
        self.available_weight_kg >= weight_kg
    }

    /// 追加指定重量后的利用率 (%)
    ///
    /// 上限 ≤ 0 时按 100% 处理,避免除零
    pub fn utilization_after(&self, additional_kg: f64) -> f64 {
        if self.total_capacity_kg <= 0.0 {
            return 100.0;
        }
        (self.allocated_weight_kg + additional_kg) / self.total_capacity_kg * 100.0
    }
}

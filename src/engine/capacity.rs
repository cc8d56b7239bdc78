// ==========================================
// 瓶装燃气配送调度系统 - 运力计算引擎
// ==========================================
// 职责: 为 (车辆, 日期) 计算唯一权威的运力快照
// 输入: 车辆(含车载库存) + 全量配载 + 目标日期
// 输出: CapacityInfo
// 红线: 纯函数,无 I/O,确定性,永不失败
// ==========================================

use chrono::NaiveDate;
use tracing::instrument;

use crate::config::weight_table::CylinderWeightDefaults;
use crate::domain::allocation::{Allocation, CapacityInfo};
use crate::domain::truck::{Truck, TruckInventoryItem};

// ==========================================
// CapacityCalculator - 运力计算引擎
// ==========================================
pub struct CapacityCalculator {
    defaults: CylinderWeightDefaults,
}

impl CapacityCalculator {
    pub fn new(defaults: CylinderWeightDefaults) -> Self {
        Self { defaults }
    }

    /// 库存项实测重量
    ///
    /// 有预计算重量用预计算值,否则按默认单重折算:
    /// 满瓶数 × 默认满瓶重 + 空瓶数 × 默认空瓶重
    pub fn measure_item(&self, item: &TruckInventoryItem) -> f64 {
        match item.weight_kg {
            Some(w) if w.is_finite() && w >= 0.0 => w,
            _ => {
                item.qty_full as f64 * self.defaults.full_cylinder_kg
                    + item.qty_empty as f64 * self.defaults.empty_cylinder_kg
            }
        }
    }

    /// 车载库存实测重量合计
    pub fn measure_inventory(&self, items: &[TruckInventoryItem]) -> f64 {
        items.iter().map(|i| self.measure_item(i)).sum()
    }

    /// 计算 (车辆, 日期) 运力快照
    ///
    /// # 规则
    /// - 配载口径: 该车该日全部未取消配载的重量合计
    /// - 库存口径: 车载库存实测重量合计
    /// - 已占用取两者较大值 (宁可少报可用,不可多报)
    /// - 上限 ≤ 0 时利用率为 0%,不做除法
    #[instrument(skip(self, truck, allocations), fields(
        truck_id = %truck.truck_id,
        capacity_date = %date,
    ))]
    pub fn compute(
        &self,
        truck: &Truck,
        allocations: &[Allocation],
        date: NaiveDate,
    ) -> CapacityInfo {
        let mut allocation_weight = 0.0;
        let mut orders_count = 0;
        for alloc in allocations {
            if alloc.is_for(&truck.truck_id, date) && alloc.counts_toward_capacity() {
                allocation_weight += alloc.weight_kg;
                orders_count += 1;
            }
        }

        let onboard_weight = self.measure_inventory(&truck.inventory);
        let allocated = allocation_weight.max(onboard_weight);

        let capacity = truck.effective_capacity_kg();
        let available = (capacity - allocated).max(0.0);
        let utilization = if capacity > 0.0 {
            allocated / capacity * 100.0
        } else {
            0.0
        };

        CapacityInfo {
            truck_id: truck.truck_id.clone(),
            capacity_date: date,
            allocation_weight_kg: allocation_weight,
            onboard_weight_kg: onboard_weight,
            total_capacity_kg: capacity,
            allocated_weight_kg: allocated,
            available_weight_kg: available,
            utilization_pct: utilization,
            orders_count,
            is_overallocated: allocated > capacity,
        }
    }
}

impl Default for CapacityCalculator {
    fn default() -> Self {
        Self::new(CylinderWeightDefaults::default())
    }
}

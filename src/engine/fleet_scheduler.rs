// ==========================================
// 瓶装燃气配送调度系统 - 车队日程引擎
// ==========================================
// 职责: 组装单车日程视图 (配载 + 维保/油量可行性),
//       并聚合车队级利用率汇总
// 输入: 车辆清单 + 全量配载 + 目标日期
// 输出: DailySchedule 列表 + FleetUtilizationSummary
// 红线: 纯聚合,无副作用;汇总口径只含启用且非维保车辆
// ==========================================

use chrono::NaiveDate;
use tracing::instrument;

use crate::config::strategy_profile::FleetProfile;
use crate::config::weight_table::CylinderWeightDefaults;
use crate::domain::allocation::Allocation;
use crate::domain::schedule::{DailySchedule, FleetUtilizationSummary};
use crate::domain::truck::Truck;
use crate::domain::types::FleetLoadLevel;
use crate::engine::capacity::CapacityCalculator;

// ==========================================
// FleetScheduler - 车队日程引擎
// ==========================================
pub struct FleetScheduler {
    profile: FleetProfile,
    calculator: CapacityCalculator,
}

impl FleetScheduler {
    pub fn new(profile: FleetProfile, defaults: CylinderWeightDefaults) -> Self {
        Self {
            profile,
            calculator: CapacityCalculator::new(defaults),
        }
    }

    /// 组装全车队单日日程
    ///
    /// 每辆车: 当日未取消配载 + 运力快照 + 维保到期判定 + 油量估算
    #[instrument(skip(self, trucks, allocations), fields(
        schedule_date = %date,
        trucks_count = trucks.len(),
    ))]
    pub fn build_daily_schedule(
        &self,
        trucks: &[Truck],
        allocations: &[Allocation],
        date: NaiveDate,
    ) -> Vec<DailySchedule> {
        trucks
            .iter()
            .map(|truck| {
                let day_allocations: Vec<Allocation> = allocations
                    .iter()
                    .filter(|a| a.is_for(&truck.truck_id, date) && a.counts_toward_capacity())
                    .cloned()
                    .collect();

                let capacity = self.calculator.compute(truck, allocations, date);
                let maintenance_due = truck
                    .next_maintenance_date
                    .map(|d| d <= date)
                    .unwrap_or(false);
                let fuel_sufficient = self.fuel_sufficient(truck, capacity.orders_count);

                DailySchedule {
                    truck_id: truck.truck_id.clone(),
                    schedule_date: date,
                    truck_active: truck.is_active,
                    truck_status: truck.status,
                    allocations: day_allocations,
                    capacity,
                    maintenance_due,
                    fuel_sufficient,
                }
            })
            .collect()
    }

    /// 车队利用率汇总 (只统计启用且非维保车辆)
    pub fn compute_fleet_utilization(
        &self,
        schedules: &[DailySchedule],
    ) -> FleetUtilizationSummary {
        let mut total_capacity = 0.0;
        let mut total_allocated = 0.0;
        let mut active_trucks = 0;
        let mut overallocated_trucks = 0;
        let mut maintenance_due_trucks = 0;

        for schedule in schedules.iter().filter(|s| s.counts_in_fleet_rollup()) {
            total_capacity += schedule.capacity.total_capacity_kg;
            total_allocated += schedule.capacity.allocated_weight_kg;
            active_trucks += 1;
            if schedule.capacity.is_overallocated {
                overallocated_trucks += 1;
            }
            if schedule.maintenance_due {
                maintenance_due_trucks += 1;
            }
        }

        let utilization_pct = if total_capacity > 0.0 {
            total_allocated / total_capacity * 100.0
        } else {
            0.0
        };

        let (load_level, load_reason) = Self::assess_load_level(
            utilization_pct,
            overallocated_trucks,
            maintenance_due_trucks,
        );

        FleetUtilizationSummary {
            total_capacity_kg: total_capacity,
            total_allocated_kg: total_allocated,
            utilization_pct,
            active_trucks,
            overallocated_trucks,
            maintenance_due_trucks,
            load_level,
            load_reason,
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 油量可行性估算
    ///
    /// # 模型
    /// 里程 = 配送点数 × 每点里程(25km);
    /// 需油 = 里程 × 油耗(车辆值或默认 12L/100km) / 100;
    /// 可用 = 油箱容量 × 可用比例(80%)。
    /// 油箱容量未登记时视为充足 (启发式估算,缺数据不判负)
    fn fuel_sufficient(&self, truck: &Truck, stops: i32) -> bool {
        let tank = match truck.fuel_tank_l {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => return true,
        };

        let consumption = truck
            .avg_consumption_l_per_100km
            .filter(|c| c.is_finite() && *c > 0.0)
            .unwrap_or(self.profile.default_consumption_l_per_100km);

        let distance_km = stops as f64 * self.profile.km_per_stop;
        let fuel_needed_l = distance_km * consumption / 100.0;
        let fuel_available_l = tank * self.profile.usable_tank_ratio;

        fuel_needed_l <= fuel_available_l
    }

    /// 车队负载等级判定 (每个等级必须给出原因)
    fn assess_load_level(
        utilization_pct: f64,
        overallocated_trucks: i32,
        maintenance_due_trucks: i32,
    ) -> (FleetLoadLevel, String) {
        if overallocated_trucks > 0 {
            return (
                FleetLoadLevel::Red,
                format!("存在超配车辆: {} 辆", overallocated_trucks),
            );
        }
        if utilization_pct > 85.0 {
            return (
                FleetLoadLevel::Orange,
                format!("整体利用率 {:.1}% > 85%", utilization_pct),
            );
        }
        if utilization_pct > 70.0 {
            return (
                FleetLoadLevel::Yellow,
                format!("整体利用率 {:.1}% > 70%", utilization_pct),
            );
        }
        if maintenance_due_trucks > 0 {
            return (
                FleetLoadLevel::Yellow,
                format!("维保到期车辆: {} 辆", maintenance_due_trucks),
            );
        }
        (
            FleetLoadLevel::Green,
            format!("整体利用率 {:.1}%", utilization_pct),
        )
    }
}

impl Default for FleetScheduler {
    fn default() -> Self {
        Self::new(FleetProfile::default(), CylinderWeightDefaults::default())
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AllocationStatus, TruckStatus};
    use chrono::Utc;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn test_truck(truck_id: &str, capacity_kg: f64) -> Truck {
        Truck {
            truck_id: truck_id.to_string(),
            plate_no: None,
            is_active: true,
            status: TruckStatus::Active,
            capacity_cylinders: 40,
            capacity_kg: Some(capacity_kg),
            next_maintenance_date: None,
            fuel_tank_l: Some(60.0),
            avg_consumption_l_per_100km: Some(12.0),
            inventory: vec![],
        }
    }

    fn planned(truck_id: &str, order_id: &str, weight: f64) -> Allocation {
        Allocation {
            allocation_id: format!("A-{}", order_id),
            order_id: order_id.to_string(),
            truck_id: truck_id.to_string(),
            alloc_date: test_date(),
            weight_kg: weight,
            status: AllocationStatus::Planned,
            assign_reason: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    // ==========================================
    // 日程组装测试
    // ==========================================

    #[test]
    fn test_schedule_gathers_day_allocations_and_capacity() {
        let scheduler = FleetScheduler::default();
        let trucks = vec![test_truck("T001", 1000.0), test_truck("T002", 800.0)];
        let allocations = vec![
            planned("T001", "O1", 300.0),
            planned("T001", "O2", 200.0),
            planned("T002", "O3", 400.0),
        ];

        let schedules = scheduler.build_daily_schedule(&trucks, &allocations, test_date());
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].allocations.len(), 2);
        assert_eq!(schedules[0].capacity.allocated_weight_kg, 500.0);
        assert_eq!(schedules[1].allocations.len(), 1);
    }

    #[test]
    fn test_maintenance_due_comparison() {
        let scheduler = FleetScheduler::default();
        let mut truck = test_truck("T001", 1000.0);
        truck.next_maintenance_date = NaiveDate::from_ymd_opt(2026, 3, 2); // == 目标日

        let schedules = scheduler.build_daily_schedule(&[truck], &[], test_date());
        assert!(schedules[0].maintenance_due);

        let mut truck = test_truck("T002", 1000.0);
        truck.next_maintenance_date = NaiveDate::from_ymd_opt(2026, 3, 10);
        let schedules = scheduler.build_daily_schedule(&[truck], &[], test_date());
        assert!(!schedules[0].maintenance_due);
    }

    #[test]
    fn test_fuel_model() {
        let scheduler = FleetScheduler::default();

        // 60L 油箱 × 80% = 48L 可用;10 单 × 25km × 12L/100km = 30L → 充足
        let truck = test_truck("T001", 10000.0);
        let allocations: Vec<Allocation> = (0..10)
            .map(|i| planned("T001", &format!("O{}", i), 100.0))
            .collect();
        let schedules = scheduler.build_daily_schedule(&[truck], &allocations, test_date());
        assert!(schedules[0].fuel_sufficient);

        // 17 单 × 25km × 12L/100km = 51L > 48L → 不足
        let truck = test_truck("T002", 10000.0);
        let allocations: Vec<Allocation> = (0..17)
            .map(|i| planned("T002", &format!("O{}", i), 100.0))
            .collect();
        let schedules = scheduler.build_daily_schedule(&[truck], &allocations, test_date());
        assert!(!schedules[0].fuel_sufficient);
    }

    #[test]
    fn test_missing_tank_treated_as_sufficient() {
        let scheduler = FleetScheduler::default();
        let mut truck = test_truck("T001", 10000.0);
        truck.fuel_tank_l = None;
        let allocations: Vec<Allocation> = (0..100)
            .map(|i| planned("T001", &format!("O{}", i), 10.0))
            .collect();

        let schedules = scheduler.build_daily_schedule(&[truck], &allocations, test_date());
        assert!(schedules[0].fuel_sufficient);
    }

    // ==========================================
    // 车队汇总测试
    // ==========================================

    #[test]
    fn test_rollup_excludes_maintenance_and_inactive() {
        let scheduler = FleetScheduler::default();
        let mut maintenance = test_truck("T-MAINT", 1000.0);
        maintenance.status = TruckStatus::Maintenance;
        let mut inactive = test_truck("T-OFF", 1000.0);
        inactive.is_active = false;
        let trucks = vec![test_truck("T001", 1000.0), maintenance, inactive];
        let allocations = vec![planned("T001", "O1", 500.0)];

        let schedules = scheduler.build_daily_schedule(&trucks, &allocations, test_date());
        let summary = scheduler.compute_fleet_utilization(&schedules);

        assert_eq!(summary.active_trucks, 1);
        assert_eq!(summary.total_capacity_kg, 1000.0);
        assert_eq!(summary.total_allocated_kg, 500.0);
        assert_eq!(summary.utilization_pct, 50.0);
    }

    #[test]
    fn test_rollup_counts_overallocated_and_maintenance_due() {
        let scheduler = FleetScheduler::default();
        let mut due = test_truck("T-DUE", 1000.0);
        due.next_maintenance_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        let trucks = vec![test_truck("T001", 500.0), due];
        let allocations = vec![planned("T001", "O1", 700.0)]; // T001 超配

        let schedules = scheduler.build_daily_schedule(&trucks, &allocations, test_date());
        let summary = scheduler.compute_fleet_utilization(&schedules);

        assert_eq!(summary.overallocated_trucks, 1);
        assert_eq!(summary.maintenance_due_trucks, 1);
        assert_eq!(summary.load_level, FleetLoadLevel::Red);
        assert!(summary.load_reason.contains("超配"));
    }

    #[test]
    fn test_load_level_bands() {
        // 无超配,72% → Yellow
        let (level, _) = FleetScheduler::assess_load_level(72.0, 0, 0);
        assert_eq!(level, FleetLoadLevel::Yellow);

        // 90% → Orange
        let (level, _) = FleetScheduler::assess_load_level(90.0, 0, 0);
        assert_eq!(level, FleetLoadLevel::Orange);

        // 50% 无异常 → Green
        let (level, reason) = FleetScheduler::assess_load_level(50.0, 0, 0);
        assert_eq!(level, FleetLoadLevel::Green);
        assert!(reason.contains("50.0"));

        // 50% 但有维保到期 → Yellow
        let (level, _) = FleetScheduler::assess_load_level(50.0, 0, 2);
        assert_eq!(level, FleetLoadLevel::Yellow);
    }

    #[test]
    fn test_empty_fleet_rollup_is_zero() {
        let scheduler = FleetScheduler::default();
        let summary = scheduler.compute_fleet_utilization(&[]);
        assert_eq!(summary.total_capacity_kg, 0.0);
        assert_eq!(summary.utilization_pct, 0.0);
        assert_eq!(summary.active_trucks, 0);
        assert_eq!(summary.load_level, FleetLoadLevel::Green);
    }
}

// ==========================================
// 瓶装燃气配送调度系统 - 车队状态快照
// ==========================================
// 职责: 承载调用方传入的显式版本化状态
// 红线: 快照是值,不是共享存储的活句柄;核心不持有可变状态
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::allocation::Allocation;
use crate::domain::truck::Truck;

// ==========================================
// FleetSnapshot - 车队状态快照
// ==========================================
// 并发约束: 两个调用方基于同一快照各自选车可能共同超配同一辆车;
// 提交配载前必须由调用方按 (车辆, 日期) 串行化写入,
// 并以装车校验作为装车前最终闸口。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub snapshot_id: String,            // 快照ID
    pub as_of: DateTime<Utc>,           // 快照时点
    pub trucks: Vec<Truck>,             // 车辆清单 (含车载库存)
    pub allocations: Vec<Allocation>,   // 全部相关配载
}

impl FleetSnapshot {
    /// 构造新快照 (自动生成快照ID)
    pub fn new(trucks: Vec<Truck>, allocations: Vec<Allocation>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4().to_string(),
            as_of: Utc::now(),
            trucks,
            allocations,
        }
    }

    /// 按ID查找车辆
    pub fn find_truck(&self, truck_id: &str) -> Option<&Truck> {
        self.trucks.iter().find(|t| t.truck_id == truck_id)
    }
}

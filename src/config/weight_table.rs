// ==========================================
// 瓶装燃气配送调度系统 - 气瓶重量参考表
// ==========================================
// 职责: 按公称容量 (6/13/48/90 kg) 提供满瓶/空瓶/净重参考值
// 红线: 以注入的不可变配置传入,不做隐藏的模块级常量;
//       默认单重在此集中定义,全库唯一来源
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CylinderWeightDefaults - 默认单重
// ==========================================
// 参考数据缺失时的降级值 (13kg 级: 满瓶 27 / 空瓶 14)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderWeightDefaults {
    #[serde(default = "default_full_cylinder_kg")]
    pub full_cylinder_kg: f64,  // 默认满瓶单重 (kg)

    #[serde(default = "default_empty_cylinder_kg")]
    pub empty_cylinder_kg: f64, // 默认空瓶单重 (kg)

    #[serde(default = "default_tare_kg")]
    pub tare_kg: f64,           // 默认皮重 (kg)
}

fn default_full_cylinder_kg() -> f64 {
    27.0
}

fn default_empty_cylinder_kg() -> f64 {
    14.0
}

fn default_tare_kg() -> f64 {
    10.0
}

impl Default for CylinderWeightDefaults {
    fn default() -> Self {
        Self {
            full_cylinder_kg: default_full_cylinder_kg(),
            empty_cylinder_kg: default_empty_cylinder_kg(),
            tare_kg: default_tare_kg(),
        }
    }
}

// ==========================================
// CylinderWeightClass - 重量等级
// ==========================================
// 以公称容量为键;净重 = 内容物重量 = 公称容量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderWeightClass {
    pub capacity_kg: f64,      // 公称容量 (键)
    pub full_weight_kg: f64,   // 满瓶重量
    pub empty_weight_kg: f64,  // 空瓶重量
    pub net_weight_kg: f64,    // 净重 (内容物)
}

// ==========================================
// CylinderWeightTable - 重量参考表
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderWeightTable {
    pub classes: Vec<CylinderWeightClass>,

    #[serde(default)]
    pub defaults: CylinderWeightDefaults,
}

impl CylinderWeightTable {
    /// 标准参考表 (6/13/48/90 kg 四级)
    pub fn standard() -> Self {
        Self {
            classes: vec![
                CylinderWeightClass {
                    capacity_kg: 6.0,
                    full_weight_kg: 14.0,
                    empty_weight_kg: 8.0,
                    net_weight_kg: 6.0,
                },
                CylinderWeightClass {
                    capacity_kg: 13.0,
                    full_weight_kg: 27.0,
                    empty_weight_kg: 14.0,
                    net_weight_kg: 13.0,
                },
                CylinderWeightClass {
                    capacity_kg: 48.0,
                    full_weight_kg: 88.0,
                    empty_weight_kg: 40.0,
                    net_weight_kg: 48.0,
                },
                CylinderWeightClass {
                    capacity_kg: 90.0,
                    full_weight_kg: 160.0,
                    empty_weight_kg: 70.0,
                    net_weight_kg: 90.0,
                },
            ],
            defaults: CylinderWeightDefaults::default(),
        }
    }

    /// 按公称容量查找重量等级 (容差 0.001 kg)
    pub fn lookup(&self, capacity_kg: f64) -> Option<&CylinderWeightClass> {
        self.classes
            .iter()
            .find(|c| (c.capacity_kg - capacity_kg).abs() < 1e-3)
    }
}

impl Default for CylinderWeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

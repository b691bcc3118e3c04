#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供肝脏血管分割工作流中独立于宿主平台的几何部分:
//! ROI 包围盒拟合, 标记点 (fiducial) 管理与几何导出.
//!
//! 宿主平台负责交互式界面, 场景图节点, 分割编辑器效果与血管滤波;
//! 本 crate 只处理从这些组件中剥离出来的纯数据与纯计算,
//! 因此不依赖任何场景图或渲染库.
//!
//! # 注意
//!
//! 1. 所有坐标均为宿主 RAS 坐标系下的毫米值.
//! 2. 在非期望情况下, 程序会直接 panic, 而不会导致内存错误. As what Rust promises.
//!
//! # 功能总览
//!
//! ### ROI 包围盒拟合 ✅
//!
//! 由用户放置的标记点位置拟合 ROI 包围盒 (中心 + 每轴半径).
//! 支持最小边长下限与增长因子, 以保证后续血管滤波覆盖足够的上下文区域.
//!
//! 实现位于 `vessel-berry/src/roi.rs`.
//!
//! ### 标记点管理 ✅
//!
//! 带标签标记点的有序集合, 提供位置提取, 标签查找与最近点查询.
//!
//! 实现位于 `vessel-berry/src/markup.rs`.
//!
//! ### 几何导出 ✅
//!
//! 将标记点节点以 markups fcsv 文本格式批量写入目标目录.
//!
//! 实现位于 `vessel-berry/src/export.rs`.

/// 三维位置 (x, y, z), 同时也可一定程度上用作三维向量. 单位为毫米.
pub type Pos3d = (f64, f64, f64);

pub mod consts;

mod roi;

pub use roi::{ExtentError, RoiExtent, RoiParams};

mod markup;

pub use markup::{ControlPoint, FiducialNode};

mod export;

pub use export::{ExportError, GeometryExporter, GeometryWrite};

pub mod prelude;

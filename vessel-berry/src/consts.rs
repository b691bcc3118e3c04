//! 通用常量.

/// 血管 ROI 的默认最小总边长 (直径, 单位: 毫米).
///
/// 即使用户只放置了彼此很近的标记点, 该下限也能让后续血管滤波
/// 覆盖足够的上下文区域.
pub const DEFAULT_MIN_ROI_EXTENT: f64 = 20.0;

/// 血管 ROI 的默认散布半径增长因子.
///
/// 紧贴包围盒会让目标血管贴着 ROI 边缘被截断, 默认放大两成.
pub const DEFAULT_ROI_GROWTH_FACTOR: f64 = 1.2;

/// 导出的 markups fcsv 文件格式版本. 与宿主平台的 markups 存储版本一致.
pub const FCSV_VERSION: &str = "4.11";

//! ROI 包围盒拟合.
//!
//! 给定一组三维标记点位置, 该模块可以拟合出一个紧贴点集的 ROI
//! 包围盒 (中心 + 每轴半径). 每条轴独立处理: 中心取该轴极值的中点,
//! 半径取散布半径与最小边长下限一半的较大者.

use crate::consts::{DEFAULT_MIN_ROI_EXTENT, DEFAULT_ROI_GROWTH_FACTOR};
use crate::Pos3d;
use itertools::Itertools;
use ndarray::ArrayView2;

/// ROI 拟合的运行时错误.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtentError {
    /// 输入点集为空.
    NoPositions,

    /// 最小边长不是非负数.
    NegativeMinExtent(f64),

    /// 增长因子不是正数.
    InvalidGrowthFactor(f64),

    /// 输入点存在非有限分量. 参数为该点在点集中的索引.
    NonFinitePosition(usize),

    /// 二维数组入口的形状错误. 参数为实际的第二维长度 (期望为 3).
    BadShape(usize),
}

/// ROI 拟合参数.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoiParams {
    /// 每轴强制的最小总边长 (直径, 单位: 毫米). 必须非负.
    pub min_extent: f64,

    /// 散布半径增长因子. 必须为正数, 只作用于点集散布得出的半径,
    /// 不作用于最小边长下限.
    pub growth_factor: f64,
}

impl Default for RoiParams {
    /// 血管 ROI 的工作流默认值: 最小边长 20 毫米, 增长因子 1.2.
    fn default() -> Self {
        Self {
            min_extent: DEFAULT_MIN_ROI_EXTENT,
            growth_factor: DEFAULT_ROI_GROWTH_FACTOR,
        }
    }
}

impl RoiParams {
    /// 校验参数范围.
    ///
    /// `min_extent` 为负 (或 NaN) 时返回 [`ExtentError::NegativeMinExtent`],
    /// `growth_factor` 非正 (或 NaN) 时返回 [`ExtentError::InvalidGrowthFactor`].
    pub fn validate(&self) -> Result<(), ExtentError> {
        if !(self.min_extent >= 0.0) {
            return Err(ExtentError::NegativeMinExtent(self.min_extent));
        }
        if !(self.growth_factor > 0.0) {
            return Err(ExtentError::InvalidGrowthFactor(self.growth_factor));
        }
        Ok(())
    }
}

/// ROI 包围盒, 由中心点和每轴半径组成.
///
/// 该结构是只读的: 由一组标记点位置一次性拟合得到, 之后不可修改.
/// 宿主平台可用 (中心, 半径) 对直接构造场景中的 ROI 节点.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoiExtent {
    center: Pos3d,
    radius: Pos3d,
}

impl RoiExtent {
    /// 由一组位置拟合 ROI 包围盒.
    ///
    /// 对每条轴独立计算: 中心取该轴极值 `(lo + hi) / 2`; 半径取
    /// "散布半径 `(hi - lo) / 2 * growth_factor`" 与 "`min_extent / 2`"
    /// 的较大者. 中心不受 `growth_factor` 与 `min_extent` 影响.
    /// 点集顺序不影响结果.
    ///
    /// # 错误
    ///
    /// 点集为空, `min_extent` 为负, `growth_factor` 非正,
    /// 或任一位置存在非有限分量时返回 [`ExtentError`]. 不产生部分结果.
    pub fn from_positions(
        positions: &[Pos3d],
        min_extent: f64,
        growth_factor: f64,
    ) -> Result<Self, ExtentError> {
        RoiParams {
            min_extent,
            growth_factor,
        }
        .validate()?;

        if positions.is_empty() {
            return Err(ExtentError::NoPositions);
        }
        if let Some(bad) = positions
            .iter()
            .position(|&(x, y, z)| !(x.is_finite() && y.is_finite() && z.is_finite()))
        {
            return Err(ExtentError::NonFinitePosition(bad));
        }

        let (cx, rx) = axis_extent(positions.iter().map(|p| p.0), min_extent, growth_factor);
        let (cy, ry) = axis_extent(positions.iter().map(|p| p.1), min_extent, growth_factor);
        let (cz, rz) = axis_extent(positions.iter().map(|p| p.2), min_extent, growth_factor);

        Ok(Self {
            center: (cx, cy, cz),
            radius: (rx, ry, rz),
        })
    }

    /// 由形状为 `(n, 3)` 的二维数组视图拟合 ROI 包围盒.
    ///
    /// 每行是一个 `(x, y, z)` 位置. 除第二维长度必须为 3 之外,
    /// 契约与 [`Self::from_positions`] 完全相同.
    pub fn from_positions_nd(
        positions: ArrayView2<'_, f64>,
        min_extent: f64,
        growth_factor: f64,
    ) -> Result<Self, ExtentError> {
        if positions.ncols() != 3 {
            return Err(ExtentError::BadShape(positions.ncols()));
        }
        let v: Vec<Pos3d> = positions
            .rows()
            .into_iter()
            .map(|r| (r[0], r[1], r[2]))
            .collect();
        Self::from_positions(&v, min_extent, growth_factor)
    }

    /// 按参数集合 [`RoiParams`] 拟合 ROI 包围盒.
    #[inline]
    pub fn with_params(positions: &[Pos3d], params: &RoiParams) -> Result<Self, ExtentError> {
        Self::from_positions(positions, params.min_extent, params.growth_factor)
    }

    /// 中心点.
    #[inline]
    pub fn center(&self) -> Pos3d {
        self.center
    }

    /// 每轴半径. 所有分量非负.
    #[inline]
    pub fn radius(&self) -> Pos3d {
        self.radius
    }

    /// 坐标最小角点, 即 `center - radius`.
    #[inline]
    pub fn mins(&self) -> Pos3d {
        (
            self.center.0 - self.radius.0,
            self.center.1 - self.radius.1,
            self.center.2 - self.radius.2,
        )
    }

    /// 坐标最大角点, 即 `center + radius`.
    #[inline]
    pub fn maxs(&self) -> Pos3d {
        (
            self.center.0 + self.radius.0,
            self.center.1 + self.radius.1,
            self.center.2 + self.radius.2,
        )
    }

    /// 每轴总边长 (直径), 即 `2 * radius`.
    #[inline]
    pub fn extent(&self) -> Pos3d {
        (
            2.0 * self.radius.0,
            2.0 * self.radius.1,
            2.0 * self.radius.2,
        )
    }

    /// 位置 `pos` 是否落在包围盒内. 边界上的点视为落在盒内.
    pub fn contains(&self, pos: Pos3d) -> bool {
        let (lo, hi) = (self.mins(), self.maxs());
        (lo.0..=hi.0).contains(&pos.0)
            && (lo.1..=hi.1).contains(&pos.1)
            && (lo.2..=hi.2).contains(&pos.2)
    }
}

/// 单轴计算, 返回 (中心, 半径). 调用者保证迭代器非空且所有值有限.
fn axis_extent(vals: impl Iterator<Item = f64>, min_extent: f64, growth_factor: f64) -> (f64, f64) {
    let Some((lo, hi)) = vals.minmax_by(f64::total_cmp).into_option() else {
        unreachable!()
    };
    let center = (lo + hi) / 2.0;
    let spread_radius = (hi - lo) / 2.0 * growth_factor;
    (center, spread_radius.max(min_extent / 2.0))
}

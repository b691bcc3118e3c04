//! 标记点 (fiducial) 管理.
//!
//! 宿主场景中用户放置的标记点以带标签的有序序列形式组织.
//! 该模块提供其独立于场景图的所有权版本, 作为 ROI 拟合与几何导出的数据源.

use crate::roi::{ExtentError, RoiExtent};
use crate::Pos3d;
use ordered_float::OrderedFloat;

/// 单个标记点.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint {
    label: String,
    position: Pos3d,
    description: String,
}

impl ControlPoint {
    /// 标签. 同一节点内允许重复 (宿主允许用户这么做).
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 位置.
    #[inline]
    pub fn position(&self) -> Pos3d {
        self.position
    }

    /// 描述信息. 可能为空串.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// 标记点节点: 一组按放置顺序排列的带标签标记点.
///
/// 与宿主场景中的 markup 节点不同, 该结构拥有自己的数据,
/// 不持有任何场景图引用.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiducialNode {
    name: String,
    points: Vec<ControlPoint>,
}

impl FiducialNode {
    /// 以给定节点名初始化空节点.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            points: vec![],
        }
    }

    /// 节点名. 导出时一般用作文件名主干.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 追加一个标记点.
    pub fn add_point<S: Into<String>>(&mut self, label: S, position: Pos3d) {
        self.add_point_with_description(label, position, "");
    }

    /// 追加一个带描述的标记点.
    pub fn add_point_with_description<S, D>(&mut self, label: S, position: Pos3d, description: D)
    where
        S: Into<String>,
        D: Into<String>,
    {
        self.points.push(ControlPoint {
            label: label.into(),
            position,
            description: description.into(),
        });
    }

    /// 标记点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否不含任何标记点.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 迭代所有标记点 (按放置顺序).
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ControlPoint> {
        self.points.iter()
    }

    /// 按放置顺序返回所有标记点位置.
    pub fn positions(&self) -> Vec<Pos3d> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// 返回第一个标签为 `label` 的标记点位置. 不存在时返回 `None`.
    pub fn position_of(&self, label: &str) -> Option<Pos3d> {
        self.points
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.position)
    }

    /// 返回距 `pos` 最近的标记点. 距离相同时取放置较早者.
    ///
    /// 比较按平方距离的全序进行, 因此存储位置存在非有限分量时
    /// 查询也不会 panic (NaN 距离排在所有有限距离之后).
    pub fn closest_point(&self, pos: Pos3d) -> Option<&ControlPoint> {
        self.points
            .iter()
            .enumerate()
            .min_by_key(|(i, p)| (OrderedFloat(dist2(p.position, pos)), *i))
            .map(|(_, p)| p)
    }

    /// 对该节点所有标记点位置拟合 ROI 包围盒.
    ///
    /// 空节点返回 [`ExtentError::NoPositions`].
    pub fn roi_extent(&self, min_extent: f64, growth_factor: f64) -> Result<RoiExtent, ExtentError> {
        RoiExtent::from_positions(&self.positions(), min_extent, growth_factor)
    }
}

/// 两点欧氏距离的平方.
#[inline]
fn dist2((ax, ay, az): Pos3d, (bx, by, bz): Pos3d) -> f64 {
    (ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)
}

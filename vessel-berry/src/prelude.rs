//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Pos3d;

pub use crate::consts::{DEFAULT_MIN_ROI_EXTENT, DEFAULT_ROI_GROWTH_FACTOR};

pub use crate::export::{ExportError, GeometryExporter, GeometryWrite};

pub use crate::markup::{ControlPoint, FiducialNode};

pub use crate::roi::{ExtentError, RoiExtent, RoiParams};

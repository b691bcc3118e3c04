//! 几何对象的持久化导出.
//!
//! 对应工作流结束时 "将场景中产生的几何对象写入目标目录" 的步骤.
//! 模型与体数据由宿主平台自行导出; 该模块只负责我们自有的标记点节点,
//! 以 Slicer markups fcsv 文本格式写出.

use crate::consts::FCSV_VERSION;
use crate::FiducialNode;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 导出错误.
#[derive(Debug)]
pub enum ExportError {
    /// 目标路径不是已存在的目录.
    NotADirectory(PathBuf),

    /// 底层 I/O 错误.
    Io(io::Error),
}

/// 表明一个可以写入导出目录的几何对象.
///
/// 实现者决定自己的文件扩展名与文件内容. 空对象会被导出流程跳过,
/// 不产生文件.
pub trait GeometryWrite {
    /// 导出文件扩展名 (不带点).
    fn file_extension(&self) -> &'static str;

    /// 是否为空对象.
    fn is_empty_geometry(&self) -> bool;

    /// 将对象内容写入 `out`.
    fn write_geometry(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// 按 markups fcsv 文本格式写出所有标记点.
///
/// 标签与描述原样写入 csv 列, 因此不应包含逗号与换行.
impl GeometryWrite for FiducialNode {
    fn file_extension(&self) -> &'static str {
        "fcsv"
    }

    fn is_empty_geometry(&self) -> bool {
        self.is_empty()
    }

    fn write_geometry(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# Markups fiducial file version = {FCSV_VERSION}")?;
        writeln!(out, "# CoordinateSystem = RAS")?;
        writeln!(
            out,
            "# columns = id,x,y,z,ow,ox,oy,oz,vis,sel,lock,label,desc,associatedNodeID"
        )?;
        for (i, p) in self.iter().enumerate() {
            let (x, y, z) = p.position();
            writeln!(
                out,
                "vtkMRMLMarkupsFiducialNode_{i},{x},{y},{z},0,0,0,1,1,1,0,{},{},",
                p.label(),
                p.description(),
            )?;
        }
        Ok(())
    }
}

/// 几何导出器: 导出文件名主干到几何对象的有序映射.
///
/// 用法上是一份 "导出清单": 先逐个登记要导出的对象,
/// 再一次性写入目标目录.
#[derive(Default)]
pub struct GeometryExporter {
    entries: Vec<(String, Box<dyn GeometryWrite>)>,
}

impl GeometryExporter {
    /// 初始化空导出器.
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个导出对象. `stem` 为导出文件名主干 (不带扩展名).
    ///
    /// 同名登记不会去重: 后登记者会在导出时覆盖先登记者产生的文件.
    pub fn insert<S, G>(&mut self, stem: S, node: G)
    where
        S: Into<String>,
        G: GeometryWrite + 'static,
    {
        self.entries.push((stem.into(), Box::new(node)));
    }

    /// 已登记对象个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否未登记任何对象.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 将所有非空对象写入目录 `dir`, 返回实际写出的文件路径 (按登记顺序).
    ///
    /// 空对象不产生文件. `dir` 必须是已存在的目录, 否则返回
    /// [`ExportError::NotADirectory`].
    pub fn export_to_directory<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, ExportError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ExportError::NotADirectory(dir.to_path_buf()));
        }

        let mut written = Vec::with_capacity(self.entries.len());
        for (stem, node) in &self.entries {
            if node.is_empty_geometry() {
                warn!("跳过空几何对象: {stem}");
                continue;
            }
            let path = dir.join(format!("{stem}.{}", node.file_extension()));
            let mut out = BufWriter::new(File::create(&path).map_err(ExportError::Io)?);
            node.write_geometry(&mut out).map_err(ExportError::Io)?;
            out.flush().map_err(ExportError::Io)?;
            debug!("已导出 {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportError, GeometryExporter, GeometryWrite};
    use crate::FiducialNode;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// 测试用临时目录. drop 时自动删除.
    struct TemporaryDir(PathBuf);

    impl TemporaryDir {
        fn new(suffix: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "vessel-berry-{}-{suffix}",
                std::process::id()
            ));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TemporaryDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn markup_node() -> FiducialNode {
        let mut node = FiducialNode::new("Seeds");
        node.add_point("Start", (176.9, -17.4, 52.7));
        node.add_point_with_description("End", (174.704, -23.046, 76.908), "target");
        node
    }

    /// 空节点被跳过, 非空节点写出 fcsv 文件.
    #[test]
    fn test_export_skips_empty_nodes() {
        let _ = simple_logger::SimpleLogger::new().init();

        let mut exporter = GeometryExporter::new();
        exporter.insert("MarkupFileName", markup_node());
        exporter.insert("EmptyFileName", FiducialNode::new("Empty"));
        assert_eq!(exporter.len(), 2);

        let dir = TemporaryDir::new("skip-empty");
        let written = exporter.export_to_directory(dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join("MarkupFileName.fcsv")]);
        assert!(dir.path().join("MarkupFileName.fcsv").is_file());
        assert!(!dir.path().join("EmptyFileName.fcsv").exists());
    }

    /// fcsv 头部与数据行内容正确, 坐标可以无损读回.
    #[test]
    fn test_fcsv_content_round_trips() {
        let node = markup_node();
        let mut buf: Vec<u8> = vec![];
        node.write_geometry(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "# Markups fiducial file version = 4.11");
        assert_eq!(lines[1], "# CoordinateSystem = RAS");
        assert_eq!(
            lines[2],
            "# columns = id,x,y,z,ow,ox,oy,oz,vis,sel,lock,label,desc,associatedNodeID"
        );

        for (row, point) in lines[3..].iter().zip(node.iter()) {
            let cols: Vec<&str> = row.split(',').collect();
            assert_eq!(cols.len(), 14);
            let (x, y, z) = point.position();
            assert_eq!(cols[1].parse::<f64>().unwrap(), x);
            assert_eq!(cols[2].parse::<f64>().unwrap(), y);
            assert_eq!(cols[3].parse::<f64>().unwrap(), z);
            assert_eq!(cols[11], point.label());
            assert_eq!(cols[12], point.description());
        }
        assert!(lines[3].starts_with("vtkMRMLMarkupsFiducialNode_0,"));
        assert!(lines[4].starts_with("vtkMRMLMarkupsFiducialNode_1,"));
    }

    /// 目标不是已存在的目录时报错, 不写任何文件.
    #[test]
    fn test_export_to_missing_directory() {
        let mut exporter = GeometryExporter::new();
        exporter.insert("MarkupFileName", markup_node());

        let missing = std::env::temp_dir().join("vessel-berry-does-not-exist");
        let _ = fs::remove_dir_all(&missing);
        let err = exporter.export_to_directory(&missing).unwrap_err();
        match err {
            ExportError::NotADirectory(p) => assert_eq!(p, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

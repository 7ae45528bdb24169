//! # XYZ 分子结构解析器
//!
//! 为理想气体模型提供用户自定义的分子结构。
//!
//! ## XYZ 格式说明
//! ```text
//! 3                      # 原子数
//! water                  # 注释行（作为分子名，空则取文件名）
//! O  0.000  0.000  0.117 # 元素 x y z (Å)
//! H  0.000  0.757 -0.469
//! H  0.000 -0.757 -0.469
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/thermo.rs` 使用
//! - 使用 `models/molecule.rs`

use crate::error::{QthermoError, Result};
use crate::models::{Atom, Molecule};
use std::fs;
use std::path::Path;

/// 解析 XYZ 文件
pub fn parse_xyz_file(path: &Path) -> Result<Molecule> {
    let content = fs::read_to_string(path).map_err(|e| QthermoError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析 XYZ 格式
pub fn parse_xyz_content(content: &str, default_name: &str) -> Result<Molecule> {
    let parse_error = |reason: String| QthermoError::ParseError {
        format: "xyz".to_string(),
        path: default_name.to_string(),
        reason,
    };

    let mut lines = content.lines();

    let count: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or_else(|| parse_error("first line must be the number of atoms".to_string()))?;
    if count == 0 {
        return Err(parse_error("structure has no atoms".to_string()));
    }

    let name = match lines.next().map(str::trim) {
        Some(comment) if !comment.is_empty() => comment.to_string(),
        _ => default_name.to_string(),
    };

    let mut atoms = Vec::with_capacity(count);
    for (i, line) in lines.take(count).enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let coords: Vec<f64> = parts
            .iter()
            .skip(1)
            .take(3)
            .filter_map(|s| s.parse().ok())
            .collect();

        match (parts.first(), coords.as_slice()) {
            (Some(element), [x, y, z]) => atoms.push(Atom::new(*element, [*x, *y, *z])),
            _ => {
                return Err(parse_error(format!(
                    "invalid atom line {}: '{}'",
                    i + 3,
                    line.trim()
                )))
            }
        }
    }

    if atoms.len() != count {
        return Err(parse_error(format!(
            "expected {} atoms, found {}",
            count,
            atoms.len()
        )));
    }

    Ok(Molecule::new(name, atoms))
}

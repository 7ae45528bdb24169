//! # VASP OUTCAR 频率解析器
//!
//! 从有限位移/DFPT 计算的 OUTCAR 中提取振动频率。
//!
//! 频率行示例：
//! ```text
//!    1 f  =   99.624754 THz   625.959137 2PiTHz 3323.091573 cm-1   412.011813 meV
//!    9 f/i=    1.093652 THz     6.871632 2PiTHz   36.480371 cm-1     4.523038 meV
//! ```
//! `meV` 前的数字换算为 eV；含 `f/i` 的行为虚频。
//!
//! ## 依赖关系
//! - 被 `commands/thermo.rs` 使用
//! - 使用 `models/thermo.rs`

use crate::error::{QthermoError, Result};
use crate::models::{VibrationalMode, VibrationalSpectrum};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 解析 OUTCAR 文件中的振动谱
pub fn parse_outcar_frequencies(path: &Path) -> Result<VibrationalSpectrum> {
    let file = File::open(path).map_err(|e| QthermoError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut modes = Vec::new();

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if let Some(mode) = parse_frequency_line(&line) {
            modes.push(mode);
        }
    }

    if modes.is_empty() {
        return Err(QthermoError::ParseError {
            format: "OUTCAR".to_string(),
            path: path.display().to_string(),
            reason: "no vibrational frequency lines (THz ... meV) found".to_string(),
        });
    }

    Ok(VibrationalSpectrum::from_modes(modes))
}

/// 从 OUTCAR 文本中提取振动谱（可能为空）
pub fn frequencies_from_outcar_str(text: &str) -> VibrationalSpectrum {
    VibrationalSpectrum::from_modes(text.lines().filter_map(parse_frequency_line).collect())
}

/// 解析单行频率，非频率行返回 None
fn parse_frequency_line(line: &str) -> Option<VibrationalMode> {
    if !line.contains("THz") || !line.contains("meV") {
        return None;
    }

    let mev = extract_number_before(line, "meV")?;
    let energy = mev / 1000.0;

    if line.contains("f/i") {
        Some(VibrationalMode::imaginary(energy))
    } else {
        Some(VibrationalMode::real(energy))
    }
}

/// 从字符串中提取指定标记之前的数字
fn extract_number_before(s: &str, marker: &str) -> Option<f64> {
    let pos = s.find(marker)?;
    s[..pos].split_whitespace().last()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModeKind;

    const SAMPLE: &str = "\
 Eigenvectors and eigenvalues of the dynamical matrix
 ----------------------------------------------------

   1 f  =   99.624754 THz   625.959137 2PiTHz 3323.091573 cm-1   412.011813 meV
             X         Y         Z           dx          dy          dz
   2 f  =   47.234270 THz   296.781302 2PiTHz 1575.561143 cm-1   195.344209 meV
   3 f/i=    1.093652 THz     6.871632 2PiTHz   36.480371 cm-1     4.523038 meV
";

    #[test]
    fn test_extract_modes() {
        let spectrum = frequencies_from_outcar_str(SAMPLE);
        assert_eq!(spectrum.len(), 3);

        let modes = spectrum.modes();
        assert!((modes[0].energy - 0.412011813).abs() < 1e-12);
        assert_eq!(modes[0].kind, ModeKind::Real);
        assert_eq!(modes[2].kind, ModeKind::Imaginary);
        assert!((modes[2].energy - 0.004523038).abs() < 1e-12);

        assert_eq!(spectrum.real_energies().len(), 2);
        assert_eq!(spectrum.imaginary_count(), 1);
    }

    #[test]
    fn test_non_frequency_lines_ignored() {
        let spectrum = frequencies_from_outcar_str("  free  energy   TOTEN  =       -14.22 eV\n THz only\n");
        assert!(spectrum.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_outcar_frequencies(Path::new("/nonexistent/OUTCAR"));
        assert!(matches!(err, Err(QthermoError::FileReadError { .. })));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUTCAR");
        std::fs::write(&path, SAMPLE).unwrap();

        let spectrum = parse_outcar_frequencies(&path).unwrap();
        assert_eq!(spectrum.len(), 3);

        std::fs::write(&path, "nothing here\n").unwrap();
        assert!(parse_outcar_frequencies(&path).is_err());
    }
}

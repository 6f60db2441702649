//! # compare 子命令实现
//!
//! 解析两个输出文件并按容差逐项比较，存在差异时返回错误（退出码非零）。
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs` 定义的 CompareArgs
//! - 使用 `zeoparse::compare` 比较

use crate::cli::compare::CompareArgs;
use crate::utils::output;
use zeoparse::compare::{compare_outputs, Comparison, Tolerance};
use zeoparse::parsers::detect_kind;
use zeoparse::{parse_output_file, OutputKind, ParseOptions, Result, ZeoError};

/// 执行 compare 命令
pub fn execute(args: CompareArgs) -> Result<()> {
    output::print_header("Zeo++ Output Comparison");

    let options = ParseOptions {
        lenient: args.lenient,
        strict: false,
    };

    // 显式指定格式时两侧都按该格式解析
    let (actual_kind, reference_kind) = match args.kind {
        Some(k) => (k.into(), k.into()),
        None => (detect_kind(&args.actual)?, detect_kind(&args.reference)?),
    };

    let actual = parse_output_file(&args.actual, Some(actual_kind), options)?;
    let reference = parse_output_file(&args.reference, Some(reference_kind), options)?;

    let tol = resolve_tolerance(reference_kind, args.rel_tol, args.abs_tol)?;
    output::print_info(&format!(
        "Tolerance: relative {}, absolute {}",
        tol.relative, tol.absolute
    ));
    log::debug!("tolerance for .{}: {:?}", reference_kind, tol);

    let result = compare_outputs(&actual, &reference, &tol);
    report(&result, args.show);

    if result.is_match() {
        output::print_success(&format!(
            "{} matches {} ({} metrics compared)",
            args.actual.display(),
            args.reference.display(),
            result.compared
        ));
        Ok(())
    } else {
        Err(ZeoError::ComparisonFailed {
            actual: args.actual.display().to_string(),
            reference: args.reference.display().to_string(),
            mismatches: result.problem_count(),
        })
    }
}

/// 格式默认容差，命令行/环境变量覆盖
pub fn resolve_tolerance(
    kind: OutputKind,
    relative: Option<f64>,
    absolute: Option<f64>,
) -> Result<Tolerance> {
    let mut tol = Tolerance::for_kind(kind);
    if let Some(r) = relative {
        tol.relative = check_tolerance("relative", r)?;
    }
    if let Some(a) = absolute {
        tol = tol.with_absolute(check_tolerance("absolute", a)?);
    }
    Ok(tol)
}

fn check_tolerance(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ZeoError::InvalidArgument(format!(
            "{} tolerance must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn report(result: &Comparison, show: usize) {
    if let Some((actual, reference)) = result.kind_mismatch {
        output::print_warning(&format!(
            "Output kinds differ: .{} vs .{}",
            actual, reference
        ));
        return;
    }

    for mismatch in result.mismatches.iter().take(show) {
        let note = if mismatch.exact {
            "(exact)".to_string()
        } else {
            mismatch
                .relative_error()
                .map(|e| format!("({:.2}%)", e * 100.0))
                .unwrap_or_default()
        };
        output::print_mismatch(&mismatch.key, mismatch.actual, mismatch.expected, &note);
    }
    if result.mismatches.len() > show {
        output::print_warning(&format!(
            "  ... and {} more mismatches",
            result.mismatches.len() - show
        ));
    }

    if !result.missing.is_empty() {
        output::print_warning(&format!("Missing: {}", result.missing.join(", ")));
    }
    if !result.unexpected.is_empty() {
        output::print_warning(&format!("Unexpected: {}", result.unexpected.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tolerance_defaults() {
        let tol = resolve_tolerance(OutputKind::SurfaceArea, None, None).unwrap();
        assert_eq!(tol.relative, 0.06);

        let tol = resolve_tolerance(OutputKind::Res, None, None).unwrap();
        assert_eq!(tol, Tolerance::exact());
    }

    #[test]
    fn test_resolve_tolerance_overrides() {
        let tol = resolve_tolerance(OutputKind::PoreSizeDist, Some(0.01), Some(2.0)).unwrap();
        assert_eq!(tol.relative, 0.01);
        assert_eq!(tol.absolute, 2.0);

        assert!(matches!(
            resolve_tolerance(OutputKind::Volume, Some(-0.1), None),
            Err(ZeoError::InvalidArgument(_))
        ));
        assert!(resolve_tolerance(OutputKind::Volume, None, Some(f64::NAN)).is_err());
    }
}

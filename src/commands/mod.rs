//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `zeoparse::parsers`, `zeoparse::compare`, `utils/`
//! - 子模块: parse, compare, collect, plot

pub mod collect;
pub mod compare;
pub mod parse;
pub mod plot;

use crate::cli::Commands;
use zeoparse::compare::Metric;
use zeoparse::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Parse(args) => parse::execute(args),
        Commands::Compare(args) => compare::execute(args),
        Commands::Collect(args) => collect::execute(args),
        Commands::Plot(args) => plot::execute(args),
    }
}

/// 数值格式：整数原样打印，其余保留有效数字
pub(crate) fn format_value(metric: &Metric) -> String {
    if metric.value.fract() == 0.0 && metric.value.abs() < 1e15 {
        format!("{}", metric.value as i64)
    } else {
        format!("{}", metric.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: f64) -> Metric {
        Metric {
            key: "x".to_string(),
            value,
            exact: false,
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&metric(3700.0)), "3700");
        assert_eq!(format_value(&metric(0.0)), "0");
        assert_eq!(format_value(&metric(60.7713)), "60.7713");
    }
}

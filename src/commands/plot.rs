//! # plot 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `plot.rs` 绘图

use crate::cli::plot::PlotArgs;
use crate::plot;
use crate::utils::output;
use zeoparse::{parse_output_file, OutputKind, ParseOptions, ParsedOutput, Result, ZeoError};

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Pore Size Distribution Plot");

    // 提前检查输出格式，避免解析后才报错
    plot::ImageFormat::from_path(&args.output)?;

    let parsed = parse_output_file(
        &args.file,
        Some(OutputKind::PoreSizeDist),
        ParseOptions::default(),
    )?;
    let ParsedOutput::PoreSizeDist(dist) = parsed else {
        return Err(ZeoError::UnsupportedFormat(format!(
            "Not a pore size distribution: {}",
            args.file.display()
        )));
    };

    if dist.psd.total_count() == 0 {
        output::print_warning("All bins are empty, the plot will have no bars");
    }

    let title = args.title.clone().unwrap_or_else(|| {
        args.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Pore size distribution".to_string())
    });

    plot::generate_psd_plot(&dist, &args.output, &title, args.width, args.height)?;
    log::info!("plotted {} bins", dist.psd.len());

    output::print_success(&format!(
        "{} -> {}",
        args.file.display(),
        args.output.display()
    ));
    Ok(())
}

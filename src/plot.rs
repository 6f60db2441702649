//! # 孔径分布图
//!
//! 使用 `plotters` 把 `.psd_histo` 直方图画成柱状图，支持 PNG 和 SVG 输出。
//! bin 值作为柱的左边界，柱宽取文件头的 `Bin size`，没有时取相邻 bin 的最小间距。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `zeoparse::models::PoreSizeDistribution`
//! - 使用 `plotters` 渲染图表

use zeoparse::models::PoreSizeDistribution;
use zeoparse::{Result, ZeoError};

use plotters::prelude::*;
use std::path::Path;

/// 图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// 按扩展名判断，只接受 `.png` / `.svg`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(ZeoError::UnsupportedFormat(format!(
                "Plot output must be .png or .svg: {}",
                path.display()
            ))),
        }
    }
}

/// 柱宽
pub fn bin_width(dist: &PoreSizeDistribution) -> f64 {
    if let Some(size) = dist.header.bin_size.filter(|s| *s > 0.0) {
        return size;
    }
    dist.bins()
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|gap| *gap > 0.0)
        .fold(None, |min: Option<f64>, gap| {
            Some(min.map_or(gap, |m| m.min(gap)))
        })
        .unwrap_or(1.0)
}

/// 每根柱的 (左边界, 右边界, 计数)
pub fn bars(dist: &PoreSizeDistribution) -> Vec<(f64, f64, u64)> {
    let width = bin_width(dist);
    dist.bins()
        .iter()
        .zip(dist.counts())
        .map(|(bin, count)| (*bin, bin + width, *count))
        .collect()
}

/// 生成孔径分布图
pub fn generate_psd_plot(
    dist: &PoreSizeDistribution,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    match ImageFormat::from_path(output_path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
            draw_psd_chart(&root, dist, title)?;
            root.present()
                .map_err(|e| ZeoError::Other(e.to_string()))?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
            draw_psd_chart(&root, dist, title)?;
            root.present()
                .map_err(|e| ZeoError::Other(e.to_string()))?;
        }
    }
    Ok(())
}

fn draw_psd_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    dist: &PoreSizeDistribution,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| ZeoError::Other(format!("{:?}", e)))?;

    let bars = bars(dist);
    let x_min = bars.iter().map(|b| b.0).fold(f64::INFINITY, f64::min);
    let x_max = bars.iter().map(|b| b.1).fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_min.is_finite() && x_max > x_min {
        (x_min, x_max)
    } else {
        (0.0, 1.0)
    };
    let y_max = bars.iter().map(|b| b.2).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| ZeoError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Pore diameter (Å)")
        .y_desc("Count")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| ZeoError::Other(format!("{:?}", e)))?;

    let bar_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            bars.iter()
                .filter(|(_, _, count)| *count > 0)
                .map(|(left, right, count)| {
                    Rectangle::new([(*left, 0.0), (*right, *count as f64)], bar_color.filled())
                }),
        )
        .map_err(|e| ZeoError::Other(format!("{:?}", e)))?;

    if let Some(total) = dist.header.total_samples {
        let note = match dist.header.accessible_samples {
            Some(accessible) => format!("samples: {} / {}", accessible, total),
            None => format!("samples: {}", total),
        };
        root.draw(&Text::new(
            note,
            (root.dim_in_pixel().0 as i32 - 260, 40),
            ("sans-serif", 14).into_font().color(&BLACK),
        ))
        .map_err(|e| ZeoError::Other(format!("{:?}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeoparse::parsers::psd;

    #[test]
    fn test_bin_width_from_header() {
        let dist = psd::parse("Bin size (A): 0.1\n0 0\n0.1 3\n0.2 1\n").unwrap();
        assert_eq!(bin_width(&dist), 0.1);
    }

    #[test]
    fn test_bin_width_from_gaps() {
        let dist = psd::parse("1.0 10\n1.5 25\n2.0 5\n").unwrap();
        assert_eq!(bin_width(&dist), 0.5);
        assert_eq!(bars(&dist), vec![(1.0, 1.5, 10), (1.5, 2.0, 25), (2.0, 2.5, 5)]);

        let single = psd::parse("3.0 7\n").unwrap();
        assert_eq!(bin_width(&single), 1.0);
    }

    #[test]
    fn test_image_format() {
        assert_eq!(
            ImageFormat::from_path(Path::new("psd.SVG")).unwrap(),
            ImageFormat::Svg
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("out/psd.png")).unwrap(),
            ImageFormat::Png
        );
        assert!(ImageFormat::from_path(Path::new("psd.pdf")).is_err());
    }
}

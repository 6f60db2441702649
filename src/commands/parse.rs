//! # parse 子命令实现
//!
//! 解析单个 Zeo++ 输出文件，以表格、JSON 或 CSV 打印。
//!
//! ## 依赖关系
//! - 使用 `cli/parse.rs` 定义的 ParseArgs
//! - 使用 `zeoparse::parsers` 解析，`zeoparse::compare::metrics` 展开指标
//! - 使用 `tabled` 打印表格

use super::format_value;
use crate::cli::parse::{OutputFormat, ParseArgs};
use crate::utils::output;
use zeoparse::compare;
use zeoparse::models::porosity::{unit_of, SURFACE_AREA_KEYWORDS};
use zeoparse::models::{ChannelRecord, PoreSizeDistribution};
use zeoparse::{parse_output_file, ParseOptions, ParsedOutput, Result, ZeoError};

use std::io;
use tabled::{Table, Tabled};

/// 执行 parse 命令
pub fn execute(args: ParseArgs) -> Result<()> {
    let options = ParseOptions {
        lenient: args.lenient,
        strict: args.strict,
    };
    let parsed = parse_output_file(&args.file, args.kind.map(Into::into), options)?;
    log::info!("parsed {} as .{}", args.file.display(), parsed.kind());

    match args.output {
        OutputFormat::Table => print_table(&parsed, &args.file.display().to_string()),
        OutputFormat::Json => print_json(&parsed)?,
        OutputFormat::Csv => print_csv(&parsed)?,
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// JSON / CSV
// ─────────────────────────────────────────────────────────────

/// JSON 文档。`.sa`/`.vol`/`.volpo` 以文件标签为键输出
pub fn to_json(parsed: &ParsedOutput) -> Result<String> {
    let text = match parsed {
        ParsedOutput::SurfaceArea(sa) => serde_json::to_string_pretty(&sa.to_map())?,
        ParsedOutput::Volume(vol) | ParsedOutput::PoreVolume(vol) => {
            serde_json::to_string_pretty(&vol.to_map())?
        }
        other => serde_json::to_string_pretty(other)?,
    };
    Ok(text)
}

fn print_json(parsed: &ParsedOutput) -> Result<()> {
    println!("{}", to_json(parsed)?);
    Ok(())
}

fn print_csv(parsed: &ParsedOutput) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    wtr.write_record(["metric", "value"])?;
    for metric in compare::metrics(parsed) {
        wtr.write_record([metric.key.as_str(), format_value(&metric).as_str()])?;
    }
    wtr.flush().map_err(|e| ZeoError::FileWriteError {
        path: "<stdout>".to_string(),
        source: e,
    })?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 表格
// ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Unit")]
    unit: String,
}

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    index: usize,
    #[tabled(rename = "Dim")]
    dimensionality: u8,
    #[tabled(rename = "Di (Å)")]
    included: String,
    #[tabled(rename = "Df (Å)")]
    free: String,
    #[tabled(rename = "Dif (Å)")]
    included_free: String,
    #[tabled(rename = "Extra")]
    extra: String,
}

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Bin (Å)")]
    bin: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

fn print_table(parsed: &ParsedOutput, source: &str) {
    output::print_header(&format!("{} (.{})", source, parsed.kind()));

    match parsed {
        ParsedOutput::Channels(record) => print_channels(record),
        ParsedOutput::SurfaceArea(sa) => {
            print_labelled(sa.entries(), |label| unit_of(&SURFACE_AREA_KEYWORDS, label));
            if let Some(frac) = sa.accessible_fraction() {
                output::print_info(&format!("Accessible fraction of surface: {:.4}", frac));
            }
        }
        ParsedOutput::Volume(vol) | ParsedOutput::PoreVolume(vol) => {
            print_labelled(vol.entries(), |label| unit_of(vol.mode.keywords(), label));
            if let Some(total) = vol.total_volume_fraction() {
                output::print_info(&format!("Total volume fraction: {:.5}", total));
            }
        }
        ParsedOutput::PoreSizeDist(dist) => print_distribution(dist),
        ParsedOutput::Res(res) => {
            let rows = vec![
                diameter_row("Largest included sphere (Di)", res.largest_included_sphere),
                diameter_row("Largest free sphere (Df)", res.largest_free_sphere),
                diameter_row(
                    "Largest included sphere along free path (Dif)",
                    res.largest_included_sphere_along_free_path,
                ),
            ];
            println!("{}", Table::new(&rows));
            if !res.is_physically_ordered() {
                output::print_warning("Di is smaller than Df or Dif");
            }
        }
    }
}

fn diameter_row(name: &str, value: f64) -> MetricRow {
    MetricRow {
        metric: name.to_string(),
        value: format!("{:.5}", value),
        unit: "Å".to_string(),
    }
}

fn print_labelled(entries: Vec<(String, f64)>, unit: impl Fn(&str) -> Option<&'static str>) {
    let rows: Vec<MetricRow> = entries
        .into_iter()
        .map(|(label, value)| MetricRow {
            unit: unit(&label).unwrap_or("").to_string(),
            metric: label,
            value: value.to_string(),
        })
        .collect();
    println!("{}", Table::new(&rows));
}

fn print_channels(record: &ChannelRecord) {
    if record.is_empty() {
        output::print_warning("No channels identified");
    } else {
        let fmt = |v: Option<f64>| v.map(|d| format!("{:.5}", d)).unwrap_or_default();
        let rows: Vec<ChannelRow> = record
            .channels
            .iter()
            .map(|c| ChannelRow {
                index: c.index,
                dimensionality: c.dimensionality,
                included: fmt(c.largest_included_sphere()),
                free: fmt(c.largest_free_sphere()),
                included_free: fmt(c.largest_included_free_sphere()),
                extra: c
                    .diameters
                    .iter()
                    .skip(3)
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    if let Some(summary) = &record.summary {
        output::print_info(&format!(
            "Summary: Di {:.5}  Df {:.5}  Dif {:.5}",
            summary.largest_included_sphere,
            summary.largest_free_sphere,
            summary.largest_included_free_sphere
        ));
        if let Some(r) = summary.probe_radius {
            output::print_info(&format!("Probe radius: {} Å", r));
        }
    }
}

fn print_distribution(dist: &PoreSizeDistribution) {
    let header = dist.header.entries();
    if !header.is_empty() {
        print_labelled(header, |_| None);
    }

    // 只列出非零 bin
    let rows: Vec<BinRow> = dist
        .psd
        .bins
        .iter()
        .zip(&dist.psd.counts)
        .enumerate()
        .filter(|(_, (_, count))| **count > 0)
        .map(|(i, (bin, count))| BinRow {
            bin: bin.to_string(),
            count: *count,
            cumulative: dist
                .psd
                .cumulatives
                .get(i)
                .map(|c| c.to_string())
                .unwrap_or_default(),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("All bins are empty");
    } else {
        println!("{}", Table::new(&rows));
    }

    output::print_info(&format!(
        "{} bins, {} samples counted",
        dist.psd.len(),
        dist.psd.total_count()
    ));
    if let Some((bin, count)) = dist.psd.mode() {
        output::print_info(&format!("Most populated bin: {} ({} samples)", bin, count));
    }
    if let Some(mean) = dist.psd.mean() {
        output::print_info(&format!("Mean pore diameter: {:.4} Å", mean));
    }
    if !dist.psd.is_ascending() {
        output::print_warning("Bins are not in ascending order");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeoparse::{parse_output, OutputKind};

    #[test]
    fn test_json_uses_file_labels() {
        let parsed = parse_output(OutputKind::SurfaceArea, "ASA_A^2: 120.5 NASA_A^2: 0.0\n").unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&parsed).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"ASA_A^2": 120.5, "NASA_A^2": 0.0}));
    }

    #[test]
    fn test_json_for_histogram() {
        let parsed = parse_output(OutputKind::PoreSizeDist, "1.0 10\n1.5 25\n").unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&parsed).unwrap()).unwrap();
        assert_eq!(value["psd"]["bins"], serde_json::json!([1.0, 1.5]));
        assert_eq!(value["psd"]["counts"], serde_json::json!([10, 25]));
    }
}

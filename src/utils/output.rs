//! # 美化输出工具
//!
//! 提供统一的终端输出样式。分隔线宽度跟随终端宽度（上限 80）。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` 和 `console` crate

use colored::Colorize;
use console::Term;

const MAX_RULE_WIDTH: usize = 80;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印比较不一致的条目
pub fn print_mismatch(key: &str, actual: f64, expected: f64, note: &str) {
    println!(
        "{} {} {} {} {} {}",
        "[DIFF]".red().bold(),
        key,
        actual.to_string().yellow(),
        "vs".dimmed(),
        expected.to_string().cyan(),
        note.dimmed()
    );
}

fn rule() -> String {
    let (_, cols) = Term::stdout().size();
    "─".repeat((cols as usize).clamp(20, MAX_RULE_WIDTH))
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = rule();
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", rule().dimmed());
}

use crate::Result;
use crate::report::types::{ResultsExport, Summary};
use chrono::Utc;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// 检查结果表格
    pub fn checks_table(&self, summary: &Summary) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Check", "Passed", "Failed", "Rate"]);

        for check in &summary.checks {
            let rate = if check.total() == 0 {
                0.0
            } else {
                check.passes as f64 * 100.0 / check.total() as f64
            };
            let fails = if self.color && check.fails > 0 {
                Cell::new(check.fails).fg(Color::Red)
            } else {
                Cell::new(check.fails)
            };

            table.add_row(vec![
                Cell::new(&check.name),
                Cell::new(check.passes),
                fails,
                Cell::new(format!("{:.1}%", rate)),
            ]);
        }

        table
    }

    /// 指标摘要行
    pub fn metric_lines(&self, summary: &Summary) -> Vec<String> {
        let metrics = &summary.metrics;
        let trend = &metrics.api_duration;

        vec![
            format!(
                "  {}: {:.2}% ({} of {})",
                self.label("errors"),
                metrics.errors.rate * 100.0,
                metrics.errors.passes,
                metrics.errors.total
            ),
            format!(
                "  {}: {:.2}% ({} of {})",
                self.label("success_rate"),
                metrics.success_rate.rate * 100.0,
                metrics.success_rate.passes,
                metrics.success_rate.total
            ),
            format!(
                "  {}: avg={:.2}ms min={:.2}ms med={:.2}ms max={:.2}ms p(90)={:.2}ms p(95)={:.2}ms p(99)={:.2}ms",
                self.label("api_duration"),
                trend.avg,
                trend.min,
                trend.med,
                trend.max,
                trend.p90,
                trend.p95,
                trend.p99
            ),
            format!(
                "  {}: {}",
                self.label("failed_requests"),
                metrics.failed_requests
            ),
        ]
    }

    /// 打印测试摘要
    pub fn print_summary(&self, summary: &Summary) {
        println!("\n{}", "━".repeat(50));
        println!("{}", self.label("Summary"));
        println!("{}", "━".repeat(50));

        if !summary.checks.is_empty() {
            println!("{}", self.checks_table(summary));
        }

        let checks_line = format!(
            "  {}: {} passed, {} failed, {} total ({:.2}%)",
            self.label("Checks"),
            summary.passed_checks,
            summary.failed_checks,
            summary.total_checks,
            summary.pass_rate()
        );
        if self.color && summary.all_passed() {
            println!("{}", checks_line.green());
        } else if self.color {
            println!("{}", checks_line.red());
        } else {
            println!("{}", checks_line);
        }

        for line in self.metric_lines(summary) {
            println!("{}", line);
        }
        println!();
    }

    /// 导出 JSON 结果文件
    pub fn export_json<P: AsRef<Path>>(&self, summary: &Summary, path: P) -> Result<()> {
        let export = ResultsExport {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            pass_rate: summary.pass_rate(),
            summary,
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(path.as_ref(), json)?;

        info!(path = %path.as_ref().display(), run_id = %export.run_id, "Exported results");
        Ok(())
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true)
    }
}

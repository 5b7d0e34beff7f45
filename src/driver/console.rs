//! Console Output
//!
//! 進捗表示とデータセットのプレビュー

use serde_json::Value;
use std::io::Write;

use crate::domain::entities::dataset::UploadedDataset;
use crate::domain::services::progress::ProgressObserver;

/// 進捗を1行で上書き表示する
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, percent: u8) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r  Uploading... {:>3}%", percent);
        if percent >= 100 {
            let _ = writeln!(stdout);
        }
        let _ = stdout.flush();
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// データセットを表として整形する
///
/// ヘッダーは `列名 (型)`。型マップにない列は表示しない
pub fn render_table(dataset: &UploadedDataset, limit: usize) -> String {
    if dataset.columns().is_empty() {
        return "(no typed columns)\n".to_string();
    }

    let header: Vec<String> = dataset
        .columns()
        .iter()
        .map(|column| format!("{} ({})", column.name, column.type_label))
        .collect();
    let rows: Vec<Vec<String>> = dataset
        .visible_rows()
        .take(limit)
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_line(row));
        out.push('\n');
    }

    let hidden = dataset.row_count().saturating_sub(rows.len());
    if hidden > 0 {
        out.push_str(&format!("... {} more rows\n", hidden));
    }

    out
}

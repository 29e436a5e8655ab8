//! ターミナル出力

use blueprint_measure_common::presenter::EMPTY_STATE_MESSAGE;
use blueprint_measure_common::{NoticeKind, Notifier, ResultView};

/// 通知を標準出力/標準エラーに表示
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => println!("✔ {}", message),
            NoticeKind::Info => println!("ℹ {}", message),
            NoticeKind::Warning => println!("⚠ {}", message),
            NoticeKind::Error => eprintln!("✖ {}", message),
        }
    }
}

/// 結果画面をテキストに整形
pub fn render_result(view: &ResultView) -> String {
    let mut out = String::new();

    let title = if view.filename.is_empty() { "blueprint" } else { view.filename.as_str() };
    out.push_str(&format!("📐 {}\n", title));
    out.push_str(&format!("{} ({})\n", view.scale_line(), view.scale_confidence.text));

    if view.limited {
        out.push_str("⚠ 画像処理に一部失敗したため、結果は限定的です\n");
    }
    out.push('\n');

    if view.is_empty() {
        out.push_str(EMPTY_STATE_MESSAGE);
        out.push('\n');
    } else {
        let label_width = column_width("Label", view.rows.iter().map(|r| r.label.as_str()));
        let value_width = column_width("Value", view.rows.iter().map(|r| r.value.as_str()));

        out.push_str(&format!(
            "  {:>3}  {}  {}  {:<9} {}\n",
            "#",
            pad("Label", label_width),
            pad("Value", value_width),
            "Type",
            "Confidence"
        ));
        for row in &view.rows {
            out.push_str(&format!(
                "  {:>3}  {}  {}  {:<9} {}\n",
                row.number,
                pad(&row.label, label_width),
                pad(&row.value, value_width),
                row.kind.text,
                row.confidence.text
            ));
            if let Some(notes) = &row.notes {
                out.push_str(&format!("       └ {}\n", notes));
            }
        }
    }

    out.push('\n');
    out.push_str(&view.summary.to_string());
    out.push('\n');

    if let Some(notes) = &view.notes {
        out.push_str(&format!("\nNotes: {}\n", notes));
    }

    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

// 全角文字の表示幅は考慮しない
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

//! Plain text table rendering

use sparknet_lib::model::Collection;
use sparknet_lib::table::TableRow;
use sparknet_lib::table::TableView;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Widest a cell is allowed to get before it is truncated.
const MAX_CELL_WIDTH: usize = 40;

const GAP: &str = "  ";

/// Columns shown when none are requested, as `(attribute, header)`.
pub fn default_columns(collection: Collection) -> &'static [(&'static str, &'static str)] {
    match collection {
        Collection::Members => &[
            ("name", "Name"),
            ("email", "Email"),
            ("roles", "Roles"),
            ("status", "Status"),
        ],
        Collection::Clients => &[
            ("name", "Name"),
            ("contactEmail", "Contact"),
            ("industry", "Industry"),
        ],
        Collection::Opportunities => &[
            ("title", "Title"),
            ("roles", "Roles"),
            ("rate", "Rate"),
            ("status", "Status"),
        ],
        Collection::Projects => &[("name", "Name"), ("status", "Status"), ("startsAt", "Starts")],
        Collection::Milestones => &[("title", "Title"), ("dueAt", "Due"), ("status", "Status")],
        Collection::Updates => &[("body", "Update"), ("authorId", "Author")],
        Collection::Stakeholders => &[("name", "Name"), ("email", "Email"), ("title", "Title")],
        Collection::FeedbackRequests => &[
            ("memberId", "Member"),
            ("stakeholderId", "Stakeholder"),
            ("status", "Status"),
        ],
    }
}

/// Renders rows under the view's column headers, with the document ID first.
pub fn render_table(view: &TableView, rows: &[TableRow<'_>]) -> String {
    let mut headers = vec!["ID".to_string()];
    headers.extend(view.columns().iter().map(|c| c.header.clone()));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.record().id().unwrap_or("-").to_string()];
            cells.extend(
                view.columns()
                    .iter()
                    .map(|c| truncate(&row.value(&c.id).to_text(), MAX_CELL_WIDTH)),
            );
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out.push_str(&format!("{} row(s)\n", rows.len()));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| pad(cell, width))
        .collect();
    out.push_str(line.join(GAP).trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

/// Cuts text to `max` display columns, ending with an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if text.width() <= max {
        return text;
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use sparknet_lib::model::Record;
    use sparknet_lib::table::Column;

    use super::*;

    #[test]
    fn test_truncate_wide_text() {
        assert_eq!(truncate("Kevin", 10), "Kevin");
        assert_eq!(truncate("Frontend Developer", 8), "Fronten…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_render_aligns_columns() {
        let records = vec![
            Record::with_id("m1").set("name", "Kevin Ivan"),
            Record::with_id("m2").set("name", "Al"),
        ];
        let view = TableView::new(vec![Column::new("name", "Name")]).unwrap();
        let rows = view.rows(&records);

        let table = render_table(&view, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[2], "m1  Kevin Ivan");
        assert_eq!(lines[3], "m2  Al");
        assert_eq!(lines[4], "2 row(s)");
    }
}

use crate::artifacts::diff::side_by_side::{Cell, Emphasis, LineNumber, Row, SideBySideTable};
use phf::phf_map;

static HTML_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '&' => "&amp;",
    '<' => "&lt;",
    '>' => "&gt;",
    '"' => "&quot;",
    '\'' => "&#x27;",
};

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match HTML_ESCAPES.get(&c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    escaped
}

/// Escaped cell text with spaces kept visible in a table cell.
fn escape_cell_text(text: &str) -> String {
    escape_html(text).replace(' ', "&nbsp;")
}

impl Emphasis {
    fn css_class(&self) -> Option<&'static str> {
        match self {
            Emphasis::None => None,
            Emphasis::Added => Some("diff_add"),
            Emphasis::Removed => Some("diff_sub"),
            Emphasis::Changed => Some("diff_chg"),
        }
    }
}

impl SideBySideTable {
    /// The table as an embeddable `<table class="diff">` fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<table class=\"diff\" cellspacing=\"0\" cellpadding=\"0\" rules=\"groups\">\n",
        );
        html.push_str("    <colgroup></colgroup> <colgroup></colgroup>\n");
        html.push_str("    <colgroup></colgroup> <colgroup></colgroup>\n");
        html.push_str(&format!(
            "    <thead><tr><th colspan=\"2\" class=\"diff_header\">{}</th><th colspan=\"2\" class=\"diff_header\">{}</th></tr></thead>\n",
            escape_html(self.from_desc()),
            escape_html(self.to_desc())
        ));
        html.push_str("    <tbody>\n");
        for row in self.rows() {
            html.push_str(&render_row(row));
        }
        html.push_str("    </tbody>\n</table>\n");

        html
    }
}

fn render_row(row: &Row) -> String {
    let class = if row.changed { " class=\"diff_changed\"" } else { "" };
    format!(
        "        <tr{}>{}{}</tr>\n",
        class,
        render_cell(row.left.as_ref(), "from"),
        render_cell(row.right.as_ref(), "to")
    )
}

fn render_cell(cell: Option<&Cell>, side: &str) -> String {
    let Some(cell) = cell else {
        return "<td class=\"diff_header\"></td><td nowrap=\"nowrap\"></td>".to_string();
    };

    let number = match cell.number {
        LineNumber::Line(n) => format!("<td class=\"diff_header\" id=\"{side}{n}\">{n}</td>"),
        LineNumber::Continuation => "<td class=\"diff_header\">&gt;</td>".to_string(),
    };

    let text = cell
        .segments
        .iter()
        .map(|segment| {
            let text = escape_cell_text(&segment.text);
            match segment.emphasis.css_class() {
                Some(class) => format!("<span class=\"{class}\">{text}</span>"),
                None => text,
            }
        })
        .collect::<String>();

    format!("{number}<td nowrap=\"nowrap\">{text}</td>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::options::CompareOptions;
    use crate::artifacts::diff::diff_target::DiffTarget;
    use crate::artifacts::diff::line_sequence::LineSequence;

    fn target(label: &str, content: &str) -> DiffTarget {
        DiffTarget::new(label.to_string(), LineSequence::from(content))
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html("<a href=\"x\">&</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn table_is_a_fragment_not_a_document() {
        let a = target("File in left", "foo\nbar\n");
        let b = target("File in right", "foo\nbaz\n");

        let html = SideBySideTable::build(&a, &b, &CompareOptions::default()).to_html();

        assert!(html.starts_with("<table class=\"diff\""));
        assert!(html.trim_end().ends_with("</table>"));
        assert!(!html.contains("<html"));
        assert!(html.contains("File in left"));
        assert!(html.contains("File in right"));
    }

    #[test]
    fn changed_lines_carry_emphasis_classes() {
        let a = target("a", "foo\nlet total = 10;\n");
        let b = target("b", "foo\nlet total = 12;\n");

        let html = SideBySideTable::build(&a, &b, &CompareOptions::default()).to_html();

        assert!(html.contains("<td class=\"diff_header\" id=\"from2\">2</td>"));
        assert!(html.contains("<span class=\"diff_chg\">0</span>"));
        assert!(html.contains("<span class=\"diff_chg\">2</span>"));
    }

    #[test]
    fn equal_files_have_no_emphasis() {
        let a = target("a", "same <b>\n\tindented\n");

        let html = SideBySideTable::build(&a, &a.clone(), &CompareOptions::default()).to_html();

        assert!(!html.contains("diff_changed"));
        assert!(!html.contains("<span"));
        assert!(html.contains("same&nbsp;&lt;b&gt;"));
    }
}

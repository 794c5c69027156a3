//! Potential targets dashboard.
//!
//! One table sorted by descending exit probability, with subcategory filter
//! buttons and an acquirer column whose long lists collapse behind a
//! "Show More" link when they overflow.

use super::escape_html;
use crate::format::format_nok_thousands;
use crate::model::{AcquirerMap, TargetRecord};
use std::collections::BTreeSet;

pub fn render(targets: &[TargetRecord], generated_at: &str) -> String {
    let subcategories: BTreeSet<&str> =
        targets.iter().map(|t| t.subcategory.as_str()).collect();

    let mut filter_buttons = String::new();
    for subcategory in &subcategories {
        filter_buttons.push_str(&format!(
            r#"            <button class="filter-button" data-subcategory="{sub}">{sub}</button>
"#,
            sub = escape_html(subcategory),
        ));
    }

    let rows = if targets.is_empty() {
        r#"                <tr><td colspan="8" class="empty-table">No relevant targets found matching the criteria (after filtering).</td></tr>
"#
        .to_string()
    } else {
        targets
            .iter()
            .enumerate()
            .map(|(i, t)| render_row(i, t))
            .collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Potential B&amp;B Targets Overview</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <header><h1>Potential Buy &amp; Build Targets</h1></header>

        <h2>Filter by Subcategory</h2>
        <div class="filter-container">
            <button class="filter-button active" data-subcategory="all">Show All</button>
{filter_buttons}        </div>

        <h2>Targets Mapped to B&amp;B Subcategories (Sorted by Exit Probability)</h2>
        <table id="targets-table">
            <thead>
                <tr>
                    <th>#</th>
                    <th>Target Company</th>
                    <th>Segment</th>
                    <th>Subcategory</th>
                    <th>Revenue (NOK k)</th>
                    <th>EBIT (NOK k)</th>
                    <th>Exit Probability (%)</th>
                    <th>Potential Acquirers</th>
                </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <div class="footer">
            Report generated on: {generated_at}<br>
            Targets from the target framework workbook, B&amp;B data from the platforms and add-ons workbook.
        </div>
    </div>
    <script>{js}</script>
</body>
</html>
"#,
        css = inline_css(),
        js = inline_javascript(),
        filter_buttons = filter_buttons,
        rows = rows,
        generated_at = escape_html(generated_at),
    )
}

fn score_color(exit_probability: f64) -> &'static str {
    if exit_probability >= 70.0 {
        "var(--success)"
    } else if exit_probability >= 40.0 {
        "var(--warning)"
    } else {
        "var(--danger)"
    }
}

fn render_row(index: usize, target: &TargetRecord) -> String {
    format!(
        r#"                <tr data-subcategory="{subcategory}">
                    <td>{number}</td>
                    <td>{name}</td>
                    <td>{segment}</td>
                    <td>{subcategory}</td>
                    <td class="financials">{revenue}</td>
                    <td class="financials">{ebit}</td>
                    <td class="score">
                        {probability}%
                        <div class="score-bar-container">
                            <div class="score-bar" style="width: {probability}%; background-color: {color};"></div>
                        </div>
                    </td>
                    <td class="acquirer-cell">{acquirers}</td>
                </tr>
"#,
        subcategory = escape_html(&target.subcategory),
        number = index + 1,
        name = escape_html(&target.name),
        segment = escape_html(&target.segment),
        revenue = format_nok_thousands(target.revenue),
        ebit = format_nok_thousands(target.ebit),
        probability = target.exit_probability,
        color = score_color(target.exit_probability),
        acquirers = render_acquirer_cell(&target.acquirers),
    )
}

fn render_acquirer_cell(acquirers: &AcquirerMap) -> String {
    if acquirers.is_empty() {
        return r#"<span class="no-match">None found</span>"#.to_string();
    }

    let mut list = String::from(r#"<ul class="acquirer-list">"#);
    for (investor, entry) in acquirers {
        let plural = if entry.count > 1 { "s" } else { "" };
        let companies: String = entry
            .companies
            .iter()
            .map(|c| format!("<li>{}</li>", escape_html(c)))
            .collect();
        list.push_str(&format!(
            r#"<li><strong>{investor}</strong> ({count} investment{plural} in subcategory):<div class="investor-companies"><ul>{companies}</ul></div></li>"#,
            investor = escape_html(investor),
            count = entry.count,
            plural = plural,
            companies = companies,
        ));
    }
    list.push_str("</ul>");

    format!(
        r##"<div class="acquirer-list-wrapper">{list}</div><a href="#" class="toggle-acquirers">Show More...</a>"##,
    )
}

fn inline_css() -> &'static str {
    r#"
:root { --primary: #2c3e50; --secondary: #34495e; --accent: #3498db; --success: #2ecc71; --warning: #f39c12; --danger: #e74c3c; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; background-color: #f4f7f6; color: var(--primary); font-size: 14px; }
.container { max-width: 1600px; margin: 20px auto; padding: 20px; background-color: #fff; box-shadow: 0 0 15px rgba(0,0,0,0.1); border-radius: 8px; }
header { background-color: var(--primary); color: white; padding: 1rem 0; margin-bottom: 1.5rem; text-align: center; border-radius: 8px 8px 0 0; }
h1 { margin: 0; font-size: 1.8rem; }
h2 { color: var(--primary); border-bottom: 2px solid var(--accent); padding-bottom: 5px; margin: 1.5rem 0 1rem; font-size: 1.4rem; }
.filter-container { margin-bottom: 1.5rem; padding-bottom: 1rem; border-bottom: 1px solid #eee; }
.filter-container button { background-color: #e9ecef; border: 1px solid #ced4da; padding: 6px 12px; margin: 0 4px 4px 0; border-radius: 4px; cursor: pointer; font-size: 0.85rem; }
.filter-container button.active { background-color: var(--accent); color: white; border-color: var(--accent); font-weight: bold; }
table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
th, td { border: 1px solid #ddd; padding: 8px 10px; text-align: left; vertical-align: top; }
th { background-color: var(--secondary); color: white; white-space: nowrap; }
tr.filtered-out { display: none; }
tr:nth-child(even) { background-color: #f9f9f9; }
.empty-table { text-align: center; padding: 20px; }
.score { font-weight: bold; text-align: right; white-space: nowrap; }
.score-bar-container { width: 80px; height: 12px; background-color: #e0e0e0; border-radius: 3px; overflow: hidden; display: inline-block; vertical-align: middle; margin-left: 5px; }
.score-bar { height: 100%; border-radius: 3px 0 0 3px; }
.acquirer-cell { position: relative; }
.acquirer-list-wrapper { max-height: 8em; overflow: hidden; }
.acquirer-list-wrapper.expanded { max-height: none; }
.acquirer-list-wrapper ul { margin: 0; padding-left: 0; list-style-type: none; }
.acquirer-list-wrapper > ul > li { margin-bottom: 8px; }
.acquirer-list-wrapper strong { color: var(--primary); }
.acquirer-list-wrapper .investor-companies ul { margin: 2px 0 0 15px; padding: 0; list-style-type: disc; }
.acquirer-list-wrapper .investor-companies li { margin-bottom: 2px; font-size: 0.9em; }
.toggle-acquirers { display: none; cursor: pointer; color: var(--accent); font-size: 0.85em; margin-top: 5px; text-decoration: underline; }
.acquirer-list-wrapper.overflowing + .toggle-acquirers { display: block; }
.no-match { color: #888; font-style: italic; }
.financials { text-align: right; white-space: nowrap; }
.footer { text-align: center; margin-top: 2rem; padding-top: 1rem; border-top: 1px solid #eee; font-size: 0.85rem; color: #777; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
// Subcategory filtering
const filterButtons = document.querySelectorAll('.filter-button');
const tableRows = document.querySelectorAll('#targets-table tbody tr');
filterButtons.forEach(button => {
    button.addEventListener('click', () => {
        const targetSubcategory = button.getAttribute('data-subcategory');
        filterButtons.forEach(btn => btn.classList.remove('active'));
        button.classList.add('active');
        tableRows.forEach(row => {
            if (!row.hasAttribute('data-subcategory')) return;
            const rowSubcategory = row.getAttribute('data-subcategory');
            row.classList.toggle('filtered-out',
                !(targetSubcategory === 'all' || rowSubcategory === targetSubcategory));
        });
    });
});

// Acquirer list expand/collapse, shown only where the list overflows
document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('.acquirer-list-wrapper').forEach(wrapper => {
        if (wrapper.scrollHeight > wrapper.offsetHeight) {
            wrapper.classList.add('overflowing');
        }
    });
    document.querySelectorAll('.toggle-acquirers').forEach(link => {
        link.addEventListener('click', event => {
            event.preventDefault();
            const wrapper = link.previousElementSibling;
            const expanded = wrapper.classList.contains('expanded');
            wrapper.classList.toggle('expanded');
            link.textContent = expanded ? 'Show More...' : 'Show Less';
        });
    });
});
"#
}

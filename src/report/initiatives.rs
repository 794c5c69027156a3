//! B&B initiatives dashboard.
//!
//! Nested card layout: segment sections (ordered by company count) holding
//! investor sections (largest portfolio first, five visible before "Show
//! More") holding company cards (newest acquisition first). Filtering by
//! segment, subcategory and investment type is pure client-side show/hide.

use super::escape_html;
use crate::format::format_eur_millions;
use crate::model::{CompanyRecord, InvestmentType};
use crate::pipeline::ClassifyOutcome;
use std::collections::BTreeMap;

const VISIBLE_INVESTORS: usize = 5;
const DEFAULT_COLOR: &str = "#3498db";

fn segment_color(segment: &str) -> &'static str {
    match segment {
        "Core Construction & Civil Engineering" => "#3498db",
        "Specialized Trades" => "#e74c3c",
        "Mechanical, Electrical & HVAC" => "#2ecc71",
        "Marine, Offshore & Energy" => "#f39c12",
        "Industrial Services & Manufacturing Support" => "#9b59b6",
        "Building Products & Materials" => "#1abc9c",
        "Tech & Software for Construction" => "#34495e",
        "Consulting, Advisory & Project Management" => "#e67e22",
        "Equipment Rental & Heavy Machinery" => "#27ae60",
        "Facility Services & Real Estate Ops" => "#c0392b",
        "Safety & Monitoring Systems" => "#8e44ad",
        "Environmental & Waste Management" => "#16a085",
        "Infrastructure & Public Works" => "#f1c40f",
        "Interior Design & Furnishing" => "#7f8c8d",
        "Other" => "#95a5a6",
        _ => DEFAULT_COLOR,
    }
}

pub fn render(outcome: &ClassifyOutcome, generated_at: &str) -> String {
    // segment -> investor -> companies, in stable order.
    let mut by_segment: BTreeMap<&str, BTreeMap<&str, Vec<&CompanyRecord>>> = BTreeMap::new();
    for company in &outcome.companies {
        for investor in &company.investors {
            by_segment
                .entry(company.segment.as_str())
                .or_default()
                .entry(investor.as_str())
                .or_default()
                .push(company);
        }
    }

    let mut segment_buttons = String::new();
    let mut sections = String::new();
    // Section order follows descending company count.
    for (segment, _) in &outcome.segment_stats {
        let Some(investors) = by_segment.get(segment.as_str()) else {
            continue;
        };
        let color = segment_color(segment);
        segment_buttons.push_str(&format!(
            r#"            <button class="segment-button" data-segment="{segment}" style="background-color: {color}; border-color: {color};">{segment}</button>
"#,
            segment = escape_html(segment),
            color = color,
        ));
        sections.push_str(&render_segment_section(segment, color, investors));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Buy &amp; Build Initiatives Overview - Construction &amp; Engineering</title>
    <style>{css}</style>
</head>
<body>
    <header>
        <div class="container">
            <h1>Buy &amp; Build Initiatives Overview - Construction &amp; Engineering</h1>
            <p class="subtitle">Analysis of construction industry consolidation in Norway and Sweden</p>
        </div>
    </header>
    <div class="container">
        <div class="dashboard">
            <div class="stat-card"><div class="stat-label">Total Companies</div><div class="stat-value">{total_companies}</div></div>
            <div class="stat-card"><div class="stat-label">Investors</div><div class="stat-value">{total_investors}</div></div>
            <div class="stat-card"><div class="stat-label">Segments</div><div class="stat-value">{total_segments}</div></div>
            <div class="stat-card"><div class="stat-label">Initiatives</div><div class="stat-value">{total_initiatives}</div></div>
        </div>
        <div class="segment-buttons-container">
            <button class="segment-button active" data-segment="all">All Segments</button>
{segment_buttons}        </div>
        <div id="initiatives-container">
{sections}        </div>
    </div>
    <footer>
        <div class="container">
            <p>Last updated: {generated_at}</p>
            <p>Generated from Buy &amp; Build Initiatives Analysis</p>
        </div>
    </footer>
    <script>{js}</script>
</body>
</html>
"#,
        css = inline_css(),
        js = inline_javascript(),
        total_companies = outcome.companies.len(),
        total_investors = outcome.distinct_investors(),
        total_segments = outcome.distinct_segments(),
        total_initiatives = outcome.initiatives.len(),
        segment_buttons = segment_buttons,
        sections = sections,
        generated_at = escape_html(generated_at),
    )
}

fn render_segment_section(
    segment: &str,
    color: &str,
    investors: &BTreeMap<&str, Vec<&CompanyRecord>>,
) -> String {
    let company_count: usize = investors.values().map(|v| v.len()).sum();

    // Largest portfolios first.
    let mut sorted: Vec<(&str, &Vec<&CompanyRecord>)> =
        investors.iter().map(|(k, v)| (*k, v)).collect();
    sorted.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));

    let mut investor_sections = String::new();
    for (idx, (investor, companies)) in sorted.iter().enumerate() {
        investor_sections.push_str(&render_investor_section(
            investor,
            companies,
            color,
            idx >= VISIBLE_INVESTORS,
        ));
    }

    let show_more = if sorted.len() > VISIBLE_INVESTORS {
        format!(
            r#"                <button class="show-more-button" data-segment="{segment}" data-expanded="false">Show More Investors ({hidden} more)</button>
"#,
            segment = escape_html(segment),
            hidden = sorted.len() - VISIBLE_INVESTORS,
        )
    } else {
        String::new()
    };

    format!(
        r#"            <div class="segment-section" data-segment="{segment}" style="border-top-color: {color}">
                <div class="segment-header">
                    <div class="segment-name">{segment}</div>
                    <div class="segment-count" style="background-color: {color}">{count} companies</div>
                </div>
                <div class="subcategory-filters" data-segment="{segment}">
                    <button class="subcategory-filter active" data-subcategory="all" style="border-color: {color}">All</button>
                </div>
{investors}{show_more}            </div>
"#,
        segment = escape_html(segment),
        color = color,
        count = company_count,
        investors = investor_sections,
        show_more = show_more,
    )
}

fn render_investor_section(
    investor: &str,
    companies: &[&CompanyRecord],
    color: &str,
    hidden: bool,
) -> String {
    let extra_class = if hidden { " hidden-investor" } else { "" };

    // Newest acquisitions first; unknown years sink to the end.
    let mut sorted: Vec<&CompanyRecord> = companies.to_vec();
    sorted.sort_by_key(|c| std::cmp::Reverse(c.acquisition_year().unwrap_or(i32::MIN)));

    let cards: String = sorted
        .iter()
        .map(|c| render_company_card(c, color))
        .collect();

    format!(
        r#"                <div class="investor-section{extra_class}" data-investor="{investor}">
                    <div class="investor-name">{investor}</div>
                    <div class="company-list">
{cards}                    </div>
                </div>
"#,
        extra_class = extra_class,
        investor = escape_html(investor),
        cards = cards,
    )
}

fn render_company_card(company: &CompanyRecord, color: &str) -> String {
    let year = company
        .acquisition_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let date = company
        .acquisition_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let badge = match company.investment_type {
        InvestmentType::Platform => {
            r#"<div class="investment-type-badge platform-badge">Platform</div>"#
        }
        InvestmentType::AddOn => {
            r#"<div class="investment-type-badge addon-badge">Add-on</div>"#
        }
        InvestmentType::Unknown => "",
    };

    format!(
        r#"                        <div class="company-card" data-company="{name}" data-investment-type="{investment_type}">
                            <div class="acquisition-year" style="background-color: {color}">{year}</div>
                            {badge}
                            <div class="subcategory-tag" style="background-color: {color}">{subcategory}</div>
                            <div class="company-name">{name}</div>
                            <button class="show-description" style="background-color: {color}">Show Details</button>
                            <div class="company-description">
                                <p><strong>Acquired:</strong> {date}</p>
                                <p><strong>Revenue:</strong> {revenue}</p>
                                <p><strong>EBITDA:</strong> {ebitda}</p>
                                <p><strong>Description:</strong> {description}</p>
                            </div>
                        </div>
"#,
        name = escape_html(&company.name),
        investment_type = company.investment_type,
        color = color,
        year = year,
        badge = badge,
        subcategory = escape_html(&company.subcategory),
        date = date,
        revenue = escape_html(&format_eur_millions(company.revenue)),
        ebitda = escape_html(&format_eur_millions(company.ebitda)),
        description = escape_html(&company.description),
    )
}

fn inline_css() -> &'static str {
    r#"
:root { --primary: #2c3e50; --secondary: #34495e; --accent: #3498db; --light: #ecf0f1; --dark: #2c3e50; }
* { margin: 0; padding: 0; box-sizing: border-box; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
body { background-color: #f5f7fa; color: var(--dark); line-height: 1.6; }
.container { max-width: 1200px; margin: 0 auto; padding: 20px; }
header { background-color: var(--primary); color: white; padding: 1rem 0; margin-bottom: 2rem; }
h1 { text-align: center; font-size: 2.2rem; margin-bottom: 0.5rem; }
.subtitle { text-align: center; color: #ccc; }
.dashboard { display: flex; justify-content: space-between; margin-bottom: 2rem; flex-wrap: wrap; }
.stat-card { background-color: white; border-radius: 8px; padding: 1.5rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1); flex: 1; min-width: 200px; margin: 0.5rem; text-align: center; }
.stat-value { font-size: 2.5rem; font-weight: bold; color: var(--accent); margin: 0.5rem 0; }
.stat-label { font-size: 1rem; color: var(--secondary); text-transform: uppercase; letter-spacing: 1px; }
.segment-buttons-container { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 2rem; }
.segment-button { color: white; border: 1px solid #ddd; border-radius: 4px; padding: 0.5rem 1rem; cursor: pointer; font-size: 0.9rem; }
.segment-button[data-segment="all"] { background-color: var(--primary); border-color: var(--primary); }
.segment-button.active { box-shadow: 0 0 0 2px white, 0 0 0 4px currentColor; }
.segment-section { background-color: white; border-radius: 8px; padding: 1.5rem; margin-bottom: 2rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1); border-top: 5px solid #3498db; }
.segment-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
.segment-name { font-size: 1.5rem; color: var(--primary); font-weight: bold; }
.segment-count { color: white; padding: 0.25rem 0.75rem; border-radius: 50px; font-size: 0.9rem; }
.subcategory-filters { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 0.5rem 0 1rem; padding-bottom: 0.5rem; border-bottom: 1px solid #eee; }
.subcategory-filter { background-color: white; border: 1px solid #ddd; border-radius: 4px; padding: 0.2rem 0.6rem; cursor: pointer; font-size: 0.8rem; }
.subcategory-filter.active { background-color: #f5f7fa; font-weight: bold; box-shadow: inset 0 0 0 1px currentColor; }
.investor-section { margin: 1rem 0 1rem 1.5rem; padding-left: 1rem; border-left: 3px solid #e1e4e8; }
.investor-section.hidden-investor { display: none; }
.investor-name { font-size: 1.2rem; font-weight: 600; color: var(--secondary); margin-bottom: 0.5rem; }
.company-list { display: flex; flex-wrap: wrap; gap: 1rem; margin-top: 1rem; }
.company-card { background-color: var(--light); border-radius: 6px; padding: 1rem; flex: 1; min-width: 250px; position: relative; }
.investment-type-badge { display: inline-block; margin: 0 0.5rem 0.3rem 0; padding: 0.2rem 0.5rem; border-radius: 4px; font-size: 0.7rem; font-weight: bold; color: white; text-transform: uppercase; }
.platform-badge { background-color: #2ecc71; }
.addon-badge { background-color: #e74c3c; }
.subcategory-tag { display: inline-block; padding: 0.15rem 0.5rem; font-size: 0.75rem; border-radius: 3px; margin-bottom: 0.5rem; color: white; opacity: 0.8; }
.company-name { font-weight: bold; font-size: 1.1rem; margin-bottom: 0.5rem; }
.acquisition-year { position: absolute; bottom: 0.5rem; right: 0.5rem; color: white; padding: 0.2rem 0.5rem; border-radius: 4px; font-size: 0.8rem; }
.company-description { font-size: 0.9rem; color: var(--secondary); margin-top: 0.5rem; display: none; }
.show-description { color: white; border: none; padding: 0.4rem 0.8rem; border-radius: 4px; cursor: pointer; font-size: 0.8rem; margin-top: 0.5rem; }
.show-more-button { display: block; margin: 1rem auto; background-color: #f5f7fa; border: 1px solid #ddd; border-radius: 4px; padding: 0.5rem 1rem; cursor: pointer; font-size: 0.9rem; }
footer { text-align: center; margin-top: 3rem; padding: 1rem; background-color: var(--primary); color: white; }
@media (max-width: 768px) { .dashboard { flex-direction: column; } .company-card { min-width: 100%; } }
"#
}

fn inline_javascript() -> &'static str {
    r#"
// Description expand/collapse
document.querySelectorAll('.show-description').forEach(button => {
    button.addEventListener('click', function() {
        const description = this.nextElementSibling;
        const open = description.style.display === 'block';
        description.style.display = open ? 'none' : 'block';
        this.textContent = open ? 'Show Details' : 'Hide Details';
    });
});

// Reveal investors beyond the first five
document.querySelectorAll('.show-more-button').forEach(button => {
    button.addEventListener('click', function() {
        const section = this.closest('.segment-section');
        const expanded = this.getAttribute('data-expanded') === 'true';
        const investors = section.querySelectorAll('.investor-section');
        if (expanded) {
            investors.forEach((investor, idx) => {
                if (idx >= 5) investor.classList.add('hidden-investor');
            });
            this.setAttribute('data-expanded', 'false');
            this.textContent = `Show More Investors (${investors.length - 5} more)`;
        } else {
            investors.forEach(investor => investor.classList.remove('hidden-investor'));
            this.setAttribute('data-expanded', 'true');
            this.textContent = 'Show Less';
        }
    });
});

// Segment show/hide
const segmentButtons = document.querySelectorAll('.segment-button');
let activeSegment = 'all';
segmentButtons.forEach(button => {
    button.addEventListener('click', function() {
        const segment = this.getAttribute('data-segment');
        if (segment === activeSegment && segment !== 'all') {
            document.querySelector('button[data-segment="all"]').classList.add('active');
            this.classList.remove('active');
            activeSegment = 'all';
            document.querySelectorAll('.segment-section').forEach(s => { s.style.display = ''; });
            return;
        }
        segmentButtons.forEach(btn => btn.classList.remove('active'));
        this.classList.add('active');
        activeSegment = segment;
        document.querySelectorAll('.segment-section').forEach(section => {
            section.style.display =
                segment === 'all' || section.getAttribute('data-segment') === segment ? '' : 'none';
        });
    });
});

// Per-segment subcategory and investment-type filters, built from the cards
document.querySelectorAll('.segment-section').forEach(segment => {
    const filterContainer = segment.querySelector('.subcategory-filters');
    if (!filterContainer) return;

    const subcategories = new Set();
    segment.querySelectorAll('.subcategory-tag').forEach(tag => subcategories.add(tag.textContent));
    subcategories.forEach(subcategory => {
        const button = document.createElement('button');
        button.className = 'subcategory-filter';
        button.setAttribute('data-subcategory', subcategory);
        button.textContent = subcategory;
        button.style.borderColor = getComputedStyle(segment).borderTopColor;
        filterContainer.appendChild(button);
    });

    const typeFilters = document.createElement('div');
    typeFilters.style.display = 'flex';
    typeFilters.style.gap = '0.5rem';
    [['all', 'All Types', ''], ['Platform', 'Platforms', '#2ecc71'], ['Add-on', 'Add-ons', '#e74c3c']]
        .forEach(([type, label, color]) => {
            const button = document.createElement('button');
            button.className = type === 'all' ? 'subcategory-filter active' : 'subcategory-filter';
            button.setAttribute('data-investment-type', type);
            button.textContent = label;
            if (color) button.style.borderColor = color;
            typeFilters.appendChild(button);
        });
    filterContainer.appendChild(typeFilters);

    segment.querySelectorAll('.subcategory-filter').forEach(button => {
        button.addEventListener('click', function() {
            const subcategory = this.getAttribute('data-subcategory');
            const investmentType = this.getAttribute('data-investment-type');
            const attr = subcategory ? 'data-subcategory' : 'data-investment-type';
            segment.querySelectorAll(`[${attr}]`).forEach(btn => btn.classList.remove('active'));
            this.classList.add('active');

            segment.querySelectorAll('.company-card').forEach(card => {
                let visible;
                if (subcategory) {
                    visible = subcategory === 'all' ||
                        card.querySelector('.subcategory-tag').textContent === subcategory;
                } else {
                    visible = investmentType === 'all' ||
                        card.getAttribute('data-investment-type') === investmentType;
                }
                card.style.display = visible ? '' : 'none';
            });

            // Hide investor sections with nothing left showing
            segment.querySelectorAll('.investor-section').forEach(investor => {
                const anyVisible = Array.from(investor.querySelectorAll('.company-card'))
                    .some(card => card.style.display !== 'none');
                investor.style.display = anyVisible ? '' : 'none';
            });
        });
    });
});
"#
}

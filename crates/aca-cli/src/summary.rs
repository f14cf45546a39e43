//! Terminal rendering of command reports.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use aca_core::StatusMessage;
use aca_model::{ArticleSummary, Profile};

use crate::commands::{ArticlePage, CommandReport, ReportBody};

pub fn print_report(report: &CommandReport) {
    match &report.body {
        ReportBody::Nothing => {}
        ReportBody::Articles(page) => print_article_page(page),
        ReportBody::Article { article, favorite } => {
            println!("{}", article_table(article, *favorite));
        }
        ReportBody::Profile(profile) => println!("{}", profile_table(profile)),
        ReportBody::Config(text) => print!("{text}"),
    }
    if let Some(status) = &report.status {
        eprintln!("{}", status_line(status));
    }
    if report.login_requested {
        eprintln!("Sign in with --token or the ACA_TOKEN environment variable.");
    }
}

fn print_article_page(page: &ArticlePage) {
    println!();
    println!("{}", page.heading);
    if page.rows.is_empty() {
        println!("No articles.");
        return;
    }
    println!("{}", article_page_table(page));
    println!("{}", page_footer(page));
}

pub fn article_page_table(page: &ArticlePage) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Title"),
        header_cell("Author"),
        header_cell("Created"),
        header_cell("Fav"),
        header_cell("Featured"),
    ]);
    apply_table_style(&mut table);
    for row in &page.rows {
        table.add_row(vec![
            Cell::new(row.index).fg(Color::DarkGrey),
            Cell::new(&row.title).add_attribute(Attribute::Bold),
            Cell::new(&row.author),
            Cell::new(&row.created),
            flag_cell(row.favorite, Color::Yellow),
            flag_cell(row.featured, Color::Green),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    table
}

/// `Page 2 of 3 (45 articles)`, or `No articles` for an empty listing.
pub fn page_footer(page: &ArticlePage) -> String {
    if page.page_count == 0 {
        return "No articles".to_string();
    }
    let noun = if page.total == 1 { "article" } else { "articles" };
    format!(
        "Page {} of {} ({} {noun})",
        page.page + 1,
        page.page_count,
        page.total
    )
}

fn article_table(article: &ArticleSummary, favorite: bool) -> Table {
    let mut table = Table::new();
    apply_record_table_style(&mut table);
    table.add_row(vec![
        label_cell("Title"),
        Cell::new(article.title_or_default()).add_attribute(Attribute::Bold),
    ]);
    let created = article
        .created_on()
        .map(|date| date.to_string())
        .unwrap_or_default();
    let fields = [
        ("Author", article.author_name.clone().unwrap_or_default()),
        ("Created", created),
        ("Tags", article.tags.join(", ")),
        ("Embed", article.embed.clone().unwrap_or_default()),
        ("Description", article.description.clone().unwrap_or_default()),
        ("Key", article.key().as_str().to_string()),
    ];
    for (label, value) in fields {
        table.add_row(vec![label_cell(label), Cell::new(value)]);
    }
    table.add_row(vec![label_cell("Favorite"), flag_cell(favorite, Color::Yellow)]);
    table
}

fn profile_table(profile: &Profile) -> Table {
    let mut table = Table::new();
    apply_record_table_style(&mut table);
    let fields = [
        ("Display name", profile.display_name.clone().unwrap_or_default()),
        ("Email", profile.main_email.clone().unwrap_or_default()),
        ("Organizations", profile.organizations.join(", ")),
        ("Rights", profile.user_rights.label().to_string()),
        ("Favorites", profile.favorite_articles.len().to_string()),
    ];
    for (label, value) in fields {
        table.add_row(vec![label_cell(label), Cell::new(value)]);
    }
    table
}

/// The status line as printed under the output.
pub fn status_line(status: &StatusMessage) -> String {
    status.to_string()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_record_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan)
}

fn flag_cell(set: bool, color: Color) -> Cell {
    if set {
        Cell::new("*").fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ArticleRow;
    use aca_core::Severity;

    fn page(rows: Vec<ArticleRow>, total: usize, page_count: usize) -> ArticlePage {
        ArticlePage {
            heading: "Featured".to_string(),
            rows,
            page: 1,
            page_count,
            total,
        }
    }

    #[test]
    fn footer_counts_pages_from_one() {
        assert_eq!(page_footer(&page(Vec::new(), 45, 3)), "Page 2 of 3 (45 articles)");
        assert_eq!(page_footer(&page(Vec::new(), 0, 0)), "No articles");
    }

    #[test]
    fn listing_has_a_row_per_article() {
        let rows = vec![
            ArticleRow {
                index: 20,
                title: "Mural".to_string(),
                author: "Ana".to_string(),
                created: "2016-05-01".to_string(),
                favorite: true,
                featured: false,
            },
            ArticleRow {
                index: 21,
                title: "Tag wall".to_string(),
                author: String::new(),
                created: String::new(),
                favorite: false,
                featured: true,
            },
        ];
        let table = article_page_table(&page(rows, 22, 2));
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Mural"));
        assert!(rendered.contains("Tag wall"));
    }

    #[test]
    fn status_line_carries_severity_label() {
        let line = status_line(&StatusMessage::warning("Failed to get articles"));
        assert!(line.contains("Failed to get articles"));
        assert!(line.contains(Severity::Warning.label()));
    }
}

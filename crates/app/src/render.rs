use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;
use tally_core::{Money, RuleSet, Transaction, UNCATEGORIZED};
use tally_report::{Dashboard, Trend};

fn money_cell(amount: Money) -> Cell {
    Cell::new(amount).set_alignment(CellAlignment::Right)
}

fn net_cell(net: Money, trend: Trend) -> Cell {
    let text = net.to_string();
    let styled = match trend {
        Trend::Positive => text.green(),
        Trend::Negative => text.red(),
        Trend::Flat => text.normal(),
    };
    Cell::new(styled).set_alignment(CellAlignment::Right)
}

fn heading(title: &str) -> String {
    title.bold().to_string()
}

fn transactions_table(rows: &[Transaction]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Amount", "Category"]);
    for tx in rows {
        table.add_row(vec![
            Cell::new(tx.date),
            Cell::new(&tx.description),
            money_cell(tx.amount),
            Cell::new(&tx.category),
        ]);
    }
    table
}

pub fn format_dashboard(dash: &Dashboard, top_vendors: usize) -> String {
    let mut out = Vec::new();
    out.push(format!("Window: {}", dash.window));

    if dash.is_empty() {
        out.push("No transactions in window.".to_string());
        return out.join("\n");
    }

    if let Some(last) = dash.balance.last() {
        out.push(format!("Net balance as of {}: {}", last.date, last.balance));
    }

    let mut monthly = Table::new();
    monthly.set_header(vec!["Month", "Credits", "Debits", "Net"]);
    for row in &dash.monthly {
        monthly.add_row(vec![
            Cell::new(row.month.label()),
            money_cell(row.credits),
            money_cell(row.debits),
            net_cell(row.net, row.trend),
        ]);
    }
    out.push(heading("\nMonthly Summary"));
    out.push(monthly.to_string());

    if !dash.categories.is_empty() {
        let mut categories = Table::new();
        categories.set_header(vec!["Category", "Spent", "%"]);
        for row in &dash.categories {
            let pct = row.share * Decimal::ONE_HUNDRED;
            categories.add_row(vec![
                Cell::new(&row.category),
                money_cell(row.total),
                Cell::new(format!("{pct:.1}%")).set_alignment(CellAlignment::Right),
            ]);
        }
        out.push(heading("\nSpending by Category"));
        out.push(categories.to_string());
    }

    if !dash.vendors.is_empty() {
        let mut vendors = Table::new();
        vendors.set_header(vec!["Vendor", "Spent"]);
        for row in dash.vendors.iter().take(top_vendors) {
            vendors.add_row(vec![Cell::new(&row.vendor), money_cell(row.total)]);
        }
        out.push(heading("\nTop Vendors"));
        out.push(vendors.to_string());
    }

    out.push(heading(&format!("\nDebits ({})", dash.debits.len())));
    out.push(transactions_table(&dash.debits).to_string());
    out.push(heading(&format!("\nCredits ({})", dash.credits.len())));
    out.push(transactions_table(&dash.credits).to_string());

    out.join("\n")
}

pub fn format_rules(rules: &RuleSet) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Keywords"]);
    for (idx, rule) in rules.iter().enumerate() {
        let keywords = match (rule.name == UNCATEGORIZED, rule.keywords.is_empty()) {
            (true, true) => "(fallback)".dimmed().to_string(),
            // Kept in the file but never matched against.
            (true, false) => format!("{} {}", rule.keywords.join(", "), "(unused)".dimmed()),
            (false, true) => "(none)".dimmed().to_string(),
            (false, false) => rule.keywords.join(", "),
        };
        table.add_row(vec![Cell::new(idx + 1), Cell::new(&rule.name), Cell::new(keywords)]);
    }
    format!("{table}\nLater categories win when several match.")
}

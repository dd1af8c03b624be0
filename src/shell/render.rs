//! Plain-text rendering of selections and result tables.

use std::fmt::Write;

use vms_app::usecases::{ComparisonResultView, RankResultView};
use vms_core::{Locale, Page, SelectionSet, SelectionSnapshot, Startup};

/// Group digits by thousands: `1234567` → `1,234,567`.
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

struct Units {
    currency: &'static str,
    people: &'static str,
    rank: &'static str,
}

fn units(locale: Locale) -> Units {
    match locale {
        Locale::Ko => Units {
            currency: "원",
            people: "명",
            rank: "위",
        },
        Locale::En => Units {
            currency: "KRW",
            people: "people",
            rank: "",
        },
    }
}

fn startup_columns(out: &mut String, startup: &Startup, units: &Units) {
    let _ = write!(
        out,
        "{:<6} {:<20} {:<12} {:>16} {} {:>16} {} {:>8} {}",
        startup.id.get(),
        startup.name,
        startup.category.as_str(),
        format_amount(startup.sim_invest),
        units.currency,
        format_amount(startup.revenue),
        units.currency,
        format_amount(startup.employees),
        units.people,
    );
}

fn marker(highlighted: bool) -> char {
    if highlighted {
        '*'
    } else {
        ' '
    }
}

pub fn render_selection(selection: &SelectionSnapshot) -> String {
    let names = |set: &SelectionSet| {
        set.iter()
            .map(|s| format!("{}:{}", s.id, s.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "my startups: [{}]\ncandidates:  [{}]",
        names(&selection.primary),
        names(&selection.candidates)
    )
}

pub fn render_comparison(view: &ComparisonResultView, locale: Locale) -> String {
    let units = units(locale);
    let mut out = String::new();
    let _ = writeln!(out, "comparison ({:?}, sort {})", view.state, view.sort);
    if let Some(error) = &view.error {
        let _ = writeln!(out, "  ! {error}");
    }
    if !view.is_visible() {
        let _ = writeln!(out, "  (no comparison)");
        return out;
    }
    for row in &view.rows {
        out.push(marker(row.highlighted));
        out.push(' ');
        startup_columns(&mut out, &row.record, &units);
        out.push('\n');
    }
    out
}

pub fn render_rank(view: &RankResultView, locale: Locale) -> String {
    let units = units(locale);
    let mut out = String::new();
    match view.reference {
        Some(reference) => {
            let _ = writeln!(out, "rank around {reference} (sort {})", view.sort);
        }
        None => {
            let _ = writeln!(out, "rank (no startup picked, sort {})", view.sort);
        }
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "  ! {error}");
    }
    for row in &view.rows {
        out.push(marker(row.highlighted));
        let _ = write!(out, " {:>4}{} ", row.record.rank, units.rank);
        startup_columns(&mut out, &row.record.startup, &units);
        out.push('\n');
    }
    out
}

pub fn render_page(page: &Page<Startup>, locale: Locale) -> String {
    let units = units(locale);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "page {}/{} ({} startups)",
        page.page,
        page.total_pages(),
        page.total_count
    );
    for startup in &page.items {
        out.push_str("  ");
        startup_columns(&mut out, startup, &units);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vms_core::StartupId;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
        assert_eq!(format_amount(-45_000), "-45,000");
    }

    #[test]
    fn selection_lists_both_sets() {
        let mut selection = SelectionSnapshot::default();
        selection
            .primary
            .add(Startup::new(StartupId::new(1), "Alpha", "AI"));
        selection
            .candidates
            .add(Startup::new(StartupId::new(2), "Beta", "AI"));
        assert_eq!(
            render_selection(&selection),
            "my startups: [1:Alpha]\ncandidates:  [2:Beta]"
        );
    }
}

//! Summary cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{dashboard::aggregation::TypeTotals, html::format_currency};

/// The figures shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SummaryFigures {
    /// The total spent today, over all transactions.
    pub spent_today: f64,
    /// The total spent so far this month, over all transactions.
    pub spent_this_month: f64,
    /// The income and expense totals of the filtered transactions.
    pub filtered: TypeTotals,
}

fn card(title: &str, subtitle: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
        {
            p class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class={"text-2xl font-bold " (amount_style)} { (format_currency(amount)) }
            p class="text-xs text-gray-500 dark:text-gray-400" { (subtitle) }
        }
    }
}

/// Renders the row of summary cards.
pub(super) fn summary_cards_view(figures: &SummaryFigures) -> Markup {
    const EXPENSE_STYLE: &str = "text-red-600 dark:text-red-400";
    const INCOME_STYLE: &str = "text-green-600 dark:text-green-400";

    html! {
        section id="summary-cards" class="w-full grid grid-cols-2 lg:grid-cols-4 gap-4 mb-6"
        {
            (card("Spent Today", "All transactions", figures.spent_today, EXPENSE_STYLE))
            (card("Spent This Month", "All transactions", figures.spent_this_month, EXPENSE_STYLE))
            (card("Total Income", "Matching the filter", figures.filtered.income, INCOME_STYLE))
            (card("Total Expense", "Matching the filter", figures.filtered.expense, EXPENSE_STYLE))
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::dashboard::aggregation::TypeTotals;

    use super::{SummaryFigures, summary_cards_view};

    #[test]
    fn shows_four_formatted_cards() {
        let figures = SummaryFigures {
            spent_today: 12.5,
            spent_this_month: 1234.5,
            filtered: TypeTotals {
                income: 3000.0,
                expense: 0.0,
            },
        };

        let html = summary_cards_view(&figures).into_string();

        let fragment = Html::parse_fragment(&html);
        let cards = fragment
            .select(&Selector::parse("#summary-cards > div").unwrap())
            .count();
        assert_eq!(cards, 4);
        assert!(html.contains("$12.50"), "got {html}");
        assert!(html.contains("$1,234.50"), "got {html}");
        assert!(html.contains("$3,000.00"), "got {html}");
        assert!(html.contains("$0.00"), "got {html}");
    }
}

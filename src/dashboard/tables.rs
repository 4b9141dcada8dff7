//! Table views for dashboard data display.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::YearlyTotal,
};

/// Renders a table of the total spent in each year, most recent year first.
pub(super) fn yearly_expense_table(yearly_totals: &[YearlyTotal]) -> Markup {
    html! {
        div id="yearly-expenses" class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Expenses by Year" }

            @if yearly_totals.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No expenses recorded yet." }
            } @else {
                div class="overflow-x-auto rounded-lg shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Year" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total Expense" }
                            }
                        }

                        tbody
                        {
                            @for yearly_total in yearly_totals {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    th
                                        scope="row"
                                        class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                    {
                                        (yearly_total.year)
                                    }
                                    td class={(TABLE_CELL_STYLE) " text-right"}
                                    {
                                        (format_currency(yearly_total.total))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

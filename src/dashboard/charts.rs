//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the filtered transactions:
//! - **Category Share**: a doughnut chart of the amount per category
//! - **Transaction Trend**: a bar chart of the amount per day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapChannel},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Label, LabelPosition,
        Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{totals_by_category, totals_by_day},
    html::HeadElement,
    transaction::Transaction,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the dashboard charts for `transactions`.
pub(super) fn build_dashboard_charts(transactions: &[Transaction]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "category-share-chart",
            options: category_share_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "daily-trend-chart",
            options: daily_trend_chart(transactions).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn category_share_chart(transactions: &[Transaction]) -> Chart {
    let data: Vec<(f64, String)> = totals_by_category(transactions)
        .into_iter()
        .map(|(category, total)| (total, category))
        .collect();

    Chart::new()
        .title(Title::new().text("Category Share"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Category")
                .radius(vec!["50%", "75%"])
                .label(
                    Label::new()
                        .position(LabelPosition::Inside)
                        .formatter("{b}\n{d}%"),
                )
                .data(data),
        )
}

pub(super) fn daily_trend_chart(transactions: &[Transaction]) -> Chart {
    let daily_totals = totals_by_day(transactions);
    let max_total = daily_totals
        .iter()
        .map(|(_, total)| *total)
        .fold(0.0, f64::max);
    let (labels, values): (Vec<String>, Vec<f64>) = daily_totals
        .into_iter()
        .map(|(date, total)| (date.to_string(), total))
        .unzip();

    Chart::new()
        .title(Title::new().text("Transaction Trend"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .visual_map(
            VisualMap::new()
                .show(false)
                .min(0.0)
                .max(max_total)
                .in_range(VisualMapChannel::new().color(vec![
                    "#0d0887", "#7e03a8", "#cc4778", "#f89540", "#f0f921",
                ])),
        )
        .series(Bar::new().name("Amount").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

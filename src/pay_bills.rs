//! The page for choosing a bill category and browsing saved billers.

use std::sync::Arc;

use axum::extract::{Query, State};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    BankConfig,
    demo_content::{BILL_CATEGORIES, BillCategory, find_bill_category, saved_billers},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, page_header,
    },
    navigation::NavBar,
};

const SELECTED_CATEGORY_STYLE: &str = "bg-blue-600 text-white";

#[derive(Deserialize)]
pub struct PayBillsQuery {
    /// The label of the selected bill category, e.g. "Water".
    pub category: Option<String>,
}

/// Display the bill categories, with the one named in the query selected, and the saved billers.
pub async fn get_pay_bills_page(
    State(config): State<Arc<BankConfig>>,
    Query(query): Query<PayBillsQuery>,
) -> Markup {
    let selected = query.category.as_deref().and_then(|label| {
        let category = find_bill_category(label);
        if category.is_none() {
            tracing::debug!("Ignoring unknown bill category {label:?}");
        }
        category
    });

    let nav_bar = NavBar::new(endpoints::PAY_BILLS_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Pay Bills", endpoints::DASHBOARD_VIEW))

            section class=(CARD_STYLE)
            {
                h2 class="font-semibold text-lg mb-4" { "Categories" }

                div id="bill-categories" class="grid grid-cols-3 gap-3"
                {
                    @for category in &BILL_CATEGORIES {
                        (category_link(category, selected == Some(category)))
                    }
                }
            }

            section id="saved-billers" class=(CARD_STYLE)
            {
                h2 class="font-semibold text-lg mb-4" { "Saved Billers" }

                ul class="space-y-3"
                {
                    @for biller in saved_billers() {
                        li class="flex items-center justify-between p-4 bg-gray-50 dark:bg-gray-700 rounded-xl"
                        {
                            div
                            {
                                p class="font-semibold" { (biller.name) }
                                p class="text-xs text-gray-500" { "Last paid: " (biller.last_paid) }
                            }
                            div class="text-right"
                            {
                                p class="font-bold" { (format_currency(biller.amount)) }
                                p class="text-xs text-gray-500" { (biller.category) }
                            }
                        }
                    }
                }
            }

            button type="button" class=(BUTTON_PRIMARY_STYLE) disabled[selected.is_none()]
            {
                @match selected {
                    Some(category) => { "Pay " (category.label) " Bill" }
                    None => "Pay Selected Bill",
                }
            }
        }
    };

    base("Pay Bills", &[], &content)
}

fn category_link(category: &BillCategory, is_selected: bool) -> Markup {
    let style = if is_selected {
        SELECTED_CATEGORY_STYLE
    } else {
        category.style
    };
    let href = match serde_urlencoded::to_string([("category", category.label)]) {
        Ok(query) => format!("{}?{query}", endpoints::PAY_BILLS_VIEW),
        Err(error) => {
            tracing::error!("Could not encode bill category {}: {error}", category.label);
            endpoints::PAY_BILLS_VIEW.to_owned()
        }
    };

    html! {
        a
            href=(href)
            class={"flex flex-col items-center gap-2 p-4 rounded-xl text-xs font-medium " (style)}
            aria-current=[is_selected.then_some("true")]
        {
            (category.label)
        }
    }
}

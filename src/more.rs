//! The menu of banking features that are not part of the demo.

use std::sync::Arc;

use axum::extract::State;
use maud::{Markup, html};

use crate::{
    BankConfig,
    demo_content::MORE_OPTIONS,
    endpoints,
    html::{CARD_STYLE, LIST_ITEM_STYLE, PAGE_CONTAINER_STYLE, base, page_header},
    navigation::NavBar,
};

/// Display the "more options" menu.
pub async fn get_more_page(State(config): State<Arc<BankConfig>>) -> Markup {
    let nav_bar = NavBar::new(endpoints::MORE_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("More Options", endpoints::DASHBOARD_VIEW))

            ul id="more-options" class=(CARD_STYLE)
            {
                @for option in &MORE_OPTIONS {
                    li class=(LIST_ITEM_STYLE)
                    {
                        div class="min-w-0"
                        {
                            p class="font-semibold" { (option.label) }
                            p class="text-sm text-gray-500 dark:text-gray-400 truncate" { (option.description) }
                        }
                    }
                }
            }
        }
    };

    base("More Options", &[], &content)
}

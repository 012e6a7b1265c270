//! The list of notifications.

use std::sync::Arc;

use axum::extract::State;
use maud::{Markup, html};

use crate::{
    BankConfig,
    demo_content::{NOTIFICATIONS, Notification, unread_count},
    endpoints,
    html::{BADGE_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, page_header},
    navigation::NavBar,
};

/// Display the notifications, newest first, with the number of unread ones.
pub async fn get_notifications_page(State(config): State<Arc<BankConfig>>) -> Markup {
    let unread = unread_count(&NOTIFICATIONS);

    let nav_bar = NavBar::new(endpoints::NOTIFICATIONS_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full flex items-center justify-between"
            {
                (page_header("Notifications", endpoints::DASHBOARD_VIEW))

                @if unread > 0 {
                    span id="unread-count" class=(BADGE_STYLE) { (unread) " new" }
                }
            }

            ul class="w-full space-y-3"
            {
                @for notification in &NOTIFICATIONS {
                    (notification_item(notification))
                }
            }
        }
    };

    base("Notifications", &[], &content)
}

fn notification_item(notification: &Notification) -> Markup {
    let border = if notification.read {
        ""
    } else {
        " border-l-4 border-blue-600 unread"
    };

    html! {
        li class={(CARD_STYLE) " flex gap-4" (border)}
        {
            div class={"w-12 h-12 rounded-xl flex items-center justify-center shrink-0 " (notification.kind.style())}
            {
                (notification.kind.symbol())
            }

            div class="flex-1 min-w-0"
            {
                div class="flex items-start justify-between gap-2"
                {
                    p class="font-semibold" { (notification.title) }
                    span class="text-xs text-gray-500 whitespace-nowrap" { (notification.time) }
                }
                p class="text-sm text-gray-500 dark:text-gray-400 mt-1" { (notification.message) }
            }
        }
    }
}

#[cfg(test)]
mod notifications_page_tests {
    use std::sync::Arc;

    use axum::extract::State;
    use scraper::{Html, Selector};

    use crate::{BankConfig, notifications::get_notifications_page};

    #[tokio::test]
    async fn shows_notifications_and_unread_count() {
        let markup = get_notifications_page(State(Arc::new(BankConfig::demo()))).await;

        let document = Html::parse_document(&markup.into_string());
        assert!(document.errors.is_empty(), "{:?}", document.errors);
        let unread = document
            .select(&Selector::parse("#unread-count").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(unread, "2 new");
        assert_eq!(
            document.select(&Selector::parse("main li").unwrap()).count(),
            6
        );
        assert_eq!(
            document.select(&Selector::parse("li.unread").unwrap()).count(),
            2
        );
    }
}

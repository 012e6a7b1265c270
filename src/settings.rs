//! The profile and settings page.

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    BankConfig, Error, SessionHandle,
    bank::User,
    demo_content::{APP_VERSION, SETTINGS_SECTIONS, SettingControl, SettingItem},
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, page_header},
    navigation::NavBar,
};

/// Display the profile of the logged in user, the settings sections and a log-out link.
pub async fn get_settings_page(
    State(config): State<Arc<BankConfig>>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Response, Error> {
    let user = {
        let entry = session.lock()?;
        entry.bank.user().cloned().ok_or(Error::NotAuthenticated)?
    };

    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Settings", endpoints::DASHBOARD_VIEW))
            (profile_card(&user))

            @for section in &SETTINGS_SECTIONS {
                section class={(CARD_STYLE) " p-0 overflow-hidden"}
                {
                    h2 class="px-4 py-3 border-b border-gray-100 text-sm font-semibold text-gray-500 uppercase tracking-wide"
                    {
                        (section.title)
                    }

                    ul
                    {
                        @for item in section.items {
                            (setting_row(item))
                        }
                    }
                }
            }

            a
                id="log-out"
                href=(endpoints::LOG_OUT)
                class="w-full flex items-center justify-center gap-3 p-4 bg-red-50 text-red-600 rounded-2xl font-semibold hover:bg-red-100"
            {
                "Log Out"
            }

            p class="text-center text-sm text-gray-500" { (APP_VERSION) }
        }
    };

    Ok(base("Settings", &[], &content).into_response())
}

fn profile_card(user: &User) -> Markup {
    html! {
        section id="profile" class={(CARD_STYLE) " flex items-center gap-4"}
        {
            div class="w-16 h-16 rounded-full bg-blue-700 flex items-center justify-center text-white font-bold text-xl"
            {
                (user.initial())
            }
            div
            {
                p class="font-bold text-lg" { (user.full_name()) }
                p class="text-sm text-gray-500" { (user.email) }
            }
        }
    }
}

fn setting_row(item: &SettingItem) -> Markup {
    html! {
        li class="flex items-center justify-between p-4 border-b border-gray-100 last:border-b-0"
        {
            div
            {
                p class="font-medium" { (item.label) }
                @if let Some(subtitle) = item.subtitle {
                    p class="text-sm text-gray-500" { (subtitle) }
                }
            }

            @match item.control {
                SettingControl::Link => span class="text-gray-400" aria-hidden="true" { "›" },
                SettingControl::Toggle(on) => {
                    input
                        type="checkbox"
                        role="switch"
                        aria-label=(item.label)
                        class="w-10 h-5 accent-blue-600"
                        checked[on];
                }
            }
        }
    }
}

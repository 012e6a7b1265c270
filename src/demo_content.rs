//! Fixed content shown on the notifications, pay bills, more and settings pages.
//!
//! None of this content changes while the server is running.

use rust_decimal::Decimal;

/// What kind of event a notification is about. Decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Promo,
    Alert,
    Info,
}

impl NotificationKind {
    /// The tailwind classes for the notification icon.
    pub fn style(self) -> &'static str {
        match self {
            NotificationKind::Success => "bg-green-500/20 text-green-600",
            NotificationKind::Alert => "bg-red-500/20 text-red-600",
            NotificationKind::Promo => "bg-purple-500/20 text-purple-600",
            NotificationKind::Info => "bg-blue-500/20 text-blue-600",
        }
    }

    /// A one character stand-in for the notification icon.
    pub fn symbol(self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Alert => "!",
            NotificationKind::Promo => "★",
            NotificationKind::Info => "i",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
    pub time: &'static str,
    pub read: bool,
}

pub static NOTIFICATIONS: [Notification; 6] = [
    Notification {
        kind: NotificationKind::Success,
        title: "Transfer Successful",
        message: "Your transfer of $250.00 to John Smith was successful.",
        time: "2 mins ago",
        read: false,
    },
    Notification {
        kind: NotificationKind::Promo,
        title: "New Offer Available",
        message: "Earn 5% cashback on all online purchases this weekend!",
        time: "1 hour ago",
        read: false,
    },
    Notification {
        kind: NotificationKind::Alert,
        title: "Security Alert",
        message: "New login detected from iPhone 15 Pro in New York.",
        time: "3 hours ago",
        read: true,
    },
    Notification {
        kind: NotificationKind::Info,
        title: "Bill Reminder",
        message: "Your electricity bill of $125.50 is due in 3 days.",
        time: "Yesterday",
        read: true,
    },
    Notification {
        kind: NotificationKind::Success,
        title: "Savings Goal Reached",
        message: "Congratulations! You've reached your vacation savings goal.",
        time: "2 days ago",
        read: true,
    },
    Notification {
        kind: NotificationKind::Info,
        title: "Direct Deposit Received",
        message: "A deposit of $3,500.00 has been added to your account.",
        time: "3 days ago",
        read: true,
    },
];

/// The number of notifications that have not been read.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|notification| !notification.read)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillCategory {
    pub label: &'static str,
    /// Tailwind classes used when the category is not selected.
    pub style: &'static str,
}

pub static BILL_CATEGORIES: [BillCategory; 6] = [
    BillCategory {
        label: "Electricity",
        style: "bg-yellow-500/20 text-yellow-600",
    },
    BillCategory {
        label: "Internet",
        style: "bg-blue-500/20 text-blue-600",
    },
    BillCategory {
        label: "Water",
        style: "bg-cyan-500/20 text-cyan-600",
    },
    BillCategory {
        label: "Mobile",
        style: "bg-green-500/20 text-green-600",
    },
    BillCategory {
        label: "Cable TV",
        style: "bg-purple-500/20 text-purple-600",
    },
    BillCategory {
        label: "Credit Card",
        style: "bg-red-500/20 text-red-600",
    },
];

/// Find the bill category with the label `label`, ignoring case.
pub fn find_bill_category(label: &str) -> Option<&'static BillCategory> {
    BILL_CATEGORIES
        .iter()
        .find(|category| category.label.eq_ignore_ascii_case(label.trim()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedBiller {
    pub name: &'static str,
    pub category: &'static str,
    pub last_paid: &'static str,
    pub amount: Decimal,
}

pub fn saved_billers() -> [SavedBiller; 3] {
    [
        SavedBiller {
            name: "City Power Co.",
            category: "Electricity",
            last_paid: "Dec 15, 2025",
            amount: Decimal::new(12550, 2),
        },
        SavedBiller {
            name: "FastNet Internet",
            category: "Internet",
            last_paid: "Jan 02, 2026",
            amount: Decimal::new(7999, 2),
        },
        SavedBiller {
            name: "WaterWorks Utility",
            category: "Water",
            last_paid: "Jan 05, 2026",
            amount: Decimal::new(4500, 2),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoreOption {
    pub label: &'static str,
    pub description: &'static str,
}

pub static MORE_OPTIONS: [MoreOption; 10] = [
    MoreOption {
        label: "Cards",
        description: "Manage your debit & credit cards",
    },
    MoreOption {
        label: "Accounts",
        description: "View all your accounts",
    },
    MoreOption {
        label: "Savings Goals",
        description: "Set and track savings goals",
    },
    MoreOption {
        label: "Investments",
        description: "Stocks, bonds & mutual funds",
    },
    MoreOption {
        label: "Rewards",
        description: "Redeem your cashback rewards",
    },
    MoreOption {
        label: "Refer Friends",
        description: "Earn $50 for each referral",
    },
    MoreOption {
        label: "International",
        description: "Send money abroad",
    },
    MoreOption {
        label: "Security Center",
        description: "Manage security settings",
    },
    MoreOption {
        label: "Statements",
        description: "Download account statements",
    },
    MoreOption {
        label: "Help & Support",
        description: "Get help with your account",
    },
];

/// What is shown on the right of a settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingControl {
    /// A chevron, the row leads somewhere else.
    Link,
    /// An on/off switch and its initial position.
    Toggle(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingItem {
    pub label: &'static str,
    pub subtitle: Option<&'static str>,
    pub control: SettingControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsSection {
    pub title: &'static str,
    pub items: &'static [SettingItem],
}

const fn link_item(label: &'static str) -> SettingItem {
    SettingItem {
        label,
        subtitle: None,
        control: SettingControl::Link,
    }
}

const fn toggle_item(label: &'static str, on: bool) -> SettingItem {
    SettingItem {
        label,
        subtitle: None,
        control: SettingControl::Toggle(on),
    }
}

pub static SETTINGS_SECTIONS: [SettingsSection; 3] = [
    SettingsSection {
        title: "Account",
        items: &[
            link_item("Personal Information"),
            link_item("Change Password"),
            link_item("Linked Cards"),
        ],
    },
    SettingsSection {
        title: "Preferences",
        items: &[
            toggle_item("Push Notifications", true),
            toggle_item("Biometric Login", true),
            toggle_item("Dark Mode", false),
            SettingItem {
                label: "Language",
                subtitle: Some("English (US)"),
                control: SettingControl::Link,
            },
        ],
    },
    SettingsSection {
        title: "Support",
        items: &[link_item("Help Center"), link_item("Terms & Privacy")],
    },
];

/// Shown at the bottom of the settings page.
pub const APP_VERSION: &str = "Version 1.0.0";

#[cfg(test)]
mod tests {
    use super::{
        BILL_CATEGORIES, NOTIFICATIONS, SETTINGS_SECTIONS, find_bill_category, unread_count,
    };

    #[test]
    fn two_notifications_are_unread() {
        assert_eq!(unread_count(&NOTIFICATIONS), 2);
    }

    #[test]
    fn find_bill_category_ignores_case() {
        assert_eq!(find_bill_category("water"), Some(&BILL_CATEGORIES[2]));
        assert_eq!(find_bill_category(" Cable TV "), Some(&BILL_CATEGORIES[4]));
        assert_eq!(find_bill_category("Groceries"), None);
    }

    #[test]
    fn settings_sections_have_items() {
        let titles: Vec<_> = SETTINGS_SECTIONS
            .iter()
            .map(|section| section.title)
            .collect();

        assert_eq!(titles, ["Account", "Preferences", "Support"]);
        assert!(SETTINGS_SECTIONS.iter().all(|section| !section.items.is_empty()));
    }
}

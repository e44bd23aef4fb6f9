// src/keyboards.rs

//! Menu builders. Each button carries a typed `Action` as its token.

use crate::{
    action::{Action, CountryChoice},
    conversation::step::{self, Step},
    models::{
        category::FREELANCE_CATEGORIES,
        profile::{Experience, Gender, ProfileKind},
        update::{Button, Menu},
    },
};

fn button(label: impl Into<String>, action: Action) -> Button {
    Button {
        label: label.into(),
        action: action.to_string(),
    }
}

fn menu(rows: Vec<Vec<Button>>) -> Menu {
    Menu { rows }
}

// --- Navigation ---

pub fn main_menu() -> Menu {
    menu(vec![
        vec![button("✨ Create / View Profile ✨", Action::ProfileMenu)],
        vec![button("⚙️ Settings & Help", Action::SettingsHelp)],
    ])
}

pub fn profile_type_choice() -> Menu {
    menu(vec![
        vec![button("❤️ Dating Profile", Action::KindMenu(ProfileKind::Dating))],
        vec![button("💼 Freelancer Profile", Action::FreelancerRoleChoice)],
        vec![button("🔙 Back to Main Menu", Action::MainMenu)],
    ])
}

pub fn freelancer_role_choice() -> Menu {
    menu(vec![
        vec![button("🛠️ I Want to Work (Freelancer)", Action::KindMenu(ProfileKind::Freelancer))],
        vec![button("💰 I Want to Hire (Client)", Action::KindMenu(ProfileKind::Client))],
        vec![button("🔙 Back", Action::ProfileMenu)],
    ])
}

fn short_name(kind: ProfileKind) -> &'static str {
    match kind {
        ProfileKind::Dating => "Dating",
        ProfileKind::Freelancer => "Freelancer",
        ProfileKind::Client => "Client",
    }
}

/// Per-kind profile menu; the entries depend on whether the profile exists.
pub fn kind_menu(kind: ProfileKind, profile_exists: bool) -> Menu {
    let name = short_name(kind);
    let mut rows = Vec::new();

    if profile_exists {
        rows.push(vec![button(format!("👤 My {} Profile", name), Action::View(kind))]);
        rows.push(vec![button(format!("✏️ Edit {} Profile", name), Action::Edit(kind))]);
        if kind == ProfileKind::Dating {
            rows.push(vec![button("💖 Browse Profiles", Action::BrowseStart)]);
        }
        rows.push(vec![button(format!("🗑️ Delete {} Profile", name), Action::DeleteAsk(kind))]);
    } else {
        rows.push(vec![button(format!("➕ Create {} Profile", name), Action::Create(kind))]);
    }

    let back = match kind {
        ProfileKind::Dating => button("🔙 Back to Profile Choice", Action::ProfileMenu),
        ProfileKind::Freelancer | ProfileKind::Client => button("🔙 Back", Action::FreelancerRoleChoice),
    };
    rows.push(vec![back]);
    menu(rows)
}

pub fn back(action: Action) -> Menu {
    menu(vec![vec![button("🔙 Back", action)]])
}

pub fn back_to_main_menu() -> Menu {
    menu(vec![vec![button("🔙 Back to Main Menu", Action::MainMenu)]])
}

pub fn confirmation(yes: Action, no: Action) -> Menu {
    menu(vec![vec![button("✅ Yes", yes), button("❌ No", no)]])
}

/// Lists the profiles the user owns for `/delete`.
pub fn delete_choice(kinds: &[ProfileKind]) -> Menu {
    let mut rows: Vec<Vec<Button>> = kinds
        .iter()
        .map(|kind| vec![button(format!("🗑️ Delete {} Profile", short_name(*kind)), Action::DeleteAsk(*kind))])
        .collect();
    rows.push(vec![button("🔙 Back to Main Menu", Action::MainMenu)]);
    menu(rows)
}

// --- Conversation ---

pub fn gender() -> Menu {
    menu(vec![vec![
        button("👨 Male", Action::Gender(Gender::Male)),
        button("👩 Female", Action::Gender(Gender::Female)),
        button("⚧️ Other", Action::Gender(Gender::Other)),
    ]])
}

pub fn country() -> Menu {
    menu(vec![
        vec![button("🇮🇳 India", Action::Country(CountryChoice::India))],
        vec![button("🌍 Other Country", Action::Country(CountryChoice::Other))],
    ])
}

pub fn skip() -> Menu {
    menu(vec![vec![button("➡️ Skip this step", Action::Skip)]])
}

pub fn photos(skippable: bool) -> Menu {
    let mut row = vec![button("✅ Done", Action::PhotosDone)];
    if skippable {
        row.push(button("➡️ Skip this step", Action::Skip));
    }
    menu(vec![row])
}

/// Main categories, two per row, with a done button.
pub fn categories() -> Menu {
    let mut rows: Vec<Vec<Button>> = FREELANCE_CATEGORIES
        .chunks(2)
        .enumerate()
        .map(|(chunk, pair)| {
            pair.iter()
                .enumerate()
                .map(|(offset, (name, _))| button(*name, Action::Category(chunk * 2 + offset)))
                .collect()
        })
        .collect();
    rows.push(vec![button("✅ Done", Action::CategoriesDone)]);
    menu(rows)
}

pub fn subcategories(category: usize) -> Menu {
    let subs = FREELANCE_CATEGORIES
        .get(category)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[]);

    let mut rows: Vec<Vec<Button>> = subs
        .iter()
        .enumerate()
        .map(|(i, sub)| vec![button(*sub, Action::Subcategory(category, i))])
        .collect();
    rows.push(vec![button("🔙 Back", Action::CategoryBack)]);
    menu(rows)
}

pub fn experience() -> Menu {
    menu(vec![Experience::ALL
        .into_iter()
        .map(|level| button(level.as_str(), Action::Experience(level)))
        .collect()])
}

/// One button per editable field, plus save and cancel.
pub fn edit_fields(kind: ProfileKind) -> Menu {
    let fields: Vec<Step> = step::editable(kind).collect();
    let mut rows: Vec<Vec<Button>> = fields
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|s| button(s.field_label(kind), Action::EditField(*s)))
                .collect()
        })
        .collect();
    rows.push(vec![
        button("💾 Save", Action::Save),
        button("❌ Cancel", Action::Cancel),
    ]);
    menu(rows)
}

pub fn save_or_cancel() -> Menu {
    confirmation(Action::Save, Action::Cancel)
}

// --- Matching ---

pub fn browse_preference() -> Menu {
    menu(vec![
        vec![
            button("👨 Show Male", Action::BrowsePref(Some(Gender::Male))),
            button("👩 Show Female", Action::BrowsePref(Some(Gender::Female))),
            button("🌈 Show Any", Action::BrowsePref(None)),
        ],
        vec![button("🔙 Back", Action::KindMenu(ProfileKind::Dating))],
    ])
}

pub fn browse_actions(public_id: &str) -> Menu {
    menu(vec![
        vec![
            button("❤️ Like & Request", Action::Like(public_id.to_string())),
            button("👎 Dislike", Action::Dislike(public_id.to_string())),
            button("🆕 Next", Action::BrowseNext),
        ],
        vec![
            button("🔄 Change Preference", Action::BrowseStart),
            button("🔙 Back to Menu", Action::KindMenu(ProfileKind::Dating)),
        ],
    ])
}

pub fn like_response(like_id: i64) -> Menu {
    menu(vec![vec![
        button("✅ Accept Request", Action::Accept(like_id)),
        button("❌ Reject Request", Action::Reject(like_id)),
    ]])
}

// --- Admin ---

pub fn admin_panel() -> Menu {
    menu(vec![
        vec![button("📊 Statistics", Action::AdminStats)],
        vec![button("🚩 View Reports", Action::AdminReports)],
        vec![button("🚪 Exit Admin Panel", Action::MainMenu)],
    ])
}

pub fn resolve_report(report_id: i64) -> Menu {
    menu(vec![vec![button("✅ Mark Resolved", Action::ResolveReport(report_id))]])
}

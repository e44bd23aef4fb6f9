// src/conversation/flow.rs

//! One profile conversation: the current step, the draft, and the rules that
//! turn a user input into the next step.

use crate::{
    action::{Action, CountryChoice},
    conversation::{
        draft::{DraftError, ProfileDraft},
        step::{self, Step, is_skippable, photos_required},
    },
    models::{
        category::{self, FREELANCE_CATEGORIES},
        profile::{COUNTRY_INDIA, COUNTRY_OTHER, Location, ProfileDetails, ProfileKind},
    },
    utils::validation::{
        BIO_LIMIT, COUNTRY_LIMIT, LONG_TEXT_LIMIT, RATE_LIMIT, SHORT_TEXT_LIMIT, is_valid_name,
        is_valid_text, parse_age, title_case,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Walks every step of the kind in order.
    Create,
    /// Starts at `EditChoice`; each completed field returns to `ConfirmSave`.
    Edit,
}

/// What a user sent while a flow was active.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    /// File id of the largest available size.
    Photo(String),
    Location { latitude: f64, longitude: f64 },
    Choice(Action),
    /// `/skip` or the skip button.
    Skip,
    /// `/donephotos` or the done button.
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Input rejected or only partially consumed; the step is unchanged.
    Stay(String),
    /// The flow is on a new step that must be prompted for.
    Advanced { notice: Option<String> },
    /// Every required field is present and the user confirmed.
    Commit(ProfileDetails),
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
pub struct FlowLimits {
    pub max_photos: usize,
}

#[derive(Debug, Clone)]
pub struct Flow {
    pub kind: ProfileKind,
    pub step: Step,
    pub mode: Mode,
    pub draft: ProfileDraft,
}

impl Flow {
    pub fn create(kind: ProfileKind) -> Self {
        Self {
            kind,
            step: step::first(kind),
            mode: Mode::Create,
            draft: ProfileDraft::default(),
        }
    }

    /// Edit flow seeded from a stored profile.
    pub fn edit(kind: ProfileKind, details: &ProfileDetails) -> Self {
        Self {
            kind,
            step: Step::EditChoice,
            mode: Mode::Edit,
            draft: ProfileDraft::from_details(details),
        }
    }

    fn advance(&mut self, notice: Option<String>) -> Reaction {
        self.step = match self.mode {
            Mode::Create => step::after(self.kind, self.step),
            Mode::Edit => Step::ConfirmSave,
        };
        Reaction::Advanced { notice }
    }

    fn goto(&mut self, step: Step) -> Reaction {
        self.step = step;
        Reaction::Advanced { notice: None }
    }

    /// Feeds one input to the current step.
    pub fn apply(&mut self, input: Input, limits: &FlowLimits) -> Reaction {
        let input = match input {
            Input::Choice(Action::Skip) => Input::Skip,
            Input::Choice(Action::PhotosDone) => Input::Done,
            other => other,
        };

        if input == Input::Choice(Action::Cancel) {
            return Reaction::Cancelled;
        }
        if input == Input::Skip && !is_skippable(self.kind, self.step) {
            return Reaction::Stay("This step can't be skipped.".to_string());
        }

        let kind = self.kind;
        let draft = &mut self.draft;

        match (self.step, input) {
            (Step::AskName, Input::Text(text)) => {
                let name = text.trim();
                if !is_valid_name(name) || !is_valid_text(name, SHORT_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskName));
                }
                draft.name = Some(name.to_string());
                self.advance(None)
            }

            (Step::AskGender, Input::Choice(Action::Gender(gender))) => {
                draft.gender = Some(gender);
                self.advance(None)
            }

            (Step::AskAge, Input::Text(text)) => match parse_age(&text) {
                Some(age) => {
                    draft.age = Some(age);
                    self.advance(None)
                }
                None => Reaction::Stay(hint(kind, Step::AskAge)),
            },
            (Step::AskAge, Input::Skip) => {
                draft.age = None;
                self.advance(None)
            }

            (Step::AskCountry, Input::Choice(Action::Country(CountryChoice::India))) => {
                draft.country = Some(COUNTRY_INDIA.to_string());
                draft.custom_country = None;
                self.advance(None)
            }
            (Step::AskCountry, Input::Choice(Action::Country(CountryChoice::Other))) => {
                draft.country = Some(COUNTRY_OTHER.to_string());
                self.goto(Step::AskCustomCountry)
            }

            (Step::AskCustomCountry, Input::Text(text)) => {
                let country = text.trim();
                if !is_valid_text(country, COUNTRY_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskCustomCountry));
                }
                draft.custom_country = Some(country.to_string());
                self.advance(None)
            }

            (Step::AskBio, Input::Text(text)) => {
                let bio = text.trim();
                if !is_valid_text(bio, BIO_LIMIT) {
                    return Reaction::Stay(format!(
                        "⚠️ Your bio is too long (max {} characters). Please shorten it or type /skip.",
                        BIO_LIMIT
                    ));
                }
                draft.bio = Some(bio.to_string());
                self.advance(None)
            }
            (Step::AskBio, Input::Skip) => {
                draft.bio = None;
                self.advance(Some("Bio skipped.".to_string()))
            }

            (Step::AskLocation, Input::Location { latitude, longitude }) => {
                draft.location = Some(Location::Coordinates { latitude, longitude });
                self.advance(None)
            }
            (Step::AskLocation, Input::Text(text)) => {
                if !is_valid_text(&text, SHORT_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskLocation));
                }
                draft.location = Some(Location::City(title_case(&text)));
                self.advance(None)
            }

            (Step::AskPhotos, Input::Photo(file_id)) => {
                if draft.photos.len() >= limits.max_photos {
                    return self.advance(None);
                }
                draft.photos.push(file_id);
                let count = draft.photos.len();
                if count >= limits.max_photos {
                    return self.advance(Some("Maximum photos received!".to_string()));
                }
                Reaction::Stay(format!(
                    "Photo {} received! You can add {} more, or type /donephotos.",
                    count,
                    limits.max_photos - count
                ))
            }
            (Step::AskPhotos, Input::Done) => {
                if photos_required(kind) && draft.photos.is_empty() {
                    return Reaction::Stay(
                        "You haven't added any photos yet. Please send at least one photo.".to_string(),
                    );
                }
                self.advance(None)
            }
            (Step::AskPhotos, Input::Skip) => {
                draft.photos.clear();
                self.advance(None)
            }

            (Step::AskCategory, Input::Choice(Action::Category(index)))
                if index < FREELANCE_CATEGORIES.len() =>
            {
                draft.pending_category = Some(index);
                self.goto(Step::AskSubcategory)
            }
            (Step::AskCategory, Input::Choice(Action::CategoriesDone)) => {
                if draft.categories.is_empty() {
                    return Reaction::Stay("Please pick at least one category first.".to_string());
                }
                self.advance(None)
            }

            (Step::AskSubcategory, Input::Choice(Action::Subcategory(cat, sub)))
                if draft.pending_category == Some(cat) =>
            {
                let Some(label) = category::pick_label(cat, sub) else {
                    return Reaction::Stay(hint(kind, Step::AskSubcategory));
                };
                let notice = if draft.categories.contains(&label) {
                    format!("Already selected: {}", label)
                } else {
                    let notice = format!("Added: {}", label);
                    draft.categories.push(label);
                    notice
                };
                draft.pending_category = None;
                self.step = Step::AskCategory;
                Reaction::Advanced { notice: Some(notice) }
            }
            (Step::AskSubcategory, Input::Choice(Action::CategoryBack)) => {
                draft.pending_category = None;
                self.goto(Step::AskCategory)
            }

            (Step::AskSkills, Input::Text(text)) => {
                if !is_valid_text(&text, LONG_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskSkills));
                }
                draft.skills = Some(text.trim().to_string());
                self.advance(None)
            }
            (Step::AskSkills, Input::Skip) => {
                draft.skills = None;
                self.advance(None)
            }

            (Step::AskRate, Input::Text(text)) => {
                if !is_valid_text(&text, RATE_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskRate));
                }
                draft.rate = Some(text.trim().to_string());
                self.advance(None)
            }
            (Step::AskRate, Input::Skip) => {
                draft.rate = None;
                self.advance(None)
            }

            (Step::AskExperience, Input::Choice(Action::Experience(level))) => {
                draft.experience = Some(level);
                self.advance(None)
            }

            (Step::AskProjectDetails, Input::Text(text)) => {
                if !is_valid_text(&text, LONG_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskProjectDetails));
                }
                draft.project_details = Some(text.trim().to_string());
                self.advance(None)
            }

            (Step::AskBudget, Input::Text(text)) => {
                if !is_valid_text(&text, SHORT_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskBudget));
                }
                draft.budget = Some(text.trim().to_string());
                self.advance(None)
            }
            (Step::AskBudget, Input::Skip) => {
                draft.budget = None;
                self.advance(None)
            }

            (Step::AskTimeline, Input::Text(text)) => {
                if !is_valid_text(&text, SHORT_TEXT_LIMIT) {
                    return Reaction::Stay(hint(kind, Step::AskTimeline));
                }
                draft.timeline = Some(text.trim().to_string());
                self.advance(None)
            }
            (Step::AskTimeline, Input::Skip) => {
                draft.timeline = None;
                self.advance(None)
            }

            (Step::EditChoice, Input::Choice(Action::EditField(field)))
                if step::editable(kind).any(|s| s == field) =>
            {
                // Photos and categories are collected again from scratch.
                match field {
                    Step::AskPhotos => draft.photos.clear(),
                    Step::AskCategory => draft.categories.clear(),
                    _ => {}
                }
                self.goto(field)
            }
            (Step::EditChoice, Input::Choice(Action::Save)) => self.goto(Step::ConfirmSave),

            (Step::ConfirmSave, Input::Choice(Action::Save)) => match draft.to_details(kind) {
                Ok(details) => Reaction::Commit(details),
                Err(err) => {
                    let notice = match err {
                        DraftError::NoPhotos => "You haven't added any photos yet. Please send at least one photo.",
                        DraftError::Missing(_) => "Some details are still missing. Let's fill them in.",
                    };
                    self.step = err.step();
                    Reaction::Advanced { notice: Some(notice.to_string()) }
                }
            },

            (step, _) => Reaction::Stay(hint(kind, step)),
        }
    }
}

/// Guidance shown when the input does not fit the current step.
pub fn hint(kind: ProfileKind, step: Step) -> String {
    match step {
        Step::AskName if kind == ProfileKind::Client => {
            "⚠️ Please enter a valid name or company name. Avoid using '@' symbols or phone numbers.".to_string()
        }
        Step::AskName => {
            "⚠️ Please enter a valid name. Avoid using '@' symbols or phone numbers.\nWhat is your name?".to_string()
        }
        Step::AskGender => "Please select your gender using the buttons.".to_string(),
        Step::AskAge if is_skippable(kind, step) => {
            "⚠️ Invalid age. Please enter a number between 18 and 99, or type /skip.".to_string()
        }
        Step::AskAge => "⚠️ Invalid age. Please enter a number between 18 and 99.".to_string(),
        Step::AskCountry => "Please choose your country using the buttons.".to_string(),
        Step::AskCustomCountry => format!(
            "Please enter a valid country name (max {} characters).",
            COUNTRY_LIMIT
        ),
        Step::AskBio => format!(
            "Please type a short bio (max {} characters), or /skip.",
            BIO_LIMIT
        ),
        Step::AskLocation => {
            "Invalid input. Please send your location using the button or type your city name.".to_string()
        }
        Step::AskPhotos => "Please send a photo or type /donephotos when finished.".to_string(),
        Step::AskCategory => "Please choose a category using the buttons, then press ✅ Done.".to_string(),
        Step::AskSubcategory => "Please choose a subcategory using the buttons.".to_string(),
        Step::AskSkills => format!(
            "Please describe your skills and portfolio (max {} characters), or /skip.",
            LONG_TEXT_LIMIT
        ),
        Step::AskRate => format!(
            "Please type your rate, e.g. $20/hour (max {} characters), or /skip.",
            RATE_LIMIT
        ),
        Step::AskExperience => "Please select your experience level using the buttons.".to_string(),
        Step::AskProjectDetails => format!(
            "Please describe your project (max {} characters).",
            LONG_TEXT_LIMIT
        ),
        Step::AskBudget => format!(
            "Please type your budget (max {} characters), or /skip.",
            SHORT_TEXT_LIMIT
        ),
        Step::AskTimeline => format!(
            "Please type your timeline (max {} characters), or /skip.",
            SHORT_TEXT_LIMIT
        ),
        Step::EditChoice => "Please choose the field you want to edit.".to_string(),
        Step::ConfirmSave => "Please use the buttons below to save or cancel.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{DatingDetails, Experience, Gender};

    const LIMITS: FlowLimits = FlowLimits { max_photos: 3 };

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    fn choice(action: Action) -> Input {
        Input::Choice(action)
    }

    fn feed(flow: &mut Flow, inputs: Vec<Input>) -> Reaction {
        let mut last = Reaction::Cancelled;
        for input in inputs {
            last = flow.apply(input, &LIMITS);
        }
        last
    }

    fn alex_until_photos() -> Flow {
        let mut flow = Flow::create(ProfileKind::Dating);
        feed(
            &mut flow,
            vec![
                text("Alex"),
                choice(Action::Gender(Gender::Male)),
                text("25"),
                choice(Action::Country(CountryChoice::India)),
                Input::Skip,
                text("pune"),
            ],
        );
        flow
    }

    #[test]
    fn dating_flow_collects_every_field() {
        let mut flow = alex_until_photos();
        assert_eq!(flow.step, Step::AskPhotos);

        let reaction = feed(&mut flow, vec![Input::Photo("p1".to_string()), Input::Done]);
        assert_eq!(reaction, Reaction::Advanced { notice: None });
        assert_eq!(flow.step, Step::ConfirmSave);

        let reaction = flow.apply(choice(Action::Save), &LIMITS);
        let expected = DatingDetails {
            name: "Alex".to_string(),
            gender: Gender::Male,
            age: 25,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            bio: None,
            location: Some(Location::City("Pune".to_string())),
            photos: vec!["p1".to_string()],
        };
        assert_eq!(reaction, Reaction::Commit(ProfileDetails::Dating(expected)));
    }

    #[test]
    fn finishing_photos_without_any_stays_on_photos() {
        let mut flow = alex_until_photos();
        let reaction = flow.apply(Input::Done, &LIMITS);
        assert!(matches!(reaction, Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskPhotos);

        let reaction = flow.apply(choice(Action::PhotosDone), &LIMITS);
        assert!(matches!(reaction, Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskPhotos);
    }

    #[test]
    fn dating_photos_cannot_be_skipped() {
        let mut flow = alex_until_photos();
        assert!(matches!(flow.apply(Input::Skip, &LIMITS), Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskPhotos);
    }

    #[test]
    fn reaching_the_photo_limit_moves_to_confirmation() {
        let mut flow = alex_until_photos();
        let reaction = feed(
            &mut flow,
            vec![
                Input::Photo("p1".to_string()),
                Input::Photo("p2".to_string()),
                Input::Photo("p3".to_string()),
            ],
        );
        assert_eq!(
            reaction,
            Reaction::Advanced { notice: Some("Maximum photos received!".to_string()) }
        );
        assert_eq!(flow.step, Step::ConfirmSave);
        assert_eq!(flow.draft.photos.len(), 3);
    }

    #[test]
    fn invalid_answers_do_not_advance() {
        let mut flow = Flow::create(ProfileKind::Dating);
        assert!(matches!(flow.apply(text("@alex"), &LIMITS), Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskName);

        feed(&mut flow, vec![text("Alex"), choice(Action::Gender(Gender::Female))]);
        for bad in ["17", "100", "twenty"] {
            assert!(matches!(flow.apply(text(bad), &LIMITS), Reaction::Stay(_)));
            assert_eq!(flow.step, Step::AskAge);
        }

        // Text where a button is expected.
        feed(&mut flow, vec![text("30")]);
        assert!(matches!(flow.apply(text("India"), &LIMITS), Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskCountry);
    }

    #[test]
    fn other_country_asks_for_its_name() {
        let mut flow = Flow::create(ProfileKind::Dating);
        feed(
            &mut flow,
            vec![
                text("Alex"),
                choice(Action::Gender(Gender::Male)),
                text("25"),
                choice(Action::Country(CountryChoice::Other)),
            ],
        );
        assert_eq!(flow.step, Step::AskCustomCountry);

        feed(&mut flow, vec![text("  Nepal ")]);
        assert_eq!(flow.step, Step::AskBio);
        assert_eq!(flow.draft.country.as_deref(), Some(COUNTRY_OTHER));
        assert_eq!(flow.draft.custom_country.as_deref(), Some("Nepal"));
    }

    #[test]
    fn long_bio_is_rejected() {
        let mut flow = Flow::create(ProfileKind::Dating);
        feed(
            &mut flow,
            vec![
                text("Alex"),
                choice(Action::Gender(Gender::Male)),
                text("25"),
                choice(Action::Country(CountryChoice::India)),
            ],
        );
        assert!(matches!(flow.apply(text(&"a".repeat(201)), &LIMITS), Reaction::Stay(_)));
        assert_eq!(flow.step, Step::AskBio);
    }

    #[test]
    fn cancel_works_from_any_step() {
        let mut flow = alex_until_photos();
        assert_eq!(flow.apply(choice(Action::Cancel), &LIMITS), Reaction::Cancelled);
    }

    #[test]
    fn freelancer_flow_loops_over_categories() {
        let mut flow = Flow::create(ProfileKind::Freelancer);
        feed(
            &mut flow,
            vec![text("Sam"), Input::Skip, choice(Action::Country(CountryChoice::India))],
        );
        assert_eq!(flow.step, Step::AskCategory);

        // Done before any pick is refused.
        assert!(matches!(flow.apply(choice(Action::CategoriesDone), &LIMITS), Reaction::Stay(_)));

        feed(&mut flow, vec![choice(Action::Category(2)), choice(Action::Subcategory(2, 0))]);
        assert_eq!(flow.step, Step::AskCategory);
        feed(&mut flow, vec![choice(Action::Category(2)), choice(Action::Subcategory(2, 0))]);
        assert_eq!(flow.draft.categories, vec!["Web Development & Programming / Frontend Development"]);

        feed(
            &mut flow,
            vec![
                choice(Action::CategoriesDone),
                Input::Skip,
                text("$20/hour"),
                choice(Action::Experience(Experience::Expert)),
                Input::Skip,
            ],
        );
        assert_eq!(flow.step, Step::ConfirmSave);

        let Reaction::Commit(ProfileDetails::Freelancer(details)) = flow.apply(choice(Action::Save), &LIMITS) else {
            panic!("freelancer flow should commit");
        };
        assert_eq!(details.age, None);
        assert_eq!(details.rate.as_deref(), Some("$20/hour"));
        assert!(details.photos.is_empty());
    }

    #[test]
    fn edit_flow_returns_to_confirmation_after_one_field() {
        let stored = ProfileDetails::Dating(DatingDetails {
            name: "Alex".to_string(),
            gender: Gender::Male,
            age: 25,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            bio: None,
            location: Some(Location::City("Pune".to_string())),
            photos: vec!["p1".to_string()],
        });
        let mut flow = Flow::edit(ProfileKind::Dating, &stored);
        assert_eq!(flow.step, Step::EditChoice);

        feed(&mut flow, vec![choice(Action::EditField(Step::AskAge)), text("26")]);
        assert_eq!(flow.step, Step::ConfirmSave);

        let Reaction::Commit(ProfileDetails::Dating(details)) = flow.apply(choice(Action::Save), &LIMITS) else {
            panic!("edit should commit");
        };
        assert_eq!(details.age, 26);
        assert_eq!(details.name, "Alex");
        assert_eq!(details.photos, vec!["p1".to_string()]);
    }

    #[test]
    fn editing_photos_starts_from_an_empty_list() {
        let stored = ProfileDetails::Dating(DatingDetails {
            name: "Alex".to_string(),
            gender: Gender::Male,
            age: 25,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            bio: None,
            location: Some(Location::City("Pune".to_string())),
            photos: vec!["p1".to_string(), "p2".to_string()],
        });
        let mut flow = Flow::edit(ProfileKind::Dating, &stored);
        feed(&mut flow, vec![choice(Action::EditField(Step::AskPhotos))]);
        assert!(flow.draft.photos.is_empty());

        feed(&mut flow, vec![Input::Photo("p9".to_string()), Input::Done]);
        assert_eq!(flow.step, Step::ConfirmSave);
        assert_eq!(flow.draft.photos, vec!["p9".to_string()]);
    }

    #[test]
    fn edit_menu_rejects_fields_of_other_kinds() {
        let stored = ProfileDetails::Dating(DatingDetails {
            name: "Alex".to_string(),
            gender: Gender::Male,
            age: 25,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            bio: None,
            location: None,
            photos: vec!["p1".to_string()],
        });
        let mut flow = Flow::edit(ProfileKind::Dating, &stored);
        assert!(matches!(
            flow.apply(choice(Action::EditField(Step::AskBudget)), &LIMITS),
            Reaction::Stay(_)
        ));
        assert_eq!(flow.step, Step::EditChoice);

        // A stored profile without a location is sent back to fill it in.
        feed(&mut flow, vec![choice(Action::Save)]);
        assert_eq!(flow.step, Step::ConfirmSave);
        assert!(matches!(flow.apply(choice(Action::Save), &LIMITS), Reaction::Advanced { .. }));
        assert_eq!(flow.step, Step::AskLocation);
    }
}

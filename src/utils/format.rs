// src/utils/format.rs

//! Profile cards: an explicit, ordered field list per profile variant, rendered as
//! labelled lines. `parse_card` reads such a card back into labelled values.

use crate::models::profile::{
    COUNTRY_INDIA, COUNTRY_OTHER, ClientDetails, DatingDetails, FreelancerDetails, Location,
    ProfileDetails,
};

const LIST_SEPARATOR: &str = "; ";
const ID_PREFIX: &str = "🆔 Unique ID: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Name,
    Company,
    Age,
    Gender,
    Country,
    Bio,
    Location,
    Photos,
    Categories,
    Skills,
    Rate,
    Experience,
    Project,
    Budget,
    Timeline,
}

impl Label {
    const ALL: [Label; 15] = [
        Label::Name,
        Label::Company,
        Label::Age,
        Label::Gender,
        Label::Country,
        Label::Bio,
        Label::Location,
        Label::Photos,
        Label::Categories,
        Label::Skills,
        Label::Rate,
        Label::Experience,
        Label::Project,
        Label::Budget,
        Label::Timeline,
    ];

    fn icon(self) -> &'static str {
        match self {
            Label::Name => "👤",
            Label::Company => "🏢",
            Label::Age => "🎂",
            Label::Gender => "🚻",
            Label::Country => "🌍",
            Label::Bio => "📝",
            Label::Location => "📍",
            Label::Photos => "🖼️",
            Label::Categories => "🗂️",
            Label::Skills => "🛠️",
            Label::Rate => "💵",
            Label::Experience => "📈",
            Label::Project => "📋",
            Label::Budget => "💰",
            Label::Timeline => "⏳",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Label::Name => "Name",
            Label::Company => "Name / Company",
            Label::Age => "Age",
            Label::Gender => "Gender",
            Label::Country => "Country",
            Label::Bio => "Bio",
            Label::Location => "Location",
            Label::Photos => "Photos",
            Label::Categories => "Categories",
            Label::Skills => "Skills & Portfolio",
            Label::Rate => "Rate",
            Label::Experience => "Experience",
            Label::Project => "Project",
            Label::Budget => "Budget",
            Label::Timeline => "Timeline",
        }
    }

    fn prefix(self) -> String {
        format!("{} {}: ", self.icon(), self.text())
    }
}

pub type Fields = Vec<(Label, String)>;

fn country_text(country: &str, custom_country: Option<&str>) -> String {
    custom_country.unwrap_or(country).to_string()
}

fn location_text(location: &Location) -> String {
    match location {
        Location::City(city) => city.clone(),
        Location::Coordinates { latitude, longitude } => format!("{}, {}", latitude, longitude),
    }
}

fn push_opt(fields: &mut Fields, label: Label, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        fields.push((label, v.to_string()));
    }
}

pub fn dating_fields(d: &DatingDetails) -> Fields {
    let mut fields = vec![
        (Label::Name, d.name.clone()),
        (Label::Age, d.age.to_string()),
        (Label::Gender, d.gender.to_string()),
        (Label::Country, country_text(&d.country, d.custom_country.as_deref())),
    ];
    push_opt(&mut fields, Label::Bio, d.bio.as_deref());
    if let Some(location) = &d.location {
        fields.push((Label::Location, location_text(location)));
    }
    if !d.photos.is_empty() {
        fields.push((Label::Photos, d.photos.len().to_string()));
    }
    fields
}

pub fn freelancer_fields(d: &FreelancerDetails) -> Fields {
    let mut fields = vec![(Label::Name, d.name.clone())];
    if let Some(age) = d.age {
        fields.push((Label::Age, age.to_string()));
    }
    fields.push((Label::Country, country_text(&d.country, d.custom_country.as_deref())));
    fields.push((Label::Categories, d.categories.join(LIST_SEPARATOR)));
    push_opt(&mut fields, Label::Skills, d.skills_portfolio.as_deref());
    push_opt(&mut fields, Label::Rate, d.rate.as_deref());
    fields.push((Label::Experience, d.experience.to_string()));
    if !d.photos.is_empty() {
        fields.push((Label::Photos, d.photos.len().to_string()));
    }
    fields
}

pub fn client_fields(d: &ClientDetails) -> Fields {
    let mut fields = vec![
        (Label::Company, d.name_company.clone()),
        (Label::Country, country_text(&d.country, d.custom_country.as_deref())),
        (Label::Project, d.project_details.clone()),
    ];
    push_opt(&mut fields, Label::Budget, d.budget.as_deref());
    push_opt(&mut fields, Label::Timeline, d.timeline.as_deref());
    fields.push((Label::Categories, d.required_categories.join(LIST_SEPARATOR)));
    fields
}

pub fn fields_for(details: &ProfileDetails) -> Fields {
    match details {
        ProfileDetails::Dating(d) => dating_fields(d),
        ProfileDetails::Freelancer(d) => freelancer_fields(d),
        ProfileDetails::Client(d) => client_fields(d),
    }
}

pub fn render(fields: &[(Label, String)], public_id: Option<&str>) -> String {
    let mut text = String::new();
    for (label, value) in fields {
        text.push_str(&label.prefix());
        text.push_str(value);
        text.push('\n');
    }
    if let Some(id) = public_id {
        text.push_str(&format!("\n{}`{}` (For reporting)", ID_PREFIX, id));
    }
    text
}

/// Renders a profile for display, appending the public identifier when known.
pub fn format_profile(details: &ProfileDetails, public_id: Option<&str>) -> String {
    render(&fields_for(details), public_id)
}

/// Labelled values read back from a rendered card.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedCard {
    pub fields: Fields,
    pub public_id: Option<String>,
}

impl ParsedCard {
    pub fn get(&self, label: Label) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

fn match_label(line: &str) -> Option<(Label, &str)> {
    // "Name / Company" and "Name" share a prefix, so compare whole prefixes.
    Label::ALL.iter().find_map(|label| {
        line.strip_prefix(label.prefix().as_str())
            .map(|rest| (*label, rest))
    })
}

/// Reads a card produced by `render`. Lines that carry no label continue the
/// previous value (multi-line bios and project descriptions).
pub fn parse_card(text: &str) -> ParsedCard {
    let mut card = ParsedCard::default();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(ID_PREFIX) {
            let id = rest.split('`').nth(1).unwrap_or(rest).trim();
            card.public_id = Some(id.to_string());
            continue;
        }
        if let Some((label, value)) = match_label(line) {
            card.fields.push((label, value.to_string()));
        } else if let Some((_, value)) = card.fields.last_mut() {
            value.push('\n');
            value.push_str(line);
        }
    }

    for (_, value) in card.fields.iter_mut() {
        let trimmed = value.trim_end_matches('\n').len();
        value.truncate(trimmed);
    }
    card
}

fn parse_location(value: &str) -> Location {
    let coords = value
        .split_once(", ")
        .and_then(|(lat, lon)| Some((lat.parse::<f64>().ok()?, lon.parse::<f64>().ok()?)));
    match coords {
        Some((latitude, longitude)) => Location::Coordinates { latitude, longitude },
        None => Location::City(value.to_string()),
    }
}

/// Rebuilds dating details from a rendered card.
/// Photo references are not part of the card, so `photos` comes back empty.
pub fn parse_dating_card(text: &str) -> Option<DatingDetails> {
    let card = parse_card(text);
    let country_value = card.get(Label::Country)?;
    let (country, custom_country) = if country_value == COUNTRY_INDIA {
        (COUNTRY_INDIA.to_string(), None)
    } else {
        (COUNTRY_OTHER.to_string(), Some(country_value.to_string()))
    };

    Some(DatingDetails {
        name: card.get(Label::Name)?.to_string(),
        gender: card.get(Label::Gender)?.parse().ok()?,
        age: card.get(Label::Age)?.parse().ok()?,
        country,
        custom_country,
        bio: card.get(Label::Bio).map(str::to_string),
        location: card.get(Label::Location).map(parse_location),
        photos: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Experience, Gender};

    fn alex() -> DatingDetails {
        DatingDetails {
            name: "Alex".to_string(),
            gender: Gender::Male,
            age: 25,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            bio: None,
            location: Some(Location::City("Pune".to_string())),
            photos: vec!["p1".to_string()],
        }
    }

    #[test]
    fn dating_card_has_fixed_order_and_omits_absent_fields() {
        let text = format_profile(&ProfileDetails::Dating(alex()), Some("D_1a2b3c4d"));
        let expected = "👤 Name: Alex\n🎂 Age: 25\n🚻 Gender: Male\n🌍 Country: India\n\
                        📍 Location: Pune\n🖼️ Photos: 1\n\n🆔 Unique ID: `D_1a2b3c4d` (For reporting)";
        assert_eq!(text, expected);
        assert!(!text.contains("Bio"));
    }

    #[test]
    fn dating_card_round_trips_entered_fields() {
        let mut details = alex();
        details.bio = Some("Coffee, books\nand long walks".to_string());
        details.country = COUNTRY_OTHER.to_string();
        details.custom_country = Some("Nepal".to_string());

        let text = format_profile(&ProfileDetails::Dating(details.clone()), Some("D_00ff00ff"));
        let parsed = parse_dating_card(&text).expect("card parses");

        assert_eq!(parsed, DatingDetails { photos: Vec::new(), ..details });
        assert_eq!(parse_card(&text).public_id.as_deref(), Some("D_00ff00ff"));
    }

    #[test]
    fn shared_coordinates_survive_the_card() {
        let shared = Location::Coordinates { latitude: 18.5204303, longitude: 73.8567434 };
        let mut details = alex();
        details.location = Some(shared.clone());
        let text = format_profile(&ProfileDetails::Dating(details), None);
        assert!(text.contains("📍 Location: 18.5204303, 73.8567434\n"));

        let parsed = parse_dating_card(&text).unwrap();
        assert_eq!(parsed.location, Some(shared));
    }

    #[test]
    fn whole_degree_coordinates_are_not_read_as_a_city() {
        let mut details = alex();
        details.location = Some(Location::Coordinates { latitude: -33.0, longitude: 151.0 });
        let text = format_profile(&ProfileDetails::Dating(details), None);
        let parsed = parse_dating_card(&text).unwrap();
        assert_eq!(
            parsed.location,
            Some(Location::Coordinates { latitude: -33.0, longitude: 151.0 })
        );
    }

    #[test]
    fn client_name_label_is_not_confused_with_name() {
        let client = ClientDetails {
            name_company: "Acme".to_string(),
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            project_details: "Landing page".to_string(),
            budget: Some("$500".to_string()),
            timeline: None,
            required_categories: vec!["Graphic Design & Creative / Web Design".to_string()],
        };
        let card = parse_card(&format_profile(&ProfileDetails::Client(client), None));
        assert_eq!(card.get(Label::Company), Some("Acme"));
        assert_eq!(card.get(Label::Name), None);
        assert_eq!(card.get(Label::Budget), Some("$500"));
        assert_eq!(card.get(Label::Timeline), None);
    }

    #[test]
    fn freelancer_categories_keep_embedded_commas() {
        let freelancer = FreelancerDetails {
            name: "Sam".to_string(),
            age: None,
            country: COUNTRY_INDIA.to_string(),
            custom_country: None,
            categories: vec![
                "Writing & Content Creation / Script Writing (YouTube, Ads)".to_string(),
                "Audio & Music / Voice Over".to_string(),
            ],
            skills_portfolio: None,
            rate: Some("$20/hour".to_string()),
            experience: Experience::Expert,
            photos: Vec::new(),
        };
        let card = parse_card(&format_profile(&ProfileDetails::Freelancer(freelancer.clone()), None));
        let categories: Vec<String> = card
            .get(Label::Categories)
            .unwrap()
            .split(LIST_SEPARATOR)
            .map(str::to_string)
            .collect();
        assert_eq!(categories, freelancer.categories);
        assert_eq!(card.get(Label::Experience), Some("Expert"));
        assert_eq!(card.get(Label::Age), None);
    }
}

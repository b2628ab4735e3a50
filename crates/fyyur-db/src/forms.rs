//! Submitted field maps for venues, artists and shows, and the format
//! rules they must pass before the store is touched.

use std::fmt;

use regex::Regex;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::{artist, venue};

// ─── Constants ──────────────────────────────────────────────────────────

/// Phone numbers are US-style `xxx-xxx-xxxx`.
const PHONE_PATTERN: &str = r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$";

/// Column widths: most text columns are `VARCHAR(120)`, image links and
/// seeking descriptions `VARCHAR(500)`.
const SHORT_TEXT_MAX: usize = 120;
const LONG_TEXT_MAX: usize = 500;

/// Message shown when a submission is bounced back for correction.
pub const RESUBMIT_NOTICE: &str =
    "Please make sure that Phone number format is xxx-xxx-xxxx and Links start with http://";

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

// ─── Errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every rule a submission broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ─── Rule checks ────────────────────────────────────────────────────────

#[derive(Default)]
struct Checks(Vec<FieldError>);

impl Checks {
    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.fail(field, "this field is required");
        }
    }

    /// Length is counted in characters on the trimmed value, as stored.
    fn max_len(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        let Some(value) = value.map(str::trim) else {
            return;
        };
        let len = value.chars().count();
        if len > max {
            self.fail(
                field,
                format!("must be at most {max} characters, got {len}"),
            );
        }
    }

    fn state(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !STATES.contains(&value) {
            self.fail("state", format!("'{value}' is not a valid state"));
        }
    }

    fn genres(&mut self, genres: &[String]) {
        for genre in genres {
            if !GENRES.contains(&genre.as_str()) {
                self.fail("genres", format!("'{genre}' is not a valid genre"));
            }
        }
    }

    fn phone(&mut self, value: Option<&str>) {
        let Some(phone) = value.map(str::trim).filter(|p| !p.is_empty()) else {
            return;
        };
        match Regex::new(PHONE_PATTERN) {
            Ok(re) if re.is_match(phone) => {}
            Ok(_) => self.fail("phone", "must be formatted xxx-xxx-xxxx"),
            Err(e) => self.fail("phone", format!("invalid phone regex: {e}")),
        }
    }

    /// Links must be absolute http(s) URLs.
    fn link(&mut self, field: &'static str, value: Option<&str>) {
        let Some(link) = value.map(str::trim).filter(|l| !l.is_empty()) else {
            return;
        };
        match url::Url::parse(link) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => self.fail(
                field,
                format!("must start with http:// or https://, got '{}'", parsed.scheme()),
            ),
            Err(_) => self.fail(field, format!("'{link}' is not a valid URL")),
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

/// Trim an optional text field; blank input is stored as NULL.
pub(crate) fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ─── Forms ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::default();
        checks.required("name", &self.name);
        checks.required("city", &self.city);
        checks.required("state", &self.state);
        checks.state(&self.state);
        checks.required("address", &self.address);
        checks.phone(self.phone.as_deref());
        checks.genres(&self.genres);
        checks.link("image_link", self.image_link.as_deref());
        checks.link("facebook_link", self.facebook_link.as_deref());
        checks.link("website_link", self.website_link.as_deref());
        checks.max_len("city", Some(self.city.as_str()), SHORT_TEXT_MAX);
        checks.max_len("address", Some(self.address.as_str()), SHORT_TEXT_MAX);
        checks.max_len("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX);
        checks.max_len("website_link", self.website_link.as_deref(), SHORT_TEXT_MAX);
        checks.max_len("image_link", self.image_link.as_deref(), LONG_TEXT_MAX);
        checks.max_len(
            "seeking_description",
            self.seeking_description.as_deref(),
            LONG_TEXT_MAX,
        );
        checks.finish()
    }
}

/// Edit forms start from the stored record. The `website` column is
/// submitted back as `website_link`.
impl From<&venue::Model> for VenueForm {
    fn from(v: &venue::Model) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            address: v.address.clone(),
            phone: v.phone.clone(),
            image_link: v.image_link.clone(),
            genres: v.genres.0.clone(),
            facebook_link: v.facebook_link.clone(),
            website_link: v.website.clone(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::default();
        checks.required("name", &self.name);
        checks.required("city", &self.city);
        checks.required("state", &self.state);
        checks.state(&self.state);
        checks.phone(self.phone.as_deref());
        checks.genres(&self.genres);
        checks.link("image_link", self.image_link.as_deref());
        checks.link("facebook_link", self.facebook_link.as_deref());
        checks.link("website_link", self.website_link.as_deref());
        checks.max_len("city", Some(self.city.as_str()), SHORT_TEXT_MAX);
        checks.max_len("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX);
        checks.max_len("website_link", self.website_link.as_deref(), SHORT_TEXT_MAX);
        checks.max_len("image_link", self.image_link.as_deref(), LONG_TEXT_MAX);
        checks.max_len(
            "seeking_description",
            self.seeking_description.as_deref(),
            LONG_TEXT_MAX,
        );
        checks.finish()
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(a: &artist::Model) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            phone: a.phone.clone(),
            image_link: a.image_link.clone(),
            genres: a.genres.0.clone(),
            facebook_link: a.facebook_link.clone(),
            website_link: a.website.clone(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    /// Defaults to the submission instant when omitted.
    pub start_time: Option<DateTimeWithTimeZone>,
}

impl ShowForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::default();
        if self.artist_id <= 0 {
            checks.fail("artist_id", "must be a positive id");
        }
        if self.venue_id <= 0 {
            checks.fail("venue_id", "must be a positive id");
        }
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn musical_hop() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom St".into(),
            phone: Some("123-123-1234".into()),
            image_link: Some("https://images.unsplash.com/photo-1543900694".into()),
            genres: vec!["Jazz".into(), "Reggae".into()],
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".into()),
        }
    }

    #[test]
    fn test_valid_venue_form() {
        assert!(musical_hop().validate().is_ok());
    }

    #[test]
    fn test_minimal_venue_form() {
        let form = VenueForm {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom St".into(),
            seeking_talent: true,
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = VenueForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "city", "state", "address"]);
    }

    #[test]
    fn test_bad_phone() {
        let mut form = musical_hop();
        form.phone = Some("1231231234".into());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["phone"]);
    }

    #[test]
    fn test_blank_phone_is_allowed() {
        let mut form = musical_hop();
        form.phone = Some("   ".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_link_scheme() {
        let mut form = musical_hop();
        form.facebook_link = Some("ftp://facebook.com/hop".into());
        form.website_link = Some("www.themusicalhop.com".into());
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["facebook_link", "website_link"]
        );
    }

    #[test]
    fn test_fields_longer_than_columns() {
        let mut form = musical_hop();
        form.website_link = Some(format!("https://www.themusicalhop.com/{}", "a".repeat(200)));
        form.seeking_description = Some("x".repeat(501));
        form.address = "y".repeat(121);
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["address", "website_link", "seeking_description"]);
    }

    #[test]
    fn test_fields_at_column_width_pass() {
        let mut form = musical_hop();
        form.city = "c".repeat(120);
        form.image_link = Some(format!("https://img.example.com/{}", "i".repeat(470)));
        form.seeking_description = Some("é".repeat(500));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_unknown_state_and_genre() {
        let mut form = musical_hop();
        form.state = "ZZ".into();
        form.genres.push("Polka".into());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["state", "genres"]);
        assert!(errors.to_string().contains("'Polka' is not a valid genre"));
    }

    #[test]
    fn test_artist_form_has_no_address() {
        let form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_show_form_ids() {
        let errors = ShowForm::default().validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["artist_id", "venue_id"]
        );
        let ok = ShowForm {
            artist_id: 1,
            venue_id: 2,
            start_time: None,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_show_form_deserialization() {
        let json = r#"{"artist_id": 4, "venue_id": 1, "start_time": "2035-04-01T20:00:00Z"}"#;
        let form: ShowForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.artist_id, 4);
        assert_eq!(form.venue_id, 1);
        assert!(form.start_time.is_some());
    }

    #[test]
    fn test_venue_form_deserialization_defaults() {
        let json = r#"{"name": "Park Square Live Music & Coffee", "state": "CA"}"#;
        let form: VenueForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.name, "Park Square Live Music & Coffee");
        assert!(form.genres.is_empty());
        assert!(!form.seeking_talent);
        assert!(form.phone.is_none());
    }

    #[test]
    fn test_clean_blank_to_none() {
        assert_eq!(clean(&Some("  ".into())), None);
        assert_eq!(clean(&None), None);
        assert_eq!(clean(&Some(" x ".into())), Some("x".into()));
    }

    #[test]
    fn test_prefill_maps_website_to_website_link() {
        let model = venue::Model {
            id: 1,
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: Some("914-003-1132".into()),
            image_link: None,
            facebook_link: None,
            website: Some("https://www.theduelingpianos.com".into()),
            seeking_talent: false,
            seeking_description: None,
            genres: vec!["Classical".to_string(), "R&B".to_string()].into(),
        };
        let form = VenueForm::from(&model);
        assert_eq!(
            form.website_link.as_deref(),
            Some("https://www.theduelingpianos.com")
        );
        assert_eq!(form.genres, vec!["Classical", "R&B"]);
        assert!(form.validate().is_ok());
    }
}

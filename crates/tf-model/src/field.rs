//! The fixed set of semantic fields a roster may expose.

use std::fmt;

/// Canonical semantic field.
///
/// Variant order is the enumeration order used for alias resolution
/// priority and for the output column order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Name,
    City,
    Neighborhood,
    Price,
    Currency,
    Rating,
    Reviews,
    Modalities,
    Gender,
    Languages,
    MobileService,
    Availability,
    YearsExperience,
    Credentials,
    Bio,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 15] = [
        Self::Name,
        Self::City,
        Self::Neighborhood,
        Self::Price,
        Self::Currency,
        Self::Rating,
        Self::Reviews,
        Self::Modalities,
        Self::Gender,
        Self::Languages,
        Self::MobileService,
        Self::Availability,
        Self::YearsExperience,
        Self::Credentials,
        Self::Bio,
    ];

    /// Lower-case canonical name, also the first built-in alias.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::City => "city",
            Self::Neighborhood => "neighborhood",
            Self::Price => "price",
            Self::Currency => "currency",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Modalities => "modalities",
            Self::Gender => "gender",
            Self::Languages => "languages",
            Self::MobileService => "mobileservice",
            Self::Availability => "availability",
            Self::YearsExperience => "yearsexperience",
            Self::Credentials => "credentials",
            Self::Bio => "bio",
        }
    }

    /// Exact lookup by canonical name. Callers lower-case user input first.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Built-in aliases in priority order, all lower-case.
    pub fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "therapist", "provider"],
            Self::City => &["city", "location_city", "town"],
            Self::Neighborhood => &["neighborhood", "area", "district", "borough"],
            Self::Price => &["price", "rate", "fee", "session_cost"],
            Self::Currency => &["currency", "price_currency"],
            Self::Rating => &["rating", "score", "stars"],
            Self::Reviews => &["reviews", "review_count"],
            Self::Modalities => &["modalities", "techniques", "specialties", "services"],
            Self::Gender => &["gender", "therapist_gender"],
            Self::Languages => &["languages", "language"],
            Self::MobileService => &["mobileservice", "mobile", "in_home", "house_call"],
            Self::Availability => &["availability", "hours", "schedule"],
            Self::YearsExperience => &[
                "yearsexperience",
                "experience_years",
                "yrs_exp",
                "experience",
            ],
            Self::Credentials => &["credentials", "license", "certifications"],
            Self::Bio => &["bio", "about", "description", "summary"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

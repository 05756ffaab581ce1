//! Filter and sort requests handed to the pipeline.

use std::fmt;
use std::str::FromStr;

use crate::cell::format_numeric;
use crate::field::CanonicalField;

/// One supported filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    City,
    Neighborhood,
    Gender,
    PriceMin,
    PriceMax,
    RatingMin,
    ReviewsMin,
    YearsMin,
    Mobile,
    Modalities,
    Languages,
    Available,
    Text,
}

impl Criterion {
    pub const ALL: [Criterion; 13] = [
        Self::City,
        Self::Neighborhood,
        Self::Gender,
        Self::PriceMin,
        Self::PriceMax,
        Self::RatingMin,
        Self::ReviewsMin,
        Self::YearsMin,
        Self::Mobile,
        Self::Modalities,
        Self::Languages,
        Self::Available,
        Self::Text,
    ];

    /// Name used on the command line and in the interactive session.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Neighborhood => "neighborhood",
            Self::Gender => "gender",
            Self::PriceMin => "price-min",
            Self::PriceMax => "price-max",
            Self::RatingMin => "rating-min",
            Self::ReviewsMin => "reviews-min",
            Self::YearsMin => "years-min",
            Self::Mobile => "mobile",
            Self::Modalities => "modalities",
            Self::Languages => "languages",
            Self::Available => "available",
            Self::Text => "text",
        }
    }

    /// Canonical fields the criterion reads.
    ///
    /// `Text` reads both bio and credentials and only needs one of them.
    pub fn fields(self) -> &'static [CanonicalField] {
        match self {
            Self::City => &[CanonicalField::City],
            Self::Neighborhood => &[CanonicalField::Neighborhood],
            Self::Gender => &[CanonicalField::Gender],
            Self::PriceMin | Self::PriceMax => &[CanonicalField::Price],
            Self::RatingMin => &[CanonicalField::Rating],
            Self::ReviewsMin => &[CanonicalField::Reviews],
            Self::YearsMin => &[CanonicalField::YearsExperience],
            Self::Mobile => &[CanonicalField::MobileService],
            Self::Modalities => &[CanonicalField::Modalities],
            Self::Languages => &[CanonicalField::Languages],
            Self::Available => &[CanonicalField::Availability],
            Self::Text => &[CanonicalField::Bio, CanonicalField::Credentials],
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let normalized = match normalized.as_str() {
            "availability" => "available",
            "keywords" => "text",
            "years" | "experience" => "years-min",
            other => other,
        };
        Criterion::ALL
            .into_iter()
            .find(|criterion| criterion.as_str() == normalized)
            .ok_or_else(|| format!("unknown filter '{}'", s.trim()))
    }
}

/// User-specified match criteria for one pipeline run.
///
/// `None`, blank text and empty token lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub gender: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rating_min: Option<f64>,
    pub reviews_min: Option<u64>,
    pub years_min: Option<f64>,
    pub mobile: bool,
    pub modalities: Vec<String>,
    pub languages: Vec<String>,
    pub available: Vec<String>,
    pub text: Vec<String>,
}

impl FilterRequest {
    pub fn is_active(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::City => non_blank(self.city.as_deref()),
            Criterion::Neighborhood => non_blank(self.neighborhood.as_deref()),
            Criterion::Gender => non_blank(self.gender.as_deref()),
            Criterion::PriceMin => self.price_min.is_some(),
            Criterion::PriceMax => self.price_max.is_some(),
            Criterion::RatingMin => self.rating_min.is_some(),
            Criterion::ReviewsMin => self.reviews_min.is_some(),
            Criterion::YearsMin => self.years_min.is_some(),
            Criterion::Mobile => self.mobile,
            Criterion::Modalities => has_tokens(&self.modalities),
            Criterion::Languages => has_tokens(&self.languages),
            Criterion::Available => has_tokens(&self.available),
            Criterion::Text => has_tokens(&self.text),
        }
    }

    pub fn active_criteria(&self) -> Vec<Criterion> {
        Criterion::ALL
            .into_iter()
            .filter(|criterion| self.is_active(*criterion))
            .collect()
    }

    /// True when no criterion constrains the result.
    pub fn is_empty(&self) -> bool {
        self.active_criteria().is_empty()
    }

    pub fn clear(&mut self, criterion: Criterion) {
        match criterion {
            Criterion::City => self.city = None,
            Criterion::Neighborhood => self.neighborhood = None,
            Criterion::Gender => self.gender = None,
            Criterion::PriceMin => self.price_min = None,
            Criterion::PriceMax => self.price_max = None,
            Criterion::RatingMin => self.rating_min = None,
            Criterion::ReviewsMin => self.reviews_min = None,
            Criterion::YearsMin => self.years_min = None,
            Criterion::Mobile => self.mobile = false,
            Criterion::Modalities => self.modalities.clear(),
            Criterion::Languages => self.languages.clear(),
            Criterion::Available => self.available.clear(),
            Criterion::Text => self.text.clear(),
        }
    }

    /// Human-readable value of an active criterion.
    pub fn describe(&self, criterion: Criterion) -> Option<String> {
        if !self.is_active(criterion) {
            return None;
        }
        let value = match criterion {
            Criterion::City => self.city.clone().unwrap_or_default(),
            Criterion::Neighborhood => self.neighborhood.clone().unwrap_or_default(),
            Criterion::Gender => self.gender.clone().unwrap_or_default(),
            Criterion::PriceMin => self.price_min.map(format_numeric).unwrap_or_default(),
            Criterion::PriceMax => self.price_max.map(format_numeric).unwrap_or_default(),
            Criterion::RatingMin => self.rating_min.map(format_numeric).unwrap_or_default(),
            Criterion::ReviewsMin => self
                .reviews_min
                .map(|v| v.to_string())
                .unwrap_or_default(),
            Criterion::YearsMin => self.years_min.map(format_numeric).unwrap_or_default(),
            Criterion::Mobile => "required".to_string(),
            Criterion::Modalities => self.modalities.join(", "),
            Criterion::Languages => self.languages.join(", "),
            Criterion::Available => self.available.join(", "),
            Criterion::Text => self.text.join(", "),
        };
        Some(value)
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn has_tokens(tokens: &[String]) -> bool {
    tokens.iter().any(|t| !t.trim().is_empty())
}

/// Splits a user list on commas and semicolons, trimming and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// One requested sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub name: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descending: false,
        }
    }

    pub fn descending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descending: true,
        }
    }
}

/// Ordered sort keys, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortRequest {
    pub keys: Vec<SortKey>,
}

impl SortRequest {
    /// Parses `"price,-rating"` style input. A leading `-` sorts descending.
    pub fn parse(raw: &str) -> Self {
        let keys = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .filter_map(|key| match key.strip_prefix('-') {
                Some(rest) => {
                    let rest = rest.trim();
                    (!rest.is_empty()).then(|| SortKey::descending(rest))
                }
                None => Some(SortKey::ascending(key)),
            })
            .collect();
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for SortRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .keys
            .iter()
            .map(|key| {
                if key.descending {
                    format!("-{}", key.name)
                } else {
                    key.name.clone()
                }
            })
            .collect();
        f.write_str(&rendered.join(","))
    }
}

/// A sort key that matched no header or resolved canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortWarning {
    pub key: String,
}

impl fmt::Display for SortWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sort key '{}' not found; ignored.", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_handles_both_separators() {
        assert_eq!(
            split_list(" Deep Tissue; Sports ,, Thai "),
            vec!["Deep Tissue", "Sports", "Thai"]
        );
        assert!(split_list(" , ; ").is_empty());
    }

    #[test]
    fn parse_sort_keys_with_direction() {
        let request = SortRequest::parse("price, -rating,,");
        assert_eq!(
            request.keys,
            vec![SortKey::ascending("price"), SortKey::descending("rating")]
        );
        assert_eq!(request.to_string(), "price,-rating");
    }

    #[test]
    fn bare_minus_is_dropped() {
        assert!(SortRequest::parse("-").is_empty());
    }

    #[test]
    fn blank_text_criteria_are_inactive() {
        let request = FilterRequest {
            city: Some("   ".to_string()),
            modalities: vec![" ".to_string()],
            ..FilterRequest::default()
        };
        assert!(request.is_empty());
    }

    #[test]
    fn active_criteria_and_clear() {
        let mut request = FilterRequest {
            city: Some("Vancouver".to_string()),
            price_max: Some(120.0),
            mobile: true,
            ..FilterRequest::default()
        };
        assert_eq!(
            request.active_criteria(),
            vec![Criterion::City, Criterion::PriceMax, Criterion::Mobile]
        );
        assert_eq!(
            request.describe(Criterion::PriceMax),
            Some("120".to_string())
        );
        request.clear(Criterion::City);
        assert!(!request.is_active(Criterion::City));
    }

    #[test]
    fn criterion_names_parse() {
        assert_eq!("price_max".parse::<Criterion>(), Ok(Criterion::PriceMax));
        assert_eq!("Availability".parse::<Criterion>(), Ok(Criterion::Available));
        assert!("colour".parse::<Criterion>().is_err());
    }

    #[test]
    fn warning_names_the_key() {
        let warning = SortWarning {
            key: "foo".to_string(),
        };
        assert_eq!(warning.to_string(), "sort key 'foo' not found; ignored.");
    }
}

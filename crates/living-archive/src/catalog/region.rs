//! Geographic regions of the archive map.

use std::{fmt, str::FromStr};

use living_archive_core::entity::Entity;

/// A region of the map, defined by the countries it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    WestAfrica,
    CentralAfrica,
    EastAfrica,
    SouthernAfrica,
    PanAfricanDiaspora,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Self::WestAfrica,
        Self::CentralAfrica,
        Self::EastAfrica,
        Self::SouthernAfrica,
        Self::PanAfricanDiaspora,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::WestAfrica => "West Africa",
            Self::CentralAfrica => "Central Africa",
            Self::EastAfrica => "East Africa",
            Self::SouthernAfrica => "Southern Africa",
            Self::PanAfricanDiaspora => "Pan-African & Diaspora",
        }
    }

    /// Country names matched against an entity's country.
    pub fn countries(self) -> &'static [&'static str] {
        match self {
            Self::WestAfrica => &["Nigeria", "Benin", "Ghana", "Mali", "Togo"],
            Self::CentralAfrica => &["DRC", "Angola", "Congo Basin"],
            Self::EastAfrica => &["Kenya", "Tanzania", "Uganda", "Egypt"],
            Self::SouthernAfrica => &[
                "South Africa",
                "Zimbabwe/Zambia",
                "Zimbabwe",
                "Zambia",
                "Namibia",
                "Mozambique",
            ],
            Self::PanAfricanDiaspora => &["Haiti", "Pan-African", "USA"],
        }
    }

    /// Whether the entity's country mentions one of the region's countries.
    ///
    /// Matching is a case-sensitive substring test, so a country such as
    /// "Nigeria/Benin" belongs to West Africa.
    pub fn contains(self, entity: &Entity) -> bool {
        let country = &entity.origin.country;
        self.countries()
            .iter()
            .any(|candidate| country.contains(candidate))
    }

    /// Short command-line identifier, e.g. `west` or `diaspora`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::WestAfrica => "west",
            Self::CentralAfrica => "central",
            Self::EastAfrica => "east",
            Self::SouthernAfrica => "southern",
            Self::PanAfricanDiaspora => "diaspora",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Accepts the display name or the slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|region| {
                region.name().eq_ignore_ascii_case(s) || region.slug().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|region| region.slug()).collect();
                format!("unknown region `{s}` (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use living_archive_core::entity::{EntityType, Origin};

    use super::*;

    fn from(country: &str) -> Entity {
        Entity::new("Someone", EntityType::Hero).with_origin(Origin {
            country: country.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_substring_country_match() {
        assert!(Region::WestAfrica.contains(&from("Nigeria/Benin")));
        assert!(Region::SouthernAfrica.contains(&from("Zimbabwe/Zambia")));
        assert!(Region::CentralAfrica.contains(&from("Congo Basin (DRC)")));
        assert!(!Region::EastAfrica.contains(&from("Ghana")));
        assert!(!Region::WestAfrica.contains(&from("")));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!Region::WestAfrica.contains(&from("mali")));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("west".parse(), Ok(Region::WestAfrica));
        assert_eq!("Southern Africa".parse(), Ok(Region::SouthernAfrica));
        assert_eq!("pan-african & diaspora".parse(), Ok(Region::PanAfricanDiaspora));
        assert!("Atlantis".parse::<Region>().unwrap_err().contains("diaspora"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Region::PanAfricanDiaspora.to_string(), "Pan-African & Diaspora");
    }
}

//! Static region/country mapping and entity resolution.
//!
//! Regions are fixed operational groupings of countries, hardcoded so that
//! aggregation is consistent regardless of what the upstream data carries.
//! Every country belongs to exactly one region; where the source table
//! lists a country twice, the first listing wins.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Region name → member countries, in the canonical ordering.
static REGION_COUNTRY_TABLE: &[(&str, &[&str])] = &[
    (
        "Africa - FR",
        &[
            "Benin",
            "Burkina Faso",
            "Burundi",
            "Cameroon",
            "Central African Republic",
            "Chad",
            "Comoros",
            "Congo",
            "Côte d'Ivoire",
            "Djibouti",
            "Equatorial Guinea",
            "Gabon",
            "Guinea",
            "Madagascar",
            "Mali",
            "Mauritania",
            "Niger",
            "Senegal",
            "Togo",
        ],
    ),
    (
        "Africa - PT",
        &["Angola", "Guinea-Bissau", "Mozambique", "Sao Tome and Principe"],
    ),
    (
        "Africa EN (Eastern)",
        &[
            "Eritrea",
            "Ethiopia",
            "Kenya",
            "Mauritius",
            "Rwanda",
            "Seychelles",
            "Somalia",
            "South Sudan",
            "Sudan",
            "Tanzania",
            "Uganda",
        ],
    ),
    (
        "Africa EN (Southern)",
        &[
            "Botswana",
            "Eswatini",
            "Lesotho",
            "Malawi",
            "Namibia",
            "South Africa",
            "Zambia",
            "Zimbabwe",
        ],
    ),
    (
        "Africa EN (Western)",
        &["Gambia", "Ghana", "Liberia", "Nigeria", "Sierra Leone"],
    ),
    ("Americas", &["Canada", "United States"]),
    (
        "Asia - ISC",
        &[
            "Bangladesh",
            "Bhutan",
            "India",
            "Iran",
            "Maldives",
            "Nepal",
            "Pakistan",
            "Sri Lanka",
        ],
    ),
    (
        "Asia - SEA",
        &[
            "Brunei",
            "Cambodia",
            "China",
            "Hong Kong",
            "Indonesia",
            "Japan",
            "North Korea",
            "South Korea",
            "Laos",
            "Macao",
            "Malaysia",
            "Mongolia",
            "Myanmar",
            "Philippines",
            "Singapore",
            "Taiwan",
            "Thailand",
            "Timor-Leste",
            "Vietnam",
        ],
    ),
    (
        "CIS",
        &[
            "Armenia",
            "Azerbaijan",
            "Belarus",
            "Georgia",
            "Kazakhstan",
            "Kyrgyzstan",
            "Tajikistan",
            "Turkmenistan",
            "Uzbekistan",
        ],
    ),
    (
        "EU",
        &[
            "Austria",
            "Belgium",
            "Bulgaria",
            "Croatia",
            "Cyprus",
            "Czechia",
            "Denmark",
            "Estonia",
            "Finland",
            "France",
            "Germany",
            "Greece",
            "Hungary",
            "Ireland",
            "Italy",
            "Latvia",
            "Lithuania",
            "Luxembourg",
            "Malta",
            "Netherlands",
            "Poland",
            "Portugal",
            "Romania",
            "Slovakia",
            "Slovenia",
            "Spain",
            "Sweden",
        ],
    ),
    (
        "LATAM - Central America",
        &[
            "Antigua and Barbuda",
            "Bahamas",
            "Barbados",
            "Belize",
            "Costa Rica",
            "Cuba",
            "Dominica",
            "Dominican Republic",
            "El Salvador",
            "Grenada",
            "Guatemala",
            "Haiti",
            "Honduras",
            "Jamaica",
            "Mexico",
            "Nicaragua",
            "Panama",
            "Puerto Rico",
            "Saint Kitts and Nevis",
            "Saint Lucia",
            "Saint Vincent and the Grenadines",
            "Trinidad and Tobago",
            "Turks and Caicos Islands",
            "British Virgin Islands",
            "U.S. Virgin Islands",
        ],
    ),
    ("LATAM - Colombia", &["Colombia"]),
    ("LATAM - PT", &["Portugal"]),
    (
        "LATAM - South America",
        &[
            "Argentina",
            "Bolivia",
            "Brazil",
            "Chile",
            "Ecuador",
            "Guyana",
            "Paraguay",
            "Peru",
            "Suriname",
            "Uruguay",
            "Venezuela",
        ],
    ),
    (
        "MENA - AR",
        &[
            "Algeria",
            "Bahrain",
            "Egypt",
            "Iraq",
            "Israel",
            "Jordan",
            "Kuwait",
            "Lebanon",
            "Libya",
            "Morocco",
            "Oman",
            "Palestine",
            "Qatar",
            "Saudi Arabia",
            "Syria",
            "Tunisia",
            "UAE",
            "Western Sahara",
            "Yemen",
        ],
    ),
    (
        "Oceania",
        &[
            "Australia",
            "New Zealand",
            "Fiji",
            "Papua New Guinea",
            "Samoa",
            "Tonga",
            "Vanuatu",
            "Kiribati",
            "Micronesia",
            "Marshall Islands",
            "Palau",
            "Tuvalu",
            "Nauru",
            "Tokelau",
            "Niue",
            "Norfolk Island",
        ],
    ),
    (
        "Rest of Europe",
        &[
            "Albania",
            "Andorra",
            "Aruba",
            "Bermuda",
            "Bosnia and Herzegovina",
            "Curaçao",
            "Faroe Islands",
            "Gibraltar",
            "Greenland",
            "Guernsey",
            "Iceland",
            "Isle of Man",
            "Jersey",
            "Liechtenstein",
            "Monaco",
            "Montenegro",
            "North Macedonia",
            "Norway",
            "San Marino",
            "Serbia",
            "Switzerland",
            "Turkey",
            "United Kingdom",
        ],
    ),
];

/// Country → region reverse index. First table entry wins on duplicates.
static COUNTRY_TO_REGION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (region, countries) in REGION_COUNTRY_TABLE {
        for country in *countries {
            index.entry(*country).or_insert(*region);
        }
    }
    index
});

/// Returns all region names in canonical order.
#[must_use]
pub fn all_regions() -> Vec<&'static str> {
    REGION_COUNTRY_TABLE.iter().map(|(r, _)| *r).collect()
}

/// Returns the member countries of a region, or an empty slice for an
/// unknown region name.
#[must_use]
pub fn countries_for_region(region: &str) -> &'static [&'static str] {
    REGION_COUNTRY_TABLE
        .iter()
        .find(|(r, _)| *r == region)
        .map_or(&[], |(_, countries)| *countries)
}

/// Returns the region a country belongs to, if it is mapped.
#[must_use]
pub fn region_for_country(country: &str) -> Option<&'static str> {
    COUNTRY_TO_REGION.get(country).copied()
}

/// Normalizes an entity name arriving from request parameters.
///
/// Literal `+` characters are a legacy URL-transport artifact and decode
/// to spaces; surrounding whitespace is trimmed. No fuzzy matching beyond
/// that: lookups stay exact and case-sensitive.
#[must_use]
pub fn normalize_entity_name(name: &str) -> String {
    name.replace('+', " ").trim().to_string()
}

/// The kind of entity an analytics request targets and compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A single country, compared against every other country in the data.
    Country,
    /// A fixed region, compared against every other region in the table.
    Region,
}

impl EntityKind {
    /// Resolves an entity name to the set of countries it covers.
    ///
    /// A country resolves to itself; a region resolves to its member
    /// countries. Unknown regions resolve to the empty set; callers
    /// produce a zero-valued result for them, never an error.
    #[must_use]
    pub fn resolve(&self, name: &str) -> BTreeSet<String> {
        match self {
            EntityKind::Country => BTreeSet::from([name.to_string()]),
            EntityKind::Region => countries_for_region(name)
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

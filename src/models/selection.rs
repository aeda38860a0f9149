use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const TORONTO_GTA: &str = "Toronto/GTA";
pub const OUTSIDE_GTA: &str = "Outside GTA";
pub const STUDIO_SERVICE: &str = "Studio Service";

/// Older bookings stored the bride service as the bare category name.
const LEGACY_BRIDAL_SERVICE: &str = "bridal";

/// Booking form exactly as the booking wizard posts it.
///
/// Nothing here is validated. Text fields that arrive as something other than
/// a string are dropped, counts may be numbers or strings, and flags may be
/// `"Yes"`/`"No"` strings or JSON booleans.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingForm {
    #[serde(deserialize_with = "lenient_string")]
    pub service_category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub service_mode: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub sub_region: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub bride_service_type: Option<String>,
    pub needs_trial: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub trial_service_type: Option<String>,
    pub needs_jewelry: Option<Value>,
    pub needs_extensions: Option<Value>,
    pub needs_saree_draping: Option<Value>,
    pub needs_hijab_setting: Option<Value>,

    pub has_party_members: Option<Value>,
    pub party_both_count: Option<Value>,
    pub party_makeup_count: Option<Value>,
    pub party_hair_count: Option<Value>,
    pub party_dupatta_count: Option<Value>,
    pub party_extensions_count: Option<Value>,
    pub party_saree_draping_count: Option<Value>,
    pub party_hijab_setting_count: Option<Value>,
    pub airbrush_count: Option<Value>,

    pub non_bridal_both_count: Option<Value>,
    pub non_bridal_makeup_count: Option<Value>,
    pub non_bridal_hair_count: Option<Value>,
    pub non_bridal_count: Option<Value>,
    pub non_bridal_everyone_both: Option<Value>,
    pub non_bridal_jewelry_count: Option<Value>,
    pub non_bridal_extensions_count: Option<Value>,
    pub non_bridal_airbrush_count: Option<Value>,
    pub non_bridal_saree_draping_count: Option<Value>,
    pub non_bridal_hijab_setting_count: Option<Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl BookingForm {
    /// Count fields only read by the Bridal and Semi-Bridal branches.
    pub fn bridal_count_fields(&self) -> [(&'static str, Option<&Value>); 8] {
        [
            ("partyBothCount", self.party_both_count.as_ref()),
            ("partyMakeupCount", self.party_makeup_count.as_ref()),
            ("partyHairCount", self.party_hair_count.as_ref()),
            ("partyDupattaCount", self.party_dupatta_count.as_ref()),
            ("partyExtensionsCount", self.party_extensions_count.as_ref()),
            ("partySareeDrapingCount", self.party_saree_draping_count.as_ref()),
            ("partyHijabSettingCount", self.party_hijab_setting_count.as_ref()),
            ("airbrushCount", self.airbrush_count.as_ref()),
        ]
    }

    /// Count fields only read by the Non-Bridal branch.
    pub fn non_bridal_count_fields(&self) -> [(&'static str, Option<&Value>); 9] {
        [
            ("nonBridalBothCount", self.non_bridal_both_count.as_ref()),
            ("nonBridalMakeupCount", self.non_bridal_makeup_count.as_ref()),
            ("nonBridalHairCount", self.non_bridal_hair_count.as_ref()),
            ("nonBridalCount", self.non_bridal_count.as_ref()),
            ("nonBridalJewelryCount", self.non_bridal_jewelry_count.as_ref()),
            ("nonBridalExtensionsCount", self.non_bridal_extensions_count.as_ref()),
            ("nonBridalAirbrushCount", self.non_bridal_airbrush_count.as_ref()),
            ("nonBridalSareeDrapingCount", self.non_bridal_saree_draping_count.as_ref()),
            ("nonBridalHijabSettingCount", self.non_bridal_hijab_setting_count.as_ref()),
        ]
    }

    /// Yes/No flags only read by the Bridal and Semi-Bridal branches.
    pub fn bridal_flag_fields(&self) -> [(&'static str, Option<&Value>); 5] {
        [
            ("needsJewelry", self.needs_jewelry.as_ref()),
            ("needsExtensions", self.needs_extensions.as_ref()),
            ("needsSareeDraping", self.needs_saree_draping.as_ref()),
            ("needsHijabSetting", self.needs_hijab_setting.as_ref()),
            ("hasPartyMembers", self.has_party_members.as_ref()),
        ]
    }
}

/// Parse-as-integer-or-zero, the one place lenient count handling lives.
///
/// Strings take an optional sign followed by leading digits (`"3 guests"` is
/// 3). Numbers are truncated. Anything negative, non-numeric or missing is 0.
pub fn coerce_count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(float_count).unwrap_or(0),
        Some(Value::String(s)) => leading_int(s),
        _ => 0,
    }
}

fn float_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn leading_int(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end]
        .parse::<u64>()
        .map(|n| n.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(u32::MAX)
}

/// Tri-state form flag. Converted to `bool` once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    Yes,
    No,
    #[default]
    Unset,
}

impl Flag {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Flag::Yes,
            Some(Value::Bool(false)) => Flag::No,
            Some(Value::String(s)) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("yes") {
                    Flag::Yes
                } else if s.eq_ignore_ascii_case("no") {
                    Flag::No
                } else {
                    Flag::Unset
                }
            }
            _ => Flag::Unset,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[default]
    #[serde(rename = "Bridal")]
    Bridal,
    #[serde(rename = "Semi-Bridal")]
    SemiBridal,
    #[serde(rename = "Non-Bridal")]
    NonBridal,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceCategory::Bridal => "Bridal",
            ServiceCategory::SemiBridal => "Semi-Bridal",
            ServiceCategory::NonBridal => "Non-Bridal",
        }
    }

    /// Exact label match. Callers decide what an unknown label means.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Bridal" => Some(ServiceCategory::Bridal),
            "Semi-Bridal" => Some(ServiceCategory::SemiBridal),
            "Non-Bridal" => Some(ServiceCategory::NonBridal),
            _ => None,
        }
    }

    /// Anything that is not Semi-Bridal or Non-Bridal prices as Bridal.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceMode {
    StudioService,
    #[default]
    OnLocation,
}

impl ServiceMode {
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(STUDIO_SERVICE) => ServiceMode::StudioService,
            _ => ServiceMode::OnLocation,
        }
    }
}

/// Drive-time bands used for bookings outside the GTA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubRegion {
    #[default]
    ImmediateNeighbors,
    ModerateDistance,
    FurtherOut,
}

impl SubRegion {
    pub const ALL: [SubRegion; 3] = [
        SubRegion::ImmediateNeighbors,
        SubRegion::ModerateDistance,
        SubRegion::FurtherOut,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SubRegion::ImmediateNeighbors => "Immediate Neighbors (15-30 Minutes)",
            SubRegion::ModerateDistance => "Moderate Distance (30 Minutes to 1 Hour Drive)",
            SubRegion::FurtherOut => "Further Out (1 Hour Plus)",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    TorontoGta,
    OutsideGta(SubRegion),
    /// Any region label without its own rate.
    #[default]
    Other,
}

impl Region {
    /// Unknown or missing sub-regions fall back to the nearest band.
    pub fn resolve(region: Option<&str>, sub_region: Option<&str>) -> Self {
        match region {
            Some(TORONTO_GTA) => Region::TorontoGta,
            Some(OUTSIDE_GTA) => {
                Region::OutsideGta(sub_region.and_then(SubRegion::parse).unwrap_or_default())
            }
            _ => Region::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    BothHairMakeup,
    HairOnly,
    MakeupOnly,
}

impl ServiceType {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceType::BothHairMakeup => "Both Hair & Makeup",
            ServiceType::HairOnly => "Hair Only",
            ServiceType::MakeupOnly => "Makeup Only",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a stored service label to its canonical service type.
///
/// The legacy `"bridal"` value is read as "Both Hair & Makeup". Empty and
/// unrecognized labels resolve to `None` and are not priced.
pub fn normalize_service_type(raw: Option<&str>) -> Option<ServiceType> {
    match raw?.trim() {
        LEGACY_BRIDAL_SERVICE | "Both Hair & Makeup" => Some(ServiceType::BothHairMakeup),
        "Hair Only" => Some(ServiceType::HairOnly),
        "Makeup Only" => Some(ServiceType::MakeupOnly),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArtistTier {
    Lead,
    #[default]
    Team,
}

impl ArtistTier {
    pub const ALL: [ArtistTier; 2] = [ArtistTier::Lead, ArtistTier::Team];

    pub const fn label(self) -> &'static str {
        match self {
            ArtistTier::Lead => "Lead",
            ArtistTier::Team => "Team",
        }
    }
}

impl fmt::Display for ArtistTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown artist tier: {0:?}")]
pub struct UnknownArtistTier(pub String);

impl FromStr for ArtistTier {
    type Err = UnknownArtistTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("lead") => Ok(ArtistTier::Lead),
            t if t.eq_ignore_ascii_case("team") => Ok(ArtistTier::Team),
            _ => Err(UnknownArtistTier(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridalAddOns {
    pub jewelry: bool,
    pub extensions: bool,
    pub saree_draping: bool,
    pub hijab_setting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartyCounts {
    pub both: u32,
    pub makeup_only: u32,
    pub hair_only: u32,
    pub dupatta: u32,
    pub extensions: u32,
    pub saree_draping: u32,
    pub hijab_setting: u32,
    pub airbrush: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NonBridalCounts {
    pub both: u32,
    pub makeup_only: u32,
    pub hair_only: u32,
    /// Head count from forms that predate per-service counts.
    pub legacy_count: u32,
    pub everyone_both: bool,
    pub jewelry: u32,
    pub extensions: u32,
    pub airbrush: u32,
    pub saree_draping: u32,
    pub hijab_setting: u32,
}

impl NonBridalCounts {
    /// Old forms only recorded a head count plus an "everyone gets both" flag.
    pub fn effective_both(&self) -> u32 {
        if self.both == 0 && self.everyone_both {
            self.legacy_count
        } else {
            self.both
        }
    }
}

/// Typed booking selection the price calculator reads.
///
/// Fields belonging to a category other than `category` are carried along
/// but never read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingSelection {
    pub category: ServiceCategory,
    pub mode: ServiceMode,
    pub region: Region,
    pub bride_service_type: Option<String>,
    pub needs_trial: bool,
    pub trial_service_type: Option<String>,
    pub add_ons: BridalAddOns,
    pub has_party_members: bool,
    pub party: PartyCounts,
    pub non_bridal: NonBridalCounts,
}

impl From<&BookingForm> for BookingSelection {
    fn from(form: &BookingForm) -> Self {
        let flag = |value: &Option<Value>| Flag::from_value(value.as_ref()).is_yes();
        let count = |value: &Option<Value>| coerce_count(value.as_ref());

        BookingSelection {
            category: ServiceCategory::resolve(form.service_category.as_deref()),
            mode: ServiceMode::resolve(form.service_mode.as_deref()),
            region: Region::resolve(form.region.as_deref(), form.sub_region.as_deref()),
            bride_service_type: form.bride_service_type.clone(),
            needs_trial: flag(&form.needs_trial),
            trial_service_type: form.trial_service_type.clone(),
            add_ons: BridalAddOns {
                jewelry: flag(&form.needs_jewelry),
                extensions: flag(&form.needs_extensions),
                saree_draping: flag(&form.needs_saree_draping),
                hijab_setting: flag(&form.needs_hijab_setting),
            },
            has_party_members: flag(&form.has_party_members),
            party: PartyCounts {
                both: count(&form.party_both_count),
                makeup_only: count(&form.party_makeup_count),
                hair_only: count(&form.party_hair_count),
                dupatta: count(&form.party_dupatta_count),
                extensions: count(&form.party_extensions_count),
                saree_draping: count(&form.party_saree_draping_count),
                hijab_setting: count(&form.party_hijab_setting_count),
                airbrush: count(&form.airbrush_count),
            },
            non_bridal: NonBridalCounts {
                both: count(&form.non_bridal_both_count),
                makeup_only: count(&form.non_bridal_makeup_count),
                hair_only: count(&form.non_bridal_hair_count),
                legacy_count: count(&form.non_bridal_count),
                everyone_both: flag(&form.non_bridal_everyone_both),
                jewelry: count(&form.non_bridal_jewelry_count),
                extensions: count(&form.non_bridal_extensions_count),
                airbrush: count(&form.non_bridal_airbrush_count),
                saree_draping: count(&form.non_bridal_saree_draping_count),
                hijab_setting: count(&form.non_bridal_hijab_setting_count),
            },
        }
    }
}

impl From<BookingForm> for BookingSelection {
    fn from(form: BookingForm) -> Self {
        BookingSelection::from(&form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(Some(&json!(3))), 3);
        assert_eq!(coerce_count(Some(&json!("4"))), 4);
        assert_eq!(coerce_count(Some(&json!(" 2 guests"))), 2);
        assert_eq!(coerce_count(Some(&json!(2.9))), 2);
        assert_eq!(coerce_count(Some(&json!("1e3"))), 1);

        // Everything else degrades to zero
        assert_eq!(coerce_count(Some(&json!(-2))), 0);
        assert_eq!(coerce_count(Some(&json!("-5"))), 0);
        assert_eq!(coerce_count(Some(&json!("many"))), 0);
        assert_eq!(coerce_count(Some(&json!(""))), 0);
        assert_eq!(coerce_count(Some(&json!(true))), 0);
        assert_eq!(coerce_count(Some(&Value::Null)), 0);
        assert_eq!(coerce_count(None), 0);
    }

    #[test]
    fn test_coerce_count_saturates() {
        assert_eq!(coerce_count(Some(&json!("99999999999999999999999"))), u32::MAX);
    }

    #[test]
    fn test_flag_from_value() {
        assert_eq!(Flag::from_value(Some(&json!("Yes"))), Flag::Yes);
        assert_eq!(Flag::from_value(Some(&json!(" yes "))), Flag::Yes);
        assert_eq!(Flag::from_value(Some(&json!(true))), Flag::Yes);
        assert_eq!(Flag::from_value(Some(&json!("No"))), Flag::No);
        assert_eq!(Flag::from_value(Some(&json!(false))), Flag::No);
        assert_eq!(Flag::from_value(Some(&json!("maybe"))), Flag::Unset);
        assert_eq!(Flag::from_value(Some(&json!(1))), Flag::Unset);
        assert_eq!(Flag::from_value(None), Flag::Unset);
        assert!(!Flag::Unset.is_yes());
    }

    #[test]
    fn test_normalize_service_type() {
        assert_eq!(
            normalize_service_type(Some("bridal")),
            Some(ServiceType::BothHairMakeup)
        );
        assert_eq!(
            normalize_service_type(Some("Both Hair & Makeup")),
            Some(ServiceType::BothHairMakeup)
        );
        assert_eq!(normalize_service_type(Some("Hair Only")), Some(ServiceType::HairOnly));
        assert_eq!(
            normalize_service_type(Some("Makeup Only")),
            Some(ServiceType::MakeupOnly)
        );
        assert_eq!(normalize_service_type(Some("")), None);
        assert_eq!(normalize_service_type(Some("Nails")), None);
        assert_eq!(normalize_service_type(None), None);
    }

    #[test]
    fn test_region_resolution() {
        assert_eq!(Region::resolve(Some("Toronto/GTA"), None), Region::TorontoGta);
        assert_eq!(
            Region::resolve(Some("Outside GTA"), Some("Further Out (1 Hour Plus)")),
            Region::OutsideGta(SubRegion::FurtherOut)
        );
        assert_eq!(
            Region::resolve(Some("Outside GTA"), None),
            Region::OutsideGta(SubRegion::ImmediateNeighbors)
        );
        assert_eq!(
            Region::resolve(Some("Outside GTA"), Some("Somewhere far")),
            Region::OutsideGta(SubRegion::ImmediateNeighbors)
        );
        // Sub-region only matters outside the GTA
        assert_eq!(
            Region::resolve(Some("Niagara"), Some("Further Out (1 Hour Plus)")),
            Region::Other
        );
    }

    #[test]
    fn test_category_resolution() {
        assert_eq!(ServiceCategory::resolve(Some("Non-Bridal")), ServiceCategory::NonBridal);
        assert_eq!(ServiceCategory::resolve(Some("Semi-Bridal")), ServiceCategory::SemiBridal);
        assert_eq!(ServiceCategory::resolve(Some("Bridal")), ServiceCategory::Bridal);
        assert_eq!(ServiceCategory::resolve(Some("Party")), ServiceCategory::Bridal);
        assert_eq!(ServiceCategory::resolve(None), ServiceCategory::Bridal);
    }

    #[test]
    fn test_artist_tier_parsing() {
        assert_eq!("Lead".parse::<ArtistTier>(), Ok(ArtistTier::Lead));
        assert_eq!("team".parse::<ArtistTier>(), Ok(ArtistTier::Team));
        assert_eq!(
            "Senior".parse::<ArtistTier>(),
            Err(UnknownArtistTier("Senior".to_string()))
        );
        assert_eq!(ArtistTier::default(), ArtistTier::Team);
    }

    #[test]
    fn test_form_ingestion() {
        let form: BookingForm = serde_json::from_value(json!({
            "serviceCategory": "Non-Bridal",
            "serviceMode": "Studio Service",
            "region": 42,
            "nonBridalCount": "5",
            "nonBridalEveryoneBoth": "Yes",
            "nonBridalJewelryCount": 1,
            "needsJewelry": "Yes",
            "unknownField": "ignored"
        }))
        .unwrap();

        assert_eq!(form.region, None);

        let selection = BookingSelection::from(&form);
        assert_eq!(selection.category, ServiceCategory::NonBridal);
        assert_eq!(selection.mode, ServiceMode::StudioService);
        assert_eq!(selection.region, Region::Other);
        assert_eq!(selection.non_bridal.effective_both(), 5);
        assert_eq!(selection.non_bridal.jewelry, 1);
        // Carried, but the Non-Bridal branch never reads it
        assert!(selection.add_ons.jewelry);
    }

    #[test]
    fn test_effective_both_prefers_explicit_count() {
        let counts = NonBridalCounts {
            both: 2,
            legacy_count: 6,
            everyone_both: true,
            ..Default::default()
        };
        assert_eq!(counts.effective_both(), 2);

        let counts = NonBridalCounts {
            legacy_count: 6,
            everyone_both: false,
            ..Default::default()
        };
        assert_eq!(counts.effective_both(), 0);
    }
}

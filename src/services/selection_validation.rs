//! Advisory checks on a raw booking form.
//!
//! The calculator prices whatever it is given. This pass reports the inputs it
//! would silently zero or ignore so the caller can log them or ask the
//! customer to fix the form. It never changes a price.

use std::fmt;

use serde_json::Value;

use crate::models::selection::{
    coerce_count, normalize_service_type, BookingForm, Flag, ServiceCategory, SubRegion, OUTSIDE_GTA,
    TORONTO_GTA,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionWarning {
    MissingCategory,
    UnknownCategory(String),
    UnknownRegion(String),
    UnknownSubRegion(String),
    SubRegionIgnored(String),
    UnknownServiceType {
        field: &'static str,
        value: String,
    },
    InvalidCount {
        field: &'static str,
        value: String,
        read_as: u32,
    },
    FieldOutsideCategory {
        field: &'static str,
        category: ServiceCategory,
    },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::MissingCategory => {
                write!(f, "no service category selected, pricing as Bridal")
            }
            SelectionWarning::UnknownCategory(value) => {
                write!(f, "unknown service category {value:?}, pricing as Bridal")
            }
            SelectionWarning::UnknownRegion(value) => {
                write!(f, "unknown region {value:?}, applying the default travel fee")
            }
            SelectionWarning::UnknownSubRegion(value) => write!(
                f,
                "unknown sub-region {value:?}, applying the {} rate",
                SubRegion::default().label()
            ),
            SelectionWarning::SubRegionIgnored(value) => {
                write!(f, "sub-region {value:?} is only used for {OUTSIDE_GTA}")
            }
            SelectionWarning::UnknownServiceType { field, value } => {
                write!(f, "{field} has unknown service type {value:?}, not priced")
            }
            SelectionWarning::InvalidCount {
                field,
                value,
                read_as,
            } => write!(f, "{field} is not a whole number ({value}), read as {read_as}"),
            SelectionWarning::FieldOutsideCategory { field, category } => {
                write!(f, "{field} does not apply to {category} bookings and is ignored")
            }
        }
    }
}

/// Collect every warning for `form`, in field order.
pub fn validate_selection(form: &BookingForm) -> Vec<SelectionWarning> {
    let mut warnings = Vec::new();

    let category = match form.service_category.as_deref() {
        None => {
            warnings.push(SelectionWarning::MissingCategory);
            ServiceCategory::default()
        }
        Some(raw) => ServiceCategory::parse(raw).unwrap_or_else(|| {
            warnings.push(SelectionWarning::UnknownCategory(raw.to_string()));
            ServiceCategory::default()
        }),
    };

    check_region(form, &mut warnings);

    for (field, value) in form
        .bridal_count_fields()
        .into_iter()
        .chain(form.non_bridal_count_fields())
    {
        if let Some(value) = value {
            if !is_whole_count(value) {
                warnings.push(SelectionWarning::InvalidCount {
                    field,
                    value: display_value(value),
                    read_as: coerce_count(Some(value)),
                });
            }
        }
    }

    match category {
        ServiceCategory::NonBridal => {
            check_service_type(
                "brideServiceType",
                form.bride_service_type.as_deref(),
                category,
                &mut warnings,
            );
            check_service_type(
                "trialServiceType",
                form.trial_service_type.as_deref(),
                category,
                &mut warnings,
            );
            for (field, value) in form.bridal_flag_fields() {
                if Flag::from_value(value).is_yes() {
                    warnings.push(SelectionWarning::FieldOutsideCategory { field, category });
                }
            }
            if Flag::from_value(form.needs_trial.as_ref()).is_yes() {
                warnings.push(SelectionWarning::FieldOutsideCategory {
                    field: "needsTrial",
                    category,
                });
            }
            push_nonzero_counts(form.bridal_count_fields(), category, &mut warnings);
        }
        ServiceCategory::SemiBridal | ServiceCategory::Bridal => {
            check_known_service_type(
                "brideServiceType",
                form.bride_service_type.as_deref(),
                &mut warnings,
            );
            if category == ServiceCategory::SemiBridal {
                check_service_type(
                    "trialServiceType",
                    form.trial_service_type.as_deref(),
                    category,
                    &mut warnings,
                );
                if Flag::from_value(form.needs_trial.as_ref()).is_yes() {
                    warnings.push(SelectionWarning::FieldOutsideCategory {
                        field: "needsTrial",
                        category,
                    });
                }
            } else if Flag::from_value(form.needs_trial.as_ref()).is_yes() {
                check_known_service_type(
                    "trialServiceType",
                    form.trial_service_type.as_deref(),
                    &mut warnings,
                );
            }
            if !Flag::from_value(form.has_party_members.as_ref()).is_yes() {
                push_nonzero_counts(form.bridal_count_fields(), category, &mut warnings);
            }
            push_nonzero_counts(form.non_bridal_count_fields(), category, &mut warnings);
            if Flag::from_value(form.non_bridal_everyone_both.as_ref()).is_yes() {
                warnings.push(SelectionWarning::FieldOutsideCategory {
                    field: "nonBridalEveryoneBoth",
                    category,
                });
            }
        }
    }

    warnings
}

fn check_region(form: &BookingForm, warnings: &mut Vec<SelectionWarning>) {
    let region = form.region.as_deref();
    let sub_region = form.sub_region.as_deref().filter(|s| !s.is_empty());

    match region {
        Some(OUTSIDE_GTA) => {
            if let Some(raw) = sub_region {
                if SubRegion::parse(raw).is_none() {
                    warnings.push(SelectionWarning::UnknownSubRegion(raw.to_string()));
                }
            }
        }
        other => {
            if let Some(raw) = other.filter(|r| *r != TORONTO_GTA) {
                warnings.push(SelectionWarning::UnknownRegion(raw.to_string()));
            }
            if let Some(raw) = sub_region {
                warnings.push(SelectionWarning::SubRegionIgnored(raw.to_string()));
            }
        }
    }
}

/// A service type set while `category` never reads it.
fn check_service_type(
    field: &'static str,
    raw: Option<&str>,
    category: ServiceCategory,
    warnings: &mut Vec<SelectionWarning>,
) {
    if raw.is_some_and(|s| !s.trim().is_empty()) {
        warnings.push(SelectionWarning::FieldOutsideCategory { field, category });
    }
}

fn check_known_service_type(
    field: &'static str,
    raw: Option<&str>,
    warnings: &mut Vec<SelectionWarning>,
) {
    if let Some(value) = raw.filter(|s| !s.trim().is_empty()) {
        if normalize_service_type(Some(value)).is_none() {
            warnings.push(SelectionWarning::UnknownServiceType {
                field,
                value: value.to_string(),
            });
        }
    }
}

fn push_nonzero_counts<const N: usize>(
    fields: [(&'static str, Option<&Value>); N],
    category: ServiceCategory,
    warnings: &mut Vec<SelectionWarning>,
) {
    for (field, value) in fields {
        if coerce_count(value) > 0 {
            warnings.push(SelectionWarning::FieldOutsideCategory { field, category });
        }
    }
}

/// Null and clean non-negative integers, as numbers or digit strings. A
/// float such as `2.0` counts as whole.
fn is_whole_count(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => {
            n.as_u64().is_some()
                || n
                    .as_f64()
                    .is_some_and(|f| f.is_finite() && f >= 0.0 && f.fract() == 0.0)
        }
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || s.parse::<u32>().is_ok()
        }
        _ => false,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

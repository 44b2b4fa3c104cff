use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;

/// Kind of service a services business provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceSubtype {
    /// Annex III or V depending on Factor R.
    FactorR,
    /// Always annex IV.
    Specialized,
    /// Always annex V.
    Other,
}

impl ServiceSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FactorR => "factor-r",
            Self::Specialized => "specialized",
            Self::Other => "other",
        }
    }

    /// Parses a subtype name. Accepts the canonical names plus a few aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "factor-r" | "factor_r" | "ratio-based" | "ratio" => Some(Self::FactorR),
            "specialized" | "specialised" => Some(Self::Specialized),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Main activity of the business.
///
/// The service subtype only exists for [`Activity::Services`], so a commerce
/// business with a service subtype cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Commerce,
    Industry,
    Services(ServiceSubtype),
}

impl Activity {
    /// Builds an activity from free-form names, rejecting anything outside the
    /// known set instead of falling back to a default annex.
    ///
    /// # Errors
    ///
    /// * [`CalculationError::UnknownActivity`] for an unrecognised activity.
    /// * [`CalculationError::MissingServiceSubtype`] when `services` comes
    ///   without a subtype.
    /// * [`CalculationError::UnknownServiceSubtype`] for an unrecognised subtype.
    ///
    /// # Example
    ///
    /// ```
    /// use simples_core::{Activity, ServiceSubtype};
    ///
    /// let activity = Activity::parse("services", Some("specialized")).unwrap();
    /// assert_eq!(activity, Activity::Services(ServiceSubtype::Specialized));
    ///
    /// assert!(Activity::parse("farming", None).is_err());
    /// ```
    pub fn parse(
        activity: &str,
        service: Option<&str>,
    ) -> Result<Self, CalculationError> {
        let service = service.map(str::trim).filter(|s| !s.is_empty());

        match activity.trim().to_ascii_lowercase().as_str() {
            "commerce" | "trade" => Ok(Self::Commerce),
            "industry" => Ok(Self::Industry),
            "services" | "service" => {
                let subtype = service.ok_or(CalculationError::MissingServiceSubtype)?;
                ServiceSubtype::parse(subtype)
                    .map(Self::Services)
                    .ok_or_else(|| CalculationError::UnknownServiceSubtype(subtype.to_string()))
            }
            _ => Err(CalculationError::UnknownActivity(activity.to_string())),
        }
    }

    /// Whether classification needs a Factor R value.
    pub fn needs_factor_r(&self) -> bool {
        matches!(self, Self::Services(ServiceSubtype::FactorR))
    }
}

impl fmt::Display for Activity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Commerce => f.write_str("commerce"),
            Self::Industry => f.write_str("industry"),
            Self::Services(subtype) => write!(f, "services ({})", subtype.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_commerce_ignores_service() {
        let activity = Activity::parse("Commerce", Some("specialized")).unwrap();

        assert_eq!(activity, Activity::Commerce);
    }

    #[test]
    fn parse_industry() {
        assert_eq!(Activity::parse("industry", None).unwrap(), Activity::Industry);
    }

    #[test]
    fn parse_services_with_aliases() {
        assert_eq!(
            Activity::parse("services", Some("ratio-based")).unwrap(),
            Activity::Services(ServiceSubtype::FactorR)
        );
        assert_eq!(
            Activity::parse("SERVICES", Some(" Other ")).unwrap(),
            Activity::Services(ServiceSubtype::Other)
        );
    }

    #[test]
    fn parse_services_without_subtype_fails() {
        assert_eq!(
            Activity::parse("services", None),
            Err(CalculationError::MissingServiceSubtype)
        );
        assert_eq!(
            Activity::parse("services", Some("  ")),
            Err(CalculationError::MissingServiceSubtype)
        );
    }

    #[test]
    fn parse_unknown_activity_fails() {
        assert_eq!(
            Activity::parse("farming", None),
            Err(CalculationError::UnknownActivity("farming".to_string()))
        );
    }

    #[test]
    fn parse_unknown_subtype_fails() {
        assert_eq!(
            Activity::parse("services", Some("consulting")),
            Err(CalculationError::UnknownServiceSubtype("consulting".to_string()))
        );
    }

    #[test]
    fn only_factor_r_services_need_factor_r() {
        assert!(Activity::Services(ServiceSubtype::FactorR).needs_factor_r());
        assert!(!Activity::Services(ServiceSubtype::Other).needs_factor_r());
        assert!(!Activity::Commerce.needs_factor_r());
    }
}

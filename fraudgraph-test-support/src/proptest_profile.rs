//! Environment-driven sizing for property-test suites.
//!
//! Every suite reads the same variable so CI can shrink or grow the whole
//! workspace's property runs in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PBT_CASES_ENV_KEY: &str = "FRAUDGRAPH_PBT_CASES";

/// Case budget for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
}

impl PropertyProfile {
    /// Reads [`PBT_CASES_ENV_KEY`], falling back to `default_cases` when the
    /// variable is unset or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use fraudgraph_test_support::proptest_profile::PropertyProfile;
    ///
    /// let profile = PropertyProfile::from_env(64);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32) -> Self {
        Self::from_raw(env::var(PBT_CASES_ENV_KEY).ok().as_deref(), default_cases)
    }

    /// Builds a profile from an optional raw override.
    #[must_use]
    pub fn from_raw(raw: Option<&str>, default_cases: u32) -> Self {
        let cases = match raw.map(parse_cases) {
            None => default_cases,
            Some(Ok(cases)) => cases,
            Some(Err(reason)) => {
                ::tracing::warn!(
                    env = PBT_CASES_ENV_KEY,
                    raw = raw.unwrap_or_default(),
                    reason,
                    "ignoring invalid property-test case override",
                );
                default_cases
            }
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("cases must be a positive integer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unset(None, 32)]
    #[case::override_value(Some("256"), 256)]
    #[case::padded(Some(" 12 "), 12)]
    #[case::zero(Some("0"), 32)]
    #[case::garbage(Some("many"), 32)]
    fn resolves_case_count(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(PropertyProfile::from_raw(raw, 32).cases(), expected);
    }
}

use strum_macros::Display;

/// Human-readable bucket for a composite score. Boundaries are inclusive on
/// the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Tier {
    #[strum(serialize = "struggling")]
    Struggling,
    #[strum(serialize = "below average")]
    BelowAverage,
    #[strum(serialize = "average")]
    Average,
    #[strum(serialize = "above average")]
    AboveAverage,
    #[strum(serialize = "very strong")]
    VeryStrong,
    #[strum(serialize = "exceptional")]
    Exceptional,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 95.0 => Tier::Struggling,
            s if s < 105.0 => Tier::BelowAverage,
            s if s < 125.0 => Tier::Average,
            s if s < 150.0 => Tier::AboveAverage,
            s if s < 180.0 => Tier::VeryStrong,
            _ => Tier::Exceptional,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(94.9, Tier::Struggling)]
    #[case(95.0, Tier::BelowAverage)]
    #[case(104.9, Tier::BelowAverage)]
    #[case(105.0, Tier::Average)]
    #[case(124.9, Tier::Average)]
    #[case(125.0, Tier::AboveAverage)]
    #[case(149.9, Tier::AboveAverage)]
    #[case(150.0, Tier::VeryStrong)]
    #[case(179.9, Tier::VeryStrong)]
    #[case(180.0, Tier::Exceptional)]
    fn boundaries_are_inclusive_on_the_lower_bound(#[case] score: f64, #[case] expected: Tier) {
        assert_eq!(Tier::from_score(score), expected);
    }

    #[test]
    fn labels_render() {
        assert_eq!(Tier::Struggling.to_string(), "struggling");
        assert_eq!(Tier::Exceptional.to_string(), "exceptional");
    }
}

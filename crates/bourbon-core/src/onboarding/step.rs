//! Wizard steps and their page layout.

use serde::{Deserialize, Serialize};

/// Onboarding wizard step, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    /// Body weight.
    Weight,
    /// Height.
    Height,
    /// Gender and age.
    GenderAndAge,
    /// BMI summary. Informational only.
    BmiScale,
    /// Goal and optional target weight.
    GoalAndAim,
    /// Training preference.
    Training,
    /// Everyday activity level.
    ActivityLevel,
    /// Diet style.
    Diet,
    /// Meals per day.
    MealFrequency,
    /// Submission in progress. Terminal.
    FetchData,
}

/// Steps grouped into the pages shown together.
pub const PAGES: [&[Step]; 7] = [
    &[Step::Weight],
    &[Step::Height],
    &[Step::GenderAndAge],
    &[Step::BmiScale],
    &[Step::GoalAndAim, Step::Training, Step::ActivityLevel],
    &[Step::Diet, Step::MealFrequency],
    &[Step::FetchData],
];

impl Step {
    /// Every step, in order.
    pub const ALL: [Self; 10] = [
        Self::Weight,
        Self::Height,
        Self::GenderAndAge,
        Self::BmiScale,
        Self::GoalAndAim,
        Self::Training,
        Self::ActivityLevel,
        Self::Diet,
        Self::MealFrequency,
        Self::FetchData,
    ];

    /// Zero-based position in [`Step::ALL`].
    pub const fn order(self) -> usize {
        self as usize
    }

    /// Immediate successor. `None` for the terminal step.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.order() + 1).copied()
    }

    /// Immediate predecessor. `None` for the first step.
    pub fn previous(self) -> Option<Self> {
        self.order().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Index into [`PAGES`] of the page holding this step.
    pub const fn page(self) -> usize {
        match self {
            Self::Weight => 0,
            Self::Height => 1,
            Self::GenderAndAge => 2,
            Self::BmiScale => 3,
            Self::GoalAndAim | Self::Training | Self::ActivityLevel => 4,
            Self::Diet | Self::MealFrequency => 5,
            Self::FetchData => 6,
        }
    }

    /// Returns true for the step after which no input is accepted.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::FetchData)
    }
}

/// Steps on `page`, empty if out of range.
pub fn page_steps(page: usize) -> &'static [Step] {
    PAGES.get(page).copied().unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cover_every_step_in_order() {
        let flattened: Vec<Step> = PAGES.iter().flat_map(|page| page.iter().copied()).collect();
        assert_eq!(flattened, Step::ALL.to_vec());
    }

    #[test]
    fn page_agrees_with_table() {
        for (index, page) in PAGES.iter().enumerate() {
            for step in *page {
                assert_eq!(step.page(), index, "{step:?}");
            }
        }
    }

    #[test]
    fn order_links() {
        assert_eq!(Step::Weight.previous(), None);
        assert_eq!(Step::Weight.next(), Some(Step::Height));
        assert_eq!(Step::FetchData.next(), None);
        for step in Step::ALL.iter().skip(1) {
            assert_eq!(step.previous().and_then(Step::next), Some(*step));
        }
    }

    #[test]
    fn out_of_range_page_is_empty() {
        assert!(page_steps(PAGES.len()).is_empty());
    }
}

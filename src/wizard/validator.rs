use super::draft::Draft;
use std::fmt;

/// Wizard position. Always one of the three steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    One,
    Two,
    Three,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::One => 1,
            Step::Two => 2,
            Step::Three => 3,
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::One => Some(Step::Two),
            Step::Two => Some(Step::Three),
            Step::Three => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::One => None,
            Step::Two => Some(Step::One),
            Step::Three => Some(Step::Two),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.number())
    }
}

/// How much step 1 demands before the user may move on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Step 1 always advances
    #[default]
    Lenient,
    /// Step 1 needs a property type and a furnishing state
    Strict,
}

/// A required field that is still unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    PropertyType,
    Furnishing,
    SquareFeet,
    Price,
    Description,
    ListingType,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::PropertyType => "propertyType",
            MissingField::Furnishing => "furnishing",
            MissingField::SquareFeet => "squareFeet",
            MissingField::Price => "price",
            MissingField::Description => "description",
            MissingField::ListingType => "type",
        };
        f.write_str(name)
    }
}

/// Decides whether a draft snapshot satisfies a step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepValidator {
    policy: ValidationPolicy,
}

impl StepValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Fields the step still needs. Empty means the step may advance.
    pub fn missing(&self, step: Step, draft: &Draft) -> Vec<MissingField> {
        let mut missing = Vec::new();

        match step {
            Step::One => {
                if self.policy == ValidationPolicy::Strict {
                    if draft.property_type.is_none() {
                        missing.push(MissingField::PropertyType);
                    }
                    if draft.furnishing.is_none() {
                        missing.push(MissingField::Furnishing);
                    }
                }
            }
            // Zero images is a legal submission.
            Step::Two => {}
            Step::Three => {
                if draft.square_feet == 0 {
                    missing.push(MissingField::SquareFeet);
                }
                if draft.price == 0.0 || draft.price.is_nan() {
                    missing.push(MissingField::Price);
                }
                if draft.description.is_empty() {
                    missing.push(MissingField::Description);
                }
                if draft.listing_type.is_none() {
                    missing.push(MissingField::ListingType);
                }
            }
        }

        missing
    }

    pub fn allows(&self, step: Step, draft: &Draft) -> bool {
        self.missing(step, draft).is_empty()
    }
}

use thiserror::Error;

use crate::modules::ai::schema::ItemDescription;
use crate::modules::listing::model::ListingDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Photo,
    AiAssist,
    Details,
    Review,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please upload a photo of the item")]
    MissingPhoto,
    #[error("Please fill in all item details")]
    IncompleteDetails,
    #[error("Already at the first step")]
    AtFirstStep,
    #[error("Already at the review step")]
    AtLastStep,
    #[error("Listing can only be submitted from the review step")]
    NotAtReview,
}

/// Linear listing wizard: Photo -> AiAssist -> Details -> Review. Forward
/// movement is gated by the current step's required fields; backward
/// movement is always allowed except from the first step. Submission is
/// terminal and resets the wizard.
#[derive(Debug, Default)]
pub struct ListingWizard {
    step: WizardStep,
    draft: ListingDraft,
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Photo
    }
}

impl ListingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Every field stays editable at every step, including after AI assist.
    pub fn draft_mut(&mut self) -> &mut ListingDraft {
        &mut self.draft
    }

    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let next = match self.step {
            WizardStep::Photo => {
                if self.draft.image.is_none() {
                    return Err(WizardError::MissingPhoto);
                }
                WizardStep::AiAssist
            }
            // AI assist is optional; it may be skipped untouched.
            WizardStep::AiAssist => WizardStep::Details,
            WizardStep::Details => {
                if !self.draft.details_complete() {
                    return Err(WizardError::IncompleteDetails);
                }
                WizardStep::Review
            }
            WizardStep::Review => return Err(WizardError::AtLastStep),
        };

        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = match self.step {
            WizardStep::Photo => return Err(WizardError::AtFirstStep),
            WizardStep::AiAssist => WizardStep::Photo,
            WizardStep::Details => WizardStep::AiAssist,
            WizardStep::Review => WizardStep::Details,
        };

        self.step = previous;
        Ok(previous)
    }

    /// Populates draft fields from a generated description, coercing the
    /// untrusted category/condition through the fixed enums. Nothing is
    /// locked; the user may edit any populated value afterwards.
    pub fn apply_description(&mut self, generated: &ItemDescription) {
        self.draft.apply_description(generated);
    }

    /// Terminal transition. Yields the completed draft for the caller to
    /// persist (a single create call) and resets the wizard to a fresh
    /// first step.
    pub fn submit(&mut self) -> Result<ListingDraft, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview);
        }

        let submitted = std::mem::take(&mut self.draft);
        self.step = WizardStep::Photo;
        Ok(submitted)
    }
}

//! Hero carousel slides.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::menu::describe_errors;
use crate::types::DbId;

/// A slide in the home-page hero carousel, displayed by ascending `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: DbId,
    pub src: String,
    pub alt: String,
    pub attribution: Option<String>,
    pub position: i32,
}

/// Unvalidated slide submitted by the admin UI.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeroSlideInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub src: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub alt: String,
    #[serde(default)]
    pub attribution: Option<String>,
}

/// Validated slide ready for insertion. The store assigns `id` and `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroSlide {
    pub src: String,
    pub alt: String,
    pub attribution: Option<String>,
}

impl HeroSlideInput {
    pub fn into_new_slide(self) -> Result<NewHeroSlide, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(describe_errors(&e)))?;
        Ok(NewHeroSlide {
            src: self.src,
            alt: self.alt,
            attribution: self.attribution.filter(|a| !a.is_empty()),
        })
    }
}

/// Check that `ordered` names every current slide exactly once.
pub fn check_reorder(current: &[HeroSlide], ordered: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(ordered.len());
    for id in ordered {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "slide {id} appears more than once"
            )));
        }
    }

    let existing: HashSet<DbId> = current.iter().map(|s| s.id).collect();
    if let Some(unknown) = ordered.iter().find(|id| !existing.contains(id)) {
        return Err(CoreError::Validation(format!("unknown slide {unknown}")));
    }
    if seen.len() != existing.len() {
        return Err(CoreError::Validation(format!(
            "expected {} slide ids, got {}",
            existing.len(),
            seen.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn slide(id: DbId, position: i32) -> HeroSlide {
        HeroSlide {
            id,
            src: format!("/images/hero-{id}.webp"),
            alt: format!("Slide {id}"),
            attribution: None,
            position,
        }
    }

    #[test]
    fn empty_alt_is_rejected() {
        let input = HeroSlideInput {
            src: "/images/a.webp".into(),
            alt: String::new(),
            attribution: None,
        };
        assert_matches!(input.into_new_slide(), Err(CoreError::Validation(msg)) if msg.contains("alt"));
    }

    #[test]
    fn empty_attribution_becomes_none() {
        let input = HeroSlideInput {
            src: "/images/a.webp".into(),
            alt: "Fresh empanadas".into(),
            attribution: Some(String::new()),
        };
        assert_eq!(input.into_new_slide().unwrap().attribution, None);
    }

    #[test]
    fn reorder_accepts_permutation() {
        let current = vec![slide(1, 0), slide(2, 1), slide(3, 2)];
        assert!(check_reorder(&current, &[3, 1, 2]).is_ok());
    }

    #[test]
    fn reorder_rejects_missing_ids() {
        let current = vec![slide(1, 0), slide(2, 1)];
        assert_matches!(check_reorder(&current, &[2]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reorder_rejects_duplicates() {
        let current = vec![slide(1, 0), slide(2, 1)];
        assert_matches!(
            check_reorder(&current, &[1, 1]),
            Err(CoreError::Validation(msg)) if msg.contains("more than once")
        );
    }

    #[test]
    fn reorder_rejects_unknown_ids() {
        let current = vec![slide(1, 0)];
        assert_matches!(
            check_reorder(&current, &[9]),
            Err(CoreError::Validation(msg)) if msg.contains("unknown slide 9")
        );
    }
}

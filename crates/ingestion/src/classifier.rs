//! Payload classification.
//!
//! Storyblok webhook bodies are flat JSON objects without a type tag. The
//! domain is inferred from which disambiguating key is present, tested in
//! [`ActionCatalog::DOMAIN_PRIORITY`] order, and only then is the `action`
//! string resolved against that domain's table.

use serde_json::{Map, Value};

use crate::{Action, ActionCatalog, ClassificationError, Domain, SpaceId};

/// A confirmed `(Domain, Action)` pair.
///
/// Can only be obtained from the classifier or derived from an [`Action`],
/// so the domain and action always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    domain: Domain,
    action: Action,
}

impl Classification {
    /// Builds the classification implied by `action`.
    pub fn from_action(action: Action) -> Self {
        Self {
            domain: action.domain(),
            action,
        }
    }

    pub fn domain(self) -> Domain {
        self.domain
    }

    pub fn action(self) -> Action {
        self.action
    }
}

/// Returns `true` when `key` exists with a non-null value.
pub(crate) fn has_key(body: &Map<String, Value>, key: &str) -> bool {
    body.get(key).is_some_and(|v| !v.is_null())
}

/// Detects the domain of `body` from its disambiguating keys.
pub fn detect_domain(body: &Map<String, Value>) -> Option<Domain> {
    ActionCatalog::DOMAIN_PRIORITY
        .into_iter()
        .find(|domain| has_key(body, domain.disambiguating_key()))
}

/// Maps decoded webhook bodies to a [`Classification`].
#[derive(Debug, Clone, Copy)]
pub struct PayloadClassifier {
    space_id: SpaceId,
}

impl PayloadClassifier {
    /// Creates a classifier accepting payloads for `space_id` only.
    pub fn new(space_id: SpaceId) -> Self {
        Self { space_id }
    }

    /// Classifies `body`, reporting why it could not be classified.
    ///
    /// Pure: the same body always yields the same result.
    ///
    /// # Errors
    ///
    /// - [`ClassificationError::MissingBaseStructure`] — `text` or `action` is
    ///   not a string, or `space_id` is not an integer.
    /// - [`ClassificationError::SpaceMismatch`] — `space_id` is another space.
    /// - [`ClassificationError::UnknownAction`] — the domain was detected but
    ///   its table does not know the `action` literal.
    /// - [`ClassificationError::NoDomainMatched`] — no disambiguating key.
    pub fn try_classify(
        &self,
        body: &Map<String, Value>,
    ) -> Result<Classification, ClassificationError> {
        let text = body.get("text").and_then(Value::as_str);
        let action = body.get("action").and_then(Value::as_str);
        let space_id = match body.get("space_id") {
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Some(n),
            _ => None,
        };

        let (Some(_), Some(action), Some(space_id)) = (text, action, space_id) else {
            return Err(ClassificationError::MissingBaseStructure);
        };

        if space_id.as_u64() != Some(self.space_id.as_u64()) {
            return Err(ClassificationError::SpaceMismatch {
                provided: space_id.clone(),
                expected: self.space_id.as_u64(),
            });
        }

        let domain = detect_domain(body).ok_or(ClassificationError::NoDomainMatched)?;

        let action = ActionCatalog::lookup(domain, action).ok_or_else(|| {
            ClassificationError::UnknownAction {
                domain,
                action: action.to_string(),
            }
        })?;

        tracing::debug!(%domain, %action, "Storyblok webhook: classified payload");

        Ok(Classification { domain, action })
    }

    /// Classifies `body`, logging and discarding the reason on failure.
    pub fn classify(&self, body: &Map<String, Value>) -> Option<Classification> {
        self.try_classify(body)
            .map_err(|err| err.log(body))
            .ok()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

//! Response validation rules.
//!
//! A [`ValidationRule`] is a predicate over the head of a received response
//! (status code and headers). Rules are attached to a [`Request`](crate::Request)
//! before dispatch and evaluated by the transport in attachment order; the first
//! rule that fails becomes the outcome of the call.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

use crate::{Error, Response, Result};

/// Status line and headers of a received response.
///
/// This is all a validation rule gets to see: the body is out of reach.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHead<'a> {
    status: u16,
    headers: &'a HashMap<String, String>,
}

impl<'a> ResponseHead<'a> {
    /// Create a response head from its parts.
    #[must_use]
    pub const fn new(status: u16, headers: &'a HashMap<String, String>) -> Self {
        Self { status, headers }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &'a HashMap<String, String> {
        self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl<'a> From<&'a Response> for ResponseHead<'a> {
    fn from(response: &'a Response) -> Self {
        Self::new(response.status(), response.headers())
    }
}

/// A set of acceptable status codes.
///
/// Built from a single code, an array or vector of codes, or a range:
///
/// ```
/// use courier_core::StatusCodes;
///
/// assert!(StatusCodes::from(200..=299).contains(204));
/// assert!(StatusCodes::from(200..300).contains(299));
/// assert!(!StatusCodes::from([200, 201]).contains(204));
/// assert!(StatusCodes::from(404).contains(404));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodes {
    ranges: Vec<RangeInclusive<u16>>,
}

impl StatusCodes {
    /// The 2xx range.
    #[must_use]
    pub fn success() -> Self {
        Self::from(200..=299)
    }

    /// Returns `true` if `code` is acceptable.
    #[must_use]
    pub fn contains(&self, code: u16) -> bool {
        self.ranges.iter().any(|range| range.contains(&code))
    }
}

impl From<RangeInclusive<u16>> for StatusCodes {
    fn from(range: RangeInclusive<u16>) -> Self {
        Self {
            ranges: vec![range],
        }
    }
}

impl From<Range<u16>> for StatusCodes {
    fn from(range: Range<u16>) -> Self {
        let ranges = if range.is_empty() {
            Vec::new()
        } else {
            vec![range.start..=range.end - 1]
        };
        Self { ranges }
    }
}

impl From<u16> for StatusCodes {
    fn from(code: u16) -> Self {
        Self::from(code..=code)
    }
}

impl From<Vec<u16>> for StatusCodes {
    fn from(codes: Vec<u16>) -> Self {
        codes.into_iter().collect()
    }
}

impl From<&[u16]> for StatusCodes {
    fn from(codes: &[u16]) -> Self {
        codes.iter().copied().collect()
    }
}

impl<const N: usize> From<[u16; N]> for StatusCodes {
    fn from(codes: [u16; N]) -> Self {
        codes.into_iter().collect()
    }
}

impl FromIterator<u16> for StatusCodes {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().map(|code| code..=code).collect(),
        }
    }
}

type Check = dyn Fn(ResponseHead<'_>) -> Result<()> + Send + Sync;

/// A predicate over a received response head.
///
/// Succeeds silently or fails with a validation [`Error`].
#[derive(Clone)]
pub struct ValidationRule {
    name: &'static str,
    check: Arc<Check>,
}

impl ValidationRule {
    /// Create a rule from a closure.
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(ResponseHead<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Rule accepting only the given status codes.
    ///
    /// Fails with [`Error::UnacceptableStatusCode`] carrying the received code.
    pub fn status(codes: impl Into<StatusCodes>) -> Self {
        let codes = codes.into();
        Self::new("status", move |head| {
            if codes.contains(head.status()) {
                Ok(())
            } else {
                Err(Error::unacceptable_status_code(head.status()))
            }
        })
    }

    /// Rule requiring the `Content-Type` header to start with `expected`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn content_type(expected: impl Into<String>) -> Self {
        let expected = expected.into();
        Self::new("content-type", move |head| {
            let actual = head.header("content-type");
            let matches = actual.is_some_and(|value| {
                value
                    .split(';')
                    .next()
                    .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(&expected))
            });
            if matches {
                Ok(())
            } else {
                Err(Error::UnacceptableContentType {
                    expected: expected.clone(),
                    actual: actual.map(str::to_string),
                })
            }
        })
    }

    /// Short name of the rule, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the rule against a response head.
    pub fn check(&self, head: ResponseHead<'_>) -> Result<()> {
        (self.check)(head)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only sequence of validation rules.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    rules: Vec<ValidationRule>,
}

impl Validations {
    /// Append a rule at the end of the sequence.
    pub fn push(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// Rules in attachment order.
    #[must_use]
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Number of attached rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in attachment order, stopping at the first failure.
    pub fn check(&self, head: ResponseHead<'_>) -> Result<()> {
        self.rules.iter().try_for_each(|rule| rule.check(head))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert2::{check, let_assert};

    use super::*;

    fn head(status: u16, headers: &HashMap<String, String>) -> ResponseHead<'_> {
        ResponseHead::new(status, headers)
    }

    #[test]
    fn status_rule_rejects_codes_outside_the_set() {
        let rule = ValidationRule::status(200..=299);
        let headers = HashMap::new();

        for code in [100, 199, 300, 301, 401, 404, 500, 503] {
            let_assert!(Err(err) = rule.check(head(code, &headers)));
            check!(err == Error::unacceptable_status_code(code));
        }
    }

    #[test]
    fn status_rule_accepts_codes_in_the_set() {
        let rule = ValidationRule::status(200..=299);
        let headers = HashMap::new();

        for code in 200..=299 {
            check!(rule.check(head(code, &headers)).is_ok());
        }
    }

    #[test]
    fn status_codes_from_list() {
        let codes = StatusCodes::from([200, 299]);
        check!(codes.contains(200));
        check!(codes.contains(299));
        check!(!codes.contains(250));
    }

    #[test]
    fn status_codes_from_empty_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let codes = StatusCodes::from(300..200);
        check!(!codes.contains(200));
        check!(!codes.contains(300));
    }

    #[test]
    fn content_type_rule() {
        let rule = ValidationRule::content_type("application/json");

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );
        check!(rule.check(head(200, &headers)).is_ok());

        headers.insert("Content-Type".to_string(), "text/html".to_string());
        let_assert!(Err(Error::UnacceptableContentType { actual, .. }) = rule.check(head(200, &headers)));
        check!(actual.as_deref() == Some("text/html"));

        let_assert!(
            Err(Error::UnacceptableContentType { actual: None, .. }) =
                rule.check(head(200, &HashMap::new()))
        );
    }

    #[test]
    fn validations_stop_at_first_failure() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evaluated);

        let mut validations = Validations::default();
        validations.push(ValidationRule::status(200));
        validations.push(ValidationRule::new("count", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        let headers = HashMap::new();
        let_assert!(Err(err) = validations.check(head(500, &headers)));
        check!(err.status_code() == Some(500));
        check!(evaluated.load(Ordering::SeqCst) == 0);

        check!(validations.check(head(200, &headers)).is_ok());
        check!(evaluated.load(Ordering::SeqCst) == 1);
    }

    #[test]
    fn validations_run_in_attachment_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let journaling = |name: &'static str| {
            let journal = Arc::clone(&journal);
            ValidationRule::new(name, move |_| {
                journal.lock().expect("lock").push(name);
                Ok(())
            })
        };

        let mut validations = Validations::default();
        validations.push(journaling("first"));
        validations.push(journaling("second"));
        validations.push(ValidationRule::status(201));
        validations.push(journaling("after-status"));

        let headers = HashMap::new();
        let_assert!(Err(err) = validations.check(head(200, &headers)));
        check!(err.status_code() == Some(200));
        check!(*journal.lock().expect("lock") == ["first", "second"]);

        journal.lock().expect("lock").clear();
        check!(validations.check(head(201, &headers)).is_ok());
        check!(*journal.lock().expect("lock") == ["first", "second", "after-status"]);
        check!(validations.len() == 4);
    }
}

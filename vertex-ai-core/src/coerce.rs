//! # Request Coercion
//!
//! Facade methods accept either a fully formed request record or a set of
//! flattened convenience fields, never both. [`coerce`] enforces that
//! precondition and produces the canonical request the rest of the pipeline
//! operates on.

use crate::error::Error;

/// Builds the canonical request from the caller's inputs.
///
/// `any_flattened` must be true when at least one flattened field was
/// supplied; `apply` overwrites exactly the supplied fields on the record.
/// Supplying both a request and flattened fields is a caller error and fails
/// before any I/O.
pub fn coerce<R>(
    request: Option<R>,
    any_flattened: bool,
    apply: impl FnOnce(&mut R),
) -> Result<R, Error>
where
    R: Clone + Default,
{
    if request.is_some() && any_flattened {
        return Err(Error::invalid_argument(
            "cannot pass both a full request and individual request fields",
        ));
    }

    let mut canonical = request.unwrap_or_default();
    apply(&mut canonical);
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct FakeRequest {
        parent: String,
        page_size: i32,
    }

    #[test]
    fn full_request_passes_through() {
        let request = FakeRequest {
            parent: "projects/p".into(),
            page_size: 7,
        };
        let coerced = coerce(Some(request.clone()), false, |_| {}).unwrap();
        assert_eq!(coerced, request);
    }

    #[test]
    fn flattened_fields_build_a_request() {
        let coerced = coerce::<FakeRequest>(None, true, |r| {
            r.parent = "projects/p".into();
        })
        .unwrap();
        assert_eq!(coerced.parent, "projects/p");
        assert_eq!(coerced.page_size, 0);
    }

    #[test]
    fn mixing_request_and_flattened_fields_is_rejected() {
        let request = FakeRequest {
            parent: "projects/p".into(),
            page_size: 7,
        };
        let err = coerce(Some(request), true, |r: &mut FakeRequest| {
            r.parent = "projects/other".into();
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn no_inputs_yield_the_default_request() {
        let coerced = coerce::<FakeRequest>(None, false, |_| {}).unwrap();
        assert_eq!(coerced, FakeRequest::default());
    }
}

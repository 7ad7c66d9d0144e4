use validator::Validate;

use crate::errors::FormErrors;

/// Runs the declarative constraints of `payload` and turns any violations
/// into form errors keyed by the posted field names.
pub fn validate_payload<T: Validate>(payload: &T, form_name: fn(&str) -> &'static str) -> Result<(), FormErrors> {
    payload
        .validate()
        .map_err(|err| FormErrors::from_validation(&err, form_name))
}

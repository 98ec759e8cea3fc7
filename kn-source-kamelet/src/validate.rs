use crate::error::{Error, Result};
use kamelet::{Endpoint, Kamelet};

/// Check that `endpoint` sets every property `kamelet` declares as required.
///
/// Only presence is checked, values are not validated against the definition.
pub fn verify_properties(kamelet: &Kamelet, endpoint: &Endpoint) -> Result<()> {
    let required = kamelet.required_properties();
    if required.is_empty() {
        return Ok(());
    }

    let properties = endpoint.property_map()?;
    match required.iter().find(|property| !properties.contains_key(*property)) {
        Some(missing) => Err(Error::MissingRequiredProperty {
            property: missing.clone(),
            kamelet: kamelet.metadata.name.clone().unwrap_or_default(),
        }),
        None => Ok(()),
    }
}

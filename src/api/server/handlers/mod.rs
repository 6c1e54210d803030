pub mod hello;
pub mod route;
pub mod search;
pub mod walk;

use crate::error::Error;

fn require_field<'a>(value: &'a str, name: &str) -> Result<&'a str, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(value)
}

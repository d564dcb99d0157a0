pub mod link;
pub mod plant;
pub mod zone;

pub use link::Link;
pub use plant::Plant;
pub use zone::Zone;

use std::fmt;

use crate::Mw;
use crate::error::{ModelError, ModelResult};

/// Maximum length of a component identifier, in bytes.
pub const ID_MAX_LENGTH: usize = 32;

/// Location of a component built outside any document.
pub(crate) const ROOT: &str = "$";

/// Copies `id`, located at `path`, if it fits in [`ID_MAX_LENGTH`] bytes.
pub(crate) fn checked_id(id: &str, path: &str) -> ModelResult<String> {
    if id.len() > ID_MAX_LENGTH {
        return Err(ModelError::IdentifierTooLong {
            path: path.to_string(),
            id: id.to_string(),
            max: ID_MAX_LENGTH,
        });
    }
    Ok(id.to_string())
}

/// Writes per-timestep values as `a, b, c` with six decimals.
pub(crate) fn write_values(f: &mut fmt::Formatter<'_>, values: &[Mw]) -> fmt::Result {
    for (t, value) in values.iter().enumerate() {
        if t > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value:.6}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_length_limit() {
        assert!(checked_id(&"z".repeat(ID_MAX_LENGTH), "$.id").is_ok());
        let err = checked_id(&"z".repeat(ID_MAX_LENGTH + 1), "$.zones[2].id").unwrap_err();
        assert_eq!(
            err,
            ModelError::IdentifierTooLong {
                path: "$.zones[2].id".into(),
                id: "z".repeat(ID_MAX_LENGTH + 1),
                max: ID_MAX_LENGTH,
            }
        );
        assert!(err.to_string().starts_with("at `$.zones[2].id`: identifier"));
    }
}

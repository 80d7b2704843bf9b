use crate::error::CastError;
use crate::node::ConfigNode;
use crate::reference::TypeTag;

/// Convert a raw secret payload into the node its type tag declares.
///
/// Integers are strict base-10 `i64`: an optional sign followed by digits,
/// with no surrounding whitespace.
pub fn cast(payload: &str, target: TypeTag) -> Result<ConfigNode, CastError> {
    match target {
        TypeTag::String => Ok(ConfigNode::String(payload.to_string())),
        TypeTag::Integer => payload
            .parse::<i64>()
            .map(ConfigNode::Integer)
            .map_err(|e| CastError {
                payload: payload.to_string(),
                target,
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_identity() {
        assert_eq!(
            cast("  spaced\n", TypeTag::String).unwrap(),
            ConfigNode::string("  spaced\n")
        );
    }

    #[test]
    fn integer_accepts_sign() {
        assert_eq!(cast("-17", TypeTag::Integer).unwrap(), ConfigNode::Integer(-17));
        assert_eq!(cast("+5", TypeTag::Integer).unwrap(), ConfigNode::Integer(5));
    }

    #[test]
    fn integer_rejects_whitespace_and_fractions() {
        for bad in ["42\n", " 42", "4.2", "1e3", "", "0x10", "9223372036854775808"] {
            let err = cast(bad, TypeTag::Integer).unwrap_err();
            assert_eq!(err.payload, bad);
            assert_eq!(err.target, TypeTag::Integer);
        }
    }
}

use crate::field::FieldKind;
use std::time::Duration;

/// Conversion from a resolved raw string into a field's native type
pub trait Coerce: Sized {
    const KIND: FieldKind;

    /// Returns `None` when `raw` does not match the type's grammar
    fn coerce(raw: &str) -> Option<Self>;
}

impl Coerce for String {
    const KIND: FieldKind = FieldKind::String;

    fn coerce(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl Coerce for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn coerce(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl Coerce for Duration {
    const KIND: FieldKind = FieldKind::Duration;

    fn coerce(raw: &str) -> Option<Self> {
        humantime::parse_duration(raw).ok()
    }
}

macro_rules! impl_coerce_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Coerce for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn coerce(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_coerce_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

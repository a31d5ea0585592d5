/// converts a number to a string with thousands separator
#[macro_export]
macro_rules! fmt_num {
    ($num:expr) => {
        $crate::num_format::ToFormattedString::to_formatted_string(&$num, &$crate::num_format::Locale::en)
    };
}

#[cfg(debug_assertions)]
pub fn ty_name<T: ?Sized>(name: &'static str) -> &'static str {
    let expected_short_name = short_type_name::<T>();
    debug_assert_eq!(name, expected_short_name);
    expected_short_name
}
#[cfg(not(debug_assertions))]
pub fn ty_name<T: ?Sized>(name: &'static str) -> &'static str {
    name
}

/// Strips module path and generic arguments, `pcq_core::core::queue::BoundedQueue<i32>` becomes `BoundedQueue`
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let no_generics = full.split('<').next().unwrap_or(full);
    no_generics.rsplit("::").next().unwrap_or("Unknown")
}

/// Will endure that the short name of Self is matching the name of struct, resolved via [Self] argument.
/// This prevents invalid names in Debug/Display output after refactoring without performance penalty at run time.
/// Will panic in debug build only if the name is not matching and always resolves to the literal name in release build.
#[macro_export]
macro_rules! asserted_short_name {
    ($name:literal, $ty:ty) => {
        $crate::core::macros::ty_name::<$ty>($name)
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::BoundedQueue;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<BoundedQueue<i32>>(), "BoundedQueue");
        assert_eq!(short_type_name::<i32>(), "i32");
        assert_eq!(asserted_short_name!("BoundedQueue", BoundedQueue<u8>), "BoundedQueue");
    }
}

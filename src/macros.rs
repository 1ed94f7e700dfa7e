//! macros used across e6finder

/// implement [`Validate`](crate::config::validate::Validate) by checking each listed field
/// against a predicate
///
/// # Examples
///
/// ```ignore
/// validator! { HttpConfig,
///     timeout => |v: &u64| *v > 0,
///         "must be greater than 0";
/// }
/// ```
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl $crate::config::validate::Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if !($requirement)(&self.$field) {
                        errors.push(format!("{}: {}", stringify!($field), $err_msg));
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// validate nested config sections, prefixing their errors with the section name
#[macro_export]
macro_rules! validate_nested {
    ($errors:ident, $self:ident, $($field:ident),* $(,)?) => {
        $(
            if let Err(nested_errors) = $crate::config::validate::Validate::validate(&$self.$field) {
                for err in nested_errors {
                    $errors.push(format!("{}.{}", stringify!($field), err));
                }
            }
        )*
    };
}

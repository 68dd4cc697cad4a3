//! Static attribute-name token tables.

/// Declare a struct of `&'static str` tokens and a static instance of it.
///
/// ```
/// newton_schema_core::declare_public_tokens!(ExampleTokens, EXAMPLE_TOKENS, [
///     margin: "ext:margin",
///     gap: "ext:gap"
/// ]);
///
/// assert_eq!(EXAMPLE_TOKENS.margin, "ext:margin");
/// assert_eq!(EXAMPLE_TOKENS.all(), ["ext:margin", "ext:gap"]);
/// ```
#[macro_export]
macro_rules! declare_public_tokens {
    ($struct:ident, $static:ident, [$($name:ident: $value:expr),* $(,)?]) => {
        pub struct $struct {
            $(pub $name: &'static str,)*
        }

        impl $struct {
            /// Every token in declaration order.
            pub fn all(&self) -> Vec<&'static str> {
                vec![$(self.$name),*]
            }
        }

        pub static $static: $struct = $struct {
            $($name: $value,)*
        };
    };
}
